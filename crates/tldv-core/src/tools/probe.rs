//! Availability probing: `<program> --version` with a timeout.

use std::path::Path;
use std::process::Stdio;
use std::time::Duration;

use super::DownloaderTool;
use crate::config::ToolsConfig;
use crate::error::DownloadError;

/// True if `program --version` exits 0 within `timeout`.
///
/// Spawn failure (not installed), a nonzero exit, or a timeout all count as unavailable.
pub async fn probe(program: &Path, timeout: Duration) -> bool {
    let child = tokio::process::Command::new(program)
        .arg("--version")
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .kill_on_drop(true)
        .spawn();
    let mut child = match child {
        Ok(c) => c,
        Err(e) => {
            tracing::debug!(program = %program.display(), "probe spawn failed: {}", e);
            return false;
        }
    };
    match tokio::time::timeout(timeout, child.wait()).await {
        Ok(Ok(status)) if status.success() => true,
        Ok(Ok(status)) => {
            tracing::debug!(program = %program.display(), %status, "probe exited unsuccessfully");
            false
        }
        Ok(Err(e)) => {
            tracing::debug!(program = %program.display(), "probe wait failed: {}", e);
            false
        }
        Err(_) => {
            tracing::debug!(program = %program.display(), "probe timed out");
            false
        }
    }
}

/// Returns the first available tool in priority order (primary, then fallback).
pub async fn select_tool(
    tools: &ToolsConfig,
    timeout: Duration,
) -> Result<DownloaderTool, DownloadError> {
    for tool in [DownloaderTool::primary(tools), DownloaderTool::fallback(tools)] {
        if probe(&tool.program, timeout).await {
            tracing::info!(tool = %tool.name(), kind = tool.kind.label(), "downloader available");
            return Ok(tool);
        }
        tracing::info!(tool = %tool.name(), kind = tool.kind.label(), "downloader not available");
    }
    Err(DownloadError::NoDownloaderAvailable {
        primary: tools.primary.clone(),
        fallback: tools.fallback.clone(),
    })
}
