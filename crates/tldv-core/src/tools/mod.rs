//! External downloader tools.
//!
//! Two programs are supported in fixed priority order: a segmented-stream
//! downloader (primary) and a general transcoder doing a stream copy (fallback).
//! Program names come from [`ToolsConfig`]; availability is probed at call time.

mod invoke;
mod probe;

pub use invoke::run_tool;
pub use probe::{probe, select_tool};

use crate::config::ToolsConfig;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolKind {
    Primary,
    Fallback,
}

impl ToolKind {
    pub fn label(self) -> &'static str {
        match self {
            ToolKind::Primary => "primary",
            ToolKind::Fallback => "fallback",
        }
    }
}

/// A downloader found by probing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloaderTool {
    pub kind: ToolKind,
    pub program: PathBuf,
    thread_count: u32,
    retry_count: u32,
}

impl DownloaderTool {
    pub fn primary(tools: &ToolsConfig) -> Self {
        Self {
            kind: ToolKind::Primary,
            program: PathBuf::from(&tools.primary),
            thread_count: tools.thread_count,
            retry_count: tools.retry_count,
        }
    }

    pub fn fallback(tools: &ToolsConfig) -> Self {
        Self {
            kind: ToolKind::Fallback,
            program: PathBuf::from(&tools.fallback),
            thread_count: tools.thread_count,
            retry_count: tools.retry_count,
        }
    }

    pub fn is_preferred(&self) -> bool {
        self.kind == ToolKind::Primary
    }

    /// Program name as shown to the user.
    pub fn name(&self) -> String {
        self.program
            .file_name()
            .unwrap_or(self.program.as_os_str())
            .to_string_lossy()
            .into_owned()
    }

    /// Arguments that download `source_url` into `output_file`.
    pub fn args(&self, source_url: &str, output_file: &Path) -> Vec<OsString> {
        match self.kind {
            ToolKind::Primary => {
                let stem = output_file.file_stem().unwrap_or_default();
                let dir = output_file.parent().unwrap_or_else(|| Path::new("."));
                vec![
                    source_url.into(),
                    "--save-name".into(),
                    stem.to_os_string(),
                    "--save-dir".into(),
                    dir.as_os_str().to_os_string(),
                    "--thread-count".into(),
                    self.thread_count.to_string().into(),
                    "--download-retry-count".into(),
                    self.retry_count.to_string().into(),
                    "--auto-select".into(),
                    "--no-log".into(),
                ]
            }
            ToolKind::Fallback => vec![
                "-i".into(),
                source_url.into(),
                "-c".into(),
                "copy".into(),
                "-y".into(),
                output_file.as_os_str().to_os_string(),
            ],
        }
    }
}
