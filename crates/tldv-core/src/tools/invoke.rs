//! Running the selected downloader against a media source.

use std::path::Path;
use std::process::Stdio;
use std::time::Duration;

use super::DownloaderTool;
use crate::error::DownloadError;

/// Runs `tool` to download `source_url` into `output_file`; returns the file size.
///
/// Tool output goes straight to the terminal. Success requires exit code 0 and
/// `output_file` present afterwards. On timeout the child is killed.
pub async fn run_tool(
    tool: &DownloaderTool,
    source_url: &str,
    output_file: &Path,
    timeout: Duration,
) -> Result<u64, DownloadError> {
    let mut child = tokio::process::Command::new(&tool.program)
        .args(tool.args(source_url, output_file))
        .stdin(Stdio::null())
        .kill_on_drop(true)
        .spawn()
        .map_err(|e| DownloadError::io(format!("spawn {}", tool.name()), e))?;

    tracing::debug!(tool = %tool.name(), pid = ?child.id(), output = %output_file.display(), "download started");

    let status = match tokio::time::timeout(timeout, child.wait()).await {
        Ok(res) => res.map_err(|e| DownloadError::io(format!("wait for {}", tool.name()), e))?,
        Err(_) => {
            if let Err(e) = child.kill().await {
                tracing::warn!(tool = %tool.name(), "could not kill timed-out download: {}", e);
            }
            return Err(DownloadError::DownloadTimeout(timeout));
        }
    };

    if !status.success() {
        return Err(DownloadError::DownloadProcessFailed {
            code: status.code(),
        });
    }

    match tokio::fs::metadata(output_file).await {
        Ok(meta) => Ok(meta.len()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(DownloadError::DownloadFileMissing(output_file.to_path_buf()))
        }
        Err(e) => Err(DownloadError::io(
            format!("stat {}", output_file.display()),
            e,
        )),
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::config::ToolsConfig;
    use tempfile::tempdir;

    fn fallback(program: &str) -> DownloaderTool {
        DownloaderTool::fallback(&ToolsConfig {
            fallback: program.to_string(),
            ..ToolsConfig::default()
        })
    }

    #[tokio::test]
    async fn nonzero_exit_reported() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("a.mp4");
        let err = run_tool(&fallback("false"), "src", &out, Duration::from_secs(5))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DownloadError::DownloadProcessFailed { code: Some(1) }
        ));
    }

    #[tokio::test]
    async fn success_without_file_is_missing() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("a.mp4");
        let err = run_tool(&fallback("true"), "src", &out, Duration::from_secs(5))
            .await
            .unwrap_err();
        match err {
            DownloadError::DownloadFileMissing(p) => assert_eq!(p, out),
            other => panic!("expected DownloadFileMissing, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn success_with_existing_file() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("a.mp4");
        std::fs::write(&out, b"0123456789").unwrap();
        let size = run_tool(&fallback("true"), "src", &out, Duration::from_secs(5))
            .await
            .unwrap();
        assert_eq!(size, 10);
    }

    #[tokio::test]
    async fn missing_program_is_io_error() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("a.mp4");
        let err = run_tool(
            &fallback("tldv-dl-test-no-such-program"),
            "src",
            &out,
            Duration::from_secs(5),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, DownloadError::Io { .. }));
    }
}
