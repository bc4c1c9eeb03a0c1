//! Domain error for a single meeting download.
//!
//! Every failure inside the per-video pipeline maps to one of these variants so
//! the orchestrator can report a distinguishing message before giving up.

use std::path::PathBuf;
use std::time::Duration;

/// Longest slice of an API error body kept for display.
const BODY_SNIPPET_MAX: usize = 200;

#[derive(Debug, thiserror::Error)]
pub enum DownloadError {
    #[error("could not extract meeting ID from URL: {url}")]
    InvalidMeetingId { url: String },

    #[error("unauthorized: invalid or expired auth token")]
    Unauthorized,

    #[error("meeting not found or not accessible")]
    NotFound,

    #[error("API error: HTTP {status}: {body}")]
    Api { status: u32, body: String },

    #[error("network error: {0}")]
    Network(#[from] curl::Error),

    #[error("invalid API response: {0}")]
    InvalidResponse(String),

    #[error("video source URL not found in meeting data")]
    MissingSourceUrl,

    #[error("neither {primary} nor {fallback} is available; install one of them")]
    NoDownloaderAvailable { primary: String, fallback: String },

    #[error("download timed out after {0:?}")]
    DownloadTimeout(Duration),

    #[error("download failed with {}", exit_label(.code))]
    DownloadProcessFailed { code: Option<i32> },

    #[error("download command succeeded but file not found: {}", .0.display())]
    DownloadFileMissing(PathBuf),

    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("task failed: {0}")]
    Task(String),
}

impl DownloadError {
    pub(crate) fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        DownloadError::Io {
            context: context.into(),
            source,
        }
    }

    /// Builds an `Api` error, keeping only the head of a possibly large body.
    pub(crate) fn api(status: u32, body: &[u8]) -> Self {
        let text = String::from_utf8_lossy(body);
        let text = text.trim();
        let body = match text.char_indices().nth(BODY_SNIPPET_MAX) {
            Some((cut, _)) => format!("{}...", &text[..cut]),
            None => text.to_string(),
        };
        DownloadError::Api { status, body }
    }
}

fn exit_label(code: &Option<i32>) -> String {
    match code {
        Some(c) => format!("return code: {c}"),
        None => "no return code (terminated by signal)".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_body_is_truncated() {
        let body = "x".repeat(500);
        match DownloadError::api(500, body.as_bytes()) {
            DownloadError::Api { status, body } => {
                assert_eq!(status, 500);
                assert_eq!(body.len(), BODY_SNIPPET_MAX + 3);
                assert!(body.ends_with("..."));
            }
            other => panic!("expected Api, got {other:?}"),
        }
    }

    #[test]
    fn process_failure_messages() {
        let e = DownloadError::DownloadProcessFailed { code: Some(2) };
        assert_eq!(e.to_string(), "download failed with return code: 2");
        let e = DownloadError::DownloadProcessFailed { code: None };
        assert!(e.to_string().contains("signal"));
    }

    #[test]
    fn timeout_message_in_seconds() {
        let e = DownloadError::DownloadTimeout(Duration::from_secs(3600));
        assert_eq!(e.to_string(), "download timed out after 3600s");
    }

    #[test]
    fn sub_second_timeout_message() {
        let e = DownloadError::DownloadTimeout(Duration::from_millis(200));
        assert_eq!(e.to_string(), "download timed out after 200ms");
    }
}
