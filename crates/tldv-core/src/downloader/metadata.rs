//! Metadata sidecar: the raw API payload next to the video.

use serde_json::Value;
use std::path::Path;

use crate::error::DownloadError;

/// Writes `raw` as pretty-printed UTF-8 JSON to `path`, replacing any existing file.
pub async fn save_metadata(raw: &Value, path: &Path) -> Result<(), DownloadError> {
    let json = serde_json::to_string_pretty(raw)
        .map_err(|e| DownloadError::InvalidResponse(format!("serialize metadata: {e}")))?;
    tokio::fs::write(path, json)
        .await
        .map_err(|e| DownloadError::io(format!("write {}", path.display()), e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    #[tokio::test]
    async fn writes_pretty_utf8() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("m.json");
        let raw = json!({ "meeting": { "name": "Réunion" }, "video": { "source": "s" } });
        save_metadata(&raw, &path).await.unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("Réunion"), "non-ASCII must not be escaped");
        assert!(text.contains("\n  \"meeting\""), "expected two-space indent");
        let back: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(back, raw);
    }

    #[tokio::test]
    async fn missing_directory_is_io_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nope").join("m.json");
        let err = save_metadata(&json!({}), &path).await.unwrap_err();
        assert!(matches!(err, DownloadError::Io { .. }));
    }
}
