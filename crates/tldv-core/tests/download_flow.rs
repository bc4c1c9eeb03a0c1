//! Integration tests: the single-meeting and batch pipelines against a mock API.

mod common;

use std::path::Path;
use tempfile::tempdir;
use tldv_core::batch::{download_multiple, BatchItem};
use tldv_core::config::{TldvConfig, ToolsConfig};
use tldv_core::downloader::{DownloadEvent, VideoDownloader};
use tldv_core::DownloadError;

const MISSING_TOOL: &str = "tldv-dl-test-no-such-program";

fn config(base_url: &str, primary: &str, fallback: &str) -> TldvConfig {
    TldvConfig {
        api_base: base_url.to_string(),
        api_timeout_secs: 5,
        probe_timeout_secs: 5,
        download_timeout_secs: 10,
        tools: ToolsConfig {
            primary: primary.to_string(),
            fallback: fallback.to_string(),
            ..ToolsConfig::default()
        },
        ..TldvConfig::default()
    }
}

fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

fn demo_body() -> String {
    common::watch_page_json(
        "Demo: launch",
        "2024-03-15T10:30:00.000Z",
        "https://cdn.example.com/v/master.m3u8",
    )
}

#[tokio::test]
async fn no_tools_available_writes_nothing() {
    let server = common::api_server::start(200, &demo_body());
    let out = tempdir().unwrap();
    let cfg = config(&server.base_url, MISSING_TOOL, "tldv-dl-test-also-missing");
    let downloader = VideoDownloader::new(&cfg).unwrap();

    let err = downloader
        .try_download(common::MEETING_URL, "abc", Some(out.path()))
        .await
        .unwrap_err();
    assert!(matches!(err, DownloadError::NoDownloaderAvailable { .. }));

    let res = downloader
        .download_video(common::MEETING_URL, "abc", Some(out.path()))
        .await;
    assert!(res.is_none());
    assert!(file_names(out.path()).is_empty());

    // The token reached the API with the bearer prefix added.
    assert!(server.requests()[0].contains("Authorization: Bearer abc\r\n"));
}

#[tokio::test]
async fn unauthorized_reported_as_none() {
    let server = common::api_server::start(401, "{}");
    let out = tempdir().unwrap();
    let cfg = config(&server.base_url, MISSING_TOOL, MISSING_TOOL);
    let (tx, mut rx) = tokio::sync::mpsc::channel(32);
    let downloader = VideoDownloader::new(&cfg).unwrap().with_events(Some(tx));

    let res = downloader
        .download_video(common::MEETING_URL, "Bearer stale", Some(out.path()))
        .await;
    assert!(res.is_none());
    drop(downloader);

    let mut events = Vec::new();
    while let Some(ev) = rx.recv().await {
        events.push(ev);
    }
    assert!(matches!(
        events.first(),
        Some(DownloadEvent::MeetingResolved { meeting_id, .. }) if meeting_id == common::MEETING_ID
    ));
    match events.last() {
        Some(DownloadEvent::DownloadFailed { error, .. }) => {
            assert!(error.contains("unauthorized"), "{error}")
        }
        other => panic!("expected DownloadFailed, got {other:?}"),
    }
}

#[tokio::test]
async fn missing_source_url_stops_before_files() {
    let server = common::api_server::start(200, r#"{"meeting":{"name":"x"},"video":{}}"#);
    let out = tempdir().unwrap();
    let cfg = config(&server.base_url, MISSING_TOOL, MISSING_TOOL);
    let err = VideoDownloader::new(&cfg)
        .unwrap()
        .try_download(common::MEETING_URL, "abc", Some(out.path()))
        .await
        .unwrap_err();
    assert!(matches!(err, DownloadError::MissingSourceUrl));
    assert!(file_names(out.path()).is_empty());
}

#[cfg(unix)]
#[tokio::test]
async fn tool_exits_zero_without_file_keeps_sidecar() {
    let server = common::api_server::start(200, &demo_body());
    let out = tempdir().unwrap();
    // `true` accepts any arguments and produces nothing.
    let cfg = config(&server.base_url, MISSING_TOOL, "true");
    let err = VideoDownloader::new(&cfg)
        .unwrap()
        .try_download(common::MEETING_URL, "abc", Some(out.path()))
        .await
        .unwrap_err();

    let expected_video = out.path().join("2024-03-15_10-30-00_Demo_ launch.mp4");
    match err {
        DownloadError::DownloadFileMissing(p) => assert_eq!(p, expected_video),
        other => panic!("expected DownloadFileMissing, got {other:?}"),
    }

    assert_eq!(file_names(out.path()), ["2024-03-15_10-30-00_Demo_ launch.json"]);
    let sidecar = std::fs::read_to_string(out.path().join("2024-03-15_10-30-00_Demo_ launch.json"))
        .unwrap();
    let value: serde_json::Value = serde_json::from_str(&sidecar).unwrap();
    assert_eq!(value["video"]["source"], "https://cdn.example.com/v/master.m3u8");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn batch_collects_one_outcome_per_item() {
    let server = common::api_server::start(404, "{}");
    let out = tempdir().unwrap();
    let batch_dir = out.path().join("batch");
    let cfg = config(&server.base_url, MISSING_TOOL, MISSING_TOOL);

    let items = vec![
        BatchItem::new(common::MEETING_URL, "abc"),
        BatchItem::new("https://tldv.io/app/meetings/short", "abc"),
        BatchItem::new("https://tldv.io/app/meetings/aaaaaaaaaaaa", "abc"),
    ];
    let summary = download_multiple(items, Some(&batch_dir), 2, &cfg, None)
        .await
        .unwrap();

    assert!(batch_dir.is_dir(), "output dir created upfront");
    assert_eq!(summary.attempted(), 3);
    assert_eq!(summary.succeeded(), 0);
    let mut failures: Vec<(String, String)> = summary
        .failures()
        .into_iter()
        .map(|(u, e)| (u.to_string(), e.to_string()))
        .collect();
    failures.sort();
    assert_eq!(failures.len(), 3);
    assert!(failures[0].1.contains("not found"));
    assert!(failures[1].1.contains("not found"));
    assert!(failures[2].0.ends_with("/short"));
    assert!(failures[2].1.contains("meeting ID"));
    assert!(file_names(&batch_dir).is_empty());
}
