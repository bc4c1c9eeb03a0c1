//! Terminal rendering of download events.

use tldv_core::downloader::{DownloadEvent, EventSender};
use tokio::task::JoinHandle;

/// Spawns a task printing every event until all senders are dropped.
pub(crate) fn spawn_printer() -> (EventSender, JoinHandle<()>) {
    let (tx, mut rx) = tokio::sync::mpsc::channel::<DownloadEvent>(64);
    let handle = tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            println!("{}", render(&event));
        }
    });
    (tx, handle)
}

pub(crate) fn render(event: &DownloadEvent) -> String {
    match event {
        DownloadEvent::MeetingResolved {
            meeting_id,
            output_dir,
            ..
        } => format!(
            "Meeting ID: {meeting_id}\nOutput directory: {}",
            output_dir.display()
        ),
        DownloadEvent::MetadataFetched {
            title, timestamp, ..
        } => format!("Title: {title}\nDate: {timestamp}"),
        DownloadEvent::ToolSelected {
            tool, preferred, ..
        } => {
            if *preferred {
                format!("Using {tool} for download")
            } else {
                format!("Using {tool} for download (fallback)")
            }
        }
        DownloadEvent::MetadataSaved { path, .. } => {
            format!("Metadata saved: {}", path.display())
        }
        DownloadEvent::MetadataSaveFailed { error, .. } => {
            format!("Warning: could not save metadata: {error}")
        }
        DownloadEvent::DownloadStarted { output, .. } => {
            format!("Starting download...\nOutput: {}", output.display())
        }
        DownloadEvent::DownloadFinished { path, bytes, .. } => format!(
            "Download completed: {} ({:.2} MiB)",
            path.display(),
            *bytes as f64 / 1_048_576.0
        ),
        DownloadEvent::DownloadFailed { url, error } => format!("Error: {url}: {error}"),
        DownloadEvent::ItemCompleted { url, .. } => format!("Completed: {url}"),
        DownloadEvent::ItemFailed { url, error } => format!("Failed: {url} - {error}"),
    }
}
