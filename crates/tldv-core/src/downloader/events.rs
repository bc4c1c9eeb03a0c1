//! Progress events sent from the orchestrators to the front end.

use std::path::PathBuf;

/// One step of a meeting download. Every event carries the meeting URL it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadEvent {
    MeetingResolved {
        url: String,
        meeting_id: String,
        output_dir: PathBuf,
    },
    MetadataFetched {
        url: String,
        title: String,
        timestamp: String,
    },
    ToolSelected {
        url: String,
        tool: String,
        preferred: bool,
    },
    MetadataSaved {
        url: String,
        path: PathBuf,
    },
    MetadataSaveFailed {
        url: String,
        error: String,
    },
    DownloadStarted {
        url: String,
        output: PathBuf,
    },
    DownloadFinished {
        url: String,
        path: PathBuf,
        bytes: u64,
    },
    DownloadFailed {
        url: String,
        error: String,
    },
    /// Batch mode: an item finished successfully.
    ItemCompleted {
        url: String,
        path: PathBuf,
    },
    /// Batch mode: an item failed (including panics inside the item).
    ItemFailed {
        url: String,
        error: String,
    },
}

impl DownloadEvent {
    pub fn url(&self) -> &str {
        match self {
            DownloadEvent::MeetingResolved { url, .. }
            | DownloadEvent::MetadataFetched { url, .. }
            | DownloadEvent::ToolSelected { url, .. }
            | DownloadEvent::MetadataSaved { url, .. }
            | DownloadEvent::MetadataSaveFailed { url, .. }
            | DownloadEvent::DownloadStarted { url, .. }
            | DownloadEvent::DownloadFinished { url, .. }
            | DownloadEvent::DownloadFailed { url, .. }
            | DownloadEvent::ItemCompleted { url, .. }
            | DownloadEvent::ItemFailed { url, .. } => url,
        }
    }
}

pub type EventSender = tokio::sync::mpsc::Sender<DownloadEvent>;

/// Sends `event` if a receiver is attached; a closed channel is ignored.
pub(crate) async fn emit(events: Option<&EventSender>, event: DownloadEvent) {
    if let Some(tx) = events {
        let _ = tx.send(event).await;
    }
}
