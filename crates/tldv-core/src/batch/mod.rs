//! Batch downloads over a bounded worker pool.
//!
//! Keeps up to `max_workers` items in flight; when one finishes, the next is
//! started until the list is empty. Each item runs in its own task with its
//! own [`VideoDownloader`], so a failure or panic stays confined to that item.

mod outcome;
mod urls;

pub use outcome::{BatchSummary, DownloadOutcome};
pub use urls::{parse_url_list, read_url_list};

use std::any::Any;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::config::{clamp_workers, TldvConfig};
use crate::downloader::{emit, resolve_output_dir, DownloadEvent, EventSender, VideoDownloader};
use crate::error::DownloadError;

/// One meeting to download in a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchItem {
    pub url: String,
    pub token: String,
}

impl BatchItem {
    pub fn new(url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            token: token.into(),
        }
    }
}

/// Downloads every item into `output_dir` with up to `max_workers` in parallel.
///
/// The output directory is created once upfront; that is the only error returned.
/// Per-item failures land in the summary.
pub async fn download_multiple(
    items: Vec<BatchItem>,
    output_dir: Option<&Path>,
    max_workers: usize,
    cfg: &TldvConfig,
    events: Option<EventSender>,
) -> Result<BatchSummary, DownloadError> {
    if items.is_empty() {
        tracing::warn!("no videos to download");
        return Ok(BatchSummary::default());
    }

    let dir = resolve_output_dir(output_dir).await?;
    let workers = clamp_workers(max_workers);
    tracing::info!(
        count = items.len(),
        workers,
        output_dir = %dir.display(),
        "starting batch download"
    );

    let cfg = Arc::new(cfg.clone());
    let job_events = events.clone();
    let summary = run_batch(items, workers, events, move |item: BatchItem| {
        let cfg = Arc::clone(&cfg);
        let dir = dir.clone();
        let events = job_events.clone();
        async move {
            let downloader = VideoDownloader::new(&cfg)?.with_events(events);
            downloader
                .try_download(&item.url, &item.token, Some(&dir))
                .await
        }
    })
    .await;

    tracing::info!(
        succeeded = summary.succeeded(),
        failed = summary.failed(),
        "batch download finished"
    );
    Ok(summary)
}

/// Runs `job` for every item with at most `max_workers` (clamped to 1..=8) in flight.
///
/// Outcomes are collected in completion order. An `Err` or a panic from one job
/// becomes a failed outcome for that item only.
pub async fn run_batch<F, Fut>(
    items: Vec<BatchItem>,
    max_workers: usize,
    events: Option<EventSender>,
    job: F,
) -> BatchSummary
where
    F: Fn(BatchItem) -> Fut + Clone + Send + Sync + 'static,
    Fut: Future<Output = Result<PathBuf, DownloadError>> + Send + 'static,
{
    let max_workers = clamp_workers(max_workers);
    let mut pending = items.into_iter();
    let mut join_set = tokio::task::JoinSet::new();
    let mut summary = BatchSummary::default();

    loop {
        while join_set.len() < max_workers {
            let Some(item) = pending.next() else {
                break;
            };
            let url = item.url.clone();
            let job = job.clone();
            let handle = tokio::spawn(async move { job(item).await });
            join_set.spawn(async move {
                match handle.await {
                    Ok(Ok(path)) => DownloadOutcome::succeeded(url, path),
                    Ok(Err(e)) => DownloadOutcome::failed(url, e.to_string()),
                    Err(e) => DownloadOutcome::failed(url, describe_join_error(e)),
                }
            });
        }

        let Some(res) = join_set.join_next().await else {
            break;
        };
        let outcome = match res {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::error!("batch task join: {}", e);
                continue;
            }
        };

        let event = match (&outcome.file_path, &outcome.error) {
            (Some(path), _) => {
                tracing::info!(url = %outcome.url, "completed");
                DownloadEvent::ItemCompleted {
                    url: outcome.url.clone(),
                    path: path.clone(),
                }
            }
            (None, error) => {
                let error = error.clone().unwrap_or_default();
                tracing::warn!(url = %outcome.url, "failed: {}", error);
                DownloadEvent::ItemFailed {
                    url: outcome.url.clone(),
                    error,
                }
            }
        };
        emit(events.as_ref(), event).await;
        summary.outcomes.push(outcome);
    }

    summary
}

fn describe_join_error(e: tokio::task::JoinError) -> String {
    if e.is_panic() {
        format!("unexpected error: {}", panic_message(e.into_panic()))
    } else {
        "task cancelled".to_string()
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "panic".to_string()
    }
}
