//! Single-meeting download pipeline.
//!
//! meeting ID → watch-page API → meeting info → tool selection → metadata
//! sidecar → external download. Every failure is reported and turned into a
//! `None` result by [`VideoDownloader::download_video`].

mod events;
mod metadata;

pub use events::{DownloadEvent, EventSender};
pub use metadata::save_metadata;

pub(crate) use events::emit;

use std::path::{Path, PathBuf};

use crate::api::{parse_meeting_info, ApiClient};
use crate::config::TldvConfig;
use crate::error::DownloadError;
use crate::meeting_ref::{normalize_token, MeetingReference};
use crate::tools;

/// Orchestrates one meeting download. Owns its own API client; batch workers
/// each build their own instance.
#[derive(Debug)]
pub struct VideoDownloader {
    api: ApiClient,
    cfg: TldvConfig,
    events: Option<EventSender>,
}

impl VideoDownloader {
    pub fn new(cfg: &TldvConfig) -> Result<Self, DownloadError> {
        Ok(Self {
            api: ApiClient::from_config(cfg)?,
            cfg: cfg.clone(),
            events: None,
        })
    }

    /// Attach a channel receiving [`DownloadEvent`]s for this downloader.
    pub fn with_events(mut self, events: Option<EventSender>) -> Self {
        self.events = events;
        self
    }

    /// Downloads one meeting. Returns the video path, or `None` after reporting the failure.
    pub async fn download_video(
        &self,
        url: &str,
        auth_token: &str,
        output_dir: Option<&Path>,
    ) -> Option<PathBuf> {
        match self.try_download(url, auth_token, output_dir).await {
            Ok(path) => Some(path),
            Err(e) => {
                tracing::error!(url, "download failed: {}", e);
                emit(
                    self.events.as_ref(),
                    DownloadEvent::DownloadFailed {
                        url: url.to_string(),
                        error: e.to_string(),
                    },
                )
                .await;
                None
            }
        }
    }

    /// Same pipeline as [`download_video`](Self::download_video), returning the error.
    pub async fn try_download(
        &self,
        url: &str,
        auth_token: &str,
        output_dir: Option<&Path>,
    ) -> Result<PathBuf, DownloadError> {
        let events = self.events.as_ref();
        let output_dir = resolve_output_dir(output_dir).await?;

        let reference = MeetingReference::parse(url)?;
        let token = normalize_token(auth_token);
        tracing::info!(url, meeting_id = %reference.meeting_id, "resolved meeting");
        emit(
            events,
            DownloadEvent::MeetingResolved {
                url: url.to_string(),
                meeting_id: reference.meeting_id.clone(),
                output_dir: output_dir.clone(),
            },
        )
        .await;

        let api = self.api.clone();
        let meeting_id = reference.meeting_id;
        let data = tokio::task::spawn_blocking(move || api.fetch_meeting_data(&meeting_id, &token))
            .await
            .map_err(|e| DownloadError::Task(format!("api request: {e}")))??;

        let info = parse_meeting_info(data)?;
        emit(
            events,
            DownloadEvent::MetadataFetched {
                url: url.to_string(),
                title: info.name.clone(),
                timestamp: info.timestamp.clone(),
            },
        )
        .await;

        let stem = info.file_stem();
        let output_file = output_dir.join(format!("{stem}.mp4"));

        let tool = tools::select_tool(&self.cfg.tools, self.cfg.probe_timeout()).await?;
        emit(
            events,
            DownloadEvent::ToolSelected {
                url: url.to_string(),
                tool: tool.name(),
                preferred: tool.is_preferred(),
            },
        )
        .await;

        let metadata_file = output_dir.join(format!("{stem}.json"));
        match save_metadata(&info.raw, &metadata_file).await {
            Ok(()) => {
                tracing::debug!(path = %metadata_file.display(), "metadata saved");
                emit(
                    events,
                    DownloadEvent::MetadataSaved {
                        url: url.to_string(),
                        path: metadata_file,
                    },
                )
                .await;
            }
            Err(e) => {
                tracing::warn!(path = %metadata_file.display(), "could not save metadata: {}", e);
                emit(
                    events,
                    DownloadEvent::MetadataSaveFailed {
                        url: url.to_string(),
                        error: e.to_string(),
                    },
                )
                .await;
            }
        }

        emit(
            events,
            DownloadEvent::DownloadStarted {
                url: url.to_string(),
                output: output_file.clone(),
            },
        )
        .await;
        let bytes = tools::run_tool(
            &tool,
            &info.source_url,
            &output_file,
            self.cfg.download_timeout(),
        )
        .await?;

        tracing::info!(path = %output_file.display(), bytes, "download completed");
        emit(
            events,
            DownloadEvent::DownloadFinished {
                url: url.to_string(),
                path: output_file.clone(),
                bytes,
            },
        )
        .await;
        Ok(output_file)
    }
}

/// Creates `dir` if needed; `None` means the current working directory.
pub async fn resolve_output_dir(dir: Option<&Path>) -> Result<PathBuf, DownloadError> {
    match dir {
        Some(d) => {
            tokio::fs::create_dir_all(d)
                .await
                .map_err(|e| DownloadError::io(format!("create {}", d.display()), e))?;
            Ok(d.to_path_buf())
        }
        None => std::env::current_dir()
            .map_err(|e| DownloadError::io("current directory", e)),
    }
}
