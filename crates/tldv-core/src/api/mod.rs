//! Watch-page API client.
//!
//! Uses the curl crate (libcurl) to issue one authenticated GET per meeting and
//! maps HTTP status and transport failures onto [`DownloadError`] variants.
//! Blocking; call from `spawn_blocking` when used from async code.

mod parse;

pub use parse::{format_timestamp, parse_meeting_info, parse_meeting_info_at, MeetingInfo};

use crate::config::TldvConfig;
use crate::error::DownloadError;
use serde_json::Value;
use std::time::Duration;
use url::Url;

/// Client for the meetings API. Each orchestrator owns its own instance.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base: Url,
    user_agent: String,
    timeout: Duration,
}

impl ApiClient {
    pub fn new(base: &str, user_agent: &str, timeout: Duration) -> Result<Self, DownloadError> {
        let base = Url::parse(base)
            .map_err(|e| DownloadError::InvalidResponse(format!("invalid API base {base}: {e}")))?;
        Ok(Self {
            base,
            user_agent: user_agent.to_string(),
            timeout,
        })
    }

    pub fn from_config(cfg: &TldvConfig) -> Result<Self, DownloadError> {
        Self::new(&cfg.api_base, &cfg.user_agent, cfg.api_timeout())
    }

    /// `<base>/v1/meetings/{meeting_id}/watch-page?noTranscript=true`
    pub fn watch_page_url(&self, meeting_id: &str) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(["v1", "meetings", meeting_id, "watch-page"]);
        }
        url.query_pairs_mut().clear().append_pair("noTranscript", "true");
        url
    }

    /// Fetches the raw watch-page JSON for a meeting. Single attempt, no retries.
    pub fn fetch_meeting_data(
        &self,
        meeting_id: &str,
        auth_token: &str,
    ) -> Result<Value, DownloadError> {
        let url = self.watch_page_url(meeting_id);
        let mut body: Vec<u8> = Vec::new();

        let mut easy = curl::easy::Easy::new();
        easy.url(url.as_str())?;
        easy.get(true)?;
        easy.follow_location(true)?;
        easy.useragent(&self.user_agent)?;
        easy.timeout(self.timeout)?;

        let mut list = curl::easy::List::new();
        list.append(&format!("Authorization: {}", auth_token))?;
        list.append("Accept: application/json")?;
        list.append("Content-Type: application/json")?;
        easy.http_headers(list)?;

        {
            let mut transfer = easy.transfer();
            transfer.write_function(|data| {
                body.extend_from_slice(data);
                Ok(data.len())
            })?;
            transfer.perform()?;
        }

        let code = easy.response_code()?;
        tracing::debug!(meeting_id, status = code, bytes = body.len(), "watch-page response");
        check_status(code, &body)?;

        serde_json::from_slice(&body).map_err(|e| DownloadError::InvalidResponse(e.to_string()))
    }
}

/// Maps a response status onto the API error kinds; 2xx passes.
pub fn check_status(code: u32, body: &[u8]) -> Result<(), DownloadError> {
    match code {
        200..=299 => Ok(()),
        401 => Err(DownloadError::Unauthorized),
        404 => Err(DownloadError::NotFound),
        _ => Err(DownloadError::api(code, body)),
    }
}
