//! Watch-page JSON → normalized meeting record.

use chrono::{Local, NaiveDateTime};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::error::DownloadError;
use crate::meeting_ref::{sanitize_filename, DEFAULT_MEETING_NAME};

const CREATED_AT_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.fZ";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

/// Normalized meeting data derived from one API response.
#[derive(Debug, Clone)]
pub struct MeetingInfo {
    /// Sanitized title, never empty.
    pub name: String,
    /// `YYYY-MM-DD_HH-MM-SS`.
    pub timestamp: String,
    /// Signed media source URL handed to the downloader tool.
    pub source_url: String,
    /// Full API payload, persisted as the metadata sidecar.
    pub raw: Value,
}

impl MeetingInfo {
    /// `<timestamp>_<name>`, shared by the video file and its sidecar.
    pub fn file_stem(&self) -> String {
        format!("{}_{}", self.timestamp, self.name)
    }
}

#[derive(Debug, Default, Deserialize)]
struct WatchPage {
    #[serde(default, deserialize_with = "lenient")]
    meeting: Option<MeetingSection>,
    #[serde(default, deserialize_with = "lenient")]
    video: Option<VideoSection>,
}

#[derive(Debug, Default, Deserialize)]
struct MeetingSection {
    #[serde(default, deserialize_with = "lenient")]
    name: Option<String>,
    #[serde(default, rename = "createdAt", deserialize_with = "lenient")]
    created_at: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct VideoSection {
    #[serde(default, deserialize_with = "lenient")]
    source: Option<String>,
}

/// A field of the wrong JSON type reads as absent.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// `YYYY-MM-DDTHH:MM:SS.<1-6 digits>Z`; anything else is rejected.
fn parse_created_at(s: &str) -> Option<NaiveDateTime> {
    let fraction = s
        .strip_suffix('Z')
        .and_then(|body| body.rsplit_once('.'))
        .map(|(_, frac)| frac)
        .filter(|frac| (1..=6).contains(&frac.len()) && frac.bytes().all(|b| b.is_ascii_digit()));
    if fraction.is_none() {
        tracing::debug!(created_at = s, "createdAt lacks a 1-6 digit fraction");
        return None;
    }
    match NaiveDateTime::parse_from_str(s, CREATED_AT_FORMAT) {
        Ok(dt) => Some(dt),
        Err(e) => {
            tracing::debug!(created_at = s, "unparseable createdAt: {}", e);
            None
        }
    }
}

pub fn format_timestamp(dt: &NaiveDateTime) -> String {
    dt.format(TIMESTAMP_FORMAT).to_string()
}

/// Parses the API payload, using the current local time when `createdAt` is unusable.
pub fn parse_meeting_info(raw: Value) -> Result<MeetingInfo, DownloadError> {
    parse_meeting_info_at(raw, Local::now().naive_local())
}

/// Like [`parse_meeting_info`] with an explicit fallback time.
pub fn parse_meeting_info_at(raw: Value, now: NaiveDateTime) -> Result<MeetingInfo, DownloadError> {
    let page = WatchPage::deserialize(&raw).unwrap_or_default();
    let meeting = page.meeting.unwrap_or_default();

    let source_url = page
        .video
        .and_then(|v| v.source)
        .filter(|s| !s.is_empty())
        .ok_or(DownloadError::MissingSourceUrl)?;

    let created = meeting
        .created_at
        .as_deref()
        .and_then(parse_created_at)
        .unwrap_or(now);

    let name = sanitize_filename(meeting.name.as_deref().unwrap_or(DEFAULT_MEETING_NAME));

    Ok(MeetingInfo {
        name,
        timestamp: format_timestamp(&created),
        source_url,
        raw,
    })
}
