//! Meeting references and the pure string rules around them.
//!
//! Turns a pasted meeting URL into the opaque meeting ID used by the API,
//! normalizes bearer tokens, and derives filesystem-safe names from titles.

mod id;
mod sanitize;
mod token;

pub use id::{extract_meeting_id, MIN_MEETING_ID_LEN};
pub use sanitize::{sanitize_filename, DEFAULT_MEETING_NAME};
pub use token::normalize_token;

use crate::error::DownloadError;

/// A meeting URL together with the ID extracted from its final path segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeetingReference {
    pub raw_url: String,
    pub meeting_id: String,
}

impl MeetingReference {
    pub fn parse(url: &str) -> Result<Self, DownloadError> {
        let meeting_id = extract_meeting_id(url)?;
        Ok(Self {
            raw_url: url.to_string(),
            meeting_id,
        })
    }
}
