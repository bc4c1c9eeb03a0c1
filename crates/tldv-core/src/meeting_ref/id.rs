//! Meeting ID extraction from a meeting URL.

use crate::error::DownloadError;

/// Shortest segment accepted as a meeting ID.
pub const MIN_MEETING_ID_LEN: usize = 10;

/// Returns the final `/`-separated segment of `url` as the meeting ID.
///
/// Surrounding whitespace and trailing slashes are ignored. The segment must be
/// at least [`MIN_MEETING_ID_LEN`] characters long.
pub fn extract_meeting_id(url: &str) -> Result<String, DownloadError> {
    let trimmed = url.trim().trim_end_matches('/');
    let segment = trimmed.rsplit('/').next().unwrap_or("");
    if segment.chars().count() < MIN_MEETING_ID_LEN {
        return Err(DownloadError::InvalidMeetingId {
            url: trimmed.to_string(),
        });
    }
    Ok(segment.to_string())
}
