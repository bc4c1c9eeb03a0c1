#![allow(dead_code)]

pub mod api_server;

pub const MEETING_URL: &str = "https://tldv.io/app/meetings/64f1c2a9b7e8d3001234abcd";
pub const MEETING_ID: &str = "64f1c2a9b7e8d3001234abcd";

/// Watch-page body with the usual fields.
pub fn watch_page_json(name: &str, created_at: &str, source: &str) -> String {
    format!(
        r#"{{"meeting":{{"name":"{name}","createdAt":"{created_at}"}},"video":{{"source":"{source}"}}}}"#
    )
}
