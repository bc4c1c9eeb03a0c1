pub mod config;
pub mod logging;

pub mod api;
pub mod batch;
pub mod downloader;
pub mod error;
pub mod meeting_ref;
pub mod tools;

pub use error::DownloadError;
