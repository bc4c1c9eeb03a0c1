//! `tldv-dl download <url>` – download one meeting.

use anyhow::{bail, Result};
use std::path::Path;
use tldv_core::config::TldvConfig;
use tldv_core::downloader::VideoDownloader;

use crate::cli::events;

pub async fn run_download(
    cfg: &TldvConfig,
    url: &str,
    token: &str,
    output_dir: Option<&Path>,
) -> Result<()> {
    let (tx, printer) = events::spawn_printer();
    let downloader = VideoDownloader::new(cfg)?.with_events(Some(tx));
    let result = downloader.download_video(url, token, output_dir).await;
    drop(downloader);
    let _ = printer.await;

    match result {
        Some(path) => {
            println!("All done! Video saved to: {}", path.display());
            Ok(())
        }
        None => bail!("download failed"),
    }
}
