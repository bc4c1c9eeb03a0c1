//! `tldv-dl batch` – download several meetings in parallel.

use anyhow::{bail, Result};
use std::io::{self, Write};
use std::path::Path;
use tldv_core::batch::{self, BatchItem, BatchSummary};
use tldv_core::config::{clamp_workers, TldvConfig};

use crate::cli::events;

/// Positional URLs followed by the URLs listed in `file`, if any.
pub fn collect_urls(mut urls: Vec<String>, file: Option<&Path>) -> Result<Vec<String>> {
    if let Some(path) = file {
        urls.extend(batch::read_url_list(path)?);
    }
    urls.retain(|u| !u.trim().is_empty());
    Ok(urls)
}

pub async fn run_batch(
    cfg: &TldvConfig,
    urls: Vec<String>,
    token: &str,
    output_dir: Option<&Path>,
    workers: usize,
) -> Result<()> {
    if urls.is_empty() {
        bail!("no URLs provided");
    }
    let workers = clamp_workers(workers);
    println!(
        "Starting parallel download of {} videos using {} workers",
        urls.len(),
        workers
    );

    let items = urls
        .into_iter()
        .map(|url| BatchItem::new(url, token))
        .collect();
    let (tx, printer) = events::spawn_printer();
    let summary = batch::download_multiple(items, output_dir, workers, cfg, Some(tx)).await?;
    let _ = printer.await;

    write_summary(&mut io::stdout().lock(), &summary)?;
    if summary.succeeded() == 0 {
        bail!("batch download failed: no video was downloaded");
    }
    Ok(())
}

pub(crate) fn write_summary<W: Write>(out: &mut W, summary: &BatchSummary) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "Download summary:")?;
    writeln!(out, "  Successful: {}", summary.succeeded())?;
    writeln!(out, "  Failed: {}", summary.failed())?;

    let files = summary.files();
    if !files.is_empty() {
        writeln!(out, "\nDownloaded files:")?;
        for f in files {
            writeln!(out, "  {}", f.display())?;
        }
    }

    let failures = summary.failures();
    if !failures.is_empty() {
        writeln!(out, "\nFailed downloads:")?;
        for (url, error) in failures {
            writeln!(out, "  {url}: {error}")?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;
    use std::path::PathBuf;
    use tempfile::NamedTempFile;
    use tldv_core::batch::DownloadOutcome;

    #[test]
    fn summary_lists_files_and_failures() {
        let summary = BatchSummary {
            outcomes: vec![
                DownloadOutcome::succeeded("u1".into(), PathBuf::from("/d/a.mp4")),
                DownloadOutcome::failed("u2".into(), "unauthorized".into()),
            ],
        };
        let mut out = Vec::new();
        write_summary(&mut out, &summary).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Successful: 1"));
        assert!(text.contains("Failed: 1"));
        assert!(text.contains("  /d/a.mp4"));
        assert!(text.contains("  u2: unauthorized"));
    }

    #[test]
    fn summary_without_failures_omits_section() {
        let summary = BatchSummary {
            outcomes: vec![DownloadOutcome::succeeded("u1".into(), PathBuf::from("a.mp4"))],
        };
        let mut out = Vec::new();
        write_summary(&mut out, &summary).unwrap();
        assert!(!String::from_utf8(out).unwrap().contains("Failed downloads"));
    }

    #[test]
    fn collect_urls_merges_file() {
        let mut f = NamedTempFile::new().unwrap();
        writeln!(f, "# list\nhttps://tldv.io/app/meetings/bbbbbbbbbb\n").unwrap();
        f.flush().unwrap();
        let urls = collect_urls(
            vec!["https://tldv.io/app/meetings/aaaaaaaaaa".into()],
            Some(f.path()),
        )
        .unwrap();
        assert_eq!(
            urls,
            [
                "https://tldv.io/app/meetings/aaaaaaaaaa",
                "https://tldv.io/app/meetings/bbbbbbbbbb"
            ]
        );
    }

    #[test]
    fn collect_urls_without_file() {
        assert_eq!(
            collect_urls(vec!["x".into(), "  ".into()], None).unwrap(),
            ["x"]
        );
    }
}
