//! `tldv-dl interactive` – the guided prompt flow (default command).

use anyhow::{Context, Result};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use tldv_core::batch;
use tldv_core::config::{clamp_workers, TldvConfig};

use super::{run_batch, run_download};
use crate::cli::prompt::{ask, confirm, read_answer};

/// What the user asked for.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Plan {
    Single {
        url: String,
        token: String,
        output_dir: Option<PathBuf>,
    },
    Batch {
        urls: Vec<String>,
        token: String,
        output_dir: Option<PathBuf>,
        workers: usize,
    },
    /// Nothing to do; the message says why.
    Stop(&'static str),
}

pub async fn run_interactive(cfg: &TldvConfig) -> Result<()> {
    let default_workers = clamp_workers(cfg.max_workers);
    let plan = tokio::task::spawn_blocking(move || {
        let stdin = io::stdin();
        let mut input = stdin.lock();
        let mut out = io::stdout();
        gather_plan(&mut input, &mut out, default_workers)
    })
    .await
    .context("prompt task join")??;

    match plan {
        Plan::Single {
            url,
            token,
            output_dir,
        } => run_download(cfg, &url, &token, output_dir.as_deref()).await,
        Plan::Batch {
            urls,
            token,
            output_dir,
            workers,
        } => run_batch(cfg, urls, &token, output_dir.as_deref(), workers).await,
        Plan::Stop(reason) => {
            println!("{reason}");
            Ok(())
        }
    }
}

/// Walks the user through mode, URLs, token, output directory, and confirmation.
pub(crate) fn gather_plan<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    default_workers: usize,
) -> Result<Plan> {
    writeln!(out, "tl;dv meeting downloader")?;
    let batch_mode = confirm(input, out, "\nBatch download mode? (y/N): ")?;
    if batch_mode {
        gather_batch(input, out, default_workers)
    } else {
        gather_single(input, out)
    }
}

fn gather_single<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> Result<Plan> {
    let url = ask(input, out, "\nEnter the meeting URL: ")?;
    if url.is_empty() {
        return Ok(Plan::Stop("URL cannot be empty!"));
    }
    let Some(token) = ask_token(input, out)? else {
        return Ok(Plan::Stop("Authorization token is required!"));
    };
    let output_dir = ask_output_dir(input, out)?;

    writeln!(out, "\nReady to download:")?;
    writeln!(out, "  URL: {url}")?;
    writeln!(out, "  Output: {}", describe_dir(output_dir.as_deref()))?;
    if !confirm(input, out, "\nProceed with download? (y/N): ")? {
        return Ok(Plan::Stop("Download cancelled by user"));
    }
    Ok(Plan::Single {
        url,
        token,
        output_dir,
    })
}

fn gather_batch<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    default_workers: usize,
) -> Result<Plan> {
    writeln!(out, "\nBatch download mode. You can either:")?;
    writeln!(out, "1. Enter URLs one by one (type 'done' when finished)")?;
    writeln!(out, "2. Provide a text file with URLs (one per line)")?;

    let choice = ask(input, out, "\nChoose option (1/2): ")?;
    let urls = if choice == "2" {
        let path = ask(input, out, "Enter path to URLs file: ")?;
        let urls = match batch::read_url_list(Path::new(&path)) {
            Ok(urls) => urls,
            Err(e) => {
                writeln!(out, "Error: {e:#}")?;
                Vec::new()
            }
        };
        if urls.is_empty() {
            return Ok(Plan::Stop("No valid URLs found in file!"));
        }
        urls
    } else {
        writeln!(out, "\nEnter URLs (type 'done' when finished):")?;
        let mut urls = Vec::new();
        while let Some(url) = read_answer(input, out, "URL: ")? {
            if url.eq_ignore_ascii_case("done") {
                break;
            }
            if !url.is_empty() {
                urls.push(url);
            }
        }
        urls
    };
    if urls.is_empty() {
        return Ok(Plan::Stop("No URLs provided!"));
    }
    writeln!(out, "\nFound {} URLs to download", urls.len())?;

    let Some(token) = ask_token(input, out)? else {
        return Ok(Plan::Stop("Authorization token is required!"));
    };
    let output_dir = ask_output_dir(input, out)?;
    let answer = ask(
        input,
        out,
        &format!("\nNumber of parallel downloads (1-8, default {default_workers}): "),
    )?;
    let workers = parse_workers(&answer, default_workers);

    writeln!(out, "\nReady for batch download:")?;
    writeln!(out, "  URLs: {} videos", urls.len())?;
    writeln!(out, "  Output: {}", describe_dir(output_dir.as_deref()))?;
    writeln!(out, "  Parallel workers: {workers}")?;
    if !confirm(input, out, "\nProceed with batch download? (y/N): ")? {
        return Ok(Plan::Stop("Download cancelled by user"));
    }
    Ok(Plan::Batch {
        urls,
        token,
        output_dir,
        workers,
    })
}

fn ask_token<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> Result<Option<String>> {
    writeln!(out, "\nNeed help getting the auth token? Run `tldv-dl token-help`.")?;
    let token = ask(input, out, "\nEnter your Authorization token: ")?;
    Ok(Some(token).filter(|t| !t.is_empty()))
}

fn ask_output_dir<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> Result<Option<PathBuf>> {
    let dir = ask(input, out, "\nOutput directory (press Enter for current): ")?;
    Ok(Some(dir).filter(|d| !d.is_empty()).map(PathBuf::from))
}

fn describe_dir(dir: Option<&Path>) -> String {
    dir.map(|d| d.display().to_string())
        .unwrap_or_else(|| "Current directory".to_string())
}

/// Empty or unparseable input gives `default`; numbers are clamped to 1..=8.
fn parse_workers(answer: &str, default: usize) -> usize {
    if answer.is_empty() {
        return default;
    }
    match answer.parse::<i64>() {
        Ok(n) => n.clamp(1, tldv_core::config::MAX_WORKERS as i64) as usize,
        Err(_) => default,
    }
}
