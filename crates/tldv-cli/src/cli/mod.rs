//! CLI for the tldv-dl meeting downloader.

mod commands;
mod events;
mod prompt;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tldv_core::config;

use commands::{run_batch, run_download, run_interactive, run_token_help, TOKEN_HELP};

/// Top-level CLI for tldv-dl.
#[derive(Debug, Parser)]
#[command(name = "tldv-dl")]
#[command(about = "Download tl;dv meeting recordings", long_about = None)]
#[command(after_help = TOKEN_HELP)]
pub struct Cli {
    /// Defaults to `interactive` when omitted.
    #[command(subcommand)]
    pub command: Option<CliCommand>,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Download a single meeting recording.
    Download {
        /// Meeting URL, e.g. https://tldv.io/app/meetings/<id>.
        url: String,
        /// Authorization token (prompted for when omitted).
        #[arg(long)]
        token: Option<String>,
        /// Directory for the video and its metadata (default: current directory).
        #[arg(long, short = 'o', value_name = "DIR")]
        output_dir: Option<PathBuf>,
    },

    /// Download several meetings in parallel.
    Batch {
        /// Meeting URLs.
        urls: Vec<String>,
        /// Text file with one URL per line (`#` starts a comment).
        #[arg(long, short = 'f', value_name = "FILE")]
        file: Option<PathBuf>,
        /// Authorization token shared by all downloads (prompted for when omitted).
        #[arg(long)]
        token: Option<String>,
        /// Directory for the videos and their metadata (default: current directory).
        #[arg(long, short = 'o', value_name = "DIR")]
        output_dir: Option<PathBuf>,
        /// Parallel downloads, 1-8 (default from config, normally 3).
        #[arg(long, short = 'w', value_name = "N")]
        workers: Option<usize>,
    },

    /// Ask for mode, URLs, token, and output directory on the terminal.
    Interactive,

    /// Show how to obtain the authorization token.
    TokenHelp,
}

pub async fn run_from_args() -> Result<()> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(CliCommand::Interactive);
    if let CliCommand::TokenHelp = command {
        run_token_help();
        return Ok(());
    }

    let cfg = config::load_or_init()?;
    tracing::debug!("loaded config: {:?}", cfg);

    match command {
        CliCommand::Download {
            url,
            token,
            output_dir,
        } => {
            let token = prompt::token_or_prompt(token).await?;
            run_download(&cfg, &url, &token, output_dir.as_deref()).await?;
        }
        CliCommand::Batch {
            urls,
            file,
            token,
            output_dir,
            workers,
        } => {
            let urls = commands::collect_urls(urls, file.as_deref())?;
            let token = prompt::token_or_prompt(token).await?;
            let workers = workers.unwrap_or(cfg.max_workers);
            run_batch(&cfg, urls, &token, output_dir.as_deref(), workers).await?;
        }
        CliCommand::Interactive => run_interactive(&cfg).await?,
        CliCommand::TokenHelp => run_token_help(),
    }

    Ok(())
}

#[cfg(test)]
mod tests;
