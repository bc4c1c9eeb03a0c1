//! CLI command handlers. Each command is in its own file.

mod batch;
mod download;
mod interactive;
mod token_help;

pub use batch::{collect_urls, run_batch};
pub use download::run_download;
pub use interactive::run_interactive;
pub use token_help::{run_token_help, TOKEN_HELP};
