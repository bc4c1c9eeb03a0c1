//! URL list files: one meeting URL per line.

use anyhow::{Context, Result};
use std::path::Path;

/// Reads URLs from `path`, skipping blank lines and `#` comments.
pub fn read_url_list(path: &Path) -> Result<Vec<String>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("read URL list: {}", path.display()))?;
    Ok(parse_url_list(&text))
}

pub fn parse_url_list(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with('#'))
        .map(str::to_string)
        .collect()
}
