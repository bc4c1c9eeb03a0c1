//! Per-item outcomes and the batch aggregate.

use std::path::{Path, PathBuf};

/// Result of one batch item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadOutcome {
    pub url: String,
    pub success: bool,
    pub file_path: Option<PathBuf>,
    pub error: Option<String>,
}

impl DownloadOutcome {
    pub fn succeeded(url: String, file_path: PathBuf) -> Self {
        Self {
            url,
            success: true,
            file_path: Some(file_path),
            error: None,
        }
    }

    pub fn failed(url: String, error: String) -> Self {
        Self {
            url,
            success: false,
            file_path: None,
            error: Some(error),
        }
    }
}

/// All outcomes of a batch, in completion order.
///
/// An empty summary means nothing was attempted; a batch whose items all failed
/// has `attempted() > 0` and `succeeded() == 0`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub outcomes: Vec<DownloadOutcome>,
}

impl BatchSummary {
    pub fn attempted(&self) -> usize {
        self.outcomes.len()
    }

    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.success).count()
    }

    pub fn failed(&self) -> usize {
        self.attempted() - self.succeeded()
    }

    /// Output paths of successful items.
    pub fn files(&self) -> Vec<&Path> {
        self.outcomes
            .iter()
            .filter_map(|o| o.file_path.as_deref())
            .collect()
    }

    /// `(url, error)` pairs of failed items.
    pub fn failures(&self) -> Vec<(&str, &str)> {
        self.outcomes
            .iter()
            .filter(|o| !o.success)
            .map(|o| (o.url.as_str(), o.error.as_deref().unwrap_or("unknown error")))
            .collect()
    }
}
