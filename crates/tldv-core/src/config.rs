use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// Hard upper bound on parallel batch workers.
pub const MAX_WORKERS: usize = 8;

/// External downloader programs and the knobs passed to the primary one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolsConfig {
    /// Segmented-stream downloader, tried first.
    pub primary: String,
    /// General transcoder used when the primary tool is unavailable.
    pub fallback: String,
    /// Parallel segment fetches for the primary tool.
    pub thread_count: u32,
    /// Per-segment retry count for the primary tool.
    pub retry_count: u32,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            primary: "N_m3u8DL-RE".to_string(),
            fallback: "ffmpeg".to_string(),
            thread_count: 8,
            retry_count: 3,
        }
    }
}

/// Global configuration loaded from `~/.config/tldv-dl/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TldvConfig {
    /// Base URL of the meetings API gateway.
    pub api_base: String,
    /// User-Agent sent with API requests.
    pub user_agent: String,
    /// Timeout for the watch-page API request.
    pub api_timeout_secs: u64,
    /// Timeout for each `--version` probe of a downloader tool.
    pub probe_timeout_secs: u64,
    /// Timeout for the external download process.
    pub download_timeout_secs: u64,
    /// Default number of parallel downloads in batch mode (clamped to 1..=8).
    pub max_workers: usize,
    #[serde(default)]
    pub tools: ToolsConfig,
}

impl Default for TldvConfig {
    fn default() -> Self {
        Self {
            api_base: "https://gw.tldv.io".to_string(),
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36"
                .to_string(),
            api_timeout_secs: 30,
            probe_timeout_secs: 10,
            download_timeout_secs: 3600,
            max_workers: 3,
            tools: ToolsConfig::default(),
        }
    }
}

impl TldvConfig {
    pub fn api_timeout(&self) -> Duration {
        Duration::from_secs(self.api_timeout_secs)
    }

    pub fn probe_timeout(&self) -> Duration {
        Duration::from_secs(self.probe_timeout_secs)
    }

    pub fn download_timeout(&self) -> Duration {
        Duration::from_secs(self.download_timeout_secs)
    }
}

/// Clamps a caller-supplied worker count into `1..=MAX_WORKERS`.
pub fn clamp_workers(n: usize) -> usize {
    n.clamp(1, MAX_WORKERS)
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("tldv-dl")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<TldvConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = TldvConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)
        .with_context(|| format!("read config: {}", path.display()))?;
    let cfg: TldvConfig =
        toml::from_str(&data).with_context(|| format!("parse config: {}", path.display()))?;
    Ok(cfg)
}
