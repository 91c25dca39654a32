//! Updater configuration loaded from `~/.config/hotpush/config.toml`.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use crate::downloader::FetchOptions;

/// Global configuration for the update fetcher.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HotpushConfig {
    /// Bytes between two progress reports for one file.
    pub progress_quantum_bytes: u64,
    /// TCP connect timeout in seconds.
    pub connect_timeout_secs: u64,
    /// Hard wall-clock limit for one file's transfer, in seconds.
    pub transfer_timeout_secs: u64,
    /// Extra request headers sent with every download (e.g. auth tokens).
    #[serde(default)]
    pub request_headers: HashMap<String, String>,
}

impl Default for HotpushConfig {
    fn default() -> Self {
        Self {
            progress_quantum_bytes: 64 * 1024,
            connect_timeout_secs: 30,
            transfer_timeout_secs: 3600,
            request_headers: HashMap::new(),
        }
    }
}

impl HotpushConfig {
    /// Per-transfer tunables derived from this config.
    pub fn fetch_options(&self) -> FetchOptions {
        FetchOptions {
            progress_quantum: self.progress_quantum_bytes,
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            transfer_timeout: Duration::from_secs(self.transfer_timeout_secs),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("hotpush")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<HotpushConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = HotpushConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: HotpushConfig = toml::from_str(&data)?;
    Ok(cfg)
}
