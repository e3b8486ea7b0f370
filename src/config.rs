use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

pub const DEFAULT_BASE_URL: &str = "https://irrexplorer.nlnog.net/api/prefixes";

/// Root configuration structure, deserialized from `.roach/config.toml`.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub batch: BatchConfig,
}

/// Data source endpoint and request limits.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Prefix API root; `/asn/AS<n>` and `/prefix/<cidr>` are appended.
    pub base_url: String,
    /// Per-request timeout.
    pub timeout_secs: u64,
    /// Interactive mode prints a "slow" hint after this long. Never cancels the request.
    pub slow_hint_secs: u64,
    pub user_agent: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 10,
            slow_hint_secs: 5,
            user_agent: format!("roach/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn slow_hint(&self) -> Duration {
        Duration::from_secs(self.slow_hint_secs)
    }
}

/// Batch pacing.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// Pause between consecutive requests.
    pub delay_ms: u64,
    /// Emit a progress log line every N subnets.
    pub progress_interval: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            delay_ms: 100,
            progress_interval: 10,
        }
    }
}

impl BatchConfig {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

/// Load configuration, searching in order:
///
/// 1. `config_override` — path passed via `--config`
/// 2. `<working_dir>/.roach/config.toml`
/// 3. `~/.config/roach/config.toml`
/// 4. Built-in [`Config::default`]
pub fn load_config(working_dir: &Path, config_override: Option<&Path>) -> Result<Config> {
    if let Some(path) = config_override {
        return read_config(path);
    }

    let local_config = working_dir.join(".roach").join("config.toml");
    if local_config.exists() {
        return read_config(&local_config);
    }

    if let Some(home) = dirs::home_dir() {
        let home_config = home.join(".config").join("roach").join("config.toml");
        if home_config.exists() {
            return read_config(&home_config);
        }
    }

    Ok(Config::default())
}

fn read_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    toml::from_str(&content).with_context(|| format!("Invalid config {}", path.display()))
}
