use crate::watcher::{WatchBackend, WatchOptions};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use subview_core::expand_tilde;

/// Resolve the config file path based on priority:
/// 1. Explicit path (with tilde expansion)
/// 2. SUBVIEW_CONFIG environment variable (with tilde expansion)
/// 3. Platform config directory (`<config_dir>/subview/config.toml`)
/// 4. ~/.subview/config.toml
pub fn resolve_config_path(explicit_path: Option<&str>) -> Result<PathBuf> {
    if let Some(path) = explicit_path {
        return Ok(expand_tilde(path));
    }

    if let Ok(env_path) = std::env::var("SUBVIEW_CONFIG")
        && !env_path.is_empty()
    {
        return Ok(expand_tilde(&env_path));
    }

    if let Some(config_dir) = dirs::config_dir() {
        return Ok(config_dir.join("subview").join("config.toml"));
    }

    if let Some(home) = dirs::home_dir() {
        return Ok(home.join(".subview").join("config.toml"));
    }

    Err(Error::Config(
        "Could not determine config path: no HOME or config directory found".to_string(),
    ))
}

/// How a record is turned into display lines
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayFormat {
    #[default]
    Compact,
    Verbose,
}

impl DisplayFormat {
    pub fn toggle(self) -> Self {
        match self {
            DisplayFormat::Compact => DisplayFormat::Verbose,
            DisplayFormat::Verbose => DisplayFormat::Compact,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DisplayFormat::Compact => "compact",
            DisplayFormat::Verbose => "verbose",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// A transcript written within this window counts as live
    pub live_window_ms: u64,
    /// Liveness and content poll of the selected agent
    pub status_poll_ms: u64,
    /// Session list and agent list rescan
    pub rescan_ms: u64,
    /// Lines moved by PageUp/PageDown
    pub page_size: usize,
    pub format: DisplayFormat,
    pub watch_backend: WatchBackend,
    /// Scan interval of the poll watch backend
    pub poll_interval_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            live_window_ms: 5000,
            status_poll_ms: 2000,
            rescan_ms: 3000,
            page_size: 10,
            format: DisplayFormat::Compact,
            watch_backend: WatchBackend::Native,
            poll_interval_ms: 500,
        }
    }
}

impl Config {
    /// Load from the resolved path; a missing file yields defaults.
    pub fn load(explicit_path: Option<&str>) -> Result<Self> {
        let config_path = resolve_config_path(explicit_path)?;
        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn default_path() -> Result<PathBuf> {
        resolve_config_path(None)
    }

    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("live_window_ms", self.live_window_ms),
            ("status_poll_ms", self.status_poll_ms),
            ("rescan_ms", self.rescan_ms),
            ("poll_interval_ms", self.poll_interval_ms),
        ];
        for (name, value) in positive {
            if value == 0 {
                return Err(Error::Config(format!("{} must be greater than 0", name)));
            }
        }
        if self.page_size == 0 {
            return Err(Error::Config("page_size must be greater than 0".to_string()));
        }
        Ok(())
    }

    pub fn live_window(&self) -> Duration {
        Duration::from_millis(self.live_window_ms)
    }

    pub fn status_poll_interval(&self) -> Duration {
        Duration::from_millis(self.status_poll_ms)
    }

    pub fn rescan_interval(&self) -> Duration {
        Duration::from_millis(self.rescan_ms)
    }

    pub fn watch_options(&self) -> WatchOptions {
        WatchOptions {
            backend: self.watch_backend,
            poll_interval: Duration::from_millis(self.poll_interval_ms),
        }
    }
}
