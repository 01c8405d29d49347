//! Client configuration.
//!
//! Values come from defaults, then environment (`PROPHET_API_URL`,
//! `PROPHET_HOME`, `PROPHET_LOG`), then command-line flags applied by the
//! caller through the `with_*` builders.

use std::path::PathBuf;
use std::time::Duration;

use crate::adapters::file_storage::STORAGE_FILE;

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000/api";
pub const DEFAULT_LOG_FILTER: &str = "warn";
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

pub const ENV_API_URL: &str = "PROPHET_API_URL";
pub const ENV_HOME: &str = "PROPHET_HOME";
pub const ENV_LOG: &str = "PROPHET_LOG";

#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Backend base URL including the `/api` prefix, without a trailing slash.
    pub base_url: String,
    /// Directory holding `local_storage.json`.
    pub data_dir: PathBuf,
    pub log_filter: String,
    pub connect_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            data_dir: default_data_dir(),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
        }
    }
}

/// `~/.prophet`, or `./.prophet` when no home directory is known.
pub fn default_data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".prophet")
}

impl ClientConfig {
    /// Defaults overlaid with any non-empty `PROPHET_*` variables.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(url) = env_value(ENV_API_URL) {
            config = config.with_base_url(url);
        }
        if let Some(home) = env_value(ENV_HOME) {
            config.data_dir = PathBuf::from(home);
        }
        if let Some(filter) = env_value(ENV_LOG) {
            config.log_filter = filter;
        }
        config
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = dir.into();
        self
    }

    pub fn with_log_filter(mut self, filter: impl Into<String>) -> Self {
        self.log_filter = filter.into();
        self
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub fn storage_path(&self) -> PathBuf {
        self.data_dir.join(STORAGE_FILE)
    }
}

fn env_value(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
