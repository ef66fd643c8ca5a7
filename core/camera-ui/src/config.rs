//! Configuration loading for the camera UI.
//!
//! Resolution order for the config file:
//! - explicit path (`--config`)
//! - `CAMERA_UI_CONFIG` environment variable
//! - `~/.camera-ui/config.toml`
//!
//! A missing file yields defaults. A present but malformed file is an error.

use serde::Deserialize;
use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{Result, UiError};

pub const CONFIG_ENV: &str = "CAMERA_UI_CONFIG";
const CONFIG_DIR: &str = ".camera-ui";
const CONFIG_FILE: &str = "config.toml";

pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:8898";
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 3;
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 5000;
pub const DEFAULT_DURATION_SECS: u32 = 30;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct UiConfig {
    pub server_url: String,
    pub poll_interval_secs: u64,
    pub request_timeout_ms: u64,
    /// Initial value of the capture-time input.
    pub default_duration_secs: u32,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            poll_interval_secs: DEFAULT_POLL_INTERVAL_SECS,
            request_timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS,
            default_duration_secs: DEFAULT_DURATION_SECS,
        }
    }
}

impl UiConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    /// Server base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        self.server_url.trim_end_matches('/')
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url(), path)
    }

    pub fn with_server_url(mut self, url: impl Into<String>) -> Self {
        self.server_url = url.into();
        self
    }

    pub fn validate(&self) -> Result<()> {
        let url = self.server_url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(UiError::InvalidServerUrl(self.server_url.clone()));
        }
        if self.poll_interval_secs == 0 {
            return Err(UiError::ConfigMalformed {
                path: PathBuf::from(CONFIG_FILE),
                details: "poll_interval_secs must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    if let Ok(path) = env::var(CONFIG_ENV) {
        if !path.trim().is_empty() {
            return Some(PathBuf::from(path));
        }
    }
    dirs::home_dir().map(|home| home.join(CONFIG_DIR).join(CONFIG_FILE))
}

/// Loads the UI configuration, returning defaults if the file doesn't exist.
pub fn load_config(path: Option<PathBuf>) -> Result<UiConfig> {
    let config_path = match path.or_else(default_config_path) {
        Some(path) => path,
        None => return Ok(UiConfig::default()),
    };

    if !config_path.exists() {
        return Ok(UiConfig::default());
    }

    let config = read_config_file(&config_path)?;
    config.validate().map_err(|err| match err {
        UiError::ConfigMalformed { details, .. } => UiError::ConfigMalformed {
            path: config_path.clone(),
            details,
        },
        other => other,
    })?;
    Ok(config)
}

fn read_config_file(path: &Path) -> Result<UiConfig> {
    let content = fs_err::read_to_string(path).map_err(|source| UiError::ConfigRead {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str::<UiConfig>(&content).map_err(|err| UiError::ConfigMalformed {
        path: path.to_path_buf(),
        details: err.to_string(),
    })
}
