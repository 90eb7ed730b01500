//! Application configuration management.
//!
//! Handles loading, saving, and accessing client configuration including
//! API credentials, stream tuning knobs, and logging settings.
//! Configuration is persisted as TOML on disk.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::constants;
use crate::error::{ChirpError, ChirpResult};

/// Top-level application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// API credentials and request settings.
    #[serde(default)]
    pub api: ApiConfig,

    /// Streaming connection settings.
    #[serde(default)]
    pub stream: StreamSettings,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// API credentials and request configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// App-only bearer token. Takes precedence over the consumer key pair.
    #[serde(default)]
    pub bearer_token: String,

    /// Consumer key for the client-credentials token exchange.
    #[serde(default)]
    pub consumer_key: String,

    /// Consumer secret for the client-credentials token exchange.
    #[serde(default)]
    pub consumer_secret: String,

    /// Base URL for the v2 API. Overridable for testing against a local server.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// One-shot request timeout in milliseconds.
    #[serde(default = "default_api_timeout")]
    pub timeout_ms: u64,

    /// Optional proxy URL applied to every request.
    #[serde(default)]
    pub proxy: Option<String>,
}

/// Streaming connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreamSettings {
    /// Consecutive failed connection attempts before giving up.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Read buffer hint for the line framer, in bytes.
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,

    /// Initial backoff delay after a failed attempt, in seconds.
    #[serde(default = "default_backoff_base")]
    pub backoff_base_secs: u64,

    /// Ceiling for the doubling backoff delay, in seconds.
    #[serde(default = "default_backoff_max")]
    pub backoff_max_secs: u64,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Directory for log files. If empty, uses the default location.
    #[serde(default)]
    pub directory: String,

    /// Enable JSON structured logging output for the file layer.
    #[serde(default)]
    pub json_output: bool,
}

// Default value functions for serde

fn default_base_url() -> String {
    constants::BASE_URL_V2.to_string()
}

fn default_api_timeout() -> u64 {
    constants::DEFAULT_API_TIMEOUT_MS
}

fn default_max_retries() -> u32 {
    constants::DEFAULT_MAX_RETRIES
}

fn default_chunk_size() -> usize {
    constants::DEFAULT_CHUNK_SIZE
}

fn default_backoff_base() -> u64 {
    constants::BACKOFF_BASE_SECS
}

fn default_backoff_max() -> u64 {
    constants::BACKOFF_MAX_SECS
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            stream: StreamSettings::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bearer_token: String::new(),
            consumer_key: String::new(),
            consumer_secret: String::new(),
            base_url: default_base_url(),
            timeout_ms: default_api_timeout(),
            proxy: None,
        }
    }
}

impl Default for StreamSettings {
    fn default() -> Self {
        Self {
            max_retries: default_max_retries(),
            chunk_size: default_chunk_size(),
            backoff_base_secs: default_backoff_base(),
            backoff_max_secs: default_backoff_max(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            directory: String::new(),
            json_output: false,
        }
    }
}

impl AppConfig {
    /// Load configuration from the default config file path.
    pub fn load_default() -> ChirpResult<Self> {
        let path = Self::default_config_path()?;
        if path.exists() {
            Self::load_from_file(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific file path.
    pub fn load_from_file(path: &Path) -> ChirpResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Save configuration to a specific file path.
    pub fn save_to_file(&self, path: &Path) -> ChirpResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = toml::to_string_pretty(self)
            .map_err(|e| ChirpError::Config(format!("failed to serialize config: {e}")))?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Get the default configuration file path (`<config dir>/chirp/config.toml`).
    pub fn default_config_path() -> ChirpResult<PathBuf> {
        Ok(config_dir()?.join("config.toml"))
    }

    /// Get the effective log directory, using the configured path or the default.
    pub fn effective_log_dir(&self) -> ChirpResult<PathBuf> {
        if self.logging.directory.is_empty() {
            Ok(data_dir()?.join("logs"))
        } else {
            Ok(PathBuf::from(&self.logging.directory))
        }
    }

    /// Whether any credential source is configured.
    pub fn has_credentials(&self) -> bool {
        !self.api.bearer_token.is_empty()
            || (!self.api.consumer_key.is_empty() && !self.api.consumer_secret.is_empty())
    }
}

/// Platform-specific configuration directory for chirp.
pub fn config_dir() -> ChirpResult<PathBuf> {
    let base = dirs::config_dir()
        .ok_or_else(|| ChirpError::Config("could not determine config directory".into()))?;
    Ok(base.join(constants::APP_NAME))
}

/// Platform-specific data directory for chirp (logs and caches).
pub fn data_dir() -> ChirpResult<PathBuf> {
    let base = dirs::data_dir()
        .ok_or_else(|| ChirpError::Config("could not determine data directory".into()))?;
    Ok(base.join(constants::APP_NAME))
}
