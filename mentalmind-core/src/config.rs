//! Configuration loading and management
//!
//! Configuration is loaded from `~/.config/mentalmind/config.toml`
//!
//! This module follows the XDG Base Directory Specification:
//! - Config: `$XDG_CONFIG_HOME/mentalmind/` (~/.config/mentalmind/)
//! - State/Logs: `$XDG_STATE_HOME/mentalmind/` (~/.local/state/mentalmind/)

use crate::analytics::TrendPolicy;
use crate::error::{Error, Result};
use crate::ingest::InvalidTimestampPolicy;
use crate::types::WindowPreset;
use chrono::FixedOffset;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Environment variable that overrides `api.base_url`.
pub const API_URL_ENV: &str = "MENTALMIND_API_URL";

/// Returns a best-effort home directory path.
fn home_dir() -> PathBuf {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Returns XDG_CONFIG_HOME or ~/.config
fn xdg_config_home() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".config"))
}

/// Returns XDG_STATE_HOME or ~/.local/state
fn xdg_state_home() -> PathBuf {
    std::env::var("XDG_STATE_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".local/state"))
}

/// Main configuration struct
#[derive(Debug, Deserialize, Default)]
pub struct Config {
    /// Journal store connection
    #[serde(default)]
    pub api: ApiConfig,

    /// Aggregation policy
    #[serde(default)]
    pub analytics: AnalyticsConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Journal store (backend) connection settings
#[derive(Debug, Deserialize, Clone)]
pub struct ApiConfig {
    /// Base URL of the journal service
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// HTTP request timeout in seconds
    #[serde(default = "default_api_timeout")]
    pub timeout_secs: u64,

    /// Max retry attempts for transient failures
    #[serde(default = "default_api_max_retries")]
    pub max_retries: usize,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_api_timeout(),
            max_retries: default_api_max_retries(),
        }
    }
}

impl ApiConfig {
    /// Apply the `MENTALMIND_API_URL` override, if set.
    pub fn with_env_override(mut self) -> Self {
        if let Ok(url) = std::env::var(API_URL_ENV) {
            if !url.trim().is_empty() {
                self.base_url = url;
            }
        }
        self
    }

    pub fn validate(&self) -> Result<()> {
        let url = self.base_url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(Error::Config(format!(
                "api.base_url must start with http:// or https:// (got {:?})",
                self.base_url
            )));
        }
        Ok(())
    }
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_api_timeout() -> u64 {
    10
}

fn default_api_max_retries() -> usize {
    2
}

/// Analytics policy configuration
#[derive(Debug, Deserialize, Clone)]
pub struct AnalyticsConfig {
    /// Window used when none is requested explicitly
    #[serde(default)]
    pub default_period: WindowPreset,

    /// Number of trailing days compared against the rest of the window
    #[serde(default = "default_trend_recent_days")]
    pub trend_recent_days: usize,

    /// Minimum score difference before a trend is reported
    #[serde(default = "default_trend_threshold")]
    pub trend_threshold: f64,

    /// Active days required on each side of the split before a trend is reported
    #[serde(default = "default_trend_min_active_days")]
    pub trend_min_active_days: usize,

    /// What to do with entries whose timestamp cannot be parsed
    #[serde(default)]
    pub invalid_timestamps: InvalidTimestampPolicy,

    /// Fixed UTC offset (e.g. "+05:30") for calendar days; machine local time if unset
    #[serde(default)]
    pub utc_offset: Option<String>,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            default_period: WindowPreset::default(),
            trend_recent_days: default_trend_recent_days(),
            trend_threshold: default_trend_threshold(),
            trend_min_active_days: default_trend_min_active_days(),
            invalid_timestamps: InvalidTimestampPolicy::default(),
            utc_offset: None,
        }
    }
}

impl AnalyticsConfig {
    pub fn trend_policy(&self) -> TrendPolicy {
        TrendPolicy {
            recent_days: self.trend_recent_days,
            threshold: self.trend_threshold,
            min_active_days: self.trend_min_active_days,
        }
    }

    /// Parsed `utc_offset`, if configured.
    pub fn fixed_offset(&self) -> Result<Option<FixedOffset>> {
        match self.utc_offset.as_deref() {
            None => Ok(None),
            Some(raw) => parse_utc_offset(raw).map(Some),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.trend_recent_days == 0 {
            return Err(Error::Config(
                "analytics.trend_recent_days must be at least 1".to_string(),
            ));
        }
        if !self.trend_threshold.is_finite() || self.trend_threshold < 0.0 {
            return Err(Error::Config(
                "analytics.trend_threshold must be a non-negative number".to_string(),
            ));
        }
        self.fixed_offset()?;
        Ok(())
    }
}

fn default_trend_recent_days() -> usize {
    7
}

fn default_trend_threshold() -> f64 {
    0.3
}

fn default_trend_min_active_days() -> usize {
    2
}

/// Parse a UTC offset such as "+05:30", "-0800" or "Z".
fn parse_utc_offset(raw: &str) -> Result<FixedOffset> {
    let invalid = || Error::Config(format!("invalid analytics.utc_offset: {:?}", raw));
    let value = raw.trim();
    if value.eq_ignore_ascii_case("z") {
        return FixedOffset::east_opt(0).ok_or_else(invalid);
    }
    value.parse::<FixedOffset>().map_err(|_| invalid())
}

/// Logging configuration
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Maximum number of log files to keep
    #[serde(default = "default_max_log_files")]
    pub max_files: usize,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            max_files: default_max_log_files(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_max_log_files() -> usize {
    5
}

impl Config {
    /// Load configuration from the default path
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if !config_path.exists() {
            tracing::info!("No config file found at {:?}, using defaults", config_path);
            return Ok(Config::default());
        }

        Self::load_from(&config_path)
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("failed to read config file {:?}: {}", path, e)))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("failed to parse config: {}", e)))?;

        config.api.validate()?;
        config.analytics.validate()?;

        Ok(config)
    }

    /// Returns the default config file path
    ///
    /// `$XDG_CONFIG_HOME/mentalmind/config.toml` (~/.config/mentalmind/config.toml)
    pub fn config_path() -> PathBuf {
        xdg_config_home().join("mentalmind").join("config.toml")
    }

    /// Returns the state directory path (for logs)
    ///
    /// `$XDG_STATE_HOME/mentalmind/` (~/.local/state/mentalmind/)
    pub fn state_dir() -> PathBuf {
        xdg_state_home().join("mentalmind")
    }
}
