//! Runtime configuration parsed from environment variables.
//!
//! `Config::from_env` reads the process environment; `Config::from_lookup`
//! takes any key lookup so parsing can be tested without touching global
//! state.

use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_DATA_DIR: &str = ".vitalsense";
pub const DEFAULT_PREDICT_URL: &str = "https://parvez-synthetic-anxiety-01-api.onrender.com/predict";
pub const DEFAULT_REFERRAL_URL: &str = "https://interview-platform-1-s86t.onrender.com";
pub const DEFAULT_AUTH_DELAY_MS: u64 = 500;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} must be an http(s) URL, got `{value}`")]
    InvalidUrl { var: &'static str, value: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HttpTimeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

impl Default for HttpTimeouts {
    fn default() -> Self {
        Self { request_secs: DEFAULT_REQUEST_TIMEOUT_SECS, connect_secs: DEFAULT_CONNECT_TIMEOUT_SECS }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub data_dir: PathBuf,
    pub predict_url: String,
    pub referral_url: String,
    pub auth_delay: Duration,
    pub timeouts: HttpTimeouts,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            predict_url: DEFAULT_PREDICT_URL.to_owned(),
            referral_url: DEFAULT_REFERRAL_URL.to_owned(),
            auth_delay: Duration::from_millis(DEFAULT_AUTH_DELAY_MS),
            timeouts: HttpTimeouts::default(),
        }
    }
}

impl Config {
    /// Build config from the process environment.
    ///
    /// Optional:
    /// - `VITALSENSE_DATA_DIR`: store directory (default `.vitalsense`)
    /// - `VITALSENSE_PREDICT_URL`: prediction endpoint
    /// - `VITALSENSE_REFERRAL_URL`: further-analysis referral page
    /// - `VITALSENSE_AUTH_DELAY_MS`: simulated auth latency (default 500)
    /// - `VITALSENSE_REQUEST_TIMEOUT_SECS`: default 60
    /// - `VITALSENSE_CONNECT_TIMEOUT_SECS`: default 10
    ///
    /// # Errors
    ///
    /// Returns an error if a URL variable is set but not http(s).
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from an arbitrary key lookup. Unparseable numbers fall
    /// back to their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if a URL value is not http(s).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let data_dir = lookup("VITALSENSE_DATA_DIR")
            .filter(|v| !v.trim().is_empty())
            .map_or_else(|| PathBuf::from(DEFAULT_DATA_DIR), PathBuf::from);

        let predict_url = parse_url(&lookup, "VITALSENSE_PREDICT_URL", DEFAULT_PREDICT_URL)?;
        let referral_url = parse_url(&lookup, "VITALSENSE_REFERRAL_URL", DEFAULT_REFERRAL_URL)?;

        let auth_delay = Duration::from_millis(parse_u64(&lookup, "VITALSENSE_AUTH_DELAY_MS", DEFAULT_AUTH_DELAY_MS));
        let timeouts = HttpTimeouts {
            request_secs: parse_u64(&lookup, "VITALSENSE_REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS),
            connect_secs: parse_u64(&lookup, "VITALSENSE_CONNECT_TIMEOUT_SECS", DEFAULT_CONNECT_TIMEOUT_SECS),
        };

        Ok(Self { data_dir, predict_url, referral_url, auth_delay, timeouts })
    }
}

fn parse_u64<F>(lookup: &F, key: &str, default: u64) -> u64
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .and_then(|v| v.trim().parse::<u64>().ok())
        .unwrap_or(default)
}

fn parse_url<F>(lookup: &F, var: &'static str, default: &str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(value) = lookup(var).filter(|v| !v.trim().is_empty()) else {
        return Ok(default.to_owned());
    };
    validate_url(var, value.trim())
}

/// Accept only absolute http(s) URLs.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidUrl`] naming `var` otherwise.
pub fn validate_url(var: &'static str, value: &str) -> Result<String, ConfigError> {
    let rest = value
        .strip_prefix("https://")
        .or_else(|| value.strip_prefix("http://"));
    match rest {
        Some(host) if !host.is_empty() => Ok(value.to_owned()),
        _ => Err(ConfigError::InvalidUrl { var, value: value.to_owned() }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
