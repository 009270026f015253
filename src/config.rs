use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

use crate::models::controls::{LIMIT_MAX, LIMIT_MIN, REFRESH_MAX, REFRESH_MIN};

/// Deployed backend serving the option chain snapshots
pub const BACKEND_URL: &str = "https://all-hft.onrender.com";
/// Same reference list the backend polls
pub const STOCKS_CSV: &str = "stocks.csv";
pub const DEFAULT_REFRESH: u64 = 60;
pub const DEFAULT_LIMIT: u32 = 200;
pub const CHART_DIR: &str = "charts";
pub const CHART_WIDTH: u32 = 1200;
pub const CHART_HEIGHT: u32 = 500;
pub const HTTP_TIMEOUT_SECS: u64 = 20;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Invalid value '{value}' for {key}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub backend_url: String,
    pub stocks_csv: PathBuf,
    pub default_refresh: u64,
    pub default_limit: u32,
    pub chart_dir: PathBuf,
    pub chart_width: u32,
    pub chart_height: u32,
    pub http_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend_url: BACKEND_URL.to_string(),
            stocks_csv: PathBuf::from(STOCKS_CSV),
            default_refresh: DEFAULT_REFRESH,
            default_limit: DEFAULT_LIMIT,
            chart_dir: PathBuf::from(CHART_DIR),
            chart_width: CHART_WIDTH,
            chart_height: CHART_HEIGHT,
            http_timeout: Duration::from_secs(HTTP_TIMEOUT_SECS),
        }
    }
}

impl Config {
    /// Build the config from the process environment (after `.env` has been loaded)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from any key lookup, falling back to the embedded defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();

        if let Some(url) = non_empty(lookup("BACKEND_URL")) {
            config.backend_url = url.trim_end_matches('/').to_string();
        }
        if let Some(path) = non_empty(lookup("STOCKS_CSV")) {
            config.stocks_csv = PathBuf::from(path);
        }
        if let Some(path) = non_empty(lookup("CHART_DIR")) {
            config.chart_dir = PathBuf::from(path);
        }

        if let Some(raw) = non_empty(lookup("DEFAULT_REFRESH")) {
            let secs: u64 = parse_number("DEFAULT_REFRESH", &raw)?;
            if !(REFRESH_MIN..=REFRESH_MAX).contains(&secs) {
                return Err(out_of_range("DEFAULT_REFRESH", raw, REFRESH_MIN, REFRESH_MAX));
            }
            config.default_refresh = secs;
        }

        if let Some(raw) = non_empty(lookup("DEFAULT_LIMIT")) {
            let limit: u32 = parse_number("DEFAULT_LIMIT", &raw)?;
            if !(LIMIT_MIN..=LIMIT_MAX).contains(&limit) {
                return Err(out_of_range("DEFAULT_LIMIT", raw, LIMIT_MIN, LIMIT_MAX));
            }
            config.default_limit = limit;
        }

        if let Some(raw) = non_empty(lookup("CHART_WIDTH")) {
            config.chart_width = parse_positive("CHART_WIDTH", &raw)?;
        }
        if let Some(raw) = non_empty(lookup("CHART_HEIGHT")) {
            config.chart_height = parse_positive("CHART_HEIGHT", &raw)?;
        }
        if let Some(raw) = non_empty(lookup("HTTP_TIMEOUT_SECS")) {
            let secs: u32 = parse_positive("HTTP_TIMEOUT_SECS", &raw)?;
            config.http_timeout = Duration::from_secs(secs as u64);
        }

        Ok(config)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_number<T: std::str::FromStr>(key: &'static str, raw: &str) -> Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    raw.parse::<T>().map_err(|e| ConfigError::Invalid {
        key,
        value: raw.to_string(),
        reason: e.to_string(),
    })
}

fn parse_positive(key: &'static str, raw: &str) -> Result<u32, ConfigError> {
    let value: u32 = parse_number(key, raw)?;
    if value == 0 {
        return Err(ConfigError::Invalid {
            key,
            value: raw.to_string(),
            reason: "must be greater than zero".to_string(),
        });
    }
    Ok(value)
}

fn out_of_range<T: std::fmt::Display>(key: &'static str, raw: String, min: T, max: T) -> ConfigError {
    ConfigError::Invalid {
        key,
        value: raw,
        reason: format!("must be between {} and {}", min, max),
    }
}
