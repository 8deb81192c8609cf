use std::{env, path::PathBuf, time::Duration};

use chrono::NaiveDate;

use super::env::{
    ApiConfig, AppConfig, ConfigError, DirectoryConfig, FallbackConfig, LoggingConfig,
};
use crate::domain::{filter::selection, FilterCriteria, Priority};

pub const DEFAULT_API_BASE: &str = "http://localhost:8000";
pub const DEFAULT_FETCH_TIMEOUT_MS: u64 = 3_000;

pub fn load_config() -> Result<AppConfig, ConfigError> {
    AppConfig::from_lookup(|key| env::var(key).ok())
}

impl AppConfig {
    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api = ApiConfig {
            base_url: var("API_BASE")
                .map(|v| v.trim().trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
            fetch_timeout: Duration::from_millis(
                parse_num(var("FETCH_TIMEOUT_MS"), "FETCH_TIMEOUT_MS")?
                    .unwrap_or(DEFAULT_FETCH_TIMEOUT_MS),
            ),
        };

        let fallback = FallbackConfig {
            dashboard_path: var("DASHBOARD_FALLBACK_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("assets/fallback.json")),
            action_path: var("ACTION_FALLBACK_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("assets/BerInsight/fallback.json")),
        };

        let directories = DirectoryConfig {
            logs_dir: var("LOGS_DIR").unwrap_or_else(|| "logs".to_string()),
        };

        let logging = LoggingConfig {
            level: var("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
        };

        let timezone = var("DASHBOARD_TIMEZONE").unwrap_or_else(|| "Asia/Jakarta".to_string());

        let refresh_interval = parse_num(var("REFRESH_INTERVAL_SECS"), "REFRESH_INTERVAL_SECS")?
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs);

        let filters = FilterCriteria {
            from: parse_date(var("FILTER_FROM"), "FILTER_FROM")?,
            to: parse_date(var("FILTER_TO"), "FILTER_TO")?,
            product: var("FILTER_PRODUCT").and_then(|v| selection(&v)),
            channel: var("FILTER_CHANNEL").and_then(|v| selection(&v)),
            platform: var("FILTER_PLATFORM").and_then(|v| selection(&v)),
            sentiment: var("FILTER_SENTIMENT").and_then(|v| selection(&v)),
            priority: var("FILTER_PRIORITY")
                .and_then(|v| selection(&v))
                .map(|v| {
                    v.parse::<Priority>().map_err(|_| ConfigError::Invalid {
                        key: "FILTER_PRIORITY",
                        value: v,
                    })
                })
                .transpose()?,
            team: var("FILTER_TEAM").and_then(|v| selection(&v)),
        };

        Ok(Self {
            api,
            fallback,
            directories,
            logging,
            timezone,
            refresh_interval,
            filters,
        })
    }
}

fn parse_num(value: Option<String>, key: &'static str) -> Result<Option<u64>, ConfigError> {
    value
        .map(|v| {
            v.trim()
                .parse::<u64>()
                .map_err(|_| ConfigError::Invalid { key, value: v })
        })
        .transpose()
}

fn parse_date(value: Option<String>, key: &'static str) -> Result<Option<NaiveDate>, ConfigError> {
    value
        .and_then(|v| selection(&v))
        .map(|v| {
            NaiveDate::parse_from_str(&v, "%Y-%m-%d")
                .map_err(|_| ConfigError::Invalid { key, value: v })
        })
        .transpose()
}
