use std::{path::PathBuf, time::Duration};

use thiserror::Error;

use crate::domain::FilterCriteria;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub fallback: FallbackConfig,
    pub directories: DirectoryConfig,
    pub logging: LoggingConfig,
    pub timezone: String,
    pub refresh_interval: Option<Duration>,
    pub filters: FilterCriteria,
}

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    pub fetch_timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct FallbackConfig {
    /// `{last_updated, items}` document for the overview.
    pub dashboard_path: PathBuf,
    /// `{insights}` document for the call-to-action view.
    pub action_path: PathBuf,
}

#[derive(Debug, Clone)]
pub struct DirectoryConfig {
    pub logs_dir: String,
}

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub level: String,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value}")]
    Invalid { key: &'static str, value: String },
}
