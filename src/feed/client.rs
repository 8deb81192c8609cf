use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tokio::time::timeout;
use url::Url;

use crate::{config::ApiConfig, domain::HealthStatus};

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid endpoint url: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),
    #[error("request aborted after {0:?}")]
    Timeout(Duration),
    #[error("unexpected status {0}")]
    Status(StatusCode),
    #[error("malformed response body: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Time-bounded reader for the insights API.
#[derive(Clone)]
pub struct InsightsApi {
    http: Client,
    base_url: String,
    fetch_timeout: Duration,
}

impl InsightsApi {
    pub fn new(http: Client, config: &ApiConfig) -> Self {
        Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            fetch_timeout: config.fetch_timeout,
        }
    }

    pub async fn health(&self) -> Result<HealthStatus, FetchError> {
        self.get_json("healthz").await
    }

    /// `/insights`, decoded into whichever feed shape the caller expects.
    pub async fn insights<T: DeserializeOwned>(&self) -> Result<T, FetchError> {
        self.get_json("insights").await
    }

    fn endpoint(&self, path: &str) -> Result<Url, FetchError> {
        Ok(Url::parse(&format!("{}/{}", self.base_url, path))?)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, FetchError> {
        let url = self.endpoint(path)?;
        let started = std::time::Instant::now();

        // Dropping the future on timeout aborts the in-flight request.
        let request = async {
            let response = self.http.get(url.clone()).send().await?;
            let status = response.status();
            if !status.is_success() {
                return Err(FetchError::Status(status));
            }
            let body = response.bytes().await?;
            Ok::<T, FetchError>(serde_json::from_slice(&body)?)
        };

        let result = timeout(self.fetch_timeout, request)
            .await
            .map_err(|_| FetchError::Timeout(self.fetch_timeout))?;

        tracing::debug!(
            target: "feed",
            url = %url,
            ok = result.is_ok(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "api request finished"
        );
        result
    }
}
