use std::{
    io::{self, Write},
    sync::Arc,
};

use anyhow::{Context, Result};
use chrono_tz::Tz;
use reqwest::Client;
use tokio::time::sleep;

use crate::{
    config::AppConfig,
    feed::{self, InsightsApi},
    infrastructure::{directories::ResolvedPaths, shutdown::Shutdown},
    report::{build_report, DashboardReport},
    state::DashboardState,
};

pub struct DashboardApp {
    api: InsightsApi,
    config: Arc<AppConfig>,
    paths: ResolvedPaths,
    state: Arc<DashboardState>,
    timezone: Tz,
    shutdown: Shutdown,
}

impl DashboardApp {
    pub fn initialize(config: AppConfig, paths: ResolvedPaths, shutdown: Shutdown) -> Result<Self> {
        let http = Client::builder()
            .user_agent(format!("berinsight/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .context("failed to build http client")?;
        let api = InsightsApi::new(http, &config.api);

        for missing in paths.missing_fallbacks() {
            tracing::warn!(target: "app", path = %missing.display(), "fallback document not found");
        }

        let timezone = config.timezone.parse::<Tz>().unwrap_or_else(|_| {
            tracing::warn!(
                target: "app",
                timezone = %config.timezone,
                "unknown timezone, using Asia/Jakarta"
            );
            chrono_tz::Asia::Jakarta
        });

        Ok(Self {
            api,
            config: Arc::new(config),
            paths,
            state: Arc::new(DashboardState::new()),
            timezone,
            shutdown,
        })
    }

    pub async fn run(self) -> Result<()> {
        let mut shutdown = self.shutdown.subscribe();
        tracing::info!(
            target: "app",
            api = %self.config.api.base_url,
            timeout_ms = self.config.api.fetch_timeout.as_millis() as u64,
            filters_active = !self.config.filters.is_empty(),
            "dashboard starting"
        );

        loop {
            if shutdown.is_triggered() {
                break;
            }

            tokio::select! {
                _ = feed::refresh(&self.api, &self.paths.fallback, &self.state) => {}
                _ = shutdown.notified() => {
                    tracing::info!(target: "app", "shutdown requested during refresh");
                    break;
                }
            }

            let report = build_report(&self.state.snapshot(), &self.config.filters, self.timezone);
            emit(&report)?;
            tracing::info!(
                target: "app",
                total = report.overview.total,
                shown = report.insights.len(),
                offline = report.offline,
                "report emitted"
            );

            let Some(interval) = self.config.refresh_interval else {
                break;
            };
            tokio::select! {
                _ = sleep(interval) => {}
                _ = shutdown.notified() => break,
            }
        }

        tracing::info!(target: "app", "dashboard stopped");
        Ok(())
    }
}

fn emit(report: &DashboardReport) -> Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    let mut out = io::stdout().lock();
    writeln!(out, "{json}")?;
    out.flush()?;
    Ok(())
}
