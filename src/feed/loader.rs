use std::path::Path;

use futures::future::join3;

use super::{
    client::{FetchError, InsightsApi},
    fallback::load_fallback,
};
use crate::{
    config::FallbackConfig,
    domain::{ActionFeed, HealthStatus, Insight, InsightsFeed},
    state::{DashboardState, Loaded},
};

/// Call-to-action load: probe `/healthz`, then read `/insights`.
///
/// Any failure along the way switches to the bundled `{insights}` document.
/// If that is unreadable too, the view gets no insights.
pub async fn load_insights(api: &InsightsApi, fallback: &Path) -> Loaded<Vec<Insight>> {
    match fetch_action_feed(api).await {
        Ok(feed) => {
            tracing::info!(target: "feed", total = feed.insights.len(), "insights loaded");
            Loaded::live(feed.insights)
        }
        Err(err) => {
            tracing::warn!(target: "feed", error = %err, "failed to fetch insights, trying fallback");
            match load_fallback::<ActionFeed>(fallback).await {
                Ok(feed) => {
                    tracing::info!(
                        target: "feed",
                        total = feed.insights.len(),
                        path = %fallback.display(),
                        "insights loaded from fallback"
                    );
                    Loaded::fallback(feed.insights)
                }
                Err(err) => {
                    tracing::error!(target: "feed", error = %err, "fallback also failed");
                    Loaded::live(Vec::new())
                }
            }
        }
    }
}

async fn fetch_action_feed(api: &InsightsApi) -> Result<ActionFeed, FetchError> {
    api.health().await?;
    api.insights::<ActionFeed>().await
}

/// Overview load: `/insights` in the `{last_updated, items}` shape.
pub async fn load_feed(api: &InsightsApi, fallback: &Path) -> Loaded<Option<InsightsFeed>> {
    match api.insights::<InsightsFeed>().await {
        Ok(feed) => {
            tracing::info!(
                target: "feed",
                total = feed.items.len(),
                last_updated = %feed.last_updated,
                "feed loaded"
            );
            Loaded::live(Some(feed))
        }
        Err(err) => {
            tracing::warn!(target: "feed", error = %err, "failed to fetch feed, trying fallback");
            match load_fallback::<InsightsFeed>(fallback).await {
                Ok(feed) => Loaded::fallback(Some(feed)),
                Err(err) => {
                    tracing::error!(target: "feed", error = %err, "fallback also failed");
                    Loaded::live(None)
                }
            }
        }
    }
}

pub async fn load_health(api: &InsightsApi) -> Option<HealthStatus> {
    match api.health().await {
        Ok(status) => Some(status),
        Err(err) => {
            tracing::warn!(target: "feed", error = %err, "failed to fetch health status");
            None
        }
    }
}

/// Runs every page load concurrently. Each one writes its own slot as soon
/// as it settles; loading clears once all have joined.
pub async fn refresh(api: &InsightsApi, fallback: &FallbackConfig, state: &DashboardState) {
    state.begin_loading();

    let health = async { state.replace_health(load_health(api).await) };
    let feed = async { state.replace_feed(load_feed(api, &fallback.dashboard_path).await) };
    let action = async { state.replace_action(load_insights(api, &fallback.action_path).await) };
    join3(health, feed, action).await;

    state.finish_loading();
}

#[cfg(test)]
mod tests {
    use std::{collections::HashMap, io::Write, net::SocketAddr, sync::Arc, time::Duration};

    use reqwest::Client;
    use tokio::{
        io::{AsyncReadExt, AsyncWriteExt},
        net::TcpListener,
    };

    use super::*;
    use crate::config::ApiConfig;

    #[derive(Clone)]
    enum Reply {
        Json(u16, &'static str),
        Hang,
    }

    const HEALTH: &str = r#"{"status": "ok", "time": "2025-01-01T03:00:00+00:00"}"#;
    const ACTION: &str = r#"{"insights": [{"id": "1", "title": "Urgent issue"}]}"#;
    const FEED: &str = r#"{"last_updated": "2025-01-01 10:00 WIB", "items": [{"title": "a"}, {"title": "b"}]}"#;

    /// Minimal HTTP/1.1 responder keyed by request path.
    async fn serve(routes: Vec<(&'static str, Reply)>) -> SocketAddr {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let routes: Arc<HashMap<&'static str, Reply>> = Arc::new(routes.into_iter().collect());

        tokio::spawn(async move {
            loop {
                let Ok((mut socket, _)) = listener.accept().await else {
                    return;
                };
                let routes = routes.clone();
                tokio::spawn(async move {
                    let mut buf = vec![0u8; 4096];
                    let n = socket.read(&mut buf).await.unwrap_or(0);
                    let request = String::from_utf8_lossy(&buf[..n]);
                    let path = request.split_whitespace().nth(1).unwrap_or("/").to_string();
                    let reply = routes
                        .get(path.as_str())
                        .cloned()
                        .unwrap_or(Reply::Json(404, "{}"));
                    match reply {
                        Reply::Hang => tokio::time::sleep(Duration::from_secs(30)).await,
                        Reply::Json(status, body) => {
                            let response = format!(
                                "HTTP/1.1 {status} X\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                                body.len()
                            );
                            let _ = socket.write_all(response.as_bytes()).await;
                        }
                    }
                });
            }
        });
        addr
    }

    fn api(base_url: String) -> InsightsApi {
        InsightsApi::new(
            Client::new(),
            &ApiConfig {
                base_url,
                fetch_timeout: Duration::from_millis(300),
            },
        )
    }

    fn fallback_file(body: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(body.as_bytes()).unwrap();
        file
    }

    #[tokio::test]
    async fn live_insights_after_healthy_probe() {
        let addr = serve(vec![
            ("/healthz", Reply::Json(200, HEALTH)),
            ("/insights", Reply::Json(200, ACTION)),
        ])
        .await;
        let loaded = load_insights(&api(format!("http://{addr}")), Path::new("/nonexistent")).await;
        assert!(!loaded.offline);
        assert_eq!(loaded.data.len(), 1);
        assert_eq!(loaded.data[0].title, "Urgent issue");
    }

    #[tokio::test]
    async fn timed_out_insights_fall_back_offline() {
        let addr = serve(vec![
            ("/healthz", Reply::Json(200, HEALTH)),
            ("/insights", Reply::Hang),
        ])
        .await;
        let file = fallback_file(r#"{"insights": [{"title": "cached"}, {"title": "copy"}]}"#);
        let loaded = load_insights(&api(format!("http://{addr}")), file.path()).await;
        assert!(loaded.offline);
        assert_eq!(loaded.data.len(), 2);
        assert_eq!(loaded.data[0].title, "cached");
    }

    #[tokio::test]
    async fn unhealthy_probe_uses_fallback() {
        let addr = serve(vec![
            ("/healthz", Reply::Json(503, "{}")),
            ("/insights", Reply::Json(200, ACTION)),
        ])
        .await;
        let file = fallback_file(r#"{"insights": []}"#);
        let loaded = load_insights(&api(format!("http://{addr}")), file.path()).await;
        assert!(loaded.offline);
        assert!(loaded.data.is_empty());
    }

    #[tokio::test]
    async fn broken_fallback_yields_nothing() {
        let addr = serve(vec![("/healthz", Reply::Json(200, HEALTH))]).await;
        let file = fallback_file("not json");
        let loaded = load_insights(&api(format!("http://{addr}")), file.path()).await;
        assert!(!loaded.offline);
        assert!(loaded.data.is_empty());
    }

    #[tokio::test]
    async fn malformed_feed_body_falls_back() {
        let addr = serve(vec![("/insights", Reply::Json(200, "[1, 2"))]).await;
        let file = fallback_file(FEED);
        let loaded = load_feed(&api(format!("http://{addr}")), file.path()).await;
        assert!(loaded.offline);
        assert_eq!(loaded.data.unwrap().items.len(), 2);
    }

    #[tokio::test]
    async fn health_failure_leaves_status_empty() {
        let addr = serve(vec![]).await;
        assert!(load_health(&api(format!("http://{addr}"))).await.is_none());
    }

    #[tokio::test]
    async fn refresh_fills_every_slot() {
        let addr = serve(vec![
            ("/healthz", Reply::Json(200, HEALTH)),
            ("/insights", Reply::Json(200, FEED)),
        ])
        .await;
        let state = DashboardState::new();
        let fallback = FallbackConfig {
            dashboard_path: "/nonexistent/fallback.json".into(),
            action_path: "/nonexistent/BerInsight/fallback.json".into(),
        };
        refresh(&api(format!("http://{addr}")), &fallback, &state).await;

        let snapshot = state.snapshot();
        assert!(!snapshot.loading);
        assert_eq!(snapshot.health.unwrap().status, "ok");
        assert_eq!(snapshot.feed.unwrap().items.len(), 2);
        // The overview shape carries no `insights` key.
        assert!(snapshot.action_insights.is_empty());
        assert!(!snapshot.offline);
    }
}
