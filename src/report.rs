use std::panic::{catch_unwind, AssertUnwindSafe};

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::Serialize;

use crate::{
    domain::{ClassifiedInsight, FilterCriteria},
    pipeline::{aggregate, extract_keywords, filter, prioritize, Aggregates, KeywordCount},
    state::StateSnapshot,
};

const STATUS_PENDING: &str = "Checking...";
const LAST_UPDATED_PENDING: &str = "Loading...";
const SECTION_UNAVAILABLE: &str = "This section could not be rendered.";

/// A view section rendered behind a failure boundary.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum Section<T> {
    Ready { data: T },
    Unavailable { message: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LatestInsight {
    pub title: String,
    pub source: String,
    pub summary: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardReport {
    pub generated_at: String,
    pub loading: bool,
    pub api_status: String,
    pub last_updated: String,
    pub offline: bool,
    pub latest_insights: Vec<LatestInsight>,
    /// Priority and team tallies over every classified insight.
    pub overview: Aggregates,
    pub insights: Vec<ClassifiedInsight>,
    /// Chart inputs for the filtered set.
    pub aggregates: Aggregates,
    pub keywords: Section<Vec<KeywordCount>>,
}

pub fn build_report(snapshot: &StateSnapshot, criteria: &FilterCriteria, tz: Tz) -> DashboardReport {
    let classified = prioritize(&snapshot.action_insights);
    let filtered = filter(&classified, criteria);
    let keywords = supervised("keyword_cloud", || extract_keywords(&filtered));

    DashboardReport {
        generated_at: Utc::now().with_timezone(&tz).to_rfc3339(),
        loading: snapshot.loading,
        api_status: snapshot
            .health
            .as_ref()
            .map(|h| h.status.clone())
            .unwrap_or_else(|| STATUS_PENDING.to_string()),
        last_updated: snapshot
            .feed
            .as_ref()
            .map(|feed| format_time(&feed.last_updated, tz))
            .unwrap_or_else(|| LAST_UPDATED_PENDING.to_string()),
        offline: snapshot.offline,
        latest_insights: snapshot
            .feed
            .iter()
            .flat_map(|feed| feed.items.iter())
            .map(|item| LatestInsight {
                title: item.title.clone(),
                source: item.source.clone(),
                summary: item.summary.clone(),
            })
            .collect(),
        overview: aggregate(&classified),
        aggregates: aggregate(&filtered),
        insights: filtered,
        keywords,
    }
}

/// Runs `render`; a panic inside it becomes [`Section::Unavailable`] and
/// goes no further.
pub fn supervised<T>(section: &'static str, render: impl FnOnce() -> T) -> Section<T> {
    match catch_unwind(AssertUnwindSafe(render)) {
        Ok(data) => Section::Ready { data },
        Err(_) => {
            tracing::error!(target: "report", section, "section failed to render");
            Section::Unavailable {
                message: SECTION_UNAVAILABLE.to_string(),
            }
        }
    }
}

/// RFC 3339 timestamps are shown in `tz`; anything else is passed through.
pub fn format_time(raw: &str, tz: Tz) -> String {
    match DateTime::parse_from_rfc3339(raw.trim()) {
        Ok(ts) => ts.with_timezone(&tz).format("%d %b %Y %H:%M %Z").to_string(),
        Err(_) => raw.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{HealthStatus, Insight, InsightsFeed, Priority};

    fn snapshot() -> StateSnapshot {
        StateSnapshot {
            loading: false,
            health: Some(HealthStatus {
                status: "ok".into(),
                time: "2025-01-01T03:00:00+00:00".into(),
            }),
            feed: Some(InsightsFeed {
                last_updated: "2025-01-01T03:00:00+00:00".into(),
                items: vec![Insight {
                    title: "Ringkasan".into(),
                    source: "AI Analytics Engine".into(),
                    ..Default::default()
                }],
            }),
            action_insights: vec![
                Insight {
                    id: "a".into(),
                    title: "Transfer lancar".into(),
                    sentiment: Some("positive".into()),
                    ..Default::default()
                },
                Insight {
                    id: "b".into(),
                    title: "Login problem".into(),
                    ..Default::default()
                },
                Insight {
                    id: "c".into(),
                    title: "Saldo terpotong".into(),
                    sentiment: Some("negative".into()),
                    ..Default::default()
                },
            ],
            offline: true,
        }
    }

    #[test]
    fn report_orders_filters_and_counts() {
        let criteria = FilterCriteria {
            priority: Some(Priority::High),
            ..Default::default()
        };
        let report = build_report(&snapshot(), &criteria, chrono_tz::Asia::Jakarta);

        assert_eq!(report.api_status, "ok");
        assert_eq!(report.last_updated, "01 Jan 2025 10:00 WIB");
        assert!(report.offline);
        assert_eq!(report.latest_insights.len(), 1);
        assert_eq!(report.overview.total, 3);
        assert_eq!(report.overview.priorities.low, 1);

        let ids: Vec<&str> = report.insights.iter().map(|c| c.insight.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "c"]);
        assert_eq!(report.aggregates.total, 2);
        assert!(matches!(report.keywords, Section::Ready { .. }));
    }

    #[test]
    fn pending_loads_show_placeholders() {
        let report = build_report(
            &StateSnapshot::default(),
            &FilterCriteria::default(),
            chrono_tz::Asia::Jakarta,
        );
        assert_eq!(report.api_status, "Checking...");
        assert_eq!(report.last_updated, "Loading...");
        assert!(report.insights.is_empty());
    }

    #[test]
    fn non_rfc3339_timestamps_pass_through() {
        assert_eq!(
            format_time("2025-01-01 10:00 WIB", chrono_tz::Asia::Jakarta),
            "2025-01-01 10:00 WIB"
        );
    }

    #[test]
    fn supervised_contains_panics() {
        let section: Section<Vec<KeywordCount>> = supervised("keyword_cloud", || {
            panic!("cloud layout failed");
        });
        assert_eq!(
            section,
            Section::Unavailable {
                message: SECTION_UNAVAILABLE.to_string()
            }
        );
        assert_eq!(supervised("ok", || 7), Section::Ready { data: 7 });
    }

    #[test]
    fn keyword_section_serializes_with_state_tag() {
        let json = serde_json::to_value(supervised("ok", || 1)).unwrap();
        assert_eq!(json["state"], "ready");
        assert_eq!(json["data"], 1);
    }
}
