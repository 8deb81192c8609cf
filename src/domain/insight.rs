use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single ingested piece of feedback as served by `/insights`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Insight {
    pub id: String,
    pub title: String,
    pub summary: String,
    pub source: String,
    pub url: String,
    pub published_date: String,
    pub scraped_at: String,
    pub tags: Vec<String>,
    pub sentiment: Option<String>,
    pub social_media: Option<String>,
    pub product: Option<String>,
    pub channel: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub feature: Option<String>,
    pub category: Option<String>,
    pub urgency_score: Option<i64>,
    pub date: Option<String>,
}

impl Insight {
    /// Lowercased `title summary`, the text every keyword rule looks at.
    pub fn content(&self) -> String {
        format!("{} {}", self.title, self.summary).to_lowercase()
    }

    pub fn sentiment_lower(&self) -> String {
        self.sentiment
            .as_deref()
            .map(str::to_lowercase)
            .unwrap_or_default()
    }

    /// The date-only `date` field, if present and well formed.
    pub fn day(&self) -> Option<NaiveDate> {
        self.date
            .as_deref()
            .and_then(|raw| NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok())
    }
}

/// `/insights` as consumed by the dashboard overview.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InsightsFeed {
    #[serde(default)]
    pub last_updated: String,
    #[serde(default)]
    pub items: Vec<Insight>,
}

/// `/insights` as consumed by the call-to-action view.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActionFeed {
    #[serde(default)]
    pub insights: Vec<Insight>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub time: String,
}
