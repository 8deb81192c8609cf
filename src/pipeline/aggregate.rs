use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::{ClassifiedInsight, Priority};

pub const PLATFORMS: [&str; 6] = [
    "YouTube",
    "Instagram",
    "Twitter",
    "Facebook",
    "Apple AppStore",
    "Google Playstore",
];

pub const PRODUCTS: [&str; 7] = [
    "BRImo", "Card", "Qlola", "Loan", "Simpedes", "Britama", "Deposito",
];

pub const CHANNELS: [&str; 6] = ["BRImo", "BRILink", "CERIA", "Qlola", "MMS", "Sabrina"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LabelCount {
    pub label: String,
    pub count: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PriorityCounts {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SentimentCounts {
    pub positive: usize,
    pub neutral: usize,
    pub negative: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Aggregates {
    pub total: usize,
    pub priorities: PriorityCounts,
    pub platforms: Vec<LabelCount>,
    pub products: Vec<LabelCount>,
    pub channels: Vec<LabelCount>,
    /// Keyed by recommended team in first-seen order.
    pub teams: Vec<LabelCount>,
    pub sentiment: SentimentCounts,
    /// `(positive - negative) / total`; `None` for an empty set.
    pub sentiment_score: Option<f64>,
    pub daily: BTreeMap<NaiveDate, usize>,
}

/// Single pass over `records` producing every chart input.
pub fn aggregate(records: &[ClassifiedInsight]) -> Aggregates {
    let mut platforms = Histogram::allow_list(&PLATFORMS);
    let mut products = Histogram::allow_list(&PRODUCTS);
    let mut channels = Histogram::allow_list(&CHANNELS);
    let mut teams = Histogram::open();
    let mut priorities = PriorityCounts::default();
    let mut sentiment = SentimentCounts::default();
    let mut daily = BTreeMap::new();

    for record in records {
        let insight = &record.insight;

        match record.priority {
            Priority::High => priorities.high += 1,
            Priority::Medium => priorities.medium += 1,
            Priority::Low => priorities.low += 1,
        }

        match insight.sentiment_lower().as_str() {
            "positive" => sentiment.positive += 1,
            "negative" => sentiment.negative += 1,
            _ => sentiment.neutral += 1,
        }

        platforms.record(insight.social_media.as_deref());
        products.record(insight.product.as_deref());
        channels.record(insight.channel.as_deref());
        teams.record(Some(record.recommended_team.label()));

        if let Some(day) = insight.day() {
            *daily.entry(day).or_insert(0) += 1;
        }
    }

    let total = records.len();
    let sentiment_score = (total > 0).then(|| {
        (sentiment.positive as f64 - sentiment.negative as f64) / total as f64
    });

    Aggregates {
        total,
        priorities,
        platforms: platforms.into_counts(),
        products: products.into_counts(),
        channels: channels.into_counts(),
        teams: teams.into_counts(),
        sentiment,
        sentiment_score,
        daily,
    }
}

/// Insertion-ordered counter. With an allow-list, other keys are ignored.
struct Histogram {
    counts: Vec<LabelCount>,
    index: HashMap<String, usize>,
    closed: bool,
}

impl Histogram {
    fn allow_list(labels: &[&str]) -> Self {
        let mut histogram = Self::open();
        for label in labels {
            histogram.slot(label);
        }
        histogram.closed = true;
        histogram
    }

    fn open() -> Self {
        Self {
            counts: Vec::new(),
            index: HashMap::new(),
            closed: false,
        }
    }

    fn record(&mut self, label: Option<&str>) {
        let Some(label) = label else {
            return;
        };
        let position = match self.index.get(label) {
            Some(&position) => position,
            None if self.closed => return,
            None => self.slot(label),
        };
        self.counts[position].count += 1;
    }

    fn slot(&mut self, label: &str) -> usize {
        let position = self.counts.len();
        self.counts.push(LabelCount {
            label: label.to_string(),
            count: 0,
        });
        self.index.insert(label.to_string(), position);
        position
    }

    fn into_counts(self) -> Vec<LabelCount> {
        self.counts
    }
}
