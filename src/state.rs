use parking_lot::Mutex;

use crate::domain::{HealthStatus, Insight, InsightsFeed};

/// Result of a fetch-or-fallback load.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Loaded<T> {
    pub data: T,
    /// Set when the bundled fallback supplied `data`.
    pub offline: bool,
}

impl<T> Loaded<T> {
    pub fn live(data: T) -> Self {
        Self {
            data,
            offline: false,
        }
    }

    pub fn fallback(data: T) -> Self {
        Self {
            data,
            offline: true,
        }
    }
}

/// Page-scoped view state. Each concurrent fetch owns one slot and replaces
/// it wholesale.
#[derive(Debug, Default)]
pub struct DashboardState {
    loading: Mutex<bool>,
    health: Mutex<Option<HealthStatus>>,
    feed: Mutex<Loaded<Option<InsightsFeed>>>,
    action: Mutex<Loaded<Vec<Insight>>>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StateSnapshot {
    pub loading: bool,
    pub health: Option<HealthStatus>,
    pub feed: Option<InsightsFeed>,
    pub action_insights: Vec<Insight>,
    pub offline: bool,
}

impl DashboardState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin_loading(&self) {
        *self.loading.lock() = true;
    }

    pub fn finish_loading(&self) {
        *self.loading.lock() = false;
    }

    pub fn replace_health(&self, health: Option<HealthStatus>) {
        *self.health.lock() = health;
    }

    pub fn replace_feed(&self, feed: Loaded<Option<InsightsFeed>>) {
        *self.feed.lock() = feed;
    }

    pub fn replace_action(&self, insights: Loaded<Vec<Insight>>) {
        *self.action.lock() = insights;
    }

    pub fn snapshot(&self) -> StateSnapshot {
        let feed = self.feed.lock().clone();
        let action = self.action.lock().clone();
        StateSnapshot {
            loading: *self.loading.lock(),
            health: self.health.lock().clone(),
            offline: feed.offline || action.offline,
            feed: feed.data,
            action_insights: action.data,
        }
    }
}
