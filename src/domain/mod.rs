pub mod filter;
pub mod insight;
pub mod types;

pub use filter::FilterCriteria;
pub use insight::{ActionFeed, HealthStatus, Insight, InsightsFeed};
pub use types::{ClassifiedInsight, Priority, Team};
