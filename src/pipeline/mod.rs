pub mod aggregate;
pub mod classify;
pub mod filter;
pub mod keywords;

pub use aggregate::{aggregate, Aggregates};
pub use classify::prioritize;
pub use filter::filter;
pub use keywords::{extract_keywords, KeywordCount};
