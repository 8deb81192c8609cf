use chrono::NaiveDate;

use super::types::Priority;

/// UI-selected narrowing. Every `None` means "all".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub product: Option<String>,
    pub channel: Option<String>,
    pub platform: Option<String>,
    pub sentiment: Option<String>,
    pub priority: Option<Priority>,
    pub team: Option<String>,
}

impl FilterCriteria {
    pub fn is_empty(&self) -> bool {
        *self == FilterCriteria::default()
    }
}

/// Maps a select-box value to a constraint: `all` and blank impose none.
pub fn selection(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("all") {
        None
    } else {
        Some(trimmed.to_string())
    }
}
