use crate::domain::{ClassifiedInsight, FilterCriteria};

/// Narrows `records` to those matching every active criterion, preserving
/// order.
pub fn filter(records: &[ClassifiedInsight], criteria: &FilterCriteria) -> Vec<ClassifiedInsight> {
    let kept: Vec<ClassifiedInsight> = records
        .iter()
        .filter(|record| matches(record, criteria))
        .cloned()
        .collect();
    tracing::debug!(
        target: "pipeline",
        before = records.len(),
        after = kept.len(),
        "insights filtered"
    );
    kept
}

pub fn matches(record: &ClassifiedInsight, criteria: &FilterCriteria) -> bool {
    let insight = &record.insight;

    if criteria.from.is_some() || criteria.to.is_some() {
        // An active range never matches a record without a usable date.
        let Some(day) = insight.day() else {
            return false;
        };
        if criteria.from.is_some_and(|from| day < from) {
            return false;
        }
        if criteria.to.is_some_and(|to| day > to) {
            return false;
        }
    }

    field_matches(insight.product.as_deref(), criteria.product.as_deref())
        && field_matches(insight.channel.as_deref(), criteria.channel.as_deref())
        && field_matches(insight.social_media.as_deref(), criteria.platform.as_deref())
        && field_matches(insight.sentiment.as_deref(), criteria.sentiment.as_deref())
        && criteria
            .priority
            .map_or(true, |priority| record.priority == priority)
        && field_matches(
            Some(record.recommended_team.label()),
            criteria.team.as_deref(),
        )
}

fn field_matches(value: Option<&str>, wanted: Option<&str>) -> bool {
    match wanted {
        None => true,
        Some(wanted) => value == Some(wanted),
    }
}
