use crate::domain::{ClassifiedInsight, Insight, Priority, Team};

const URGENT_KEYWORDS: [&str; 4] = ["urgent", "critical", "issue", "problem"];

const REVIEW_IMMEDIATELY: &str = "Review immediately";
const ASSIGN_TEAM_LEAD: &str = "Assign team lead";
const INVESTIGATE_ROOT_CAUSE: &str = "Investigate root cause";
const PREPARE_RESPONSE_PLAN: &str = "Prepare response plan";
const COMPETITIVE_ANALYSIS: &str = "Competitive analysis";
const MONITOR_TRENDS: &str = "Monitor trends";

/// Derives priority, owner, action items and impact for one record.
///
/// Total: absent fields fall back to empty strings, so every record
/// classifies.
pub fn classify(insight: &Insight) -> ClassifiedInsight {
    let sentiment = insight.sentiment_lower();
    let content = insight.content();
    let tags: Vec<String> = insight.tags.iter().map(|t| t.to_lowercase()).collect();

    let priority = calc_priority(&sentiment, &content);
    let recommended_team = recommend_team(insight, &tags, &sentiment, &content);
    let action_items = action_items(priority, &sentiment, &content);

    ClassifiedInsight {
        insight: insight.clone(),
        priority,
        recommended_team,
        action_items,
        impact: priority.impact().to_string(),
    }
}

/// Classifies every record, then orders them high → medium → low.
/// Records with the same priority keep their input order.
pub fn prioritize(insights: &[Insight]) -> Vec<ClassifiedInsight> {
    let mut classified: Vec<ClassifiedInsight> = insights.iter().map(classify).collect();
    classified.sort_by_key(|c| c.priority.rank());
    tracing::debug!(target: "pipeline", total = classified.len(), "insights prioritized");
    classified
}

fn calc_priority(sentiment: &str, content: &str) -> Priority {
    if sentiment == "negative" || contains_any(content, &URGENT_KEYWORDS) {
        Priority::High
    } else if sentiment == "positive" {
        Priority::Low
    } else {
        Priority::Medium
    }
}

fn recommend_team(insight: &Insight, tags: &[String], sentiment: &str, content: &str) -> Team {
    let has_product = insight
        .product
        .as_deref()
        .is_some_and(|product| !product.is_empty());

    if any_tag(tags, &["product", "feature"])
        || has_product
        || contains_any(content, &["product", "feature"])
    {
        Team::Product
    } else if any_tag(tags, &["market", "customer"])
        || contains_any(content, &["market", "customer"])
    {
        Team::Marketing
    } else if any_tag(tags, &["tech", "development"])
        || contains_any(content, &["technical", "development"])
    {
        Team::Engineering
    } else if any_tag(tags, &["support", "service"]) || sentiment == "negative" {
        Team::CustomerSupport
    } else {
        Team::General
    }
}

fn action_items(priority: Priority, sentiment: &str, content: &str) -> Vec<String> {
    let mut items = Vec::new();
    if priority == Priority::High {
        items.push(REVIEW_IMMEDIATELY);
        items.push(ASSIGN_TEAM_LEAD);
    }
    if sentiment == "negative" {
        items.push(INVESTIGATE_ROOT_CAUSE);
        items.push(PREPARE_RESPONSE_PLAN);
    }
    if content.contains("competitor") {
        items.push(COMPETITIVE_ANALYSIS);
    }
    items.push(MONITOR_TRENDS);
    items.into_iter().map(str::to_string).collect()
}

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| haystack.contains(needle))
}

fn any_tag(tags: &[String], needles: &[&str]) -> bool {
    tags.iter().any(|tag| contains_any(tag, needles))
}
