use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use super::insight::Insight;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn rank(self) -> u8 {
        match self {
            Priority::High => 0,
            Priority::Medium => 1,
            Priority::Low => 2,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }

    pub fn impact(self) -> &'static str {
        match self {
            Priority::High => "High impact - requires immediate attention",
            Priority::Medium => "Medium impact on business metrics",
            Priority::Low => "Low impact - monitor and track",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "high" => Ok(Priority::High),
            "medium" => Ok(Priority::Medium),
            "low" => Ok(Priority::Low),
            other => Err(format!("unknown priority `{other}`")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Team {
    #[serde(rename = "Product Team")]
    Product,
    #[serde(rename = "Marketing Team")]
    Marketing,
    #[serde(rename = "Engineering Team")]
    Engineering,
    #[serde(rename = "Customer Support")]
    CustomerSupport,
    #[serde(rename = "General")]
    General,
}

impl Team {
    pub fn label(self) -> &'static str {
        match self {
            Team::Product => "Product Team",
            Team::Marketing => "Marketing Team",
            Team::Engineering => "Engineering Team",
            Team::CustomerSupport => "Customer Support",
            Team::General => "General",
        }
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// An [`Insight`] with its derived triage fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassifiedInsight {
    #[serde(flatten)]
    pub insight: Insight,
    pub priority: Priority,
    pub recommended_team: Team,
    pub action_items: Vec<String>,
    pub impact: String,
}
