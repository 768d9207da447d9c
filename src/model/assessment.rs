//! Core domain types for wellness assessments

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// A single questionnaire submission: question id mapped to the chosen
/// answer token or free text. Ordered map so prompt construction and
/// serialization are deterministic.
pub type ResponseSet = BTreeMap<String, String>;

/// Ordered risk category derived from questionnaire answers.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
    Critical,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Moderate => "moderate",
            RiskLevel::High => "high",
            RiskLevel::Critical => "critical",
        }
    }

    /// Parse a risk level from loosely formatted text (case and surrounding
    /// whitespace are ignored). Returns `None` for anything outside the
    /// four known levels.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "low" => Some(RiskLevel::Low),
            "moderate" => Some(RiskLevel::Moderate),
            "high" => Some(RiskLevel::High),
            "critical" => Some(RiskLevel::Critical),
            _ => None,
        }
    }

    /// Whether this level warrants surfacing crisis resources.
    pub fn is_elevated(&self) -> bool {
        *self >= RiskLevel::High
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-category sub-scores on a 0-100 scale, averaged over the answers in
/// each question group. Higher anxiety/depression/stress is worse; higher
/// wellbeing is better.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CategoryScores {
    pub anxiety_score: i32,
    pub depression_score: i32,
    pub stress_score: i32,
    pub overall_wellbeing_score: i32,
}

/// A persisted assessment record. Created once per submission and never
/// mutated; deletion only cascades from the owning student.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AssessmentRecord {
    pub id: Uuid,
    pub student_id: Uuid,
    pub responses: ResponseSet,
    #[serde(flatten)]
    pub scores: CategoryScores,
    pub risk_level: RiskLevel,
    pub predicted_conditions: Vec<String>,
    pub predicted_risk_level: Option<RiskLevel>,
    pub predicted_sentiment: Option<String>,
    pub sentiment_score: Option<i32>,
    pub sentiment_label: Option<String>,
    pub ai_analysis: Option<String>,
    pub recommendations: Vec<String>,
    pub immediate_actions: Vec<String>,
    pub professional_help_needed: Option<bool>,
    pub crisis_indicators: Option<bool>,
    pub created_at: DateTime<Utc>,
}

/// An educational/self-help resource, matched to assessments by tag overlap.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Resource {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub resource_type: String,
    pub url: Option<String>,
    pub category: Option<String>,
    pub tags: Vec<String>,
    pub is_featured: bool,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn risk_levels_are_totally_ordered() {
        assert!(RiskLevel::Low < RiskLevel::Moderate);
        assert!(RiskLevel::Moderate < RiskLevel::High);
        assert!(RiskLevel::High < RiskLevel::Critical);
    }

    #[test]
    fn parse_accepts_known_levels_case_insensitively() {
        assert_eq!(RiskLevel::parse("critical"), Some(RiskLevel::Critical));
        assert_eq!(RiskLevel::parse(" High "), Some(RiskLevel::High));
        assert_eq!(RiskLevel::parse("MODERATE"), Some(RiskLevel::Moderate));
        assert_eq!(RiskLevel::parse("severe"), None);
        assert_eq!(RiskLevel::parse(""), None);
    }

    #[test]
    fn elevated_means_high_or_critical() {
        assert!(!RiskLevel::Low.is_elevated());
        assert!(!RiskLevel::Moderate.is_elevated());
        assert!(RiskLevel::High.is_elevated());
        assert!(RiskLevel::Critical.is_elevated());
    }
}
