//! Resource matching by predicted condition tags
//!
//! Crisis-tagged resources are surfaced first whenever the risk level is
//! high or critical. Tag overlap can legitimately return the same resource
//! through both paths; no deduplication is applied.

use crate::db::repository::ResourceRepository;
use crate::db::DbError;
use crate::model::{Resource, RiskLevel};

const CRISIS_TAGS: [&str; 2] = ["crisis", "emergency"];

const DEFAULT_MATCH_LIMIT: i64 = 20;
const CRISIS_MATCH_LIMIT: i64 = 5;

/// Service matching educational resources to assessment outcomes
pub struct ResourceMatcher {
    repository: ResourceRepository,
}

impl ResourceMatcher {
    pub fn new(repository: ResourceRepository) -> Self {
        Self { repository }
    }

    /// Retrieve resources whose tags overlap the predicted conditions,
    /// with crisis resources prepended for elevated risk levels.
    pub async fn match_resources(
        &self,
        conditions: &[String],
        risk_level: RiskLevel,
    ) -> Result<Vec<Resource>, DbError> {
        let mut matched = Vec::new();

        if risk_level.is_elevated() {
            let crisis_tags: Vec<String> = CRISIS_TAGS.iter().map(|t| t.to_string()).collect();
            let crisis = self
                .repository
                .find_by_tags(&crisis_tags, CRISIS_MATCH_LIMIT)
                .await?;
            tracing::debug!(
                count = crisis.len(),
                risk_level = %risk_level,
                "Prioritizing crisis resources"
            );
            matched.extend(crisis);
        }

        if !conditions.is_empty() {
            let by_condition = self
                .repository
                .find_by_tags(conditions, DEFAULT_MATCH_LIMIT)
                .await?;
            matched.extend(by_condition);
        }

        Ok(matched)
    }
}
