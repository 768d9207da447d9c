//! Row types and conversions between storage and domain models

use chrono::{DateTime, Utc};
use sqlx::types::Json;
use uuid::Uuid;

use crate::model::{
    AnalysisResult, AssessmentRecord, CategoryScores, Resource, ResponseSet, RiskLevel,
};

/// A composed assessment ready for persistence. Built once by the
/// orchestrator; the repository decides which columns actually land
/// depending on whether the full write succeeds.
#[derive(Debug, Clone)]
pub struct NewAssessment {
    pub student_id: Uuid,
    pub responses: ResponseSet,
    pub scores: CategoryScores,
    pub risk_level: RiskLevel,
    pub analysis: AnalysisResult,
}

/// Database row for an assessment
#[derive(Debug, sqlx::FromRow)]
pub struct AssessmentRow {
    pub id: Uuid,
    pub student_id: Uuid,
    pub responses: Json<ResponseSet>,
    pub anxiety_score: i32,
    pub depression_score: i32,
    pub stress_score: i32,
    pub overall_wellbeing_score: i32,
    pub risk_level: String,
    pub predicted_conditions: Option<Vec<String>>,
    pub predicted_risk_level: Option<String>,
    pub predicted_sentiment: Option<String>,
    pub sentiment_score: Option<i32>,
    pub sentiment_label: Option<String>,
    pub ai_analysis: Option<String>,
    pub recommendations: Option<Vec<String>>,
    pub immediate_actions: Option<Vec<String>>,
    pub professional_help_needed: Option<bool>,
    pub crisis_indicators: Option<bool>,
    pub created_at: DateTime<Utc>,
}

impl AssessmentRow {
    pub fn into_domain(self) -> Result<AssessmentRecord, String> {
        let risk_level = RiskLevel::parse(&self.risk_level)
            .ok_or_else(|| format!("Unknown risk level in storage: {}", self.risk_level))?;

        Ok(AssessmentRecord {
            id: self.id,
            student_id: self.student_id,
            responses: self.responses.0,
            scores: CategoryScores {
                anxiety_score: self.anxiety_score,
                depression_score: self.depression_score,
                stress_score: self.stress_score,
                overall_wellbeing_score: self.overall_wellbeing_score,
            },
            risk_level,
            predicted_conditions: self.predicted_conditions.unwrap_or_default(),
            predicted_risk_level: self
                .predicted_risk_level
                .as_deref()
                .and_then(RiskLevel::parse),
            predicted_sentiment: self.predicted_sentiment,
            sentiment_score: self.sentiment_score,
            sentiment_label: self.sentiment_label,
            ai_analysis: self.ai_analysis,
            recommendations: self.recommendations.unwrap_or_default(),
            immediate_actions: self.immediate_actions.unwrap_or_default(),
            professional_help_needed: self.professional_help_needed,
            crisis_indicators: self.crisis_indicators,
            created_at: self.created_at,
        })
    }
}

/// Database row for a resource
#[derive(Debug, sqlx::FromRow)]
pub struct ResourceRow {
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

impl ResourceRow {
    pub fn into_domain(self) -> Resource {
        Resource {
            id: self.id,
            title: self.title,
            description: self.description,
            resource_type: self.resource_type,
            url: self.url,
            category: self.category,
            tags: self.tags,
            is_featured: self.is_featured,
            created_at: self.created_at,
        }
    }
}
