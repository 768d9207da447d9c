//! Assessment submission orchestrator
//!
//! One submission is one independent unit of work: score the answers, run
//! the analysis pipeline, compose the record, persist it. Analysis failures
//! of any kind degrade to the deterministic fallback; a rejected full write
//! is retried once with the minimal field set before the submission fails.

use uuid::Uuid;

use crate::db::models::NewAssessment;
use crate::db::repository::{AssessmentRepository, StudentRepository};
use crate::db::DbError;
use crate::model::{AnalysisOutcome, AssessmentRecord, CategoryScores, ResponseSet, RiskLevel};
use crate::scoring;
use crate::service::analysis::{AnalysisError, AnalysisService};

#[derive(Debug, thiserror::Error)]
pub enum SubmissionError {
    #[error("Failed to store assessment: {0}")]
    Storage(#[from] DbError),
}

/// Result of a persisted submission
#[derive(Debug)]
pub struct SubmissionOutcome {
    pub assessment_id: Uuid,
    pub student_id: Uuid,
    pub risk_level: RiskLevel,
    pub scores: CategoryScores,
    pub analysis: AnalysisOutcome,
    /// Set when the full write was rejected and the record landed with the
    /// minimal field set instead.
    pub degraded_write: bool,
}

/// Orchestrates assessment submissions end to end
pub struct SubmissionService {
    assessments: AssessmentRepository,
    students: StudentRepository,
    analysis: AnalysisService,
}

impl SubmissionService {
    pub fn new(
        assessments: AssessmentRepository,
        students: StudentRepository,
        analysis: AnalysisService,
    ) -> Self {
        Self {
            assessments,
            students,
            analysis,
        }
    }

    /// Submit an assessment for a user. Never fails because of the model;
    /// only persistence can make the submission fail, and only after the
    /// degraded retry is exhausted.
    pub async fn submit(
        &self,
        user_id: Uuid,
        responses: ResponseSet,
    ) -> Result<SubmissionOutcome, SubmissionError> {
        let student_id = self.students.get_or_create(user_id).await?;

        let scores = scoring::category_scores(&responses);
        let risk_level = scoring::assess(&responses);

        let analysis = match self.analysis.analyze(&responses, Some(risk_level)).await {
            Ok(outcome) => outcome,
            // An unconfigured model path must not block submissions.
            Err(AnalysisError::NotConfigured) => {
                self.analysis.fallback_for(&responses, Some(risk_level))
            }
        };

        let fallback_analysis = analysis.is_fallback();
        let new = compose_record(student_id, responses, scores, risk_level, analysis.clone());

        let (assessment_id, degraded_write) = match self.assessments.insert_full(&new).await {
            Ok(id) => (id, false),
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    student_id = %student_id,
                    "Full assessment write failed, retrying with minimal field set"
                );
                let id = self.assessments.insert_minimal(&new).await?;
                (id, true)
            }
        };

        tracing::info!(
            assessment_id = %assessment_id,
            student_id = %student_id,
            risk_level = %new.analysis.predicted_risk_level,
            fallback_analysis,
            degraded_write,
            "Assessment stored"
        );

        Ok(SubmissionOutcome {
            assessment_id,
            student_id,
            risk_level,
            scores: new.scores,
            analysis,
            degraded_write,
        })
    }

    /// Fetch a single assessment record.
    pub async fn get(&self, id: Uuid) -> Result<AssessmentRecord, DbError> {
        self.assessments.get_by_id(id).await
    }

    /// Fetch a user's assessment history for trend views, oldest first.
    pub async fn history(
        &self,
        user_id: Uuid,
        limit: Option<i64>,
    ) -> Result<Vec<AssessmentRecord>, DbError> {
        let student_id = self.students.find_by_user(user_id).await?;
        self.assessments.list_by_student(student_id, limit).await
    }
}

/// Compose the persistable record from the scorer and analysis outputs.
pub fn compose_record(
    student_id: Uuid,
    responses: ResponseSet,
    scores: CategoryScores,
    risk_level: RiskLevel,
    analysis: AnalysisOutcome,
) -> NewAssessment {
    NewAssessment {
        student_id,
        responses,
        scores,
        risk_level,
        analysis: analysis.into_result(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::analysis::validation;

    fn responses(pairs: &[(&str, &str)]) -> ResponseSet {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn composed_record_carries_fallback_analysis_fields() {
        let set = responses(&[
            ("anxiety", "nearly_every_day"),
            ("worry", "nearly_every_day"),
            ("stress", "extremely_stressed"),
        ]);
        let scores = scoring::category_scores(&set);
        let risk = scoring::assess(&set);
        assert_eq!(risk, RiskLevel::Moderate);

        let outcome = AnalysisOutcome::Fallback(validation::fallback_result(risk));
        let student_id = Uuid::new_v4();
        let record = compose_record(student_id, set.clone(), scores, risk, outcome);

        assert_eq!(record.student_id, student_id);
        assert_eq!(record.risk_level, RiskLevel::Moderate);
        assert_eq!(record.analysis.predicted_risk_level, RiskLevel::Moderate);
        assert!(record.analysis.recommendations.len() >= 5);
        assert!(!record.analysis.professional_help_needed);
        assert!(!record.analysis.crisis_indicators);
        assert_eq!(record.responses, set);
    }

    #[test]
    fn composed_record_keeps_parsed_risk_over_local() {
        let set = responses(&[("mood", "good")]);
        let scores = scoring::category_scores(&set);
        let local = scoring::assess(&set);
        assert_eq!(local, RiskLevel::Low);

        let outcome =
            validation::interpret(r#"{"predicted_risk_level": "high"}"#, local);
        let record = compose_record(Uuid::new_v4(), set, scores, local, outcome);

        assert_eq!(record.risk_level, RiskLevel::Low);
        assert_eq!(record.analysis.predicted_risk_level, RiskLevel::High);
    }
}
