//! Repositories for assessment, student, and resource rows

use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use super::models::{AssessmentRow, NewAssessment, ResourceRow};
use super::DbError;
use crate::model::{AssessmentRecord, Resource};

const DEFAULT_HISTORY_LIMIT: i64 = 10;
const MAX_HISTORY_LIMIT: i64 = 100;

/// Repository for assessment records
#[derive(Clone)]
pub struct AssessmentRepository {
    pool: PgPool,
}

impl AssessmentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert an assessment with the full field set, including every
    /// analysis column. Returns the generated id.
    pub async fn insert_full(&self, new: &NewAssessment) -> Result<Uuid, DbError> {
        let analysis = &new.analysis;

        let id: Uuid = sqlx::query_scalar(
            r#"
            INSERT INTO assessments (
                student_id, responses,
                anxiety_score, depression_score, stress_score, overall_wellbeing_score,
                risk_level, predicted_conditions, predicted_risk_level, predicted_sentiment,
                sentiment_score, sentiment_label, ai_analysis, recommendations,
                immediate_actions, professional_help_needed, crisis_indicators
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)
            RETURNING id
            "#,
        )
        .bind(new.student_id)
        .bind(Json(&new.responses))
        .bind(new.scores.anxiety_score)
        .bind(new.scores.depression_score)
        .bind(new.scores.stress_score)
        .bind(new.scores.overall_wellbeing_score)
        // risk_level carries the effective (merged) level; the local
        // score-derived level only lands when the model gave none.
        .bind(analysis.predicted_risk_level.as_str())
        .bind(&analysis.predicted_conditions)
        .bind(analysis.predicted_risk_level.as_str())
        .bind(analysis.predicted_sentiment.as_str())
        .bind(analysis.sentiment_score)
        .bind(analysis.sentiment_label.as_str())
        .bind(&analysis.analysis)
        .bind(&analysis.recommendations)
        .bind(&analysis.immediate_actions)
        .bind(analysis.professional_help_needed)
        .bind(analysis.crisis_indicators)
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!(id = %id, "Inserted assessment with full field set");
        Ok(id)
    }

    /// Insert an assessment with only the mandatory field set. Used as the
    /// degraded retry when the full write is rejected.
    pub async fn insert_minimal(&self, new: &NewAssessment) -> Result<Uuid, DbError> {
        let id: Uuid = sqlx::query_scalar(
            r#"
            INSERT INTO assessments (
                student_id, responses,
                anxiety_score, depression_score, stress_score, overall_wellbeing_score,
                risk_level, ai_analysis
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id
            "#,
        )
        .bind(new.student_id)
        .bind(Json(&new.responses))
        .bind(new.scores.anxiety_score)
        .bind(new.scores.depression_score)
        .bind(new.scores.stress_score)
        .bind(new.scores.overall_wellbeing_score)
        .bind(new.risk_level.as_str())
        .bind(&new.analysis.analysis)
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!(id = %id, "Inserted assessment with minimal field set");
        Ok(id)
    }

    /// Get an assessment by id
    pub async fn get_by_id(&self, id: Uuid) -> Result<AssessmentRecord, DbError> {
        let row: AssessmentRow = sqlx::query_as(
            r#"
            SELECT * FROM assessments WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DbError::NotFound(id.to_string()))?;

        row.into_domain().map_err(DbError::Serialization)
    }

    /// List a student's assessments in submission order, oldest first, for
    /// trend views. The limit is clamped to a sane bound.
    pub async fn list_by_student(
        &self,
        student_id: Uuid,
        limit: Option<i64>,
    ) -> Result<Vec<AssessmentRecord>, DbError> {
        let limit = limit.unwrap_or(DEFAULT_HISTORY_LIMIT).clamp(1, MAX_HISTORY_LIMIT);

        let rows: Vec<AssessmentRow> = sqlx::query_as(
            r#"
            SELECT * FROM assessments
            WHERE student_id = $1
            ORDER BY created_at ASC
            LIMIT $2
            "#,
        )
        .bind(student_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(|row| row.into_domain().map_err(DbError::Serialization))
            .collect()
    }
}

/// Repository for student rows
#[derive(Clone)]
pub struct StudentRepository {
    pool: PgPool,
}

impl StudentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find the student profile for a user, creating it on first use.
    pub async fn get_or_create(&self, user_id: Uuid) -> Result<Uuid, DbError> {
        let id: Uuid = sqlx::query_scalar(
            r#"
            INSERT INTO students (user_id) VALUES ($1)
            ON CONFLICT (user_id) DO UPDATE SET user_id = EXCLUDED.user_id
            RETURNING id
            "#,
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }

    /// Look up a student by user id without creating one.
    pub async fn find_by_user(&self, user_id: Uuid) -> Result<Uuid, DbError> {
        sqlx::query_scalar(
            r#"
            SELECT id FROM students WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DbError::NotFound(user_id.to_string()))
    }
}

/// Repository for educational resources
#[derive(Clone)]
pub struct ResourceRepository {
    pool: PgPool,
}

impl ResourceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find resources whose tags overlap the given set, featured first.
    pub async fn find_by_tags(&self, tags: &[String], limit: i64) -> Result<Vec<Resource>, DbError> {
        let rows: Vec<ResourceRow> = sqlx::query_as(
            r#"
            SELECT * FROM resources
            WHERE tags && $1
            ORDER BY is_featured DESC, created_at DESC
            LIMIT $2
            "#,
        )
        .bind(tags)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(ResourceRow::into_domain).collect())
    }
}
