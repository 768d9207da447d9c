//! REST API endpoints for wellness assessments

use actix_web::{get, post, web, HttpResponse, Responder};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::api::error::ApiError;
use crate::model::{AnalysisResult, AssessmentRecord, CategoryScores, ResponseSet, RiskLevel};
use crate::service::{AnalysisService, SubmissionService};

/// Request body for standalone analysis
#[derive(Debug, Deserialize, ToSchema)]
pub struct AnalyzeRequest {
    /// Question id mapped to the chosen answer token or free text
    pub answers: ResponseSet,
    /// Optional client-computed risk level; computed locally when absent
    pub risk_level: Option<RiskLevel>,
}

/// Merged analysis response
#[derive(Debug, Serialize, ToSchema)]
pub struct AnalyzeResponse {
    #[serde(flatten)]
    pub result: AnalysisResult,
    /// "model" when the output was parsed, "fallback" otherwise
    pub source: String,
}

/// Request body for a full assessment submission
#[derive(Debug, Deserialize, ToSchema)]
pub struct SubmitAssessmentRequest {
    /// The submitting user's id
    pub user_id: Uuid,
    /// Question id mapped to the chosen answer token or free text
    pub answers: ResponseSet,
}

/// Response for a stored assessment submission
#[derive(Debug, Serialize, ToSchema)]
pub struct SubmitAssessmentResponse {
    pub id: Uuid,
    pub student_id: Uuid,
    pub risk_level: RiskLevel,
    #[serde(flatten)]
    pub scores: CategoryScores,
    #[serde(flatten)]
    pub analysis: AnalysisResult,
    /// Soft warning attached when the record landed with a reduced field set
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

/// Query parameters for assessment history
#[derive(Debug, Deserialize, IntoParams)]
pub struct HistoryParams {
    /// Maximum number of records (default: 10, max: 100)
    pub limit: Option<i64>,
}

/// Analyze a response set without persisting anything
///
/// Returns 200 with a complete merged analysis even when the model is
/// unreachable or returns unusable output; only a missing credential is an
/// error.
#[utoipa::path(
    post,
    path = "/v1/assessments/analyze",
    request_body = AnalyzeRequest,
    responses(
        (status = 200, description = "Merged analysis result", body = AnalyzeResponse),
        (status = 400, description = "Invalid request shape"),
        (status = 502, description = "Analysis service not configured")
    ),
    tag = "assessments"
)]
#[post("/v1/assessments/analyze")]
pub async fn analyze_assessment(
    service: web::Data<AnalysisService>,
    body: web::Json<AnalyzeRequest>,
) -> Result<impl Responder, ApiError> {
    let request = body.into_inner();
    let outcome = service.analyze(&request.answers, request.risk_level).await?;

    let source = if outcome.is_fallback() { "fallback" } else { "model" };

    Ok(HttpResponse::Ok().json(AnalyzeResponse {
        result: outcome.into_result(),
        source: source.to_string(),
    }))
}

/// Submit an assessment: analyze, merge, and persist
#[utoipa::path(
    post,
    path = "/v1/assessments",
    request_body = SubmitAssessmentRequest,
    responses(
        (status = 201, description = "Assessment stored", body = SubmitAssessmentResponse),
        (status = 400, description = "Invalid request shape"),
        (status = 500, description = "Assessment could not be stored")
    ),
    tag = "assessments"
)]
#[post("/v1/assessments")]
pub async fn submit_assessment(
    service: web::Data<SubmissionService>,
    body: web::Json<SubmitAssessmentRequest>,
) -> Result<impl Responder, ApiError> {
    let request = body.into_inner();
    let outcome = service.submit(request.user_id, request.answers).await?;

    let warning = outcome.degraded_write.then(|| {
        "Assessment stored with a reduced field set; analysis details were not persisted"
            .to_string()
    });

    Ok(HttpResponse::Created().json(SubmitAssessmentResponse {
        id: outcome.assessment_id,
        student_id: outcome.student_id,
        risk_level: outcome.risk_level,
        scores: outcome.scores,
        analysis: outcome.analysis.into_result(),
        warning,
    }))
}

/// Get a stored assessment by id
#[utoipa::path(
    get,
    path = "/v1/assessments/{id}",
    params(
        ("id" = Uuid, Path, description = "Assessment id")
    ),
    responses(
        (status = 200, description = "Assessment retrieved", body = AssessmentRecord),
        (status = 404, description = "Assessment not found")
    ),
    tag = "assessments"
)]
#[get("/v1/assessments/{id}")]
pub async fn get_assessment(
    service: web::Data<SubmissionService>,
    path: web::Path<Uuid>,
) -> Result<impl Responder, ApiError> {
    let id = path.into_inner();

    let record = service.get(id).await.map_err(|e| match e {
        crate::db::DbError::NotFound(_) => ApiError::AssessmentNotFound(id.to_string()),
        other => ApiError::from(other),
    })?;

    Ok(HttpResponse::Ok().json(record))
}

/// List a user's assessment history, oldest first, for trend views
#[utoipa::path(
    get,
    path = "/v1/students/{user_id}/assessments",
    params(
        ("user_id" = Uuid, Path, description = "User id of the student"),
        HistoryParams
    ),
    responses(
        (status = 200, description = "Assessment history", body = [AssessmentRecord]),
        (status = 404, description = "Student not found")
    ),
    tag = "assessments"
)]
#[get("/v1/students/{user_id}/assessments")]
pub async fn list_assessments(
    service: web::Data<SubmissionService>,
    path: web::Path<Uuid>,
    query: web::Query<HistoryParams>,
) -> Result<impl Responder, ApiError> {
    let records = service.history(path.into_inner(), query.limit).await?;
    Ok(HttpResponse::Ok().json(records))
}

/// Configure assessment routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(analyze_assessment)
        .service(submit_assessment)
        .service(get_assessment)
        .service(list_assessments);
}
