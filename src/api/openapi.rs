//! OpenAPI specification endpoints

use actix_web::{get, HttpResponse, Responder};
use utoipa::OpenApi;

use crate::api::{assessment, health, resources};
use crate::model::{
    AnalysisResult, AssessmentRecord, CategoryScores, Resource, RiskLevel, Sentiment,
    SentimentLabel,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        assessment::analyze_assessment,
        assessment::submit_assessment,
        assessment::get_assessment,
        assessment::list_assessments,
        resources::match_resources,
        health::liveness,
        health::readiness,
    ),
    components(schemas(
        AnalysisResult,
        AssessmentRecord,
        CategoryScores,
        Resource,
        RiskLevel,
        Sentiment,
        SentimentLabel,
        assessment::AnalyzeRequest,
        assessment::AnalyzeResponse,
        assessment::SubmitAssessmentRequest,
        assessment::SubmitAssessmentResponse,
        health::HealthStatus,
        health::ReadinessStatus,
    )),
    tags(
        (name = "assessments", description = "Wellness assessment analysis and storage"),
        (name = "resources", description = "Educational resource matching"),
        (name = "health", description = "Service health probes")
    )
)]
pub struct ApiDoc;

/// Serve OpenAPI JSON specification
#[get("/openapi.json")]
pub async fn openapi_json() -> impl Responder {
    HttpResponse::Ok().json(ApiDoc::openapi())
}

/// Serve OpenAPI YAML specification
#[get("/openapi.yaml")]
pub async fn openapi_yaml() -> impl Responder {
    match ApiDoc::openapi().to_yaml() {
        Ok(yaml) => HttpResponse::Ok().content_type("text/yaml").body(yaml),
        Err(e) => {
            tracing::error!(error = %e, "Failed to render OpenAPI YAML");
            HttpResponse::InternalServerError().finish()
        }
    }
}

/// Configure OpenAPI routes
pub fn configure(cfg: &mut actix_web::web::ServiceConfig) {
    cfg.service(openapi_json).service(openapi_yaml);
}
