//! REST API endpoint for resource matching

use actix_web::{get, web, HttpResponse, Responder};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::api::error::ApiError;
use crate::model::{Resource, RiskLevel};
use crate::service::ResourceMatcher;

/// Query parameters for resource matching
#[derive(Debug, Deserialize, IntoParams)]
pub struct MatchResourcesParams {
    /// Comma-separated predicted condition tags
    pub conditions: Option<String>,
    /// Risk level driving crisis prioritization (default: low)
    pub risk_level: Option<String>,
}

/// Match educational resources to predicted conditions by tag overlap
///
/// Crisis-tagged resources are listed first for high and critical risk.
#[utoipa::path(
    get,
    path = "/v1/resources/match",
    params(MatchResourcesParams),
    responses(
        (status = 200, description = "Matched resources", body = [Resource]),
        (status = 400, description = "Unknown risk level")
    ),
    tag = "resources"
)]
#[get("/v1/resources/match")]
pub async fn match_resources(
    service: web::Data<ResourceMatcher>,
    query: web::Query<MatchResourcesParams>,
) -> Result<impl Responder, ApiError> {
    let risk_level = match query.risk_level.as_deref() {
        Some(value) => RiskLevel::parse(value)
            .ok_or_else(|| ApiError::BadRequest(format!("Unknown risk level: {value}")))?,
        None => RiskLevel::Low,
    };

    let conditions: Vec<String> = query
        .conditions
        .as_deref()
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();

    let resources = service.match_resources(&conditions, risk_level).await?;
    Ok(HttpResponse::Ok().json(resources))
}

/// Configure resource routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(match_resources);
}
