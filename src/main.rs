use actix_web::{web, App, HttpServer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod api;
mod db;
mod model;
mod scoring;
mod service;

use db::repository::{AssessmentRepository, ResourceRepository, StudentRepository};
use model::Config;
use service::{AnalysisService, ResourceMatcher, SubmissionService};

#[tokio::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present (ignore if missing)
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();
    let bind_addr = config.bind_addr();

    // Initialize PostgreSQL database
    let db_pool = db::create_pool()
        .await
        .expect("Failed to create database pool");

    // Initialize database schema
    db::init_schema(&db_pool)
        .await
        .expect("Failed to initialize database schema");

    // Create services
    let analysis_service = web::Data::new(AnalysisService::new(
        config.groq_api_key.clone(),
        config.analysis.clone(),
    ));

    let submission_service = web::Data::new(SubmissionService::new(
        AssessmentRepository::new(db_pool.clone()),
        StudentRepository::new(db_pool.clone()),
        AnalysisService::new(config.groq_api_key.clone(), config.analysis.clone()),
    ));

    let resource_matcher = web::Data::new(ResourceMatcher::new(ResourceRepository::new(
        db_pool.clone(),
    )));

    let pool_data = web::Data::new(db_pool);

    tracing::info!(addr = %bind_addr, "Starting wellness-agent server");

    HttpServer::new(move || {
        App::new()
            .app_data(analysis_service.clone())
            .app_data(submission_service.clone())
            .app_data(resource_matcher.clone())
            .app_data(pool_data.clone())
            .configure(api::assessment::configure)
            .configure(api::resources::configure)
            .configure(api::health::configure)
            .configure(api::openapi::configure)
    })
    .bind(bind_addr)?
    .run()
    .await
}
