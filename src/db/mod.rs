//! Database module for PostgreSQL persistence

pub mod models;
pub mod repository;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::env;

// Environment variable names
const ENV_POSTGRES_HOST: &str = "WELLNESS_POSTGRES_HOST";
const ENV_POSTGRES_PORT: &str = "WELLNESS_POSTGRES_PORT";
const ENV_POSTGRES_USER: &str = "WELLNESS_POSTGRES_USER";
const ENV_POSTGRES_PASSWORD: &str = "WELLNESS_POSTGRES_PASSWORD";
const ENV_POSTGRES_DB: &str = "WELLNESS_POSTGRES_DB";

// Default values
const DEFAULT_POSTGRES_HOST: &str = "127.0.0.1";
const DEFAULT_POSTGRES_PORT: &str = "5432";
const DEFAULT_POSTGRES_USER: &str = "wellness";
const DEFAULT_POSTGRES_PASSWORD: &str = "wellness";
const DEFAULT_POSTGRES_DB: &str = "wellness";

#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("Database connection error: {0}")]
    Connection(#[from] sqlx::Error),

    #[error("Record not found: {0}")]
    NotFound(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Create a new database connection pool
pub async fn create_pool() -> Result<PgPool, DbError> {
    let host = env::var(ENV_POSTGRES_HOST).unwrap_or_else(|_| DEFAULT_POSTGRES_HOST.to_string());
    let port = env::var(ENV_POSTGRES_PORT).unwrap_or_else(|_| DEFAULT_POSTGRES_PORT.to_string());
    let user = env::var(ENV_POSTGRES_USER).unwrap_or_else(|_| DEFAULT_POSTGRES_USER.to_string());
    let password =
        env::var(ENV_POSTGRES_PASSWORD).unwrap_or_else(|_| DEFAULT_POSTGRES_PASSWORD.to_string());
    let database = env::var(ENV_POSTGRES_DB).unwrap_or_else(|_| DEFAULT_POSTGRES_DB.to_string());

    let database_url = format!(
        "postgres://{}:{}@{}:{}/{}",
        user, password, host, port, database
    );

    tracing::debug!(host = %host, port = %port, database = %database, "Connecting to PostgreSQL");

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&database_url)
        .await?;

    tracing::info!(host = %host, port = %port, "PostgreSQL connection established");

    Ok(pool)
}

/// Initialize database schema
pub async fn init_schema(pool: &PgPool) -> Result<(), DbError> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS students (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            user_id UUID NOT NULL UNIQUE,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS assessments (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            student_id UUID NOT NULL REFERENCES students(id) ON DELETE CASCADE,
            responses JSONB NOT NULL,
            anxiety_score INTEGER NOT NULL DEFAULT 0,
            depression_score INTEGER NOT NULL DEFAULT 0,
            stress_score INTEGER NOT NULL DEFAULT 0,
            overall_wellbeing_score INTEGER NOT NULL DEFAULT 0,
            risk_level VARCHAR(20) NOT NULL,
            predicted_conditions TEXT[],
            predicted_risk_level VARCHAR(20),
            predicted_sentiment VARCHAR(20),
            sentiment_score INTEGER,
            sentiment_label VARCHAR(30),
            ai_analysis TEXT,
            recommendations TEXT[],
            immediate_actions TEXT[],
            professional_help_needed BOOLEAN,
            crisis_indicators BOOLEAN,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS resources (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            title TEXT NOT NULL,
            description TEXT,
            resource_type VARCHAR(30) NOT NULL DEFAULT 'article',
            url TEXT,
            category VARCHAR(100),
            tags TEXT[] NOT NULL DEFAULT '{}',
            is_featured BOOLEAN NOT NULL DEFAULT FALSE,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(pool)
    .await?;

    // Create indexes separately
    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_assessments_student_id ON assessments(student_id)",
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_assessments_created_at ON assessments(created_at)",
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_resources_tags ON resources USING GIN(tags)")
        .execute(pool)
        .await?;

    tracing::info!("Database schema initialized");

    Ok(())
}
