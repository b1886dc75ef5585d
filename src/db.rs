//! Database module - SQLite connection and migrations

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

/// Create database connection pool
pub async fn create_pool(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

    SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await
}

/// Run database migrations
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    // Create tables if not exist
    sqlx::raw_sql(SCHEMA_SQL).execute(pool).await?;

    tracing::info!("Database schema applied successfully");
    Ok(())
}

/// Database schema SQL
const SCHEMA_SQL: &str = r#"
-- Prediction history
CREATE TABLE IF NOT EXISTS predictions (
    id TEXT PRIMARY KEY,
    created_at TEXT NOT NULL,
    risk_level TEXT NOT NULL,
    risk_score INTEGER NOT NULL,
    dropout_probability REAL NOT NULL,
    predicted_class TEXT,
    model_confidence REAL NOT NULL,
    endpoint TEXT NOT NULL DEFAULT 'simplified'
);

-- Questionnaire submissions (one per simplified prediction)
CREATE TABLE IF NOT EXISTS assessment_inputs (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    prediction_id TEXT NOT NULL REFERENCES predictions(id) ON DELETE CASCADE,
    consent_given INTEGER NOT NULL DEFAULT 0,
    consent_data_processing INTEGER NOT NULL DEFAULT 0,
    consent_anonymous_analytics INTEGER NOT NULL DEFAULT 0,
    academic_year TEXT,
    attendance TEXT,
    overwhelm_frequency TEXT,
    study_hours TEXT,
    performance_satisfaction INTEGER,
    advisor_interaction TEXT,
    support_network_strength INTEGER,
    extracurricular_hours INTEGER,
    employment_status TEXT,
    financial_stress TEXT,
    career_alignment INTEGER,
    services_used TEXT NOT NULL DEFAULT '[]',
    withdrawal_considered INTEGER NOT NULL DEFAULT 0,
    withdrawal_reasons TEXT NOT NULL DEFAULT '[]'
);

-- Contributing factors surfaced with a prediction
CREATE TABLE IF NOT EXISTS risk_factors (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    prediction_id TEXT NOT NULL REFERENCES predictions(id) ON DELETE CASCADE,
    category TEXT NOT NULL,
    factor TEXT NOT NULL,
    impact TEXT NOT NULL,
    description TEXT
);

-- Support recommendations surfaced with a prediction
CREATE TABLE IF NOT EXISTS recommendations (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    prediction_id TEXT NOT NULL REFERENCES predictions(id) ON DELETE CASCADE,
    rec_type TEXT NOT NULL,
    title TEXT NOT NULL,
    description TEXT,
    urgency TEXT NOT NULL,
    contact TEXT
);

-- Indexes
CREATE INDEX IF NOT EXISTS idx_predictions_created ON predictions(created_at);
CREATE INDEX IF NOT EXISTS idx_predictions_level ON predictions(risk_level);
CREATE INDEX IF NOT EXISTS idx_inputs_prediction ON assessment_inputs(prediction_id);
CREATE INDEX IF NOT EXISTS idx_factors_prediction ON risk_factors(prediction_id);
CREATE INDEX IF NOT EXISTS idx_recs_prediction ON recommendations(prediction_id);
"#;
