//! Configuration module

use std::env;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Database connection URL
    pub database_url: String,

    /// Server port
    pub port: u16,

    /// Active classifier artifact
    pub model_path: String,

    /// Active scaler artifact
    pub scaler_path: String,

    /// Directory receiving superseded artifacts
    pub archived_models_dir: String,

    /// CORS origins; "*" allows any
    pub allowed_origins: Vec<String>,

    /// Environment (development, production)
    pub environment: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://dropguard.db".to_string()),

            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8000),

            model_path: env::var("MODEL_PATH")
                .unwrap_or_else(|_| "ml/saved_models/model_gb.json".to_string()),

            scaler_path: env::var("SCALER_PATH")
                .unwrap_or_else(|_| "ml/saved_models/scaler_gb.json".to_string()),

            archived_models_dir: env::var("ARCHIVED_MODELS_DIR")
                .unwrap_or_else(|_| "archived_models".to_string()),

            allowed_origins: env::var("ALLOWED_ORIGINS")
                .unwrap_or_else(|_| "*".to_string())
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),

            environment: env::var("ENVIRONMENT")
                .unwrap_or_else(|_| "development".to_string()),
        }
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn allows_any_origin(&self) -> bool {
        self.allowed_origins.iter().any(|o| o == "*")
    }
}
