//! DropGuard - Student Dropout Risk Prediction Service
//!
//! Serves dropout-risk predictions over a JSON API. Questionnaire
//! submissions are scored by a deterministic rule engine; raw
//! enrollment-record features go through a pre-trained gradient-boosted
//! classifier when its artifacts are loaded. Prediction history lands in
//! SQLite, and superseded model artifacts can be archived (never deleted)
//! through the admin endpoints.
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────┐
//! │                        DROPGUARD                          │
//! ├───────────────────────────────────────────────────────────┤
//! │  ┌──────────┐   ┌───────────────┐   ┌──────────────────┐  │
//! │  │  API     │   │  RuleBased    │   │  ModelServing    │  │
//! │  │  (Axum)  │──▶│  Scorer       │   │  Adapter         │  │
//! │  │          │   │  (fallback)   │   │  (GB classifier) │  │
//! │  └────┬─────┘   └───────────────┘   └──────────────────┘  │
//! │       ▼                                                   │
//! │  ┌──────────┐                                             │
//! │  │  SQLite  │                                             │
//! │  └──────────┘                                             │
//! └───────────────────────────────────────────────────────────┘
//! ```

mod config;
mod db;
mod error;
mod handlers;
mod logic;
mod models;
mod seed;

use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use axum::{
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use parking_lot::RwLock;
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use logic::serving::ModelServingAdapter;

pub use error::{AppError, AppResult};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::from_env();

    // Initialize logging - structured JSON in production, plain otherwise
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "dropguard=debug,tower_http=debug".into());
    if config.is_production() {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    tracing::info!("Student Dropout Risk Prediction API starting...");
    tracing::info!("Database: {}", config.database_url);

    // Initialize database
    let pool = db::create_pool(&config.database_url)
        .await
        .context("Failed to create database pool")?;

    tracing::info!("Running database migrations...");
    db::run_migrations(&pool)
        .await
        .context("Failed to run migrations")?;

    seed::seed_demo_data(&pool)
        .await
        .context("Failed to seed demo data")?;

    // Shared model state. The initial load is best effort - the rule-based
    // path serves regardless of whether artifacts are present.
    let model = Arc::new(RwLock::new(ModelServingAdapter::new()));
    model.write().load(
        Path::new(&config.model_path),
        Path::new(&config.scaler_path),
    );

    let state = AppState {
        pool,
        config: config.clone(),
        model,
    };

    let app = create_router(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind server port")?;
    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub pool: sqlx::SqlitePool,
    pub config: config::Config,
    pub model: Arc<RwLock<ModelServingAdapter>>,
}

/// Create the main router with all routes
fn create_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config);

    Router::new()
        .route("/", get(handlers::health::root))
        .route("/health", get(handlers::health::check))
        // Prediction
        .route(
            "/api/v1/predict/simplified",
            post(handlers::predict::simplified),
        )
        .route("/api/v1/predict/raw", post(handlers::predict::raw))
        // History
        .route("/api/v1/predictions", get(handlers::history::list))
        .route("/api/v1/predictions/stats", get(handlers::history::stats))
        .route("/api/v1/predictions/:id", get(handlers::history::get))
        // Model lifecycle
        .route("/api/v1/model/status", get(handlers::model_admin::status))
        .route("/api/v1/model/reload", post(handlers::model_admin::reload))
        .route(
            "/api/v1/model/archive",
            post(handlers::model_admin::archive),
        )
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

fn cors_layer(config: &config::Config) -> CorsLayer {
    let cors = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    if config.allows_any_origin() {
        cors.allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> = config
            .allowed_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();
        cors.allow_origin(AllowOrigin::list(origins))
    }
}
