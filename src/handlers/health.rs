//! Health check handlers

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    version: &'static str,
    model_loaded: bool,
    timestamp: i64,
}

pub async fn check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        model_loaded: state.model.read().is_loaded(),
        timestamp: chrono::Utc::now().timestamp(),
    })
}

#[derive(Serialize)]
pub struct RootResponse {
    message: &'static str,
    version: &'static str,
    docs: &'static str,
}

pub async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: "Student Dropout Risk Prediction API",
        version: env!("CARGO_PKG_VERSION"),
        docs: "/health",
    })
}
