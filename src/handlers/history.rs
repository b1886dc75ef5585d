//! Prediction history handlers

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;

use crate::models::{DashboardStats, PredictionDetail, PredictionRecord};
use crate::{AppError, AppResult, AppState};

#[derive(Debug, Deserialize, Default)]
pub struct HistoryFilter {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// List predictions, newest first
pub async fn list(
    State(state): State<AppState>,
    Query(filter): Query<HistoryFilter>,
) -> AppResult<Json<Vec<PredictionRecord>>> {
    let limit = filter.limit.unwrap_or(50).clamp(1, 500);
    let offset = filter.offset.unwrap_or(0).max(0);

    let predictions = PredictionRecord::list(&state.pool, limit, offset).await?;
    Ok(Json(predictions))
}

/// Get a single prediction with its factors and recommendations
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<PredictionDetail>> {
    let prediction = PredictionRecord::find_by_id(&state.pool, &id)
        .await?
        .ok_or_else(|| AppError::NotFound("Prediction not found".to_string()))?;

    let risk_factors = PredictionRecord::risk_factors(&state.pool, &id).await?;
    let recommendations = PredictionRecord::recommendations(&state.pool, &id).await?;

    Ok(Json(PredictionDetail {
        prediction,
        risk_factors,
        recommendations,
    }))
}

/// Dashboard aggregates
pub async fn stats(State(state): State<AppState>) -> AppResult<Json<DashboardStats>> {
    let stats = PredictionRecord::stats(&state.pool).await?;
    Ok(Json(stats))
}
