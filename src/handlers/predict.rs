//! Prediction handlers
//!
//! The questionnaire path always goes through the rule-based scorer; the
//! raw-feature path goes through the trained model and degrades to a defined
//! "model unavailable" signal instead of an error. Persistence failures are
//! logged but never fail a prediction - availability over precision.

use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::logic::risk;
use crate::logic::serving::{self, ModelPrediction};
use crate::models::prediction::{
    insert_assessment_input, insert_recommendations, insert_risk_factors,
};
use crate::models::{
    AssessmentRequest, ModelUnavailableResponse, PredictionRecord, PredictionResponse,
    RawFeaturesRequest, RawPredictionResponse,
};
use crate::{AppError, AppResult, AppState};

/// Score a questionnaire submission.
pub async fn simplified(
    State(state): State<AppState>,
    Json(request): Json<AssessmentRequest>,
) -> AppResult<Json<PredictionResponse>> {
    let assessment = risk::score(&request.answers());

    let record = PredictionRecord::from_assessment(&assessment, "simplified");
    if let Err(err) = persist_assessment(&state, &record, &request, &assessment).await {
        tracing::warn!(error = %err, "failed to persist assessment, returning prediction anyway");
    }

    Ok(Json(PredictionResponse::from(assessment)))
}

/// Score a raw enrollment-record feature map with the trained model.
pub async fn raw(
    State(state): State<AppState>,
    Json(request): Json<RawFeaturesRequest>,
) -> AppResult<Response> {
    let row = serving::ordered_row(&request.features)
        .map_err(|err| AppError::ValidationError(err.to_string()))?;

    let prediction = state.model.read().predict(&row);

    match prediction {
        Some(prediction) => {
            let record = PredictionRecord::from_model(&prediction, "raw");
            if let Err(err) = record.insert(&state.pool).await {
                tracing::warn!(error = %err, "failed to persist raw prediction");
            }
            Ok(Json(raw_response(&record, prediction)).into_response())
        }
        None => Ok(Json(ModelUnavailableResponse::new()).into_response()),
    }
}

fn raw_response(record: &PredictionRecord, prediction: ModelPrediction) -> RawPredictionResponse {
    RawPredictionResponse {
        model_available: true,
        dropout_probability: prediction.dropout_probability,
        predicted_class: prediction.predicted_class,
        model_confidence: prediction.model_confidence,
        risk_level: risk::RiskLevel::from_score(record.risk_score as i32),
        risk_score: record.risk_score as i32,
    }
}

async fn persist_assessment(
    state: &AppState,
    record: &PredictionRecord,
    request: &AssessmentRequest,
    assessment: &risk::RiskAssessment,
) -> Result<(), sqlx::Error> {
    record.insert(&state.pool).await?;
    insert_assessment_input(&state.pool, &record.id, request).await?;
    insert_risk_factors(&state.pool, &record.id, &assessment.risk_factors).await?;
    insert_recommendations(&state.pool, &record.id, &assessment.recommendations).await?;
    Ok(())
}
