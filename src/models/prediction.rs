//! Prediction models
//!
//! The persisted prediction record with its query methods, plus the response
//! shapes the prediction endpoints serialize.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Row, SqlitePool};
use uuid::Uuid;

use crate::logic::risk::{Recommendation, RiskAssessment, RiskFactor, RiskLevel};
use crate::logic::serving::ModelPrediction;
use crate::models::assessment::AssessmentRequest;

// ============================================================================
// API RESPONSES
// ============================================================================

/// Response of the questionnaire path.
#[derive(Debug, Clone, Serialize)]
pub struct PredictionResponse {
    pub risk_level: RiskLevel,
    pub risk_score: i32,
    pub dropout_probability: f32,
    pub risk_factors: Vec<RiskFactor>,
    pub recommendations: Vec<Recommendation>,
    pub model_confidence: f32,
}

impl From<RiskAssessment> for PredictionResponse {
    fn from(assessment: RiskAssessment) -> Self {
        Self {
            risk_level: assessment.risk_level,
            risk_score: assessment.risk_score,
            dropout_probability: assessment.dropout_probability,
            risk_factors: assessment.risk_factors,
            recommendations: assessment.recommendations,
            model_confidence: assessment.model_confidence,
        }
    }
}

/// Response of the raw-feature path when the model served the request.
#[derive(Debug, Clone, Serialize)]
pub struct RawPredictionResponse {
    pub model_available: bool,
    pub dropout_probability: f32,
    pub predicted_class: String,
    pub model_confidence: f32,
    pub risk_level: RiskLevel,
    pub risk_score: i32,
}

/// Well-formed "no model" signal for the raw-feature path.
#[derive(Debug, Clone, Serialize)]
pub struct ModelUnavailableResponse {
    pub model_available: bool,
    pub detail: String,
}

impl ModelUnavailableResponse {
    pub fn new() -> Self {
        Self {
            model_available: false,
            detail: "no trained model is loaded; use the questionnaire endpoint".to_string(),
        }
    }
}

// ============================================================================
// PERSISTED RECORDS
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PredictionRecord {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub risk_level: String,
    pub risk_score: i64,
    pub dropout_probability: f64,
    pub predicted_class: Option<String>,
    pub model_confidence: f64,
    pub endpoint: String,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct RiskFactorRow {
    pub category: String,
    pub factor: String,
    pub impact: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct RecommendationRow {
    pub rec_type: String,
    pub title: String,
    pub description: String,
    pub urgency: String,
    pub contact: Option<String>,
}

/// One history entry with its child rows.
#[derive(Debug, Serialize)]
pub struct PredictionDetail {
    #[serde(flatten)]
    pub prediction: PredictionRecord,
    pub risk_factors: Vec<RiskFactorRow>,
    pub recommendations: Vec<RecommendationRow>,
}

/// Aggregates for the admin dashboard.
#[derive(Debug, Serialize)]
pub struct DashboardStats {
    pub total_assessments: i64,
    pub high_risk_count: i64,
    pub medium_risk_count: i64,
    pub low_risk_count: i64,
    pub average_risk_score: f64,
}

impl PredictionRecord {
    pub fn from_assessment(assessment: &RiskAssessment, endpoint: &str) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            created_at: Utc::now(),
            risk_level: assessment.risk_level.as_str().to_string(),
            risk_score: assessment.risk_score as i64,
            dropout_probability: assessment.dropout_probability as f64,
            predicted_class: None,
            model_confidence: assessment.model_confidence as f64,
            endpoint: endpoint.to_string(),
        }
    }

    pub fn from_model(prediction: &ModelPrediction, endpoint: &str) -> Self {
        let risk_score = (prediction.dropout_probability * 100.0).round() as i64;
        Self {
            id: Uuid::new_v4().to_string(),
            created_at: Utc::now(),
            risk_level: RiskLevel::from_score(risk_score as i32).as_str().to_string(),
            risk_score,
            dropout_probability: prediction.dropout_probability as f64,
            predicted_class: Some(prediction.predicted_class.clone()),
            model_confidence: prediction.model_confidence as f64,
            endpoint: endpoint.to_string(),
        }
    }

    pub async fn insert(&self, pool: &SqlitePool) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO predictions
                (id, created_at, risk_level, risk_score, dropout_probability,
                 predicted_class, model_confidence, endpoint)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&self.id)
        .bind(self.created_at)
        .bind(&self.risk_level)
        .bind(self.risk_score)
        .bind(self.dropout_probability)
        .bind(&self.predicted_class)
        .bind(self.model_confidence)
        .bind(&self.endpoint)
        .execute(pool)
        .await?;
        Ok(())
    }

    pub async fn find_by_id(pool: &SqlitePool, id: &str) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>("SELECT * FROM predictions WHERE id = ?")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(
        pool: &SqlitePool,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM predictions ORDER BY created_at DESC LIMIT ? OFFSET ?",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await
    }

    pub async fn count(pool: &SqlitePool) -> Result<i64, sqlx::Error> {
        let row = sqlx::query("SELECT COUNT(*) AS count FROM predictions")
            .fetch_one(pool)
            .await?;
        Ok(row.get("count"))
    }

    pub async fn stats(pool: &SqlitePool) -> Result<DashboardStats, sqlx::Error> {
        let row = sqlx::query(
            r#"
            SELECT
                COUNT(*) AS total,
                COALESCE(SUM(CASE WHEN risk_level = 'high' THEN 1 ELSE 0 END), 0) AS high_count,
                COALESCE(SUM(CASE WHEN risk_level = 'medium' THEN 1 ELSE 0 END), 0) AS medium_count,
                COALESCE(SUM(CASE WHEN risk_level = 'low' THEN 1 ELSE 0 END), 0) AS low_count,
                COALESCE(AVG(risk_score), 0.0) AS avg_score
            FROM predictions
            "#,
        )
        .fetch_one(pool)
        .await?;

        Ok(DashboardStats {
            total_assessments: row.get("total"),
            high_risk_count: row.get("high_count"),
            medium_risk_count: row.get("medium_count"),
            low_risk_count: row.get("low_count"),
            average_risk_score: row.get("avg_score"),
        })
    }

    pub async fn risk_factors(
        pool: &SqlitePool,
        prediction_id: &str,
    ) -> Result<Vec<RiskFactorRow>, sqlx::Error> {
        sqlx::query_as::<_, RiskFactorRow>(
            "SELECT category, factor, impact, description
             FROM risk_factors WHERE prediction_id = ? ORDER BY id",
        )
        .bind(prediction_id)
        .fetch_all(pool)
        .await
    }

    pub async fn recommendations(
        pool: &SqlitePool,
        prediction_id: &str,
    ) -> Result<Vec<RecommendationRow>, sqlx::Error> {
        sqlx::query_as::<_, RecommendationRow>(
            "SELECT rec_type, title, description, urgency, contact
             FROM recommendations WHERE prediction_id = ? ORDER BY id",
        )
        .bind(prediction_id)
        .fetch_all(pool)
        .await
    }
}

// ============================================================================
// CHILD-ROW INSERTS
// ============================================================================

pub async fn insert_risk_factors(
    pool: &SqlitePool,
    prediction_id: &str,
    factors: &[RiskFactor],
) -> Result<(), sqlx::Error> {
    for factor in factors {
        sqlx::query(
            "INSERT INTO risk_factors (prediction_id, category, factor, impact, description)
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(prediction_id)
        .bind(&factor.category)
        .bind(&factor.factor)
        .bind(factor.impact.as_str())
        .bind(&factor.description)
        .execute(pool)
        .await?;
    }
    Ok(())
}

pub async fn insert_recommendations(
    pool: &SqlitePool,
    prediction_id: &str,
    recommendations: &[Recommendation],
) -> Result<(), sqlx::Error> {
    for recommendation in recommendations {
        sqlx::query(
            "INSERT INTO recommendations (prediction_id, rec_type, title, description, urgency, contact)
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(prediction_id)
        .bind(recommendation.kind.as_str())
        .bind(&recommendation.title)
        .bind(&recommendation.description)
        .bind(recommendation.urgency.as_str())
        .bind(&recommendation.contact)
        .execute(pool)
        .await?;
    }
    Ok(())
}

pub async fn insert_assessment_input(
    pool: &SqlitePool,
    prediction_id: &str,
    request: &AssessmentRequest,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO assessment_inputs
            (prediction_id, consent_given, consent_data_processing,
             consent_anonymous_analytics, academic_year, attendance,
             overwhelm_frequency, study_hours, performance_satisfaction,
             advisor_interaction, support_network_strength, extracurricular_hours,
             employment_status, financial_stress, career_alignment, services_used,
             withdrawal_considered, withdrawal_reasons)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(prediction_id)
    .bind(request.consent_given)
    .bind(request.consent_data_processing)
    .bind(request.consent_anonymous_analytics)
    .bind(&request.academic_year)
    .bind(request.attendance.as_str())
    .bind(request.overwhelm_frequency.as_str())
    .bind(&request.study_hours)
    .bind(request.performance_satisfaction)
    .bind(request.advisor_interaction.as_str())
    .bind(request.support_network_strength)
    .bind(request.extracurricular_hours)
    .bind(&request.employment_status)
    .bind(request.financial_stress.as_str())
    .bind(request.career_alignment)
    .bind(serde_json::to_string(&request.services_used).unwrap_or_else(|_| "[]".to_string()))
    .bind(request.withdrawal_considered)
    .bind(serde_json::to_string(&request.withdrawal_reasons).unwrap_or_else(|_| "[]".to_string()))
    .execute(pool)
    .await?;
    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================
