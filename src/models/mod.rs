//! Request, response, and persistence models.

pub mod assessment;
pub mod prediction;

pub use assessment::{AssessmentRequest, RawFeaturesRequest};
pub use prediction::{
    DashboardStats, ModelUnavailableResponse, PredictionDetail, PredictionRecord,
    PredictionResponse, RawPredictionResponse,
};
