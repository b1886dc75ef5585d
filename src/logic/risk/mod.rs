//! Rule-based risk scoring.
//!
//! The deterministic questionnaire path: weighted additive score, risk band,
//! contributing factors, and support recommendations.

pub mod rules;
pub mod scorer;
pub mod types;

pub use scorer::score;
pub use types::{
    AdvisorInteraction, AssessmentAnswers, Attendance, FinancialStress, Impact,
    OverwhelmFrequency, Recommendation, RecommendationKind, RiskAssessment, RiskFactor, RiskLevel,
    Urgency,
};
