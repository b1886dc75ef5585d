//! Assessment request models
//!
//! The questionnaire payload. Only six fields are scored; the rest of the
//! form (consent flags, academic year, and so on) is non-scoring metadata
//! persisted alongside the prediction.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::logic::risk::{
    AdvisorInteraction, AssessmentAnswers, Attendance, FinancialStress, OverwhelmFrequency,
};

/// Full questionnaire submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssessmentRequest {
    // Consent (metadata)
    #[serde(default)]
    pub consent_given: bool,
    #[serde(default)]
    pub consent_data_processing: bool,
    #[serde(default)]
    pub consent_anonymous_analytics: bool,

    // Academic
    #[serde(default)]
    pub academic_year: Option<String>,
    pub attendance: Attendance,
    pub overwhelm_frequency: OverwhelmFrequency,
    #[serde(default)]
    pub study_hours: Option<String>,
    pub performance_satisfaction: i32,

    // Support
    pub advisor_interaction: AdvisorInteraction,
    #[serde(default)]
    pub support_network_strength: Option<i32>,
    #[serde(default)]
    pub extracurricular_hours: Option<i32>,

    // Personal
    #[serde(default)]
    pub employment_status: Option<String>,
    pub financial_stress: FinancialStress,
    #[serde(default)]
    pub career_alignment: Option<i32>,

    // Services
    #[serde(default)]
    pub services_used: Vec<String>,
    pub withdrawal_considered: bool,
    #[serde(default)]
    pub withdrawal_reasons: Vec<String>,
}

impl AssessmentRequest {
    /// The scored subset of the submission.
    pub fn answers(&self) -> AssessmentAnswers {
        AssessmentAnswers {
            attendance: self.attendance,
            overwhelm_frequency: self.overwhelm_frequency,
            financial_stress: self.financial_stress,
            withdrawal_considered: self.withdrawal_considered,
            performance_satisfaction: self.performance_satisfaction,
            advisor_interaction: self.advisor_interaction,
        }
    }
}

/// Raw enrollment-record features, keyed by training column name. The
/// handler reorders these into the fixed feature order before prediction.
#[derive(Debug, Clone, Deserialize)]
pub struct RawFeaturesRequest {
    pub features: HashMap<String, f32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_payload_deserializes_with_metadata_defaults() {
        let request: AssessmentRequest = serde_json::from_str(
            r#"{
                "attendance": "rarely",
                "overwhelm_frequency": "often",
                "performance_satisfaction": 3,
                "advisor_interaction": "never",
                "financial_stress": "very-high",
                "withdrawal_considered": true
            }"#,
        )
        .unwrap();

        assert_eq!(request.attendance, Attendance::Rarely);
        assert_eq!(request.financial_stress, FinancialStress::VeryHigh);
        assert!(!request.consent_given);
        assert!(request.academic_year.is_none());
        assert!(request.services_used.is_empty());

        let answers = request.answers();
        assert!(answers.withdrawal_considered);
        assert_eq!(answers.performance_satisfaction, 3);
    }
}
