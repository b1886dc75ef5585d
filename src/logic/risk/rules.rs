//! Scoring Weights & Band Thresholds
//!
//! Constants and lookup tables for the questionnaire scorer.
//! No scoring logic here - `scorer` combines these.

use super::types::{AdvisorInteraction, Attendance, FinancialStress, OverwhelmFrequency};

// ============================================================================
// BAND THRESHOLDS
// ============================================================================

/// At or above this score = high risk
pub const HIGH_RISK_MIN: i32 = 60;

/// At or above this score = medium risk (below = low)
pub const MEDIUM_RISK_MIN: i32 = 35;

/// Scores are clamped to 0..=MAX_RISK_SCORE
pub const MAX_RISK_SCORE: i32 = 100;

// ============================================================================
// SIGNAL WEIGHTS
// ============================================================================

/// Added when the student has actively considered withdrawing
pub const WITHDRAWAL_WEIGHT: i32 = 15;

/// Satisfaction scores count down from this baseline
pub const SATISFACTION_BASELINE: i32 = 10;

/// Points per missing satisfaction step
pub const SATISFACTION_MULTIPLIER: i32 = 2;

/// Satisfaction at or below this triggers the tutoring recommendation
pub const LOW_SATISFACTION_MAX: i32 = 4;

/// Fixed confidence reported for the rule path. This is a heuristic, not a
/// statistically calibrated value.
pub const FALLBACK_CONFIDENCE: f32 = 0.75;

/// Unknown answers contribute nothing rather than rejecting the submission.
pub fn attendance_weight(value: Attendance) -> i32 {
    match value {
        Attendance::Always => 0,
        Attendance::Often => 5,
        Attendance::Sometimes => 15,
        Attendance::Rarely => 25,
        Attendance::Never => 35,
        Attendance::Unknown => 0,
    }
}

pub fn overwhelm_weight(value: OverwhelmFrequency) -> i32 {
    match value {
        OverwhelmFrequency::Never => 0,
        OverwhelmFrequency::Rarely => 5,
        OverwhelmFrequency::Sometimes => 10,
        OverwhelmFrequency::Often => 20,
        OverwhelmFrequency::Always => 30,
        OverwhelmFrequency::Unknown => 0,
    }
}

pub fn financial_stress_weight(value: FinancialStress) -> i32 {
    match value {
        FinancialStress::None => 0,
        FinancialStress::Low => 5,
        FinancialStress::Moderate => 10,
        FinancialStress::High => 20,
        FinancialStress::VeryHigh => 25,
        FinancialStress::Unknown => 0,
    }
}

/// Inverse signal - less advisor contact means higher risk.
pub fn advisor_weight(value: AdvisorInteraction) -> i32 {
    match value {
        AdvisorInteraction::Never => 10,
        AdvisorInteraction::OnceSemester => 5,
        AdvisorInteraction::TwoThreeSemester => 2,
        AdvisorInteraction::Monthly => 0,
        AdvisorInteraction::Unknown => 0,
    }
}

// ============================================================================
// SUPPORT CONTACTS
// ============================================================================

pub const COUNSELING_CONTACT: &str = "counseling@rvce.edu.in";
pub const FINANCIAL_AID_CONTACT: &str = "financialaid@rvce.edu.in";
pub const TUTORING_CONTACT: &str = "tutoring@rvce.edu.in";
