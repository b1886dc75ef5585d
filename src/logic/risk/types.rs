//! Risk Assessment Types
//!
//! Core types for the rule-based risk path.
//! No scoring logic here - only data structures.

use serde::{Deserialize, Serialize};

use super::rules::{HIGH_RISK_MIN, MEDIUM_RISK_MIN};

// ============================================================================
// RISK BAND
// ============================================================================

/// Coarse risk band derived from the numeric score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    /// Score below 35
    Low,
    /// Score 35-59
    Medium,
    /// Score 60 and above
    High,
}

impl RiskLevel {
    pub fn from_score(score: i32) -> Self {
        if score >= HIGH_RISK_MIN {
            RiskLevel::High
        } else if score >= MEDIUM_RISK_MIN {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// QUESTIONNAIRE ANSWERS
// ============================================================================

/// How regularly the student attends class.
///
/// Unrecognized wire values land on `Unknown` and contribute nothing to the
/// score - the questionnaire path never rejects input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Attendance {
    Always,
    Often,
    Sometimes,
    Rarely,
    Never,
    #[serde(other)]
    Unknown,
}

impl Attendance {
    pub fn as_str(&self) -> &'static str {
        match self {
            Attendance::Always => "always",
            Attendance::Often => "often",
            Attendance::Sometimes => "sometimes",
            Attendance::Rarely => "rarely",
            Attendance::Never => "never",
            Attendance::Unknown => "unknown",
        }
    }
}

/// How often the student reports feeling overwhelmed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverwhelmFrequency {
    Never,
    Rarely,
    Sometimes,
    Often,
    Always,
    #[serde(other)]
    Unknown,
}

impl OverwhelmFrequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            OverwhelmFrequency::Never => "never",
            OverwhelmFrequency::Rarely => "rarely",
            OverwhelmFrequency::Sometimes => "sometimes",
            OverwhelmFrequency::Often => "often",
            OverwhelmFrequency::Always => "always",
            OverwhelmFrequency::Unknown => "unknown",
        }
    }
}

/// Self-reported financial stress level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FinancialStress {
    None,
    Low,
    Moderate,
    High,
    VeryHigh,
    #[serde(other)]
    Unknown,
}

impl FinancialStress {
    pub fn as_str(&self) -> &'static str {
        match self {
            FinancialStress::None => "none",
            FinancialStress::Low => "low",
            FinancialStress::Moderate => "moderate",
            FinancialStress::High => "high",
            FinancialStress::VeryHigh => "very-high",
            FinancialStress::Unknown => "unknown",
        }
    }
}

/// How often the student meets an academic advisor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AdvisorInteraction {
    Never,
    OnceSemester,
    #[serde(rename = "2-3-semester")]
    TwoThreeSemester,
    Monthly,
    #[serde(other)]
    Unknown,
}

impl AdvisorInteraction {
    pub fn as_str(&self) -> &'static str {
        match self {
            AdvisorInteraction::Never => "never",
            AdvisorInteraction::OnceSemester => "once-semester",
            AdvisorInteraction::TwoThreeSemester => "2-3-semester",
            AdvisorInteraction::Monthly => "monthly",
            AdvisorInteraction::Unknown => "unknown",
        }
    }
}

/// The scored subset of a questionnaire submission. Built once per request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssessmentAnswers {
    pub attendance: Attendance,
    pub overwhelm_frequency: OverwhelmFrequency,
    pub financial_stress: FinancialStress,
    pub withdrawal_considered: bool,
    /// 0-10 satisfaction scale; values above 10 are tolerated and simply
    /// contribute nothing.
    pub performance_satisfaction: i32,
    pub advisor_interaction: AdvisorInteraction,
}

// ============================================================================
// ASSESSMENT OUTPUT
// ============================================================================

/// How strongly a factor bears on the risk estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Impact {
    Low,
    Medium,
    High,
}

impl Impact {
    pub fn as_str(&self) -> &'static str {
        match self {
            Impact::Low => "low",
            Impact::Medium => "medium",
            Impact::High => "high",
        }
    }
}

/// How soon a recommended action should be taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Urgency {
    Immediate,
    Soon,
    WhenNeeded,
}

impl Urgency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Urgency::Immediate => "immediate",
            Urgency::Soon => "soon",
            Urgency::WhenNeeded => "when-needed",
        }
    }
}

/// Category of support a recommendation points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationKind {
    Counseling,
    Financial,
    Academic,
    Health,
    Peer,
}

impl RecommendationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecommendationKind::Counseling => "counseling",
            RecommendationKind::Financial => "financial",
            RecommendationKind::Academic => "academic",
            RecommendationKind::Health => "health",
            RecommendationKind::Peer => "peer",
        }
    }
}

/// A single contributing signal surfaced to the student.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskFactor {
    pub category: String,
    pub factor: String,
    pub impact: Impact,
    pub description: String,
}

/// A support action suggested alongside the assessment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    #[serde(rename = "type")]
    pub kind: RecommendationKind,
    pub title: String,
    pub description: String,
    pub urgency: Urgency,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
}

/// Complete result of the rule-based scoring path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub risk_level: RiskLevel,
    /// Clamped to 0-100.
    pub risk_score: i32,
    /// `risk_score / 100`.
    pub dropout_probability: f32,
    pub risk_factors: Vec<RiskFactor>,
    /// Never empty - a default entry is emitted when nothing fires.
    pub recommendations: Vec<Recommendation>,
    pub model_confidence: f32,
}
