//! Rule-Based Risk Scorer
//!
//! Deterministic fallback path used when no trained model is available, and
//! always used for questionnaire submissions. Pure function of the answers -
//! no I/O, no shared state, never fails.

use super::rules;
use super::types::{
    AssessmentAnswers, Attendance, FinancialStress, Impact, OverwhelmFrequency, Recommendation,
    RecommendationKind, RiskAssessment, RiskFactor, RiskLevel, Urgency,
};

/// Score a questionnaire submission.
///
/// Each signal contributes independently; the sum is clamped to 0-100 and
/// banded. Always returns a complete assessment with at least one
/// recommendation.
pub fn score(answers: &AssessmentAnswers) -> RiskAssessment {
    let mut risk_score = 0i32;

    risk_score += rules::attendance_weight(answers.attendance);
    risk_score += rules::overwhelm_weight(answers.overwhelm_frequency);
    risk_score += rules::financial_stress_weight(answers.financial_stress);

    if answers.withdrawal_considered {
        risk_score += rules::WITHDRAWAL_WEIGHT;
    }

    // Inverse satisfaction signal, floored so over-the-scale answers (>10)
    // cannot subtract points.
    risk_score += (rules::SATISFACTION_BASELINE - answers.performance_satisfaction).max(0)
        * rules::SATISFACTION_MULTIPLIER;

    risk_score += rules::advisor_weight(answers.advisor_interaction);

    let risk_score = risk_score.clamp(0, rules::MAX_RISK_SCORE);
    let risk_level = RiskLevel::from_score(risk_score);

    RiskAssessment {
        risk_level,
        risk_score,
        dropout_probability: risk_score as f32 / rules::MAX_RISK_SCORE as f32,
        risk_factors: derive_risk_factors(answers),
        recommendations: derive_recommendations(answers, risk_level),
        model_confidence: rules::FALLBACK_CONFIDENCE,
    }
}

/// Surface the signals that fired, in fixed priority order. Conditions are
/// independent, not mutually exclusive.
fn derive_risk_factors(answers: &AssessmentAnswers) -> Vec<RiskFactor> {
    let mut factors = Vec::new();

    if matches!(answers.attendance, Attendance::Rarely | Attendance::Never) {
        factors.push(RiskFactor {
            category: "Academic".to_string(),
            factor: "Low Class Attendance".to_string(),
            impact: Impact::High,
            description: "Inconsistent class attendance is strongly correlated with dropout risk"
                .to_string(),
        });
    }

    if matches!(
        answers.overwhelm_frequency,
        OverwhelmFrequency::Often | OverwhelmFrequency::Always
    ) {
        factors.push(RiskFactor {
            category: "Mental Health".to_string(),
            factor: "Academic Overwhelm".to_string(),
            impact: Impact::High,
            description: "Feeling frequently overwhelmed can lead to burnout and withdrawal"
                .to_string(),
        });
    }

    if matches!(
        answers.financial_stress,
        FinancialStress::High | FinancialStress::VeryHigh
    ) {
        factors.push(RiskFactor {
            category: "Financial".to_string(),
            factor: "Financial Stress".to_string(),
            impact: Impact::High,
            description: "Financial difficulties are a leading cause of student withdrawal"
                .to_string(),
        });
    }

    if answers.withdrawal_considered {
        factors.push(RiskFactor {
            category: "Behavioral".to_string(),
            factor: "Withdrawal Consideration".to_string(),
            impact: Impact::High,
            description: "Active consideration of withdrawal indicates elevated risk".to_string(),
        });
    }

    factors
}

/// Build the support recommendations, in fixed priority order. Guaranteed
/// non-empty: a default entry is emitted when nothing fires.
fn derive_recommendations(answers: &AssessmentAnswers, risk_level: RiskLevel) -> Vec<Recommendation> {
    let mut recommendations = Vec::new();

    if risk_level == RiskLevel::High {
        recommendations.push(Recommendation {
            kind: RecommendationKind::Counseling,
            title: "Mental Health Support".to_string(),
            description: "Schedule an urgent appointment with a counselor to discuss your \
                          concerns and develop a support plan"
                .to_string(),
            urgency: Urgency::Immediate,
            contact: Some(rules::COUNSELING_CONTACT.to_string()),
        });
    }

    if matches!(
        answers.financial_stress,
        FinancialStress::High | FinancialStress::VeryHigh
    ) {
        recommendations.push(Recommendation {
            kind: RecommendationKind::Financial,
            title: "Financial Aid Office".to_string(),
            description: "Connect with financial aid office to explore scholarships, grants, \
                          and emergency funding options"
                .to_string(),
            urgency: Urgency::Soon,
            contact: Some(rules::FINANCIAL_AID_CONTACT.to_string()),
        });
    }

    if answers.performance_satisfaction <= rules::LOW_SATISFACTION_MAX {
        recommendations.push(Recommendation {
            kind: RecommendationKind::Academic,
            title: "Academic Tutoring".to_string(),
            description: "Access tutoring services and study groups to improve academic \
                          performance"
                .to_string(),
            urgency: Urgency::Soon,
            contact: Some(rules::TUTORING_CONTACT.to_string()),
        });
    }

    if recommendations.is_empty() {
        recommendations.push(Recommendation {
            kind: RecommendationKind::Peer,
            title: "Stay Connected".to_string(),
            description: "Continue engaging with campus resources and maintain your support \
                          network"
                .to_string(),
            urgency: Urgency::WhenNeeded,
            contact: None,
        });
    }

    recommendations
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::risk::types::AdvisorInteraction;

    fn best_case() -> AssessmentAnswers {
        AssessmentAnswers {
            attendance: Attendance::Always,
            overwhelm_frequency: OverwhelmFrequency::Never,
            financial_stress: FinancialStress::None,
            withdrawal_considered: false,
            performance_satisfaction: 10,
            advisor_interaction: AdvisorInteraction::Monthly,
        }
    }

    #[test]
    fn best_case_scores_zero_and_low() {
        let assessment = score(&best_case());
        assert_eq!(assessment.risk_score, 0);
        assert_eq!(assessment.risk_level, RiskLevel::Low);
        assert_eq!(assessment.dropout_probability, 0.0);
        assert!(assessment.risk_factors.is_empty());
        // Single default recommendation when nothing fires.
        assert_eq!(assessment.recommendations.len(), 1);
        assert_eq!(assessment.recommendations[0].kind, RecommendationKind::Peer);
        assert_eq!(assessment.recommendations[0].urgency, Urgency::WhenNeeded);
        assert!(assessment.recommendations[0].contact.is_none());
    }

    #[test]
    fn worst_case_clamps_to_100_with_all_factors() {
        let answers = AssessmentAnswers {
            attendance: Attendance::Never,
            overwhelm_frequency: OverwhelmFrequency::Always,
            financial_stress: FinancialStress::VeryHigh,
            withdrawal_considered: true,
            performance_satisfaction: 0,
            advisor_interaction: AdvisorInteraction::Never,
        };
        // 35 + 30 + 25 + 15 + 20 + 10 = 135, clamped to 100.
        let assessment = score(&answers);
        assert_eq!(assessment.risk_score, 100);
        assert_eq!(assessment.risk_level, RiskLevel::High);
        assert_eq!(assessment.dropout_probability, 1.0);

        let factor_names: Vec<&str> = assessment
            .risk_factors
            .iter()
            .map(|f| f.factor.as_str())
            .collect();
        assert_eq!(
            factor_names,
            vec![
                "Low Class Attendance",
                "Academic Overwhelm",
                "Financial Stress",
                "Withdrawal Consideration",
            ]
        );
        assert!(assessment.risk_factors.iter().all(|f| f.impact == Impact::High));

        // Counseling leads when the band is high.
        assert_eq!(
            assessment.recommendations[0].kind,
            RecommendationKind::Counseling
        );
        assert_eq!(assessment.recommendations[0].urgency, Urgency::Immediate);
    }

    #[test]
    fn band_boundaries_are_exact() {
        // 15 + 10 + 5 + 2 + 2 = 34 -> low
        let answers = AssessmentAnswers {
            attendance: Attendance::Sometimes,
            overwhelm_frequency: OverwhelmFrequency::Sometimes,
            financial_stress: FinancialStress::Low,
            withdrawal_considered: false,
            performance_satisfaction: 9,
            advisor_interaction: AdvisorInteraction::TwoThreeSemester,
        };
        let assessment = score(&answers);
        assert_eq!(assessment.risk_score, 34);
        assert_eq!(assessment.risk_level, RiskLevel::Low);

        // 35 + 0 + 0 + 0 + 0 = 35 -> medium
        let answers = AssessmentAnswers {
            attendance: Attendance::Never,
            ..best_case()
        };
        let assessment = score(&answers);
        assert_eq!(assessment.risk_score, 35);
        assert_eq!(assessment.risk_level, RiskLevel::Medium);

        // 25 + 20 + 10 + 2 + 2 = 59 -> medium
        let answers = AssessmentAnswers {
            attendance: Attendance::Rarely,
            overwhelm_frequency: OverwhelmFrequency::Often,
            financial_stress: FinancialStress::Moderate,
            withdrawal_considered: false,
            performance_satisfaction: 9,
            advisor_interaction: AdvisorInteraction::TwoThreeSemester,
        };
        let assessment = score(&answers);
        assert_eq!(assessment.risk_score, 59);
        assert_eq!(assessment.risk_level, RiskLevel::Medium);

        // 25 + 20 + 10 + 0 + 5 = 60 -> high
        let answers = AssessmentAnswers {
            attendance: Attendance::Rarely,
            overwhelm_frequency: OverwhelmFrequency::Often,
            financial_stress: FinancialStress::Moderate,
            withdrawal_considered: false,
            performance_satisfaction: 10,
            advisor_interaction: AdvisorInteraction::OnceSemester,
        };
        let assessment = score(&answers);
        assert_eq!(assessment.risk_score, 60);
        assert_eq!(assessment.risk_level, RiskLevel::High);
    }

    #[test]
    fn over_scale_satisfaction_contributes_nothing() {
        let answers = AssessmentAnswers {
            performance_satisfaction: 14,
            ..best_case()
        };
        let assessment = score(&answers);
        assert_eq!(assessment.risk_score, 0);
    }

    #[test]
    fn unknown_answers_contribute_nothing() {
        let answers = AssessmentAnswers {
            attendance: Attendance::Unknown,
            overwhelm_frequency: OverwhelmFrequency::Unknown,
            financial_stress: FinancialStress::Unknown,
            advisor_interaction: AdvisorInteraction::Unknown,
            ..best_case()
        };
        let assessment = score(&answers);
        assert_eq!(assessment.risk_score, 0);
        assert_eq!(assessment.risk_level, RiskLevel::Low);
    }

    #[test]
    fn unrecognized_wire_values_deserialize_as_unknown() {
        let attendance: Attendance = serde_json::from_str("\"daily\"").unwrap();
        assert_eq!(attendance, Attendance::Unknown);

        let stress: FinancialStress = serde_json::from_str("\"catastrophic\"").unwrap();
        assert_eq!(stress, FinancialStress::Unknown);
    }

    #[test]
    fn hyphenated_wire_values_roundtrip() {
        let stress: FinancialStress = serde_json::from_str("\"very-high\"").unwrap();
        assert_eq!(stress, FinancialStress::VeryHigh);

        let advisor: AdvisorInteraction = serde_json::from_str("\"2-3-semester\"").unwrap();
        assert_eq!(advisor, AdvisorInteraction::TwoThreeSemester);

        let advisor: AdvisorInteraction = serde_json::from_str("\"once-semester\"").unwrap();
        assert_eq!(advisor, AdvisorInteraction::OnceSemester);
    }

    #[test]
    fn recommendations_never_empty() {
        // Sweep a grid of answer combinations; every one must recommend
        // something.
        let attendance = [Attendance::Always, Attendance::Sometimes, Attendance::Never];
        let stress = [
            FinancialStress::None,
            FinancialStress::Moderate,
            FinancialStress::VeryHigh,
        ];
        for &a in &attendance {
            for &s in &stress {
                for withdrawal in [false, true] {
                    for satisfaction in [0, 5, 10] {
                        let answers = AssessmentAnswers {
                            attendance: a,
                            financial_stress: s,
                            withdrawal_considered: withdrawal,
                            performance_satisfaction: satisfaction,
                            ..best_case()
                        };
                        let assessment = score(&answers);
                        assert!(!assessment.recommendations.is_empty());
                        assert!((0..=100).contains(&assessment.risk_score));
                    }
                }
            }
        }
    }

    #[test]
    fn financial_recommendation_fires_without_high_band() {
        // High stress alone: 20 points -> low band, but the financial-aid
        // recommendation still fires.
        let answers = AssessmentAnswers {
            financial_stress: FinancialStress::High,
            ..best_case()
        };
        let assessment = score(&answers);
        assert_eq!(assessment.risk_level, RiskLevel::Low);
        assert_eq!(
            assessment.recommendations[0].kind,
            RecommendationKind::Financial
        );
    }

    #[test]
    fn tutoring_fires_at_satisfaction_four() {
        let answers = AssessmentAnswers {
            performance_satisfaction: 4,
            ..best_case()
        };
        let assessment = score(&answers);
        assert!(assessment
            .recommendations
            .iter()
            .any(|r| r.kind == RecommendationKind::Academic));

        let answers = AssessmentAnswers {
            performance_satisfaction: 5,
            ..best_case()
        };
        let assessment = score(&answers);
        assert!(!assessment
            .recommendations
            .iter()
            .any(|r| r.kind == RecommendationKind::Academic));
    }
}
