//! Demo data seeding
//!
//! Inserts a fixed set of demo predictions when the database is empty so the
//! dashboard has data on a fresh deployment. Deterministic on purpose - the
//! same entries land on every first run.

use chrono::{Duration, Utc};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::logic::risk::{
    AdvisorInteraction, Attendance, FinancialStress, Impact, OverwhelmFrequency, Recommendation,
    RecommendationKind, RiskFactor, Urgency,
};
use crate::models::assessment::AssessmentRequest;
use crate::models::prediction::{
    insert_assessment_input, insert_recommendations, insert_risk_factors, PredictionRecord,
};

struct DemoEntry {
    risk_level: &'static str,
    risk_score: i64,
    dropout_probability: f64,
    confidence: f64,
    days_ago: i64,
    name: &'static str,
    factors: &'static [(&'static str, &'static str, &'static str)],
    recommendations: &'static [(&'static str, &'static str, &'static str)],
}

#[rustfmt::skip]
const DEMO_ENTRIES: &[DemoEntry] = &[
    DemoEntry { risk_level: "high", risk_score: 78, dropout_probability: 0.78, confidence: 0.85, days_ago: 1, name: "Priya Sharma",
        factors: &[("Financial", "High financial stress", "high"), ("Academic", "Low attendance", "high")],
        recommendations: &[("counseling", "Counseling Session", "immediate")] },
    DemoEntry { risk_level: "high", risk_score: 72, dropout_probability: 0.72, confidence: 0.82, days_ago: 2, name: "Rahul Mehta",
        factors: &[("Academic", "Overwhelm - Always", "high"), ("Support", "Weak support network", "medium")],
        recommendations: &[("academic", "Academic Mentor", "immediate")] },
    DemoEntry { risk_level: "high", risk_score: 65, dropout_probability: 0.65, confidence: 0.80, days_ago: 3, name: "Sneha Patel",
        factors: &[("Personal", "Withdrawal considered", "high"), ("Financial", "Moderate financial stress", "medium")],
        recommendations: &[("counseling", "Emergency Counseling", "immediate")] },
    DemoEntry { risk_level: "medium", risk_score: 48, dropout_probability: 0.48, confidence: 0.78, days_ago: 2, name: "Vikram Nair",
        factors: &[("Academic", "Sometimes overwhelmed", "medium"), ("Support", "Low advisor interaction", "medium")],
        recommendations: &[("peer", "Peer Support Group", "soon")] },
    DemoEntry { risk_level: "medium", risk_score: 42, dropout_probability: 0.42, confidence: 0.76, days_ago: 4, name: "Aisha Khan",
        factors: &[("Academic", "Moderate attendance", "medium")],
        recommendations: &[("academic", "Study Skills Workshop", "soon")] },
    DemoEntry { risk_level: "medium", risk_score: 52, dropout_probability: 0.52, confidence: 0.79, days_ago: 1, name: "Arjun Reddy",
        factors: &[("Financial", "Moderate stress", "medium"), ("Academic", "Performance satisfaction low", "medium")],
        recommendations: &[("financial", "Financial Aid Application", "soon")] },
    DemoEntry { risk_level: "medium", risk_score: 45, dropout_probability: 0.45, confidence: 0.77, days_ago: 3, name: "Meera Iyer",
        factors: &[("Support", "Low extracurricular hours", "medium")],
        recommendations: &[("peer", "Join Campus Club", "soon")] },
    DemoEntry { risk_level: "low", risk_score: 22, dropout_probability: 0.22, confidence: 0.88, days_ago: 1, name: "Sanjay Kumar",
        factors: &[("Academic", "Good attendance", "low")],
        recommendations: &[("peer", "Stay Connected", "when-needed")] },
    DemoEntry { risk_level: "low", risk_score: 18, dropout_probability: 0.18, confidence: 0.90, days_ago: 2, name: "Kavita Das",
        factors: &[],
        recommendations: &[("peer", "Continue Current Path", "when-needed")] },
    DemoEntry { risk_level: "low", risk_score: 25, dropout_probability: 0.25, confidence: 0.87, days_ago: 3, name: "Rohan Singh",
        factors: &[("Academic", "Slight performance dip", "low")],
        recommendations: &[("academic", "Office Hours Visit", "when-needed")] },
    DemoEntry { risk_level: "low", risk_score: 12, dropout_probability: 0.12, confidence: 0.92, days_ago: 4, name: "Ananya Misra",
        factors: &[],
        recommendations: &[("peer", "Stay Engaged", "when-needed")] },
    DemoEntry { risk_level: "low", risk_score: 28, dropout_probability: 0.28, confidence: 0.86, days_ago: 5, name: "Deepak Joshi",
        factors: &[("Support", "Could increase study hours", "low")],
        recommendations: &[("academic", "Time Management", "when-needed")] },
    DemoEntry { risk_level: "low", risk_score: 15, dropout_probability: 0.15, confidence: 0.91, days_ago: 2, name: "Pooja Agarwal",
        factors: &[],
        recommendations: &[("peer", "Keep It Up", "when-needed")] },
    DemoEntry { risk_level: "medium", risk_score: 38, dropout_probability: 0.38, confidence: 0.75, days_ago: 6, name: "Nisha Venkat",
        factors: &[("Academic", "Occasional overwhelm", "medium")],
        recommendations: &[("peer", "Stress Management", "soon")] },
];

/// Insert demo predictions so the dashboard has data on first run.
pub async fn seed_demo_data(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    if PredictionRecord::count(pool).await? > 0 {
        return Ok(()); // Already seeded
    }

    let now = Utc::now();

    for (i, entry) in DEMO_ENTRIES.iter().enumerate() {
        let record = PredictionRecord {
            id: Uuid::new_v4().to_string(),
            created_at: now
                - Duration::days(entry.days_ago)
                - Duration::hours((i as i64 * 5) % 12),
            risk_level: entry.risk_level.to_string(),
            risk_score: entry.risk_score,
            dropout_probability: entry.dropout_probability,
            predicted_class: Some(
                if entry.risk_level == "high" {
                    "Dropout"
                } else {
                    "Non-Dropout"
                }
                .to_string(),
            ),
            model_confidence: entry.confidence,
            endpoint: "simplified".to_string(),
        };
        record.insert(pool).await?;

        insert_assessment_input(pool, &record.id, &demo_request(entry.risk_level, i)).await?;

        let factors: Vec<RiskFactor> = entry
            .factors
            .iter()
            .map(|&(category, factor, impact)| RiskFactor {
                category: category.to_string(),
                factor: factor.to_string(),
                impact: impact_from_str(impact),
                description: format!(
                    "{factor} identified as a {impact} risk factor for {}.",
                    entry.name
                ),
            })
            .collect();
        insert_risk_factors(pool, &record.id, &factors).await?;

        let recommendations: Vec<Recommendation> = entry
            .recommendations
            .iter()
            .map(|&(kind, title, urgency)| Recommendation {
                kind: kind_from_str(kind),
                title: title.to_string(),
                description: format!("Recommended action: {title} for {}.", entry.name),
                urgency: urgency_from_str(urgency),
                contact: None,
            })
            .collect();
        insert_recommendations(pool, &record.id, &recommendations).await?;
    }

    tracing::info!("Demo data seeded ({} assessments)", DEMO_ENTRIES.len());
    Ok(())
}

/// A plausible questionnaire submission matching the entry's band.
fn demo_request(risk_level: &str, i: usize) -> AssessmentRequest {
    let years = ["1st", "2nd", "3rd", "4th"];
    let study_hours = ["1-3", "3-5", "5-8"];
    let advisor = [
        AdvisorInteraction::Never,
        AdvisorInteraction::OnceSemester,
        AdvisorInteraction::TwoThreeSemester,
        AdvisorInteraction::Monthly,
    ];
    let extracurricular = [0, 1, 3, 5];
    let employment = ["not-employed", "part-time"];

    AssessmentRequest {
        consent_given: true,
        consent_data_processing: true,
        consent_anonymous_analytics: true,
        academic_year: Some(years[i % years.len()].to_string()),
        attendance: match risk_level {
            "high" => Attendance::Rarely,
            "medium" => Attendance::Sometimes,
            _ => Attendance::Always,
        },
        overwhelm_frequency: match risk_level {
            "high" => OverwhelmFrequency::Always,
            "medium" => OverwhelmFrequency::Sometimes,
            _ => OverwhelmFrequency::Never,
        },
        study_hours: Some(study_hours[i % study_hours.len()].to_string()),
        performance_satisfaction: match risk_level {
            "high" => 3,
            "medium" => 5,
            _ => 8,
        },
        advisor_interaction: advisor[i % advisor.len()],
        support_network_strength: Some(match risk_level {
            "high" => 2,
            "medium" => 5,
            _ => 8,
        }),
        extracurricular_hours: Some(extracurricular[i % extracurricular.len()]),
        employment_status: Some(employment[i % employment.len()].to_string()),
        financial_stress: match risk_level {
            "high" => FinancialStress::High,
            "medium" => FinancialStress::Moderate,
            _ => FinancialStress::None,
        },
        career_alignment: Some(match risk_level {
            "high" => 3,
            "medium" => 6,
            _ => 8,
        }),
        services_used: Vec::new(),
        withdrawal_considered: risk_level == "high",
        withdrawal_reasons: Vec::new(),
    }
}

fn impact_from_str(value: &str) -> Impact {
    match value {
        "high" => Impact::High,
        "medium" => Impact::Medium,
        _ => Impact::Low,
    }
}

fn urgency_from_str(value: &str) -> Urgency {
    match value {
        "immediate" => Urgency::Immediate,
        "soon" => Urgency::Soon,
        _ => Urgency::WhenNeeded,
    }
}

fn kind_from_str(value: &str) -> RecommendationKind {
    match value {
        "counseling" => RecommendationKind::Counseling,
        "financial" => RecommendationKind::Financial,
        "academic" => RecommendationKind::Academic,
        "health" => RecommendationKind::Health,
        _ => RecommendationKind::Peer,
    }
}
