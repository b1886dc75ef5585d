//! Feature-Order Contract
//!
//! The trained classifier consumes rows in exactly this column order. The
//! order is a hard contract with the training pipeline - a reordered row
//! silently corrupts predictions, so the HTTP layer always goes through
//! [`ordered_row`] rather than trusting map iteration order.

use std::collections::HashMap;

use thiserror::Error;

/// Enrollment-record features, in training order.
pub const FEATURE_COLUMNS: [&str; 8] = [
    "Curricular units 2nd sem (approved)",
    "Curricular units 1st sem (approved)",
    "Tuition fees up to date",
    "Scholarship holder",
    "Age at enrollment",
    "Debtor",
    "Gender",
    "Application mode",
];

pub const FEATURE_COUNT: usize = FEATURE_COLUMNS.len();

#[derive(Debug, Error)]
#[error("missing feature: {0}")]
pub struct MissingFeature(pub String);

/// Reorder a named feature map into the fixed training order.
pub fn ordered_row(features: &HashMap<String, f32>) -> Result<Vec<f32>, MissingFeature> {
    let mut row = Vec::with_capacity(FEATURE_COUNT);
    for &name in FEATURE_COLUMNS.iter() {
        let value = features
            .get(name)
            .copied()
            .ok_or_else(|| MissingFeature(name.to_string()))?;
        row.push(value);
    }
    Ok(row)
}
