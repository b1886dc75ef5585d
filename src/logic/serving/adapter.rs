//! Model Serving Adapter
//!
//! Wraps the trained classifier + scaler pair behind a load/predict contract
//! that never throws to the caller: a failed load returns `false`, a missing
//! or failed prediction returns `None`, and the reason lands in the log.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::artifact::{
    ClassLabel, Classifier, FeatureScaler, GradientBoostingModel, InferenceError, LoadError,
    StandardScaler,
};

/// Label reported when the hard-predicted index is 1.
pub const DROPOUT_LABEL: &str = "Dropout";
pub const NON_DROPOUT_LABEL: &str = "Non-Dropout";

// ============================================================================
// RESULT & STATUS TYPES
// ============================================================================

/// Output of the trained-model path.
#[derive(Debug, Clone, Serialize)]
pub struct ModelPrediction {
    /// Probability mass at the resolved positive class.
    pub dropout_probability: f32,
    /// Derived from the hard class prediction alone - may disagree with
    /// thresholding `dropout_probability` at 0.5, and that disagreement is
    /// preserved.
    pub predicted_class: String,
    /// Max over the full probability distribution.
    pub model_confidence: f32,
}

/// Snapshot for the model-status endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct ModelStatus {
    pub loaded: bool,
    pub model_path: Option<String>,
    pub scaler_path: Option<String>,
    pub positive_class_index: Option<usize>,
    pub loaded_at: Option<DateTime<Utc>>,
}

// ============================================================================
// ADAPTER
// ============================================================================

/// A classifier/scaler pair plus everything resolved once at load time.
struct LoadedModel {
    classifier: Box<dyn Classifier>,
    scaler: Box<dyn FeatureScaler>,
    /// Index into the probability distribution holding the dropout class,
    /// resolved once at load time rather than per prediction.
    positive_index: usize,
    model_path: PathBuf,
    scaler_path: PathBuf,
    loaded_at: DateTime<Utc>,
}

/// Process-wide serving state. Owned by the HTTP layer behind a
/// `parking_lot::RwLock`, so reloads are serialized against in-flight
/// predictions and a half-updated pair is never observable.
#[derive(Default)]
pub struct ModelServingAdapter {
    loaded: Option<LoadedModel>,
}

impl ModelServingAdapter {
    pub fn new() -> Self {
        Self { loaded: None }
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded.is_some()
    }

    pub fn status(&self) -> ModelStatus {
        ModelStatus {
            loaded: self.loaded.is_some(),
            model_path: self
                .loaded
                .as_ref()
                .map(|m| m.model_path.display().to_string()),
            scaler_path: self
                .loaded
                .as_ref()
                .map(|m| m.scaler_path.display().to_string()),
            positive_class_index: self.loaded.as_ref().map(|m| m.positive_index),
            loaded_at: self.loaded.as_ref().map(|m| m.loaded_at),
        }
    }

    /// Load (or hot-swap) the artifact pair. Fails soft: on any error the
    /// previous state is kept untouched and `false` is returned, with the
    /// reason logged. On success both handles are replaced together.
    pub fn load(&mut self, model_path: &Path, scaler_path: &Path) -> bool {
        match Self::try_load(model_path, scaler_path) {
            Ok(loaded) => {
                tracing::info!(
                    model = %model_path.display(),
                    scaler = %scaler_path.display(),
                    positive_index = loaded.positive_index,
                    "model artifacts loaded"
                );
                self.loaded = Some(loaded);
                true
            }
            Err(err) => {
                tracing::warn!(
                    model = %model_path.display(),
                    scaler = %scaler_path.display(),
                    error = %err,
                    "model load failed, serving continues on the fallback path"
                );
                false
            }
        }
    }

    fn try_load(model_path: &Path, scaler_path: &Path) -> Result<LoadedModel, LoadError> {
        if !model_path.exists() {
            return Err(LoadError::NotFound(model_path.to_path_buf()));
        }
        if !scaler_path.exists() {
            return Err(LoadError::NotFound(scaler_path.to_path_buf()));
        }

        let classifier = GradientBoostingModel::from_path(model_path)?;
        let scaler = StandardScaler::from_path(scaler_path)?;

        if scaler.n_features() != classifier.n_features {
            return Err(LoadError::Invalid(format!(
                "scaler expects {} features, classifier expects {}",
                scaler.n_features(),
                classifier.n_features
            )));
        }

        let positive_index =
            resolve_positive_index(classifier.class_labels(), classifier.n_classes());

        Ok(LoadedModel {
            classifier: Box::new(classifier),
            scaler: Box::new(scaler),
            positive_index,
            model_path: model_path.to_path_buf(),
            scaler_path: scaler_path.to_path_buf(),
            loaded_at: Utc::now(),
        })
    }

    /// Predict for a single feature row, already in training order.
    ///
    /// `None` when no model is loaded (a defined no-op, not a failure) or
    /// when scaling/prediction errors - the caller falls back gracefully
    /// either way.
    pub fn predict(&self, features: &[f32]) -> Option<ModelPrediction> {
        let loaded = self.loaded.as_ref()?;

        match run_inference(loaded, features) {
            Ok(prediction) => Some(prediction),
            Err(err) => {
                tracing::warn!(
                    row_len = features.len(),
                    error = %err,
                    "prediction failed, returning no result"
                );
                None
            }
        }
    }
}

fn run_inference(loaded: &LoadedModel, features: &[f32]) -> Result<ModelPrediction, InferenceError> {
    let scaled = loaded.scaler.transform(features)?;

    let proba = loaded.classifier.predict_proba(&scaled)?;
    let hard_index = loaded.classifier.predict_index(&scaled)?;

    if proba.is_empty() {
        return Err(InferenceError::EmptyDistribution);
    }
    let dropout_probability =
        proba
            .get(loaded.positive_index)
            .copied()
            .ok_or(InferenceError::PositiveIndexOutOfRange {
                index: loaded.positive_index,
                len: proba.len(),
            })?;
    let model_confidence = proba.iter().copied().fold(f32::NEG_INFINITY, f32::max);

    let predicted_class = if hard_index == 1 {
        DROPOUT_LABEL
    } else {
        NON_DROPOUT_LABEL
    };

    Ok(ModelPrediction {
        dropout_probability,
        predicted_class: predicted_class.to_string(),
        model_confidence,
    })
}

/// Resolve which distribution index holds the dropout class.
///
/// Priority: a label equal to the integer 1, then a label equal to the
/// string "Dropout", then index 1 when the distribution has more than one
/// entry, else index 0.
pub fn resolve_positive_index(labels: Option<&[ClassLabel]>, n_classes: usize) -> usize {
    if let Some(labels) = labels {
        if let Some(index) = labels.iter().position(|l| *l == ClassLabel::Int(1)) {
            return index;
        }
        if let Some(index) = labels
            .iter()
            .position(|l| matches!(l, ClassLabel::Text(s) if s == DROPOUT_LABEL))
        {
            return index;
        }
    }
    if n_classes > 1 {
        1
    } else {
        0
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    /// Canned classifier: fixed distribution and an independent hard index.
    struct StubClassifier {
        labels: Option<Vec<ClassLabel>>,
        proba: Vec<f32>,
        hard_index: usize,
    }

    impl Classifier for StubClassifier {
        fn class_labels(&self) -> Option<&[ClassLabel]> {
            self.labels.as_deref()
        }

        fn n_classes(&self) -> usize {
            self.proba.len()
        }

        fn predict_proba(&self, _row: &[f32]) -> Result<Vec<f32>, InferenceError> {
            Ok(self.proba.clone())
        }

        fn predict_index(&self, _row: &[f32]) -> Result<usize, InferenceError> {
            Ok(self.hard_index)
        }
    }

    struct IdentityScaler;

    impl FeatureScaler for IdentityScaler {
        fn transform(&self, row: &[f32]) -> Result<Vec<f32>, InferenceError> {
            Ok(row.to_vec())
        }
    }

    struct FailingScaler;

    impl FeatureScaler for FailingScaler {
        fn transform(&self, row: &[f32]) -> Result<Vec<f32>, InferenceError> {
            Err(InferenceError::FeatureCount {
                expected: 8,
                actual: row.len(),
            })
        }
    }

    fn adapter_with(classifier: StubClassifier, positive_index: usize) -> ModelServingAdapter {
        ModelServingAdapter {
            loaded: Some(LoadedModel {
                classifier: Box::new(classifier),
                scaler: Box::new(IdentityScaler),
                positive_index,
                model_path: PathBuf::from("model_gb.json"),
                scaler_path: PathBuf::from("scaler_gb.json"),
                loaded_at: Utc::now(),
            }),
        }
    }

    #[test]
    fn unloaded_adapter_predicts_none() {
        let adapter = ModelServingAdapter::new();
        assert!(!adapter.is_loaded());
        assert!(adapter.predict(&[1.0; 8]).is_none());
        assert!(adapter.predict(&[]).is_none());
    }

    #[test]
    fn load_fails_soft_on_missing_paths() {
        let dir = tempfile::tempdir().unwrap();
        let mut adapter = ModelServingAdapter::new();
        let ok = adapter.load(
            &dir.path().join("missing_model.json"),
            &dir.path().join("missing_scaler.json"),
        );
        assert!(!ok);
        assert!(!adapter.is_loaded());
    }

    #[test]
    fn load_fails_soft_on_corrupt_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let model_path = dir.path().join("model_gb.json");
        let scaler_path = dir.path().join("scaler_gb.json");
        fs::write(&model_path, "{ definitely not a model").unwrap();
        fs::write(&scaler_path, r#"{"mean": [0.0], "scale": [1.0]}"#).unwrap();

        let mut adapter = ModelServingAdapter::new();
        assert!(!adapter.load(&model_path, &scaler_path));
        assert!(!adapter.is_loaded());
    }

    #[test]
    fn failed_reload_keeps_previous_pair() {
        let mut adapter = adapter_with(
            StubClassifier {
                labels: None,
                proba: vec![0.3, 0.7],
                hard_index: 1,
            },
            1,
        );
        assert!(!adapter.load(Path::new("/nonexistent/a"), Path::new("/nonexistent/b")));
        // The old pair still serves.
        assert!(adapter.is_loaded());
        assert!(adapter.predict(&[1.0; 8]).is_some());
    }

    #[test]
    fn hard_prediction_divergence_is_preserved() {
        // Hard index 1 with a sub-0.5 dropout probability must still report
        // "Dropout".
        let adapter = adapter_with(
            StubClassifier {
                labels: Some(vec![ClassLabel::Int(0), ClassLabel::Int(1)]),
                proba: vec![0.55, 0.45],
                hard_index: 1,
            },
            1,
        );
        let prediction = adapter.predict(&[1.0; 8]).unwrap();
        assert_eq!(prediction.predicted_class, DROPOUT_LABEL);
        assert!(prediction.dropout_probability < 0.5);

        // And the inverse: hard index 0 with a high dropout probability.
        let adapter = adapter_with(
            StubClassifier {
                labels: Some(vec![ClassLabel::Int(0), ClassLabel::Int(1)]),
                proba: vec![0.4, 0.6],
                hard_index: 0,
            },
            1,
        );
        let prediction = adapter.predict(&[1.0; 8]).unwrap();
        assert_eq!(prediction.predicted_class, NON_DROPOUT_LABEL);
        assert!(prediction.dropout_probability > 0.5);
    }

    #[test]
    fn confidence_is_distribution_max() {
        let adapter = adapter_with(
            StubClassifier {
                labels: None,
                proba: vec![0.15, 0.25, 0.6],
                hard_index: 2,
            },
            1,
        );
        let prediction = adapter.predict(&[1.0; 8]).unwrap();
        assert_eq!(prediction.model_confidence, 0.6);
        // Positive index 1, not the argmax.
        assert_eq!(prediction.dropout_probability, 0.25);
    }

    #[test]
    fn scaler_failure_becomes_none() {
        let adapter = ModelServingAdapter {
            loaded: Some(LoadedModel {
                classifier: Box::new(StubClassifier {
                    labels: None,
                    proba: vec![0.5, 0.5],
                    hard_index: 0,
                }),
                scaler: Box::new(FailingScaler),
                positive_index: 1,
                model_path: PathBuf::from("m"),
                scaler_path: PathBuf::from("s"),
                loaded_at: Utc::now(),
            }),
        };
        assert!(adapter.predict(&[1.0; 3]).is_none());
    }

    #[test]
    fn positive_index_prefers_integer_one() {
        // Label 1 wins even when "Dropout" is also present.
        let labels = vec![
            ClassLabel::Text(DROPOUT_LABEL.to_string()),
            ClassLabel::Int(1),
        ];
        assert_eq!(resolve_positive_index(Some(&labels), 2), 1);

        // Reversed class order resolves to index 0.
        let labels = vec![ClassLabel::Int(1), ClassLabel::Int(0)];
        assert_eq!(resolve_positive_index(Some(&labels), 2), 0);
    }

    #[test]
    fn positive_index_falls_back_to_dropout_string() {
        let labels = vec![
            ClassLabel::Text("Graduate".to_string()),
            ClassLabel::Text(DROPOUT_LABEL.to_string()),
        ];
        assert_eq!(resolve_positive_index(Some(&labels), 2), 1);
    }

    #[test]
    fn positive_index_defaults_by_arity() {
        let labels = vec![ClassLabel::Int(3), ClassLabel::Int(4)];
        assert_eq!(resolve_positive_index(Some(&labels), 2), 1);
        assert_eq!(resolve_positive_index(None, 2), 1);
        assert_eq!(resolve_positive_index(None, 1), 0);
    }

    #[test]
    fn end_to_end_load_and_predict_from_files() {
        let dir = tempfile::tempdir().unwrap();
        let model_path = dir.path().join("model_gb.json");
        let scaler_path = dir.path().join("scaler_gb.json");

        // Stump on feature 0 after centering at 5.0: raw 8.0 -> +2.0 leaf.
        fs::write(
            &model_path,
            r#"{
                "classes": [0, 1],
                "n_features": 2,
                "learning_rate": 1.0,
                "base_score": 0.0,
                "trees": [{"nodes": [
                    {"feature": 0, "threshold": 0.0, "left": 1, "right": 2, "value": 0.0},
                    {"feature": -1, "threshold": 0.0, "left": -1, "right": -1, "value": -2.0},
                    {"feature": -1, "threshold": 0.0, "left": -1, "right": -1, "value": 2.0}
                ]}]
            }"#,
        )
        .unwrap();
        fs::write(&scaler_path, r#"{"mean": [5.0, 0.0], "scale": [1.0, 1.0]}"#).unwrap();

        let mut adapter = ModelServingAdapter::new();
        assert!(adapter.load(&model_path, &scaler_path));
        assert!(adapter.is_loaded());

        let status = adapter.status();
        assert!(status.loaded);
        assert_eq!(status.positive_class_index, Some(1));

        let high = adapter.predict(&[8.0, 0.0]).unwrap();
        assert_eq!(high.predicted_class, DROPOUT_LABEL);
        assert!(high.dropout_probability > 0.5);

        let low = adapter.predict(&[2.0, 0.0]).unwrap();
        assert_eq!(low.predicted_class, NON_DROPOUT_LABEL);
        assert!(low.dropout_probability < 0.5);

        // Wrong width degrades to None, never panics.
        assert!(adapter.predict(&[1.0]).is_none());
    }
}
