//! Model Artifacts
//!
//! Deserialization of the classifier/scaler pair exported by the offline
//! training pipeline, and the capability traits the serving adapter talks
//! through. The adapter never sees tree internals - only
//! transform/predict/predict_proba.
//!
//! Artifact files are JSON: the classifier is a gradient-boosted tree
//! ensemble with a binary logistic link, the scaler is standard-scaler
//! parameters (`mean`, `scale`). Both are validated on load; a file that
//! fails validation is treated the same as a missing one.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// ERRORS
// ============================================================================

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("artifact not found: {0}")]
    NotFound(PathBuf),
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid artifact: {0}")]
    Invalid(String),
}

#[derive(Debug, Error)]
pub enum InferenceError {
    #[error("expected {expected} features, got {actual}")]
    FeatureCount { expected: usize, actual: usize },
    #[error("classifier produced an empty probability distribution")]
    EmptyDistribution,
    #[error("positive class index {index} outside distribution of {len}")]
    PositiveIndexOutOfRange { index: usize, len: usize },
}

// ============================================================================
// CAPABILITY TRAITS
// ============================================================================

/// A class label as exported by the training pipeline - integer or string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ClassLabel {
    Int(i64),
    Text(String),
}

/// The prediction surface of a trained classifier.
///
/// `predict_proba` and `predict_index` are independent operations: the hard
/// prediction is the classifier's own decision rule, never re-derived by
/// callers from the probability distribution.
pub trait Classifier: Send + Sync {
    /// Label set the classifier was trained on, in distribution order, when
    /// the artifact exposes one.
    fn class_labels(&self) -> Option<&[ClassLabel]>;

    fn n_classes(&self) -> usize;

    /// Per-class probability distribution for a single row.
    fn predict_proba(&self, row: &[f32]) -> Result<Vec<f32>, InferenceError>;

    /// Hard class prediction (an index into the label set) for a single row.
    fn predict_index(&self, row: &[f32]) -> Result<usize, InferenceError>;
}

/// The transform surface of a fitted feature scaler.
pub trait FeatureScaler: Send + Sync {
    fn transform(&self, row: &[f32]) -> Result<Vec<f32>, InferenceError>;
}

// ============================================================================
// GRADIENT-BOOSTED CLASSIFIER
// ============================================================================

/// One node of a regression tree. `left == -1` marks a leaf.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeNode {
    pub feature: i32,
    pub threshold: f32,
    pub left: i32,
    pub right: i32,
    pub value: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tree {
    pub nodes: Vec<TreeNode>,
}

impl Tree {
    /// Walk the tree for one row. Node and feature indices are validated at
    /// load time, so the walk itself does not re-check bounds.
    fn evaluate(&self, row: &[f32]) -> f32 {
        let mut idx = 0usize;
        loop {
            let node = &self.nodes[idx];
            if node.left < 0 {
                return node.value;
            }
            idx = if row[node.feature as usize] <= node.threshold {
                node.left as usize
            } else {
                node.right as usize
            };
        }
    }
}

/// Binary gradient-boosted tree ensemble with a logistic link:
/// `p = sigmoid(base_score + learning_rate * sum(tree(x)))`, distribution
/// `[1 - p, p]` in `classes` order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradientBoostingModel {
    pub classes: Vec<ClassLabel>,
    pub n_features: usize,
    pub learning_rate: f32,
    #[serde(default)]
    pub base_score: f32,
    pub trees: Vec<Tree>,
}

impl GradientBoostingModel {
    pub fn from_path(path: &Path) -> Result<Self, LoadError> {
        let raw = fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let model: Self = serde_json::from_str(&raw).map_err(|source| LoadError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        model.validate()?;
        Ok(model)
    }

    fn validate(&self) -> Result<(), LoadError> {
        if self.classes.len() != 2 {
            return Err(LoadError::Invalid(format!(
                "binary classifier expects 2 classes, artifact has {}",
                self.classes.len()
            )));
        }
        if self.n_features == 0 {
            return Err(LoadError::Invalid("n_features is zero".to_string()));
        }
        for (t, tree) in self.trees.iter().enumerate() {
            if tree.nodes.is_empty() {
                return Err(LoadError::Invalid(format!("tree {t} has no nodes")));
            }
            for (i, node) in tree.nodes.iter().enumerate() {
                if node.left < 0 {
                    continue;
                }
                let (left, right) = (node.left as usize, node.right as usize);
                // Children must point forward: guarantees the walk terminates.
                if left <= i || right <= i || left >= tree.nodes.len() || right >= tree.nodes.len()
                {
                    return Err(LoadError::Invalid(format!(
                        "tree {t} node {i} has out-of-order children"
                    )));
                }
                if node.feature < 0 || node.feature as usize >= self.n_features {
                    return Err(LoadError::Invalid(format!(
                        "tree {t} node {i} splits on feature {} of {}",
                        node.feature, self.n_features
                    )));
                }
            }
        }
        Ok(())
    }

    fn decision(&self, row: &[f32]) -> f32 {
        let sum: f32 = self.trees.iter().map(|tree| tree.evaluate(row)).sum();
        self.base_score + self.learning_rate * sum
    }

    fn check_row(&self, row: &[f32]) -> Result<(), InferenceError> {
        if row.len() != self.n_features {
            return Err(InferenceError::FeatureCount {
                expected: self.n_features,
                actual: row.len(),
            });
        }
        Ok(())
    }
}

fn sigmoid(x: f32) -> f32 {
    1.0 / (1.0 + (-x).exp())
}

impl Classifier for GradientBoostingModel {
    fn class_labels(&self) -> Option<&[ClassLabel]> {
        Some(&self.classes)
    }

    fn n_classes(&self) -> usize {
        self.classes.len()
    }

    fn predict_proba(&self, row: &[f32]) -> Result<Vec<f32>, InferenceError> {
        self.check_row(row)?;
        let p = sigmoid(self.decision(row));
        Ok(vec![1.0 - p, p])
    }

    fn predict_index(&self, row: &[f32]) -> Result<usize, InferenceError> {
        self.check_row(row)?;
        // The ensemble's own decision rule.
        Ok(if sigmoid(self.decision(row)) > 0.5 { 1 } else { 0 })
    }
}

// ============================================================================
// STANDARD SCALER
// ============================================================================

/// Fitted standard-scaler parameters: `transform(x) = (x - mean) / scale`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandardScaler {
    pub mean: Vec<f32>,
    pub scale: Vec<f32>,
}

impl StandardScaler {
    pub fn from_path(path: &Path) -> Result<Self, LoadError> {
        let raw = fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let scaler: Self = serde_json::from_str(&raw).map_err(|source| LoadError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        scaler.validate()?;
        Ok(scaler)
    }

    fn validate(&self) -> Result<(), LoadError> {
        if self.mean.is_empty() || self.mean.len() != self.scale.len() {
            return Err(LoadError::Invalid(format!(
                "scaler mean/scale lengths differ: {} vs {}",
                self.mean.len(),
                self.scale.len()
            )));
        }
        if self.scale.iter().any(|&s| s == 0.0 || !s.is_finite()) {
            return Err(LoadError::Invalid(
                "scaler contains a zero or non-finite scale entry".to_string(),
            ));
        }
        Ok(())
    }

    pub fn n_features(&self) -> usize {
        self.mean.len()
    }
}

impl FeatureScaler for StandardScaler {
    fn transform(&self, row: &[f32]) -> Result<Vec<f32>, InferenceError> {
        if row.len() != self.mean.len() {
            return Err(InferenceError::FeatureCount {
                expected: self.mean.len(),
                actual: row.len(),
            });
        }
        Ok(row
            .iter()
            .zip(self.mean.iter().zip(self.scale.iter()))
            .map(|(&x, (&mean, &scale))| (x - mean) / scale)
            .collect())
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    /// Single stump: x[0] <= 0.5 -> -2.0, else +2.0.
    fn stump() -> Tree {
        Tree {
            nodes: vec![
                TreeNode {
                    feature: 0,
                    threshold: 0.5,
                    left: 1,
                    right: 2,
                    value: 0.0,
                },
                TreeNode {
                    feature: -1,
                    threshold: 0.0,
                    left: -1,
                    right: -1,
                    value: -2.0,
                },
                TreeNode {
                    feature: -1,
                    threshold: 0.0,
                    left: -1,
                    right: -1,
                    value: 2.0,
                },
            ],
        }
    }

    fn model() -> GradientBoostingModel {
        GradientBoostingModel {
            classes: vec![ClassLabel::Int(0), ClassLabel::Int(1)],
            n_features: 2,
            learning_rate: 1.0,
            base_score: 0.0,
            trees: vec![stump()],
        }
    }

    #[test]
    fn stump_splits_both_ways() {
        let model = model();
        let low = model.predict_proba(&[0.0, 0.0]).unwrap();
        let high = model.predict_proba(&[1.0, 0.0]).unwrap();
        assert!(low[1] < 0.5, "left leaf should be negative class");
        assert!(high[1] > 0.5, "right leaf should be positive class");
        assert!((low[0] + low[1] - 1.0).abs() < 1e-6);

        assert_eq!(model.predict_index(&[0.0, 0.0]).unwrap(), 0);
        assert_eq!(model.predict_index(&[1.0, 0.0]).unwrap(), 1);
    }

    #[test]
    fn wrong_row_width_is_rejected() {
        let model = model();
        assert!(matches!(
            model.predict_proba(&[1.0]),
            Err(InferenceError::FeatureCount {
                expected: 2,
                actual: 1
            })
        ));
    }

    #[test]
    fn malformed_tree_fails_validation() {
        let mut model = model();
        // Child pointing backwards would loop forever.
        model.trees[0].nodes[0].left = 0;
        assert!(matches!(model.validate(), Err(LoadError::Invalid(_))));

        let mut model = self::model();
        model.trees[0].nodes[0].feature = 7;
        assert!(matches!(model.validate(), Err(LoadError::Invalid(_))));
    }

    #[test]
    fn class_labels_parse_ints_and_strings() {
        let labels: Vec<ClassLabel> = serde_json::from_str(r#"[0, "Dropout"]"#).unwrap();
        assert_eq!(labels[0], ClassLabel::Int(0));
        assert_eq!(labels[1], ClassLabel::Text("Dropout".to_string()));
    }

    #[test]
    fn scaler_transform_centers_and_scales() {
        let scaler = StandardScaler {
            mean: vec![10.0, 0.0],
            scale: vec![2.0, 1.0],
        };
        assert_eq!(scaler.transform(&[14.0, 3.0]).unwrap(), vec![2.0, 3.0]);
        assert!(scaler.transform(&[1.0]).is_err());
    }

    #[test]
    fn zero_scale_fails_validation() {
        let scaler = StandardScaler {
            mean: vec![1.0],
            scale: vec![0.0],
        };
        assert!(matches!(scaler.validate(), Err(LoadError::Invalid(_))));
    }

    #[test]
    fn artifacts_load_from_json_files() {
        let dir = tempfile::tempdir().unwrap();

        let model_path = dir.path().join("model_gb.json");
        fs::write(&model_path, serde_json::to_string(&model()).unwrap()).unwrap();
        let loaded = GradientBoostingModel::from_path(&model_path).unwrap();
        assert_eq!(loaded.n_features, 2);
        assert_eq!(loaded.trees.len(), 1);

        let scaler_path = dir.path().join("scaler_gb.json");
        fs::write(&scaler_path, r#"{"mean": [0.0, 0.0], "scale": [1.0, 1.0]}"#).unwrap();
        let scaler = StandardScaler::from_path(&scaler_path).unwrap();
        assert_eq!(scaler.n_features(), 2);

        // Corrupt JSON parses as a load error, not a panic.
        fs::write(&scaler_path, "not json").unwrap();
        assert!(matches!(
            StandardScaler::from_path(&scaler_path),
            Err(LoadError::Parse { .. })
        ));
    }
}
