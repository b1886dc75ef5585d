//! Model lifecycle handlers
//!
//! Status, hot reload, and archival of superseded artifacts. Reload takes
//! the write lock on the shared adapter, so it is serialized against
//! in-flight predictions.

use std::path::{Path, PathBuf};

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::logic::serving::{archive_legacy, ModelStatus};
use crate::AppState;

pub async fn status(State(state): State<AppState>) -> Json<ModelStatus> {
    Json(state.model.read().status())
}

#[derive(Debug, Deserialize, Default)]
pub struct ReloadRequest {
    /// Overrides the configured classifier path when set
    pub model_path: Option<String>,
    /// Overrides the configured scaler path when set
    pub scaler_path: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ReloadResponse {
    pub loaded: bool,
    pub model_path: String,
    pub scaler_path: String,
}

/// Hot-swap the artifact pair. A failed load keeps the previous pair
/// serving and reports `loaded: false`. The body is optional - without one
/// the configured paths are reloaded.
pub async fn reload(
    State(state): State<AppState>,
    request: Option<Json<ReloadRequest>>,
) -> Json<ReloadResponse> {
    let request = request.map(|Json(body)| body).unwrap_or_default();
    let model_path = request
        .model_path
        .unwrap_or_else(|| state.config.model_path.clone());
    let scaler_path = request
        .scaler_path
        .unwrap_or_else(|| state.config.scaler_path.clone());

    let loaded = state
        .model
        .write()
        .load(Path::new(&model_path), Path::new(&scaler_path));

    Json(ReloadResponse {
        loaded,
        model_path,
        scaler_path,
    })
}

#[derive(Debug, Deserialize)]
pub struct ArchiveRequest {
    /// Artifact files to move into the archive directory
    pub paths: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct ArchiveResponse {
    pub archived: Vec<String>,
}

/// Move superseded artifact files into the configured archive directory.
/// Missing paths are skipped, per-file failures are logged; the response
/// lists what actually moved.
pub async fn archive(
    State(state): State<AppState>,
    Json(request): Json<ArchiveRequest>,
) -> Json<ArchiveResponse> {
    let paths: Vec<PathBuf> = request.paths.iter().map(PathBuf::from).collect();
    let archived = archive_legacy(&paths, Path::new(&state.config.archived_models_dir));

    Json(ArchiveResponse {
        archived: archived
            .iter()
            .map(|p| p.display().to_string())
            .collect(),
    })
}
