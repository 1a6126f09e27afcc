//! Model artifact loading.
//!
//! The artifact is read once at startup. A failed load is not fatal: the
//! service keeps running with prediction disabled and the reason shown inline.

pub mod artifact;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use thiserror::Error;
use tracing::{error, info};

pub use artifact::ModelArtifact;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("Model file not found! Please upload '{}'.", display_name(.0))]
    NotFound(PathBuf),

    #[error("Failed to read model file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse model file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid model: {0}")]
    Invalid(String),
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Read-only model handle shared by all requests.
#[derive(Debug, Clone)]
pub enum ModelState {
    Ready(Arc<ModelArtifact>),
    Unavailable { reason: String },
}

impl ModelState {
    pub fn is_ready(&self) -> bool {
        matches!(self, ModelState::Ready(_))
    }

    pub fn unavailable_reason(&self) -> Option<&str> {
        match self {
            ModelState::Ready(_) => None,
            ModelState::Unavailable { reason } => Some(reason),
        }
    }
}

/// Reads and validates an artifact from disk.
pub fn load_artifact(path: &Path) -> Result<ModelArtifact, ModelError> {
    let bytes = match std::fs::read(path) {
        Ok(b) => b,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(ModelError::NotFound(path.to_path_buf()))
        }
        Err(e) => return Err(ModelError::Io(e)),
    };
    let artifact: ModelArtifact = serde_json::from_slice(&bytes)?;
    artifact.validate()?;
    Ok(artifact)
}

/// Startup entry point: never fails, folds load errors into `Unavailable`.
pub fn load_model_state(path: &Path) -> ModelState {
    match load_artifact(path) {
        Ok(artifact) => {
            info!(
                "Model loaded from {} (kind: {})",
                path.display(),
                artifact.kind()
            );
            ModelState::Ready(Arc::new(artifact))
        }
        Err(e) => {
            error!("Model unavailable, prediction disabled: {e}");
            ModelState::Unavailable {
                reason: e.to_string(),
            }
        }
    }
}
