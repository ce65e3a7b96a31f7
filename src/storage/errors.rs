use std::path::PathBuf;

use thiserror::Error;
use uuid::Uuid;

use crate::validation::ValidationError;

/// Errors that can arise while loading, saving or editing the recipe box document.
#[derive(Debug, Error)]
pub enum RecipeBoxError {
    /// Wrapper around IO errors (directory creation, locking, rename).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Wrapper around serde_json serialization errors.
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// The document on disk exists but is not a recipe box document.
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Returned when an id does not name a stored record.
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: Uuid },

    /// User-supplied text failed validation.
    #[error("invalid input: {0}")]
    Invalid(#[from] ValidationError),
}
