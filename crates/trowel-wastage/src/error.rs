//! Wastage error types.

use thiserror::Error;
use trowel_core::ValidationError;

/// Errors from discrepancy detection and roll-ups.
#[derive(Debug, Error)]
pub enum WastageError {
    /// Material or project input could not be read.
    #[error("Invalid material input: {0}")]
    Input(#[from] serde_json::Error),

    /// Thresholds or other input failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}
