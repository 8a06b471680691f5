//! Spending error types.

use thiserror::Error;

/// Errors from reading spending input.
///
/// Numeric fields never fail (they coerce to zero); these cover input whose
/// *structure* is wrong, such as `materials` not being an array.
#[derive(Debug, Error)]
pub enum SpendingError {
    /// Cost records could not be read.
    #[error("Invalid cost records: {0}")]
    Records(#[from] serde_json::Error),
}
