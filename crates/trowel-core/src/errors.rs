//! Structural validation errors.
//!
//! Malformed *numbers* never produce an error (see [`crate::numeric`]). Malformed
//! *structure* does: a budget that is not an object, a container that is not an
//! object, an edit path that names no field, or a threshold table that is out of
//! order. Callers translate these into user-facing responses; the engine knows
//! nothing about transports.

use thiserror::Error;

/// Structural problems with engine input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The top-level input was not a JSON object.
    #[error("Validation error: expected a JSON object, found {found}")]
    NotAnObject { found: &'static str },

    /// Neither a hierarchical container nor any legacy flat field was present.
    #[error("Validation error: budget is missing required container '{0}'")]
    MissingContainer(String),

    /// A container key was present but did not hold an object.
    #[error("Validation error: budget container '{container}' must be an object")]
    InvalidContainer { container: String },

    /// A dotted edit path does not address any budget field.
    #[error("Validation error: unknown budget path '{0}'")]
    UnknownPath(String),

    /// Discrepancy thresholds are negative or not ordered critical >= high >= medium >= low.
    #[error("Validation error: invalid thresholds for {kind}: {reason}")]
    InvalidThresholds { kind: String, reason: String },
}

impl ValidationError {
    /// Name of the JSON type, for [`ValidationError::NotAnObject`].
    #[must_use]
    pub const fn json_type_name(value: &serde_json::Value) -> &'static str {
        match value {
            serde_json::Value::Null => "null",
            serde_json::Value::Bool(_) => "boolean",
            serde_json::Value::Number(_) => "number",
            serde_json::Value::String(_) => "string",
            serde_json::Value::Array(_) => "array",
            serde_json::Value::Object(_) => "object",
        }
    }
}
