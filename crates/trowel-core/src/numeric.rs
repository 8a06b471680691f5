//! Silent numeric coercion.
//!
//! Upstream callers hand the engine loosely-typed JSON: numbers, numeric
//! strings, nulls, missing keys. Every engine crate funnels those through
//! [`parse_numeric_or_zero`] so the coercion boundary lives in one place.
//! Anything that is not a finite number (after string parsing) becomes `0.0`.
//! This never raises; structural problems are reported separately via
//! [`crate::ValidationError`].

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Coerce an arbitrary JSON value to a finite `f64`, or `0.0`.
///
/// - numbers pass through (non-finite becomes `0.0`)
/// - strings are trimmed and parsed; unparseable strings become `0.0`
/// - `null`, booleans, arrays and objects become `0.0`
#[must_use]
pub fn parse_numeric_or_zero(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().filter(|v| v.is_finite()).unwrap_or(0.0),
        Value::String(s) => parse_str_or_zero(s),
        Value::Null | Value::Bool(_) | Value::Array(_) | Value::Object(_) => 0.0,
    }
}

/// String half of [`parse_numeric_or_zero`].
#[must_use]
pub fn parse_str_or_zero(raw: &str) -> f64 {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    match trimmed.parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => {
            tracing::warn!(raw = trimmed, "non-numeric value coerced to 0");
            0.0
        }
    }
}

/// Look up `key` on a JSON object and coerce it. Missing keys yield `0.0`.
#[must_use]
pub fn field_or_zero(object: &serde_json::Map<String, Value>, key: &str) -> f64 {
    object.get(key).map_or(0.0, parse_numeric_or_zero)
}

/// Serde adapters applying [`parse_numeric_or_zero`] to struct fields.
///
/// Pair with `#[serde(default)]` so missing keys also coerce:
///
/// ```
/// use serde::Deserialize;
/// use trowel_core::numeric::lenient;
///
/// #[derive(Deserialize)]
/// struct Row {
///     #[serde(default, deserialize_with = "lenient::number")]
///     cost: f64,
/// }
///
/// let row: Row = serde_json::from_str(r#"{"cost": "12.5"}"#).unwrap();
/// assert!((row.cost - 12.5).abs() < f64::EPSILON);
/// ```
pub mod lenient {
    use super::{Deserialize, Deserializer, Value, parse_numeric_or_zero};

    /// Deserialize any JSON value into a coerced `f64`.
    ///
    /// # Errors
    ///
    /// Only fails when the underlying deserializer cannot produce a JSON value
    /// at all (malformed document), never because of the value's type.
    pub fn number<'de, D>(deserializer: D) -> Result<f64, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<Value>::deserialize(deserializer)?;
        Ok(value.as_ref().map_or(0.0, parse_numeric_or_zero))
    }

    /// Like [`number`], but `null` stays `None` so "not tracked" is
    /// distinguishable from "tracked as zero".
    ///
    /// # Errors
    ///
    /// See [`number`].
    pub fn optional_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<Value>::deserialize(deserializer)?;
        Ok(value
            .filter(|v| !v.is_null())
            .map(|v| parse_numeric_or_zero(&v)))
    }
}
