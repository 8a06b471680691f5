//! Budget recommendation and expense-check settings.

use serde::{Deserialize, Serialize};
use trowel_spending::{DEFAULT_BUFFER_RATIO, DEFAULT_WARNING_THRESHOLD_PERCENT};

use crate::ConfigError;

const fn default_buffer_ratio() -> f64 {
    DEFAULT_BUFFER_RATIO
}

const fn default_warning_threshold_percent() -> f64 {
    DEFAULT_WARNING_THRESHOLD_PERCENT
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct AllocationConfig {
    /// Headroom added to known spending when recommending a budget (0.10 = 10%).
    #[serde(default = "default_buffer_ratio")]
    pub buffer_ratio: f64,

    /// Usage percentage at which a valid expense is flagged.
    #[serde(default = "default_warning_threshold_percent")]
    pub warning_threshold_percent: f64,
}

impl Default for AllocationConfig {
    fn default() -> Self {
        Self {
            buffer_ratio: default_buffer_ratio(),
            warning_threshold_percent: default_warning_threshold_percent(),
        }
    }
}

impl AllocationConfig {
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if !self.buffer_ratio.is_finite() || self.buffer_ratio < 0.0 {
            return Err(ConfigError::invalid(
                "allocation.buffer_ratio",
                format!("must be a non-negative number, got {}", self.buffer_ratio),
            ));
        }
        if !self.warning_threshold_percent.is_finite() || self.warning_threshold_percent < 0.0 {
            return Err(ConfigError::invalid(
                "allocation.warning_threshold_percent",
                format!(
                    "must be a non-negative number, got {}",
                    self.warning_threshold_percent
                ),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = AllocationConfig::default();
        assert!((config.buffer_ratio - 0.10).abs() < f64::EPSILON);
        assert!((config.warning_threshold_percent - 80.0).abs() < f64::EPSILON);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn negative_buffer_is_rejected() {
        let config = AllocationConfig {
            buffer_ratio: -0.5,
            ..AllocationConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("allocation.buffer_ratio"));
    }
}
