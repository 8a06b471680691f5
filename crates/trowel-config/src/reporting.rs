//! Wastage report sizing.

use serde::{Deserialize, Serialize};
use trowel_wastage::ReportOptions;

use crate::ConfigError;

const fn default_top_projects() -> usize {
    5
}

const fn default_top_materials() -> usize {
    5
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ReportingConfig {
    /// Projects kept in the portfolio ranking.
    #[serde(default = "default_top_projects")]
    pub top_projects: usize,

    /// Materials listed per project.
    #[serde(default = "default_top_materials")]
    pub top_materials: usize,
}

impl Default for ReportingConfig {
    fn default() -> Self {
        Self {
            top_projects: default_top_projects(),
            top_materials: default_top_materials(),
        }
    }
}

impl ReportingConfig {
    #[must_use]
    pub const fn options(&self) -> ReportOptions {
        ReportOptions {
            top_projects: self.top_projects,
            top_materials: self.top_materials,
        }
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.top_projects == 0 {
            return Err(ConfigError::invalid(
                "reporting.top_projects",
                "must be at least 1",
            ));
        }
        Ok(())
    }
}
