//! # trowel-config
//!
//! Layered configuration loading for Trowel using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`TROWEL_*` prefix, `__` as separator)
//! 2. An explicit file passed to [`TrowelConfig::load_from`]
//! 3. Project-level `.trowel/config.toml`
//! 4. User-level `~/.config/trowel/config.toml`
//! 5. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `TROWEL_ALLOCATION__BUFFER_RATIO` -> `allocation.buffer_ratio`,
//! `TROWEL_DISCREPANCY__WASTAGE__HIGH` -> `discrepancy.wastage.high`, etc.
//! The `__` (double underscore) separates nested config sections.
//!
//! # Usage
//!
//! ```no_run
//! use trowel_config::TrowelConfig;
//!
//! let config = TrowelConfig::load_with_dotenv().expect("config");
//! println!("buffer ratio: {}", config.allocation.buffer_ratio);
//! ```

mod allocation;
mod discrepancy;
mod error;
mod reporting;

pub use allocation::AllocationConfig;
pub use discrepancy::DiscrepancyConfig;
pub use error::ConfigError;
pub use reporting::ReportingConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct TrowelConfig {
    #[serde(default)]
    pub allocation: AllocationConfig,
    #[serde(default)]
    pub discrepancy: DiscrepancyConfig,
    #[serde(default)]
    pub reporting: ReportingConfig,
}

impl TrowelConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy`; use [`Self::load_with_dotenv`] for `.env` support.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Figment`] when a source cannot be parsed and
    /// [`ConfigError::InvalidValue`] when a value fails validation.
    pub fn load() -> Result<Self, ConfigError> {
        Self::extract(Self::figment(None))
    }

    /// Load with an additional config file layered above the project file.
    ///
    /// # Errors
    ///
    /// As [`Self::load`]; a missing explicit file is an error.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::invalid(
                "config",
                format!("file not found: {}", path.display()),
            ));
        }
        Self::extract(Self::figment(Some(path)))
    }

    /// Load configuration with `.env` file support.
    ///
    /// # Errors
    ///
    /// As [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        // A missing .env is normal.
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment or add providers on top.
    #[must_use]
    pub fn figment(explicit: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path().filter(|p| p.exists()) {
            tracing::debug!(path = %global_path.display(), "loading user config");
            figment = figment.merge(Toml::file(global_path));
        }

        let local_path = PathBuf::from(".trowel/config.toml");
        if local_path.exists() {
            tracing::debug!(path = %local_path.display(), "loading project config");
            figment = figment.merge(Toml::file(local_path));
        }

        if let Some(path) = explicit {
            tracing::debug!(path = %path.display(), "loading explicit config");
            figment = figment.merge(Toml::file(path));
        }

        figment.merge(Env::prefixed("TROWEL_").split("__"))
    }

    /// Extract from a figment and validate.
    ///
    /// # Errors
    ///
    /// As [`Self::load`].
    pub fn extract(figment: Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Check every section.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError::InvalidValue`] found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.allocation.validate()?;
        self.discrepancy.validate()?;
        self.reporting.validate()
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("trowel").join("config.toml"))
    }
}
