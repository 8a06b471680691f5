//! Material discrepancy thresholds.
//!
//! Mirrors [`DiscrepancyThresholds`] with snake_case keys so TOML files and
//! `TROWEL_DISCREPANCY__OVER_DELIVERY__HIGH` style variables line up.

use serde::{Deserialize, Serialize};
use trowel_core::ValidationError;
use trowel_wastage::{DiscrepancyThresholds, SeverityBands, VarianceKind};

use crate::ConfigError;

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct DiscrepancyConfig {
    pub over_delivery: SeverityBands,
    pub under_delivery: SeverityBands,
    pub usage_overage: SeverityBands,
    pub wastage: SeverityBands,
    pub cost: SeverityBands,
}

impl Default for DiscrepancyConfig {
    fn default() -> Self {
        Self::from(&DiscrepancyThresholds::default())
    }
}

impl From<&DiscrepancyThresholds> for DiscrepancyConfig {
    fn from(t: &DiscrepancyThresholds) -> Self {
        Self {
            over_delivery: t.over_delivery,
            under_delivery: t.under_delivery,
            usage_overage: t.usage_overage,
            wastage: t.wastage,
            cost: t.cost,
        }
    }
}

impl DiscrepancyConfig {
    #[must_use]
    pub const fn thresholds(&self) -> DiscrepancyThresholds {
        DiscrepancyThresholds {
            over_delivery: self.over_delivery,
            under_delivery: self.under_delivery,
            usage_overage: self.usage_overage,
            wastage: self.wastage,
            cost: self.cost,
        }
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        let thresholds = self.thresholds();
        for kind in VarianceKind::ALL {
            let field = match kind {
                VarianceKind::OverDelivery => "discrepancy.over_delivery",
                VarianceKind::UnderDelivery => "discrepancy.under_delivery",
                VarianceKind::UsageOverage => "discrepancy.usage_overage",
                VarianceKind::Wastage => "discrepancy.wastage",
            };
            check(thresholds.percent_bands(kind), field)?;
        }
        check(&thresholds.cost, "discrepancy.cost")
    }
}

fn check(bands: &SeverityBands, field: &str) -> Result<(), ConfigError> {
    bands.validate(field).map_err(|err| match err {
        ValidationError::InvalidThresholds { reason, .. } => ConfigError::invalid(field, reason),
        other => ConfigError::invalid(field, other.to_string()),
    })
}
