//! Severity thresholds for material discrepancies.
//!
//! Each variance kind has a percentage band table; one cost table (currency
//! units) applies to every kind. Omitted fields take the defaults below, never
//! zero. A band table given with only some bounds keeps that kind's defaults
//! for the rest.

use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};
use trowel_core::{Severity, ValidationError};

/// Kind of quantity variance tracked per material.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "camelCase")]
pub enum VarianceKind {
    /// More delivered than ordered.
    OverDelivery,
    /// Less delivered than ordered.
    UnderDelivery,
    /// More used than delivered, net of returns.
    UsageOverage,
    /// Recorded waste.
    Wastage,
}

impl VarianceKind {
    pub const ALL: [Self; 4] = [
        Self::OverDelivery,
        Self::UnderDelivery,
        Self::UsageOverage,
        Self::Wastage,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::OverDelivery => "overDelivery",
            Self::UnderDelivery => "underDelivery",
            Self::UsageOverage => "usageOverage",
            Self::Wastage => "wastage",
        }
    }
}

impl fmt::Display for VarianceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lower bounds of the four alerting tiers. A value reaching a bound (`>=`)
/// lands in that tier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SeverityBands {
    pub critical: f64,
    pub high: f64,
    pub medium: f64,
    pub low: f64,
}

impl SeverityBands {
    #[must_use]
    pub const fn new(critical: f64, high: f64, medium: f64, low: f64) -> Self {
        Self {
            critical,
            high,
            medium,
            low,
        }
    }

    /// Lower bound of a tier. `Severity::None` has none and returns `0.0`.
    #[must_use]
    pub const fn bound(&self, severity: Severity) -> f64 {
        match severity {
            Severity::Critical => self.critical,
            Severity::High => self.high,
            Severity::Medium => self.medium,
            Severity::Low => self.low,
            Severity::None => 0.0,
        }
    }

    /// Highest tier whose bound `value` reaches, checked from critical down.
    ///
    /// Non-positive values never alert, so a zero bound does not flag a
    /// material with no variance.
    #[must_use]
    pub fn classify(&self, value: f64) -> Severity {
        if value.is_nan() || value <= 0.0 {
            return Severity::None;
        }
        Severity::DESCENDING
            .into_iter()
            .find(|severity| value >= self.bound(*severity))
            .unwrap_or(Severity::None)
    }

    /// Check bounds are finite, non-negative and non-increasing from critical
    /// to low.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidThresholds`] naming `kind`.
    pub fn validate(&self, kind: &str) -> Result<(), ValidationError> {
        let invalid = |reason: String| ValidationError::InvalidThresholds {
            kind: kind.to_owned(),
            reason,
        };
        for severity in Severity::DESCENDING {
            let bound = self.bound(severity);
            if !bound.is_finite() || bound < 0.0 {
                return Err(invalid(format!(
                    "{severity} bound must be a non-negative number, got {bound}"
                )));
            }
        }
        for pair in Severity::DESCENDING.windows(2) {
            let (upper, lower) = (pair[0], pair[1]);
            if self.bound(upper) < self.bound(lower) {
                return Err(invalid(format!(
                    "{upper} bound {} is below {lower} bound {}",
                    self.bound(upper),
                    self.bound(lower)
                )));
            }
        }
        Ok(())
    }
}

pub const DEFAULT_OVER_DELIVERY: SeverityBands = SeverityBands::new(50.0, 25.0, 10.0, 5.0);
pub const DEFAULT_UNDER_DELIVERY: SeverityBands = SeverityBands::new(40.0, 20.0, 10.0, 5.0);
pub const DEFAULT_USAGE_OVERAGE: SeverityBands = SeverityBands::new(30.0, 15.0, 8.0, 3.0);
pub const DEFAULT_WASTAGE: SeverityBands = SeverityBands::new(25.0, 15.0, 10.0, 5.0);
pub const DEFAULT_COST: SeverityBands = SeverityBands::new(10_000.0, 5_000.0, 1_000.0, 250.0);

/// A band table as accepted on input, where any bound may be left out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize, JsonSchema)]
#[serde(default)]
pub struct PartialBands {
    pub critical: Option<f64>,
    pub high: Option<f64>,
    pub medium: Option<f64>,
    pub low: Option<f64>,
}

impl PartialBands {
    /// Fill the missing bounds from `defaults`.
    #[must_use]
    pub fn or(self, defaults: SeverityBands) -> SeverityBands {
        SeverityBands {
            critical: self.critical.unwrap_or(defaults.critical),
            high: self.high.unwrap_or(defaults.high),
            medium: self.medium.unwrap_or(defaults.medium),
            low: self.low.unwrap_or(defaults.low),
        }
    }
}

/// `deserialize_with` adapters merging a partial table over one kind's defaults.
mod partial {
    use super::{
        DEFAULT_COST, DEFAULT_OVER_DELIVERY, DEFAULT_UNDER_DELIVERY, DEFAULT_USAGE_OVERAGE,
        DEFAULT_WASTAGE, Deserialize, Deserializer, PartialBands, SeverityBands,
    };

    fn merged<'de, D>(deserializer: D, defaults: SeverityBands) -> Result<SeverityBands, D::Error>
    where
        D: Deserializer<'de>,
    {
        let partial = Option::<PartialBands>::deserialize(deserializer)?;
        Ok(partial.unwrap_or_default().or(defaults))
    }

    pub fn over_delivery<'de, D: Deserializer<'de>>(d: D) -> Result<SeverityBands, D::Error> {
        merged(d, DEFAULT_OVER_DELIVERY)
    }

    pub fn under_delivery<'de, D: Deserializer<'de>>(d: D) -> Result<SeverityBands, D::Error> {
        merged(d, DEFAULT_UNDER_DELIVERY)
    }

    pub fn usage_overage<'de, D: Deserializer<'de>>(d: D) -> Result<SeverityBands, D::Error> {
        merged(d, DEFAULT_USAGE_OVERAGE)
    }

    pub fn wastage<'de, D: Deserializer<'de>>(d: D) -> Result<SeverityBands, D::Error> {
        merged(d, DEFAULT_WASTAGE)
    }

    pub fn cost<'de, D: Deserializer<'de>>(d: D) -> Result<SeverityBands, D::Error> {
        merged(d, DEFAULT_COST)
    }
}

/// Per-kind percentage bands plus cost bands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct DiscrepancyThresholds {
    #[serde(deserialize_with = "partial::over_delivery")]
    #[schemars(with = "Option<PartialBands>")]
    pub over_delivery: SeverityBands,
    #[serde(deserialize_with = "partial::under_delivery")]
    #[schemars(with = "Option<PartialBands>")]
    pub under_delivery: SeverityBands,
    #[serde(deserialize_with = "partial::usage_overage")]
    #[schemars(with = "Option<PartialBands>")]
    pub usage_overage: SeverityBands,
    #[serde(deserialize_with = "partial::wastage")]
    #[schemars(with = "Option<PartialBands>")]
    pub wastage: SeverityBands,
    #[serde(deserialize_with = "partial::cost")]
    #[schemars(with = "Option<PartialBands>")]
    pub cost: SeverityBands,
}

impl Default for DiscrepancyThresholds {
    fn default() -> Self {
        Self {
            over_delivery: DEFAULT_OVER_DELIVERY,
            under_delivery: DEFAULT_UNDER_DELIVERY,
            usage_overage: DEFAULT_USAGE_OVERAGE,
            wastage: DEFAULT_WASTAGE,
            cost: DEFAULT_COST,
        }
    }
}

impl DiscrepancyThresholds {
    /// Percentage bands for a variance kind.
    #[must_use]
    pub const fn percent_bands(&self, kind: VarianceKind) -> &SeverityBands {
        match kind {
            VarianceKind::OverDelivery => &self.over_delivery,
            VarianceKind::UnderDelivery => &self.under_delivery,
            VarianceKind::UsageOverage => &self.usage_overage,
            VarianceKind::Wastage => &self.wastage,
        }
    }

    /// Validate every band table.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError::InvalidThresholds`] found.
    pub fn validate(&self) -> Result<(), ValidationError> {
        for kind in VarianceKind::ALL {
            self.percent_bands(kind).validate(kind.as_str())?;
        }
        self.cost.validate("cost")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case(0.0, Severity::None)]
    #[case(4.99, Severity::None)]
    #[case(5.0, Severity::Low)]
    #[case(10.0, Severity::Medium)]
    #[case(24.9, Severity::Medium)]
    #[case(25.0, Severity::High)]
    #[case(30.0, Severity::High)]
    #[case(50.0, Severity::Critical)]
    #[case(500.0, Severity::Critical)]
    #[case(-30.0, Severity::None)]
    fn over_delivery_tiers(#[case] percent: f64, #[case] expected: Severity) {
        let bands = DiscrepancyThresholds::default().over_delivery;
        assert_eq!(bands.classify(percent), expected);
    }

    #[test]
    fn zero_bounds_do_not_flag_zero_variance() {
        let bands = SeverityBands::new(0.0, 0.0, 0.0, 0.0);
        assert_eq!(bands.classify(0.0), Severity::None);
        assert_eq!(bands.classify(0.01), Severity::Critical);
    }

    #[test]
    fn defaults_are_valid() {
        DiscrepancyThresholds::default().validate().unwrap();
    }

    #[rstest]
    #[case(SeverityBands::new(10.0, 20.0, 5.0, 1.0), "CRITICAL bound 10 is below HIGH bound 20")]
    #[case(SeverityBands::new(10.0, 5.0, 1.0, -1.0), "LOW bound must be a non-negative number, got -1")]
    #[case(SeverityBands::new(f64::INFINITY, 5.0, 1.0, 0.0), "CRITICAL bound must be a non-negative number, got inf")]
    fn out_of_order_bands_are_rejected(#[case] bands: SeverityBands, #[case] reason: &str) {
        let thresholds = DiscrepancyThresholds {
            wastage: bands,
            ..DiscrepancyThresholds::default()
        };
        assert_eq!(
            thresholds.validate().unwrap_err(),
            ValidationError::InvalidThresholds {
                kind: "wastage".into(),
                reason: reason.into(),
            }
        );
    }

    #[test]
    fn partial_thresholds_keep_defaults() {
        let thresholds: DiscrepancyThresholds = serde_json::from_value(json!({
            "overDelivery": {"critical": 60, "high": 30, "medium": 15, "low": 5}
        }))
        .unwrap();
        assert_eq!(thresholds.over_delivery, SeverityBands::new(60.0, 30.0, 15.0, 5.0));
        assert_eq!(thresholds.cost, DiscrepancyThresholds::default().cost);
    }

    #[test]
    fn partial_bands_fill_missing_bounds_per_kind() {
        let thresholds: DiscrepancyThresholds = serde_json::from_value(json!({
            "overDelivery": {"high": 30},
            "wastage": {"low": 7},
            "cost": null,
        }))
        .unwrap();
        assert_eq!(thresholds.over_delivery, SeverityBands::new(50.0, 30.0, 10.0, 5.0));
        assert_eq!(thresholds.wastage, SeverityBands::new(25.0, 15.0, 10.0, 7.0));
        assert_eq!(thresholds.cost, DEFAULT_COST);
        thresholds.validate().unwrap();
    }

    #[test]
    fn merged_bands_are_still_validated() {
        let thresholds: DiscrepancyThresholds =
            serde_json::from_value(json!({"underDelivery": {"high": 60}})).unwrap();
        assert_eq!(thresholds.under_delivery, SeverityBands::new(40.0, 60.0, 10.0, 5.0));
        assert!(matches!(
            thresholds.validate(),
            Err(ValidationError::InvalidThresholds { .. })
        ));
    }
}
