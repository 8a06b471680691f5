//! Classify one material's quantity variances into severity tiers.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::debug;
use trowel_core::{Severity, ValidationError, percent_of, round_currency};

use crate::material::MaterialQuantities;
use crate::thresholds::{DiscrepancyThresholds, VarianceKind};

/// Which band table decided a variance's severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub enum ThresholdBasis {
    Percent,
    Cost,
}

/// One variance that crossed a threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct VarianceAlert {
    pub kind: VarianceKind,
    pub severity: Severity,
    /// Variance in material units, always positive.
    pub quantity: f64,
    pub percent: f64,
    pub cost: f64,
    pub basis: ThresholdBasis,
    /// Bound of the tier that was reached.
    pub threshold: f64,
    /// How far the deciding value is past `threshold`.
    pub exceeded_by: f64,
}

/// Alert flags for one material.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DiscrepancyAlerts {
    pub has_any_alert: bool,
    pub over_delivery: bool,
    pub under_delivery: bool,
    pub usage_overage: bool,
    pub wastage: bool,
    pub details: Vec<VarianceAlert>,
}

/// Derived quantities for one material.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DiscrepancyMetrics {
    /// `delivered - ordered`; negative when short.
    pub delivery_variance: f64,
    /// `used - (delivered - returned)`; absent when usage is not tracked.
    pub usage_variance: Option<f64>,
    pub unit_cost: f64,
    /// Cost of every alerting variance.
    pub total_discrepancy_cost: f64,
}

/// Discrepancy classification for one material.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MaterialDiscrepancyResult {
    pub material_id: Option<String>,
    pub name: Option<String>,
    pub severity: Severity,
    pub alerts: DiscrepancyAlerts,
    pub metrics: DiscrepancyMetrics,
}

impl MaterialDiscrepancyResult {
    #[must_use]
    pub const fn has_any_alert(&self) -> bool {
        self.alerts.has_any_alert
    }

    #[must_use]
    pub const fn total_discrepancy_cost(&self) -> f64 {
        self.metrics.total_discrepancy_cost
    }

    /// Copy with money and percentages rounded to cents, for output.
    #[must_use]
    pub fn rounded(&self) -> Self {
        let mut out = self.clone();
        for alert in &mut out.alerts.details {
            alert.percent = round_currency(alert.percent);
            alert.cost = round_currency(alert.cost);
            alert.exceeded_by = round_currency(alert.exceeded_by);
        }
        out.metrics.unit_cost = round_currency(out.metrics.unit_cost);
        out.metrics.total_discrepancy_cost = round_currency(out.metrics.total_discrepancy_cost);
        out
    }
}

/// Evaluates materials against a validated threshold set.
#[derive(Debug, Clone, Default)]
pub struct DiscrepancyDetector {
    thresholds: DiscrepancyThresholds,
}

impl DiscrepancyDetector {
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidThresholds`] when any band table is
    /// negative or out of order.
    pub fn new(thresholds: DiscrepancyThresholds) -> Result<Self, ValidationError> {
        thresholds.validate()?;
        Ok(Self { thresholds })
    }

    #[must_use]
    pub const fn thresholds(&self) -> &DiscrepancyThresholds {
        &self.thresholds
    }

    /// Classify every tracked variance and take the worst.
    ///
    /// The result is unrounded so roll-ups can accumulate exactly.
    #[must_use]
    pub fn evaluate(&self, material: &MaterialQuantities) -> MaterialDiscrepancyResult {
        let unit_cost = material.effective_unit_cost();
        let mut alerts = DiscrepancyAlerts::default();
        let mut severity = Severity::None;
        let mut total_cost = 0.0;

        for (kind, quantity, base) in variances(material) {
            let Some(alert) = self.classify(kind, quantity, base, unit_cost) else {
                continue;
            };
            severity = severity.max(alert.severity);
            total_cost += alert.cost;
            match kind {
                VarianceKind::OverDelivery => alerts.over_delivery = true,
                VarianceKind::UnderDelivery => alerts.under_delivery = true,
                VarianceKind::UsageOverage => alerts.usage_overage = true,
                VarianceKind::Wastage => alerts.wastage = true,
            }
            alerts.details.push(alert);
        }
        alerts.has_any_alert = severity.is_alert();

        debug!(
            material = material.material_id.as_deref().unwrap_or("<unnamed>"),
            %severity,
            alerts = alerts.details.len(),
            "evaluated material"
        );

        MaterialDiscrepancyResult {
            material_id: material.material_id.clone(),
            name: material.name.clone(),
            severity,
            alerts,
            metrics: DiscrepancyMetrics {
                delivery_variance: material.delivered_quantity - material.ordered_quantity,
                usage_variance: material.used_quantity.map(|used| used - material.net_delivered()),
                unit_cost,
                total_discrepancy_cost: total_cost,
            },
        }
    }

    fn classify(
        &self,
        kind: VarianceKind,
        quantity: f64,
        base: f64,
        unit_cost: f64,
    ) -> Option<VarianceAlert> {
        let percent = percent_of(quantity, base);
        let cost = quantity * unit_cost;
        let percent_bands = self.thresholds.percent_bands(kind);
        let by_percent = percent_bands.classify(percent);
        let by_cost = self.thresholds.cost.classify(cost);

        let (severity, basis, value, bound) = if by_cost > by_percent {
            (by_cost, ThresholdBasis::Cost, cost, self.thresholds.cost.bound(by_cost))
        } else {
            (by_percent, ThresholdBasis::Percent, percent, percent_bands.bound(by_percent))
        };
        severity.is_alert().then(|| VarianceAlert {
            kind,
            severity,
            quantity,
            percent,
            cost,
            basis,
            threshold: bound,
            exceeded_by: value - bound,
        })
    }
}

/// `(kind, positive variance quantity, percentage base)` for each variance
/// present on the material.
fn variances(material: &MaterialQuantities) -> Vec<(VarianceKind, f64, f64)> {
    let ordered = material.ordered_quantity;
    let delivered = material.delivered_quantity;
    let mut out = Vec::with_capacity(4);

    let delivery = delivered - ordered;
    if delivery > 0.0 {
        out.push((VarianceKind::OverDelivery, delivery, ordered));
    } else if delivery < 0.0 {
        out.push((VarianceKind::UnderDelivery, -delivery, ordered));
    }

    if let Some(used) = material.used_quantity {
        let net = material.net_delivered();
        let overage = used - net;
        if overage > 0.0 {
            out.push((VarianceKind::UsageOverage, overage, net));
        }
    }

    if let Some(wasted) = material.wasted_quantity.filter(|w| *w > 0.0) {
        // Against the order, so extra deliveries cannot dilute waste.
        out.push((VarianceKind::Wastage, wasted, ordered));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn material(ordered: f64, delivered: f64, unit_cost: f64) -> MaterialQuantities {
        MaterialQuantities {
            material_id: Some("m-1".into()),
            ordered_quantity: ordered,
            delivered_quantity: delivered,
            unit_cost: Some(unit_cost),
            ..MaterialQuantities::default()
        }
    }

    #[test]
    fn thirty_percent_over_delivery_is_high() {
        let result = DiscrepancyDetector::default().evaluate(&material(100.0, 130.0, 50.0));

        assert_eq!(result.severity, Severity::High);
        assert!(result.has_any_alert());
        assert!(result.alerts.over_delivery);
        assert!((result.total_discrepancy_cost() - 1500.0).abs() < f64::EPSILON);

        let alert = &result.alerts.details[0];
        assert_eq!(alert.kind, VarianceKind::OverDelivery);
        assert_eq!(alert.basis, ThresholdBasis::Percent);
        assert!((alert.threshold - 25.0).abs() < f64::EPSILON);
        assert!((alert.exceeded_by - 5.0).abs() < 1e-9);
    }

    #[test]
    fn exact_delivery_has_no_alert() {
        let result = DiscrepancyDetector::default().evaluate(&material(100.0, 100.0, 50.0));
        assert_eq!(result.severity, Severity::None);
        assert!(!result.has_any_alert());
        assert!(result.alerts.details.is_empty());
        assert!(result.total_discrepancy_cost().abs() < f64::EPSILON);
    }

    #[test]
    fn cost_tier_can_outrank_percentage_tier() {
        // 6% over is LOW by percent, but 60 units at 100 is 6000 (HIGH by cost).
        let result = DiscrepancyDetector::default().evaluate(&material(1000.0, 1060.0, 100.0));
        assert_eq!(result.severity, Severity::High);
        assert_eq!(result.alerts.details[0].basis, ThresholdBasis::Cost);
        assert!((result.alerts.details[0].exceeded_by - 1000.0).abs() < 1e-9);
    }

    #[test]
    fn worst_variance_sets_severity_and_costs_add_up() {
        let input = MaterialQuantities {
            ordered_quantity: 100.0,
            delivered_quantity: 90.0,
            used_quantity: Some(95.0),
            returned_quantity: Some(5.0),
            wasted_quantity: Some(30.0),
            unit_cost: Some(10.0),
            ..MaterialQuantities::default()
        };
        let result = DiscrepancyDetector::default().evaluate(&input);

        // under 10% MEDIUM, usage overage 10/85 = 11.8% MEDIUM, wastage 30/100 = 30% CRITICAL
        assert_eq!(result.severity, Severity::Critical);
        let kinds: Vec<_> = result.alerts.details.iter().map(|a| a.kind).collect();
        assert_eq!(
            kinds,
            vec![
                VarianceKind::UnderDelivery,
                VarianceKind::UsageOverage,
                VarianceKind::Wastage
            ]
        );
        assert!((result.total_discrepancy_cost() - 500.0).abs() < 1e-9);
        assert_eq!(result.metrics.usage_variance, Some(10.0));
    }

    #[test]
    fn over_delivery_does_not_dilute_wastage() {
        let with_delivery = |delivered| MaterialQuantities {
            wasted_quantity: Some(25.0),
            ..material(100.0, delivered, 1.0)
        };
        let detector = DiscrepancyDetector::default();
        let exact = detector.evaluate(&with_delivery(100.0));
        let over = detector.evaluate(&with_delivery(110.0));

        assert_eq!(exact.severity, Severity::Critical);
        assert_eq!(over.severity, Severity::Critical);
        let wastage = over
            .alerts
            .details
            .iter()
            .find(|a| a.kind == VarianceKind::Wastage)
            .unwrap();
        assert!((wastage.percent - 25.0).abs() < 1e-9);
    }

    #[test]
    fn zero_order_gives_zero_percent_but_cost_still_counts() {
        let result = DiscrepancyDetector::default().evaluate(&material(0.0, 20.0, 100.0));
        let alert = &result.alerts.details[0];
        assert!(alert.percent.abs() < f64::EPSILON);
        assert_eq!(alert.severity, Severity::Medium);
        assert_eq!(alert.basis, ThresholdBasis::Cost);
    }

    #[rstest]
    #[case(104.0, Severity::None)]
    #[case(105.0, Severity::Low)]
    #[case(110.0, Severity::Medium)]
    #[case(125.0, Severity::High)]
    #[case(150.0, Severity::Critical)]
    fn over_delivery_tiers_at_boundaries(#[case] delivered: f64, #[case] expected: Severity) {
        let result = DiscrepancyDetector::default().evaluate(&material(100.0, delivered, 1.0));
        assert_eq!(result.severity, expected);
    }

    #[test]
    fn invalid_thresholds_are_rejected() {
        let mut thresholds = DiscrepancyThresholds::default();
        thresholds.cost.low = 50_000.0;
        assert!(matches!(
            DiscrepancyDetector::new(thresholds),
            Err(ValidationError::InvalidThresholds { .. })
        ));
    }

    #[test]
    fn rounding_applies_only_to_output_copy() {
        let result = DiscrepancyDetector::default().evaluate(&material(3.0, 4.0, 333.333));
        let rounded = result.rounded();
        assert!((rounded.total_discrepancy_cost() - 333.33).abs() < f64::EPSILON);
        assert!((result.total_discrepancy_cost() - 333.333).abs() < 1e-9);
    }
}
