//! Material quantity snapshot evaluated by the detector.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use trowel_core::numeric::lenient;

/// Reference quantities and costs for one material.
///
/// Quantities coerce leniently: missing or non-numeric values are zero, and
/// optional quantities (`usedQuantity`, `returnedQuantity`, `wastedQuantity`)
/// are simply untracked when absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct MaterialQuantities {
    #[serde(alias = "id")]
    pub material_id: Option<String>,
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient::number")]
    pub ordered_quantity: f64,
    #[serde(deserialize_with = "lenient::number")]
    pub delivered_quantity: f64,
    #[serde(deserialize_with = "lenient::optional_number")]
    pub used_quantity: Option<f64>,
    #[serde(deserialize_with = "lenient::optional_number")]
    pub returned_quantity: Option<f64>,
    #[serde(deserialize_with = "lenient::optional_number")]
    pub wasted_quantity: Option<f64>,
    #[serde(deserialize_with = "lenient::optional_number")]
    pub unit_cost: Option<f64>,
    #[serde(deserialize_with = "lenient::optional_number")]
    pub total_cost: Option<f64>,
}

impl MaterialQuantities {
    /// `unitCost` when positive, else `totalCost / orderedQuantity`, else `0.0`.
    #[must_use]
    pub fn effective_unit_cost(&self) -> f64 {
        if let Some(unit) = self.unit_cost.filter(|u| *u > 0.0) {
            return unit;
        }
        match self.total_cost {
            Some(total) if self.ordered_quantity > 0.0 => total / self.ordered_quantity,
            _ => 0.0,
        }
    }

    /// Delivered minus returned.
    #[must_use]
    pub fn net_delivered(&self) -> f64 {
        self.delivered_quantity - self.returned_quantity.unwrap_or(0.0)
    }
}
