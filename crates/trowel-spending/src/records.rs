//! Raw cost records as supplied by the persistence layer.
//!
//! Every numeric field goes through `trowel_core::numeric::lenient`, so a
//! missing, null or non-numeric cost is `0.0`. Each record type decides for
//! itself which statuses are still *committed* (obligated but unrealized) and
//! which are *excluded* (cancelled, rejected); any other status, or none at
//! all, counts as realized spending.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use trowel_core::numeric::lenient;

use crate::error::SpendingError;
use crate::scope::{Scope, SpendingCategory};

/// How a record's cost counts toward spending.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Realization {
    Actual,
    Committed,
    Excluded,
}

/// One record's contribution, as seen by the aggregator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CostEntry {
    pub realization: Realization,
    pub amount: f64,
    /// Labour hours; zero for every other record type.
    pub hours: f64,
}

/// Placement and lifecycle fields shared by every record type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct RecordPlacement {
    pub phase_id: Option<String>,
    pub floor_id: Option<String>,
    pub status: Option<String>,
}

impl RecordPlacement {
    /// Scopes the record rolls up into: always the project, plus its phase and
    /// floor when set.
    #[must_use]
    pub fn scopes(&self) -> Vec<Scope> {
        let mut scopes = vec![Scope::Project];
        if let Some(phase) = non_blank(self.phase_id.as_deref()) {
            scopes.push(Scope::Phase(phase.to_owned()));
        }
        if let Some(floor) = non_blank(self.floor_id.as_deref()) {
            scopes.push(Scope::Floor(floor.to_owned()));
        }
        scopes
    }

    /// Classify the status against per-record-type lists.
    ///
    /// Matching ignores case and treats `-` and spaces as `_`.
    #[must_use]
    pub fn realization(&self, committed: &[&str], excluded: &[&str]) -> Realization {
        let Some(status) = non_blank(self.status.as_deref()) else {
            return Realization::Actual;
        };
        let normalized = status.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        if excluded.contains(&normalized.as_str()) {
            Realization::Excluded
        } else if committed.contains(&normalized.as_str()) {
            Realization::Committed
        } else {
            Realization::Actual
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// A record the aggregator can total.
pub trait CostRecord {
    const CATEGORY: SpendingCategory;

    fn placement(&self) -> &RecordPlacement;

    fn entry(&self) -> CostEntry;
}

/// `primary` when positive, else `fallback`.
fn cost_or(primary: f64, fallback: impl FnOnce() -> f64) -> f64 {
    if primary > 0.0 { primary } else { fallback() }
}

// ---------------------------------------------------------------------------
// Record types
// ---------------------------------------------------------------------------

/// A material purchase. Cost is `totalCost`, or `quantity × unitCost`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct MaterialRecord {
    pub id: Option<String>,
    #[serde(flatten)]
    pub placement: RecordPlacement,
    #[serde(deserialize_with = "lenient::number")]
    pub total_cost: f64,
    #[serde(deserialize_with = "lenient::number")]
    pub quantity: f64,
    #[serde(deserialize_with = "lenient::number")]
    pub unit_cost: f64,
}

impl CostRecord for MaterialRecord {
    const CATEGORY: SpendingCategory = SpendingCategory::Materials;

    fn placement(&self) -> &RecordPlacement {
        &self.placement
    }

    fn entry(&self) -> CostEntry {
        CostEntry {
            realization: self.placement.realization(
                &["pending", "requested", "approved", "ordered", "in_transit"],
                &["cancelled", "canceled", "rejected"],
            ),
            amount: cost_or(self.total_cost, || self.quantity * self.unit_cost),
            hours: 0.0,
        }
    }
}

/// A labour entry. Cost is `totalCost`, or `totalHours × hourlyRate`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct LabourRecord {
    pub id: Option<String>,
    #[serde(flatten)]
    pub placement: RecordPlacement,
    #[serde(deserialize_with = "lenient::number")]
    pub total_cost: f64,
    #[serde(deserialize_with = "lenient::number")]
    pub total_hours: f64,
    #[serde(deserialize_with = "lenient::number")]
    pub hourly_rate: f64,
}

impl CostRecord for LabourRecord {
    const CATEGORY: SpendingCategory = SpendingCategory::Labour;

    fn placement(&self) -> &RecordPlacement {
        &self.placement
    }

    fn entry(&self) -> CostEntry {
        CostEntry {
            realization: self
                .placement
                .realization(&["scheduled", "pending"], &["cancelled", "canceled", "rejected"]),
            amount: cost_or(self.total_cost, || self.total_hours * self.hourly_rate),
            hours: self.total_hours,
        }
    }
}

/// An equipment purchase or hire. Cost is `totalCost`, or `rentalDays × dailyRate`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct EquipmentRecord {
    pub id: Option<String>,
    #[serde(flatten)]
    pub placement: RecordPlacement,
    #[serde(deserialize_with = "lenient::number")]
    pub total_cost: f64,
    #[serde(deserialize_with = "lenient::number")]
    pub rental_days: f64,
    #[serde(deserialize_with = "lenient::number")]
    pub daily_rate: f64,
}

impl CostRecord for EquipmentRecord {
    const CATEGORY: SpendingCategory = SpendingCategory::Equipment;

    fn placement(&self) -> &RecordPlacement {
        &self.placement
    }

    fn entry(&self) -> CostEntry {
        CostEntry {
            realization: self.placement.realization(
                &["reserved", "scheduled", "pending"],
                &["cancelled", "canceled", "rejected"],
            ),
            amount: cost_or(self.total_cost, || self.rental_days * self.daily_rate),
            hours: 0.0,
        }
    }
}

/// Subcontracted work. A positive `actualCost` is realized; otherwise the
/// `estimatedCost` is an outstanding commitment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct WorkItemRecord {
    pub id: Option<String>,
    #[serde(flatten)]
    pub placement: RecordPlacement,
    #[serde(deserialize_with = "lenient::number")]
    pub actual_cost: f64,
    #[serde(deserialize_with = "lenient::number")]
    pub estimated_cost: f64,
}

impl CostRecord for WorkItemRecord {
    const CATEGORY: SpendingCategory = SpendingCategory::Subcontractors;

    fn placement(&self) -> &RecordPlacement {
        &self.placement
    }

    fn entry(&self) -> CostEntry {
        if self.placement.realization(&[], &["cancelled", "canceled"]) == Realization::Excluded {
            return CostEntry {
                realization: Realization::Excluded,
                amount: 0.0,
                hours: 0.0,
            };
        }
        let (realization, amount) = if self.actual_cost > 0.0 {
            (Realization::Actual, self.actual_cost)
        } else {
            (Realization::Committed, self.estimated_cost)
        };
        CostEntry {
            realization,
            amount,
            hours: 0.0,
        }
    }
}

/// A pre-construction expense (design fees, permits, surveys). Cost is
/// `amount`, or `totalCost`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct PreConstructionExpense {
    pub id: Option<String>,
    #[serde(flatten)]
    pub placement: RecordPlacement,
    #[serde(deserialize_with = "lenient::number")]
    pub amount: f64,
    #[serde(deserialize_with = "lenient::number")]
    pub total_cost: f64,
}

impl CostRecord for PreConstructionExpense {
    const CATEGORY: SpendingCategory = SpendingCategory::PreConstruction;

    fn placement(&self) -> &RecordPlacement {
        &self.placement
    }

    fn entry(&self) -> CostEntry {
        CostEntry {
            realization: self.placement.realization(
                &["pending", "approved"],
                &["rejected", "cancelled", "canceled"],
            ),
            amount: cost_or(self.amount, || self.total_cost),
            hours: 0.0,
        }
    }
}

/// All cost records for one project.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct CostRecords {
    pub materials: Vec<MaterialRecord>,
    pub labour: Vec<LabourRecord>,
    pub equipment: Vec<EquipmentRecord>,
    pub work_items: Vec<WorkItemRecord>,
    pub pre_construction: Vec<PreConstructionExpense>,
}

impl CostRecords {
    /// Read records from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`SpendingError::Records`] when the structure is wrong (e.g. a
    /// list is not an array). Bad numbers never cause an error.
    pub fn from_value(value: serde_json::Value) -> Result<Self, SpendingError> {
        Ok(serde_json::from_value(value)?)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.materials.len()
            + self.labour.len()
            + self.equipment.len()
            + self.work_items.len()
            + self.pre_construction.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    fn placement(status: Option<&str>) -> RecordPlacement {
        RecordPlacement {
            status: status.map(str::to_owned),
            ..RecordPlacement::default()
        }
    }

    #[rstest]
    #[case(None, Realization::Actual)]
    #[case(Some(""), Realization::Actual)]
    #[case(Some("delivered"), Realization::Actual)]
    #[case(Some("Ordered"), Realization::Committed)]
    #[case(Some("in-transit"), Realization::Committed)]
    #[case(Some("In Transit"), Realization::Committed)]
    #[case(Some("CANCELLED"), Realization::Excluded)]
    fn material_status_classification(#[case] status: Option<&str>, #[case] expected: Realization) {
        let record = MaterialRecord {
            placement: placement(status),
            total_cost: 10.0,
            ..MaterialRecord::default()
        };
        assert_eq!(record.entry().realization, expected);
    }

    #[test]
    fn material_cost_falls_back_to_quantity_times_unit_cost() {
        let record: MaterialRecord =
            serde_json::from_value(json!({"quantity": "12", "unitCost": 2.5})).unwrap();
        assert!((record.entry().amount - 30.0).abs() < f64::EPSILON);
    }

    #[test]
    fn labour_reports_hours_and_falls_back_to_rate() {
        let record: LabourRecord =
            serde_json::from_value(json!({"totalHours": 8, "hourlyRate": "45"})).unwrap();
        let entry = record.entry();
        assert!((entry.amount - 360.0).abs() < f64::EPSILON);
        assert!((entry.hours - 8.0).abs() < f64::EPSILON);
    }

    #[rstest]
    #[case(json!({"actualCost": 500, "estimatedCost": 800}), Realization::Actual, 500.0)]
    #[case(json!({"actualCost": null, "estimatedCost": 800}), Realization::Committed, 800.0)]
    #[case(json!({"actualCost": "tbd", "estimatedCost": "750.5"}), Realization::Committed, 750.5)]
    #[case(json!({"actualCost": 500, "status": "cancelled"}), Realization::Excluded, 0.0)]
    fn work_item_actual_falls_back_to_estimate(
        #[case] input: serde_json::Value,
        #[case] realization: Realization,
        #[case] amount: f64,
    ) {
        let record: WorkItemRecord = serde_json::from_value(input).unwrap();
        let entry = record.entry();
        assert_eq!(entry.realization, realization);
        assert!((entry.amount - amount).abs() < f64::EPSILON);
    }

    #[test]
    fn missing_costs_coerce_to_zero() {
        let records = CostRecords::from_value(json!({
            "equipment": [{"totalCost": "broken"}],
            "preConstruction": [{}],
        }))
        .unwrap();
        assert_eq!(records.len(), 2);
        assert!(records.equipment[0].entry().amount.abs() < f64::EPSILON);
        assert!(records.pre_construction[0].entry().amount.abs() < f64::EPSILON);
    }

    #[test]
    fn structural_errors_are_reported() {
        let err = CostRecords::from_value(json!({"materials": {"not": "a list"}})).unwrap_err();
        assert!(matches!(err, SpendingError::Records(_)));
    }

    #[test]
    fn placement_scopes_skip_blank_ids() {
        let placement = RecordPlacement {
            phase_id: Some("p1".into()),
            floor_id: Some("  ".into()),
            status: None,
        };
        assert_eq!(
            placement.scopes(),
            vec![Scope::Project, Scope::Phase("p1".into())]
        );
    }
}
