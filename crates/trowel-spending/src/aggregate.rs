//! Collapse cost records into per-scope, per-category spending snapshots.

use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::debug;
use trowel_core::numeric::lenient;
use trowel_core::round_currency;

use crate::error::SpendingError;
use crate::records::{CostRecord, CostRecords, Realization};
use crate::scope::{Scope, SpendingCategory};

/// Spending for one scope and category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SpendingSnapshot {
    pub actual_spending: f64,
    pub committed_cost: f64,
    pub minimum_required: f64,
}

impl SpendingSnapshot {
    /// Realized plus in-flight cost.
    #[must_use]
    pub fn exposure(&self) -> f64 {
        self.actual_spending + self.committed_cost
    }

    #[must_use]
    pub fn rounded(&self) -> Self {
        Self {
            actual_spending: round_currency(self.actual_spending),
            committed_cost: round_currency(self.committed_cost),
            minimum_required: round_currency(self.minimum_required),
        }
    }
}

/// Every category's snapshot for one scope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScopeSpending {
    pub scope: Scope,
    pub categories: BTreeMap<SpendingCategory, SpendingSnapshot>,
    pub labour_hours: f64,
}

impl ScopeSpending {
    #[must_use]
    pub fn category(&self, category: SpendingCategory) -> SpendingSnapshot {
        self.categories.get(&category).copied().unwrap_or_default()
    }

    /// Sum over categories.
    #[must_use]
    pub fn totals(&self) -> SpendingSnapshot {
        self.categories
            .values()
            .fold(SpendingSnapshot::default(), |acc, s| SpendingSnapshot {
                actual_spending: acc.actual_spending + s.actual_spending,
                committed_cost: acc.committed_cost + s.committed_cost,
                minimum_required: acc.minimum_required + s.minimum_required,
            })
    }

    #[must_use]
    pub fn rounded(&self) -> Self {
        Self {
            scope: self.scope.clone(),
            categories: self
                .categories
                .iter()
                .map(|(category, snapshot)| (*category, snapshot.rounded()))
                .collect(),
            labour_hours: round_currency(self.labour_hours),
        }
    }
}

/// All scopes for a project, project scope first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SpendingSummary {
    pub scopes: Vec<ScopeSpending>,
}

impl SpendingSummary {
    #[must_use]
    pub fn scope(&self, scope: &Scope) -> Option<&ScopeSpending> {
        self.scopes.iter().find(|s| &s.scope == scope)
    }

    #[must_use]
    pub fn project(&self) -> Option<&ScopeSpending> {
        self.scope(&Scope::Project)
    }

    /// Copy with every amount rounded to cents, for output.
    #[must_use]
    pub fn rounded(&self) -> Self {
        Self {
            scopes: self.scopes.iter().map(ScopeSpending::rounded).collect(),
        }
    }
}

/// An externally imposed floor (e.g. a contractual minimum) for one scope and
/// category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MinimumRequirement {
    #[serde(default = "project_scope")]
    pub scope: Scope,
    pub category: SpendingCategory,
    #[serde(default, deserialize_with = "lenient::number")]
    pub amount: f64,
}

const fn project_scope() -> Scope {
    Scope::Project
}

/// Records plus minimums, as read from a caller's snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SpendingInput {
    #[serde(flatten)]
    pub records: CostRecords,
    #[serde(default)]
    pub minimums: Vec<MinimumRequirement>,
}

impl SpendingInput {
    /// Read a snapshot from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`SpendingError::Records`] when a list or minimum is malformed.
    pub fn from_value(value: serde_json::Value) -> Result<Self, SpendingError> {
        Ok(serde_json::from_value(value)?)
    }

    #[must_use]
    pub fn summarize(&self) -> SpendingSummary {
        aggregate(&self.records, &self.minimums)
    }
}

#[derive(Debug, Default)]
struct Totals {
    actual: f64,
    committed: f64,
    minimum: Option<f64>,
}

#[derive(Debug, Default)]
struct ScopeTotals {
    categories: BTreeMap<SpendingCategory, Totals>,
    labour_hours: f64,
}

#[derive(Debug, Default)]
struct Accumulator {
    scopes: BTreeMap<Scope, ScopeTotals>,
}

impl Accumulator {
    fn add_all<R: CostRecord>(&mut self, records: &[R]) {
        for record in records {
            let entry = record.entry();
            if entry.realization == Realization::Excluded {
                continue;
            }
            for scope in record.placement().scopes() {
                let totals = self.scopes.entry(scope).or_default();
                totals.labour_hours += entry.hours;
                let slot = totals.categories.entry(R::CATEGORY).or_default();
                match entry.realization {
                    Realization::Actual => slot.actual += entry.amount,
                    Realization::Committed => slot.committed += entry.amount,
                    Realization::Excluded => {}
                }
            }
        }
    }

    fn add_minimum(&mut self, minimum: &MinimumRequirement) {
        let slot = self
            .scopes
            .entry(minimum.scope.clone())
            .or_default()
            .categories
            .entry(minimum.category)
            .or_default();
        slot.minimum = Some(slot.minimum.map_or(minimum.amount, |m| m.max(minimum.amount)));
    }

    fn finish(self) -> SpendingSummary {
        let scopes = self
            .scopes
            .into_iter()
            .map(|(scope, totals)| ScopeSpending {
                scope,
                categories: SpendingCategory::ALL
                    .into_iter()
                    .map(|category| {
                        let t = totals.categories.get(&category);
                        let actual = t.map_or(0.0, |t| t.actual);
                        let committed = t.map_or(0.0, |t| t.committed);
                        let minimum = t.and_then(|t| t.minimum).unwrap_or(actual + committed);
                        (
                            category,
                            SpendingSnapshot {
                                actual_spending: actual,
                                committed_cost: committed,
                                minimum_required: minimum,
                            },
                        )
                    })
                    .collect(),
                labour_hours: totals.labour_hours,
            })
            .collect();
        SpendingSummary { scopes }
    }
}

/// Aggregate every record into project, phase and floor scopes.
///
/// Excluded records (cancelled, rejected) contribute nothing. Where no minimum
/// is supplied for a scope and category, `minimumRequired` is the snapshot's
/// actual plus committed cost; duplicate minimums keep the largest. The project
/// scope is always present. Amounts are unrounded; call
/// [`SpendingSummary::rounded`] before output.
#[must_use]
pub fn aggregate(records: &CostRecords, minimums: &[MinimumRequirement]) -> SpendingSummary {
    let mut acc = Accumulator::default();
    acc.scopes.entry(Scope::Project).or_default();

    acc.add_all(&records.materials);
    acc.add_all(&records.labour);
    acc.add_all(&records.equipment);
    acc.add_all(&records.work_items);
    acc.add_all(&records.pre_construction);
    for minimum in minimums {
        acc.add_minimum(minimum);
    }

    debug!(
        records = records.len(),
        minimums = minimums.len(),
        scopes = acc.scopes.len(),
        "aggregated spending"
    );
    acc.finish()
}
