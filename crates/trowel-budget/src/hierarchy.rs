//! The canonical hierarchical budget.
//!
//! ```text
//! total
//! ├── directConstructionCosts  ← directCosts.{materials,labour,equipment,subcontractors}.total
//! ├── preConstructionCosts     ← preConstruction.{siteAcquisition,design,permits}.total
//! ├── indirectCosts            ← indirect.{siteOverheads,administration,financing}.total
//! └── contingencyReserve       ← contingency.{design,construction,ownersReserve}.total
//! ```
//!
//! Each group's `total` is the sum of its leaves. All defaulting happens in
//! one place (`from_object`), so the rest of the workspace can assume every
//! declared group and leaf is present.

use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use trowel_core::numeric::field_or_zero;
use trowel_core::{CostCategory, ValidationError, parse_numeric_or_zero};

use crate::layout::{GRAND_TOTAL_KEY, GROUP_TOTAL_KEY, groups};

/// Relative tolerance used when comparing a recorded total to a computed sum.
const SUM_TOLERANCE: f64 = 1e-9;

/// One sub-group: its recorded total plus named leaf amounts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CostGroup {
    pub total: f64,
    #[serde(flatten)]
    pub items: BTreeMap<String, f64>,
}

impl CostGroup {
    #[must_use]
    pub fn leaf_sum(&self) -> f64 {
        self.items.values().sum()
    }

    #[must_use]
    pub fn leaf(&self, name: &str) -> Option<f64> {
        self.items.get(name).copied()
    }
}

/// Sub-groups of one category, keyed by group name.
pub type Breakdown = BTreeMap<String, CostGroup>;

/// A project budget in canonical hierarchical shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct BudgetHierarchy {
    pub total: f64,
    pub direct_construction_costs: f64,
    pub pre_construction_costs: f64,
    pub indirect_costs: f64,
    pub contingency_reserve: f64,
    pub direct_costs: Breakdown,
    pub pre_construction: Breakdown,
    pub indirect: Breakdown,
    pub contingency: Breakdown,
}

/// A recorded total that disagrees with the sum it should equal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SumMismatch {
    /// Dotted path of the recorded total.
    pub path: String,
    pub recorded: f64,
    pub computed: f64,
}

impl Default for BudgetHierarchy {
    fn default() -> Self {
        Self::zeroed()
    }
}

impl BudgetHierarchy {
    /// A budget with every declared group and leaf present and zero.
    #[must_use]
    pub fn zeroed() -> Self {
        Self {
            total: 0.0,
            direct_construction_costs: 0.0,
            pre_construction_costs: 0.0,
            indirect_costs: 0.0,
            contingency_reserve: 0.0,
            direct_costs: zeroed_breakdown(CostCategory::DirectConstruction),
            pre_construction: zeroed_breakdown(CostCategory::PreConstruction),
            indirect: zeroed_breakdown(CostCategory::Indirect),
            contingency: zeroed_breakdown(CostCategory::Contingency),
        }
    }

    /// Canonicalize a hierarchical budget object.
    ///
    /// A container that is present must be an object, `null` included.
    /// Missing leaves become zero. A missing total (group, category or grand)
    /// is derived from its children; a present total is kept as recorded, so
    /// earlier overrides survive. Unknown keys are dropped.
    pub(crate) fn from_object(object: &Map<String, Value>) -> Result<Self, ValidationError> {
        let mut budget = Self::zeroed();

        for category in CostCategory::ALL {
            let key = category.container_key();
            let container = match object.get(key) {
                None => None,
                Some(Value::Object(map)) => Some(map),
                Some(_) => {
                    return Err(ValidationError::InvalidContainer {
                        container: key.to_owned(),
                    });
                }
            };

            let breakdown = read_breakdown(category, container)?;
            let group_sum = breakdown.values().map(|group| group.total).sum();
            *budget.breakdown_mut(category) = breakdown;
            *budget.category_total_mut(category) =
                explicit_number(object, category.total_field()).unwrap_or(group_sum);
        }

        budget.total =
            explicit_number(object, GRAND_TOTAL_KEY).unwrap_or_else(|| budget.category_sum());
        Ok(budget)
    }

    #[must_use]
    pub const fn category_total(&self, category: CostCategory) -> f64 {
        match category {
            CostCategory::DirectConstruction => self.direct_construction_costs,
            CostCategory::PreConstruction => self.pre_construction_costs,
            CostCategory::Indirect => self.indirect_costs,
            CostCategory::Contingency => self.contingency_reserve,
        }
    }

    pub const fn category_total_mut(&mut self, category: CostCategory) -> &mut f64 {
        match category {
            CostCategory::DirectConstruction => &mut self.direct_construction_costs,
            CostCategory::PreConstruction => &mut self.pre_construction_costs,
            CostCategory::Indirect => &mut self.indirect_costs,
            CostCategory::Contingency => &mut self.contingency_reserve,
        }
    }

    #[must_use]
    pub const fn breakdown(&self, category: CostCategory) -> &Breakdown {
        match category {
            CostCategory::DirectConstruction => &self.direct_costs,
            CostCategory::PreConstruction => &self.pre_construction,
            CostCategory::Indirect => &self.indirect,
            CostCategory::Contingency => &self.contingency,
        }
    }

    pub const fn breakdown_mut(&mut self, category: CostCategory) -> &mut Breakdown {
        match category {
            CostCategory::DirectConstruction => &mut self.direct_costs,
            CostCategory::PreConstruction => &mut self.pre_construction,
            CostCategory::Indirect => &mut self.indirect,
            CostCategory::Contingency => &mut self.contingency,
        }
    }

    #[must_use]
    pub fn group(&self, category: CostCategory, key: &str) -> Option<&CostGroup> {
        self.breakdown(category).get(key)
    }

    /// Sum of the four category totals.
    #[must_use]
    pub fn category_sum(&self) -> f64 {
        CostCategory::ALL
            .into_iter()
            .map(|category| self.category_total(category))
            .sum()
    }

    /// Sum of a category's group totals.
    #[must_use]
    pub fn group_totals_sum(&self, category: CostCategory) -> f64 {
        self.breakdown(category)
            .values()
            .map(|group| group.total)
            .sum()
    }

    /// Every recorded total that does not match the sum beneath it.
    ///
    /// Empty for any budget produced by recalculation, unless a category or
    /// grand total was overridden directly.
    #[must_use]
    pub fn check_invariants(&self) -> Vec<SumMismatch> {
        let mut mismatches = Vec::new();

        for category in CostCategory::ALL {
            for (key, group) in self.breakdown(category) {
                push_if_mismatched(
                    &mut mismatches,
                    format!("{}.{key}.{GROUP_TOTAL_KEY}", category.container_key()),
                    group.total,
                    group.leaf_sum(),
                );
            }
            push_if_mismatched(
                &mut mismatches,
                category.total_field().to_owned(),
                self.category_total(category),
                self.group_totals_sum(category),
            );
        }

        push_if_mismatched(
            &mut mismatches,
            GRAND_TOTAL_KEY.to_owned(),
            self.total,
            self.category_sum(),
        );
        mismatches
    }

    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.check_invariants().is_empty()
    }
}

/// Whether two amounts agree within [`SUM_TOLERANCE`], scaled to their magnitude.
#[must_use]
pub fn amounts_match(a: f64, b: f64) -> bool {
    (a - b).abs() <= SUM_TOLERANCE * a.abs().max(b.abs()).max(1.0)
}

fn push_if_mismatched(out: &mut Vec<SumMismatch>, path: String, recorded: f64, computed: f64) {
    if !amounts_match(recorded, computed) {
        out.push(SumMismatch {
            path,
            recorded,
            computed,
        });
    }
}

fn zeroed_breakdown(category: CostCategory) -> Breakdown {
    groups(category)
        .iter()
        .map(|layout| {
            let items = layout
                .leaves
                .iter()
                .map(|leaf| ((*leaf).to_owned(), 0.0))
                .collect();
            (layout.key.to_owned(), CostGroup { total: 0.0, items })
        })
        .collect()
}

fn read_breakdown(
    category: CostCategory,
    container: Option<&Map<String, Value>>,
) -> Result<Breakdown, ValidationError> {
    let mut breakdown = Breakdown::new();

    for layout in groups(category) {
        let group = match container.and_then(|c| c.get(layout.key)) {
            None | Some(Value::Null) => None,
            Some(Value::Object(map)) => Some(map),
            Some(_) => {
                return Err(ValidationError::InvalidContainer {
                    container: format!("{}.{}", category.container_key(), layout.key),
                });
            }
        };

        let items: BTreeMap<String, f64> = layout
            .leaves
            .iter()
            .map(|leaf| {
                let amount = group.map_or(0.0, |g| field_or_zero(g, leaf));
                ((*leaf).to_owned(), amount)
            })
            .collect();
        let total = group
            .and_then(|g| explicit_number(g, GROUP_TOTAL_KEY))
            .unwrap_or_else(|| items.values().sum());

        breakdown.insert(layout.key.to_owned(), CostGroup { total, items });
    }

    Ok(breakdown)
}

/// A key that is present and not `null`, coerced.
fn explicit_number(object: &Map<String, Value>, key: &str) -> Option<f64> {
    object
        .get(key)
        .filter(|value| !value.is_null())
        .map(parse_numeric_or_zero)
}
