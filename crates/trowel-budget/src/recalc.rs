//! Sum-preserving recalculation after a single-field edit.
//!
//! Order of operations for an edit at `path`:
//!
//! 1. write the value
//! 2. leaf edits only: recompute that group's `total` from its leaves
//! 3. recompute every category total from its group totals, except a
//!    category whose total was the edit target
//! 4. recompute the grand total from the categories, unless the grand total
//!    was the edit target
//!
//! Step 3 runs for *every* category, so an earlier direct category override
//! is replaced by the computed sum on the next edit anywhere in the budget.

use serde_json::Value;
use trowel_core::{CostCategory, ValidationError, parse_numeric_or_zero};

use crate::hierarchy::{BudgetHierarchy, amounts_match};
use crate::path::BudgetPath;

/// Recompute every total bottom-up, discarding all overrides.
pub fn recompute_all(budget: &mut BudgetHierarchy) {
    for category in CostCategory::ALL {
        for group in budget.breakdown_mut(category).values_mut() {
            group.total = group.leaf_sum();
        }
        *budget.category_total_mut(category) = budget.group_totals_sum(category);
    }
    budget.total = budget.category_sum();
}

/// Apply one edit and return the recalculated budget. `budget` is untouched.
#[must_use]
pub fn apply_edit(budget: &BudgetHierarchy, path: BudgetPath, value: f64) -> BudgetHierarchy {
    tracing::debug!(%path, value, "applying budget edit");
    let mut next = budget.clone();

    match path {
        BudgetPath::GrandTotal => next.total = value,
        BudgetPath::CategoryTotal(category) => *next.category_total_mut(category) = value,
        BudgetPath::GroupTotal { category, group } => {
            next.breakdown_mut(category)
                .entry(group.to_owned())
                .or_default()
                .total = value;
        }
        BudgetPath::Leaf {
            category,
            group,
            leaf,
        } => {
            let group = next
                .breakdown_mut(category)
                .entry(group.to_owned())
                .or_default();
            group.items.insert(leaf.to_owned(), value);
            group.total = group.leaf_sum();
        }
    }

    for category in CostCategory::ALL {
        if path == BudgetPath::CategoryTotal(category) {
            continue;
        }
        let previous = budget.category_total(category);
        if !amounts_match(previous, budget.group_totals_sum(category)) {
            tracing::warn!(
                category = category.total_field(),
                previous,
                %path,
                "category override discarded by recalculation"
            );
        }
        *next.category_total_mut(category) = next.group_totals_sum(category);
    }

    if path != BudgetPath::GrandTotal {
        next.total = next.category_sum();
    }

    next
}

/// Parse `path`, coerce `raw` with `parse_numeric_or_zero`, and apply.
///
/// # Errors
///
/// Returns [`ValidationError::UnknownPath`] if `path` addresses no field.
pub fn apply_raw_edit(
    budget: &BudgetHierarchy,
    path: &str,
    raw: &Value,
) -> Result<BudgetHierarchy, ValidationError> {
    let path: BudgetPath = path.parse()?;
    Ok(apply_edit(budget, path, parse_numeric_or_zero(raw)))
}

impl BudgetHierarchy {
    /// Method form of [`apply_edit`].
    #[must_use]
    pub fn with_edit(&self, path: BudgetPath, value: f64) -> Self {
        apply_edit(self, path, value)
    }
}
