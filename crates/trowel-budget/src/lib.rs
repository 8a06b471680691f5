//! # trowel-budget
//!
//! Hierarchical project budgets for Trowel.
//!
//! - [`BudgetHierarchy`]: the canonical four-category budget with sub-group breakdowns
//! - [`BudgetShape`] / [`convert`]: legacy flat budgets and partial hierarchies
//!   normalized into the canonical shape
//! - [`apply_edit`] / [`apply_raw_edit`]: single-field edits with bottom-up
//!   recalculation of group, category and grand totals
//!
//! # Usage
//!
//! ```
//! use serde_json::json;
//! use trowel_budget::{BudgetPath, convert};
//!
//! let budget = convert(&json!({ "materials": 100, "labour": 50, "contingency": 20 })).unwrap();
//! assert_eq!(budget.total, 170.0);
//!
//! let path: BudgetPath = "directCosts.materials.structural".parse().unwrap();
//! let edited = budget.with_edit(path, 25.0);
//! assert_eq!(edited.total, 195.0);
//! ```

pub mod hierarchy;
pub mod layout;
pub mod path;
pub mod recalc;
pub mod shape;

pub use hierarchy::{Breakdown, BudgetHierarchy, CostGroup, SumMismatch};
pub use path::BudgetPath;
pub use recalc::{apply_edit, apply_raw_edit, recompute_all};
pub use shape::{BudgetShape, LegacyBudget, convert};
