//! # trowel-spending
//!
//! Spending roll-ups and budget recommendations for Trowel.
//!
//! - [`CostRecords`]: materials, labour, equipment, work items and
//!   pre-construction expenses, with lenient numeric fields
//! - [`aggregate`]: actual, committed and minimum spending per scope and category
//! - [`BudgetRecommendation`]: buffered allocations derived from a summary
//! - [`ExpenseCheck`]: whether a new expense fits the remaining budget
//!
//! # Usage
//!
//! ```
//! use serde_json::json;
//! use trowel_spending::{BudgetRecommendation, CostRecords, DEFAULT_BUFFER_RATIO, aggregate};
//!
//! let records = CostRecords::from_value(json!({
//!     "materials": [{ "totalCost": 1000, "status": "delivered" }],
//! }))
//! .unwrap();
//! let summary = aggregate(&records, &[]);
//! let recommendation = BudgetRecommendation::from_summary(&summary, DEFAULT_BUFFER_RATIO);
//! assert_eq!(recommendation.to_budget().total, 1100.0);
//! ```

pub mod aggregate;
pub mod error;
pub mod expense;
pub mod recommend;
pub mod records;
pub mod scope;

pub use aggregate::{
    MinimumRequirement, ScopeSpending, SpendingInput, SpendingSnapshot, SpendingSummary, aggregate,
};
pub use error::SpendingError;
pub use expense::{DEFAULT_WARNING_THRESHOLD_PERCENT, ExpenseCheck, ExpenseRequest};
pub use recommend::{AllocationRecommendation, BudgetRecommendation, DEFAULT_BUFFER_RATIO, recommend};
pub use records::{
    CostRecord, CostRecords, EquipmentRecord, LabourRecord, MaterialRecord, PreConstructionExpense,
    Realization, RecordPlacement, WorkItemRecord,
};
pub use scope::{Scope, SpendingCategory};
