//! Validate a prospective expense against an existing budget.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::debug;
use trowel_core::numeric::lenient;
use trowel_core::{percent_of, round_currency};

/// Usage percentage at which an otherwise valid expense is flagged.
pub const DEFAULT_WARNING_THRESHOLD_PERCENT: f64 = 80.0;

/// A prospective expense, as submitted by a caller.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct ExpenseRequest {
    #[serde(deserialize_with = "lenient::number")]
    pub budgeted: f64,
    #[serde(deserialize_with = "lenient::number")]
    pub actual_spending: f64,
    #[serde(deserialize_with = "lenient::number")]
    pub amount: f64,
    /// Overrides the configured warning threshold.
    #[serde(deserialize_with = "lenient::optional_number")]
    pub warning_threshold_percent: Option<f64>,
}

impl ExpenseRequest {
    #[must_use]
    pub fn check(&self, default_warning_percent: f64) -> ExpenseCheck {
        ExpenseCheck::evaluate(
            self.budgeted,
            self.actual_spending,
            self.amount,
            self.warning_threshold_percent
                .unwrap_or(default_warning_percent),
        )
    }
}

/// Outcome of checking one expense.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseCheck {
    pub budgeted: f64,
    pub actual_spending: f64,
    pub amount: f64,
    /// `max(0, budgeted - actualSpending)`.
    pub available: f64,
    /// `(actualSpending + amount) / budgeted × 100`; `0` for a zero budget.
    pub usage_after: f64,
    pub is_valid: bool,
    pub shortfall: f64,
    /// The amount is larger than what remains.
    pub exceeded: bool,
    /// Valid, but usage reaches the warning threshold.
    pub warning: bool,
}

impl ExpenseCheck {
    /// Evaluate an expense. Decisions use unrounded values; the returned
    /// amounts are rounded to cents.
    #[must_use]
    pub fn evaluate(
        budgeted: f64,
        actual_spending: f64,
        amount: f64,
        warning_threshold_percent: f64,
    ) -> Self {
        let available = (budgeted - actual_spending).max(0.0);
        let usage_after = percent_of(actual_spending + amount, budgeted);
        let exceeded = amount > available;
        let warning = !exceeded && usage_after >= warning_threshold_percent;

        debug!(budgeted, actual_spending, amount, exceeded, warning, "checked expense");

        Self {
            budgeted: round_currency(budgeted),
            actual_spending: round_currency(actual_spending),
            amount: round_currency(amount),
            available: round_currency(available),
            usage_after: round_currency(usage_after),
            is_valid: !exceeded,
            shortfall: round_currency((amount - available).max(0.0)),
            exceeded,
            warning,
        }
    }
}
