//! Budget recommendations from existing, unbudgeted spending.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::debug;
use trowel_budget::{BudgetHierarchy, LegacyBudget};
use trowel_core::round_currency;

use crate::aggregate::{SpendingSnapshot, SpendingSummary};
use crate::scope::{Scope, SpendingCategory};

/// Headroom added on top of known spending.
pub const DEFAULT_BUFFER_RATIO: f64 = 0.10;

/// `max(minimumRequired, actualSpending + committedCost) × (1 + bufferRatio)`.
///
/// Negative ratios are treated as zero, and a negative base as zero, so the
/// result never falls below either the minimum or the known exposure.
#[must_use]
pub fn recommend(snapshot: &SpendingSnapshot, buffer_ratio: f64) -> f64 {
    let base = snapshot.minimum_required.max(snapshot.exposure()).max(0.0);
    base * (1.0 + buffer_ratio.max(0.0))
}

/// Recommended allocation for one scope and category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AllocationRecommendation {
    pub scope: Scope,
    pub category: SpendingCategory,
    #[serde(flatten)]
    pub snapshot: SpendingSnapshot,
    pub recommended: f64,
}

/// Recommendations for every scope of a spending summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct BudgetRecommendation {
    pub buffer_ratio: f64,
    pub recommendations: Vec<AllocationRecommendation>,
}

impl BudgetRecommendation {
    #[must_use]
    pub fn from_summary(summary: &SpendingSummary, buffer_ratio: f64) -> Self {
        let buffer_ratio = buffer_ratio.max(0.0);
        let recommendations: Vec<_> = summary
            .scopes
            .iter()
            .flat_map(|scope| {
                scope
                    .categories
                    .iter()
                    .map(|(category, snapshot)| AllocationRecommendation {
                        scope: scope.scope.clone(),
                        category: *category,
                        snapshot: *snapshot,
                        recommended: recommend(snapshot, buffer_ratio),
                    })
            })
            .collect();
        debug!(
            buffer_ratio,
            count = recommendations.len(),
            "built budget recommendation"
        );
        Self {
            buffer_ratio,
            recommendations,
        }
    }

    /// Recommended amount for a scope and category, or `0.0` when absent.
    #[must_use]
    pub fn recommended(&self, scope: &Scope, category: SpendingCategory) -> f64 {
        self.recommendations
            .iter()
            .find(|r| &r.scope == scope && r.category == category)
            .map_or(0.0, |r| r.recommended)
    }

    /// Project-scope recommendations as a canonical budget.
    ///
    /// Amounts are rounded to cents before they enter the hierarchy, so the
    /// budget's totals are sums of the figures a reader sees.
    #[must_use]
    pub fn to_budget(&self) -> BudgetHierarchy {
        let at = |category| round_currency(self.recommended(&Scope::Project, category));
        let legacy = LegacyBudget {
            materials: at(SpendingCategory::Materials),
            labour: at(SpendingCategory::Labour),
            equipment: at(SpendingCategory::Equipment),
            subcontractors: at(SpendingCategory::Subcontractors),
            pre_construction: at(SpendingCategory::PreConstruction),
            ..LegacyBudget::default()
        };
        BudgetHierarchy::from(&legacy)
    }

    #[must_use]
    pub fn rounded(&self) -> Self {
        Self {
            buffer_ratio: self.buffer_ratio,
            recommendations: self
                .recommendations
                .iter()
                .map(|r| AllocationRecommendation {
                    scope: r.scope.clone(),
                    category: r.category,
                    snapshot: r.snapshot.rounded(),
                    recommended: round_currency(r.recommended),
                })
                .collect(),
        }
    }
}
