//! Severity tiers and top-level budget categories.
//!
//! `Severity` carries an explicit total order (`None < Low < Medium < High <
//! Critical`) so "worst of several variances" is a plain `max`. Serialized
//! severities are upper-case (`"CRITICAL"`); categories are camelCase.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Severity
// ---------------------------------------------------------------------------

/// How far a material's quantity or cost variance exceeds configured tolerance.
///
/// Variant order is significant: derived `Ord` ranks later variants higher.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    JsonSchema,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    #[default]
    None,
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    /// Alerting tiers from most to least severe. `None` is not a tier.
    pub const DESCENDING: [Self; 4] = [Self::Critical, Self::High, Self::Medium, Self::Low];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "NONE",
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
            Self::Critical => "CRITICAL",
        }
    }

    /// Whether this severity should raise an alert.
    #[must_use]
    pub fn is_alert(self) -> bool {
        self > Self::None
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// CostCategory
// ---------------------------------------------------------------------------

/// The four top-level categories of a project budget.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "camelCase")]
pub enum CostCategory {
    DirectConstruction,
    PreConstruction,
    Indirect,
    Contingency,
}

impl CostCategory {
    pub const ALL: [Self; 4] = [
        Self::DirectConstruction,
        Self::PreConstruction,
        Self::Indirect,
        Self::Contingency,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::DirectConstruction => "directConstruction",
            Self::PreConstruction => "preConstruction",
            Self::Indirect => "indirect",
            Self::Contingency => "contingency",
        }
    }

    /// Key of the category's numeric total on the budget object.
    #[must_use]
    pub const fn total_field(self) -> &'static str {
        match self {
            Self::DirectConstruction => "directConstructionCosts",
            Self::PreConstruction => "preConstructionCosts",
            Self::Indirect => "indirectCosts",
            Self::Contingency => "contingencyReserve",
        }
    }

    /// Key of the container holding the category's sub-groups.
    #[must_use]
    pub const fn container_key(self) -> &'static str {
        match self {
            Self::DirectConstruction => "directCosts",
            Self::PreConstruction => "preConstruction",
            Self::Indirect => "indirect",
            Self::Contingency => "contingency",
        }
    }

    #[must_use]
    pub fn from_total_field(field: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.total_field() == field)
    }

    #[must_use]
    pub fn from_container_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.container_key() == key)
    }
}

impl fmt::Display for CostCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
