//! Aggregation scopes and spending categories.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Scope
// ---------------------------------------------------------------------------

/// Level at which spending is totalled.
///
/// Serialized as `{"level": "phase", "id": "phase-2"}`; the project scope has
/// no id. Ordering puts the project first, then phases, then floors.
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(tag = "level", content = "id", rename_all = "camelCase")]
pub enum Scope {
    Project,
    Phase(String),
    Floor(String),
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Project => f.write_str("project"),
            Self::Phase(id) => write!(f, "phase:{id}"),
            Self::Floor(id) => write!(f, "floor:{id}"),
        }
    }
}

// ---------------------------------------------------------------------------
// SpendingCategory
// ---------------------------------------------------------------------------

/// Cost type a record contributes to.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "camelCase")]
pub enum SpendingCategory {
    Materials,
    Labour,
    Equipment,
    Subcontractors,
    PreConstruction,
}

impl SpendingCategory {
    pub const ALL: [Self; 5] = [
        Self::Materials,
        Self::Labour,
        Self::Equipment,
        Self::Subcontractors,
        Self::PreConstruction,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Materials => "materials",
            Self::Labour => "labour",
            Self::Equipment => "equipment",
            Self::Subcontractors => "subcontractors",
            Self::PreConstruction => "preConstruction",
        }
    }
}

impl fmt::Display for SpendingCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
