//! Legacy/hierarchical budget shapes and conversion between them.
//!
//! Older projects stored a flat budget (`{ "materials": 100, "labour": 50,
//! "contingency": 20 }`). [`BudgetShape::detect`] decides which shape an
//! arbitrary JSON value holds; [`convert`] always yields a new canonical
//! [`BudgetHierarchy`] and never touches the caller's value.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use trowel_core::numeric::lenient;
use trowel_core::{CostCategory, ValidationError, parse_numeric_or_zero};

use crate::hierarchy::{BudgetHierarchy, amounts_match};
use crate::layout::{CATCH_ALL_LEAF, GRAND_TOTAL_KEY};
use crate::recalc;

/// Flat fields recognised on a legacy budget and the group that receives them.
///
/// `(keys, category, group)`; the first key is canonical, the rest are aliases.
const LEGACY_FIELDS: &[(&[&str], CostCategory, &str)] = &[
    (&["materials"], CostCategory::DirectConstruction, "materials"),
    (&["labour", "labor"], CostCategory::DirectConstruction, "labour"),
    (&["equipment"], CostCategory::DirectConstruction, "equipment"),
    (
        &["subcontractors"],
        CostCategory::DirectConstruction,
        "subcontractors",
    ),
    (&["preConstruction"], CostCategory::PreConstruction, "design"),
    (&["indirect"], CostCategory::Indirect, "siteOverheads"),
    (&["contingency"], CostCategory::Contingency, "construction"),
];

/// A flat budget with no breakdown below the cost type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct LegacyBudget {
    #[serde(deserialize_with = "lenient::number")]
    pub materials: f64,
    #[serde(alias = "labor", deserialize_with = "lenient::number")]
    pub labour: f64,
    #[serde(deserialize_with = "lenient::number")]
    pub equipment: f64,
    #[serde(deserialize_with = "lenient::number")]
    pub subcontractors: f64,
    #[serde(deserialize_with = "lenient::number")]
    pub pre_construction: f64,
    #[serde(deserialize_with = "lenient::number")]
    pub indirect: f64,
    #[serde(deserialize_with = "lenient::number")]
    pub contingency: f64,
}

impl LegacyBudget {
    /// Read legacy fields from an object. Returns `None` when no legacy field
    /// holds a scalar, i.e. the object is not a legacy budget.
    fn from_object(object: &Map<String, Value>) -> Option<Self> {
        let mut budget = Self::default();
        let mut seen = false;

        for (keys, _, _) in LEGACY_FIELDS {
            let Some(value) = keys
                .iter()
                .find_map(|key| object.get(*key))
                .filter(|value| is_scalar(value))
            else {
                continue;
            };
            if let Some(slot) = budget.amount_mut(keys[0]) {
                *slot = parse_numeric_or_zero(value);
                seen = true;
            }
        }

        seen.then_some(budget)
    }

    fn amount_mut(&mut self, key: &str) -> Option<&mut f64> {
        match key {
            "materials" => Some(&mut self.materials),
            "labour" => Some(&mut self.labour),
            "equipment" => Some(&mut self.equipment),
            "subcontractors" => Some(&mut self.subcontractors),
            "preConstruction" => Some(&mut self.pre_construction),
            "indirect" => Some(&mut self.indirect),
            "contingency" => Some(&mut self.contingency),
            _ => None,
        }
    }

    /// Amount for a legacy field, by canonical key.
    #[must_use]
    pub fn amount(&self, key: &str) -> f64 {
        match key {
            "materials" => self.materials,
            "labour" => self.labour,
            "equipment" => self.equipment,
            "subcontractors" => self.subcontractors,
            "preConstruction" => self.pre_construction,
            "indirect" => self.indirect,
            "contingency" => self.contingency,
            _ => 0.0,
        }
    }

    /// Sum of all flat fields.
    #[must_use]
    pub fn total(&self) -> f64 {
        LEGACY_FIELDS
            .iter()
            .map(|(keys, _, _)| self.amount(keys[0]))
            .sum()
    }
}

impl From<&LegacyBudget> for BudgetHierarchy {
    /// Place each flat amount in the catch-all leaf of its group, zero
    /// everything else, then recompute every total bottom-up.
    fn from(legacy: &LegacyBudget) -> Self {
        let mut budget = Self::zeroed();
        for (keys, category, group) in LEGACY_FIELDS {
            if let Some(group) = budget.breakdown_mut(*category).get_mut(*group) {
                group
                    .items
                    .insert(CATCH_ALL_LEAF.to_owned(), legacy.amount(keys[0]));
            }
        }
        recalc::recompute_all(&mut budget);
        budget
    }
}

/// A budget as found in the wild: either shape.
#[derive(Debug, Clone, PartialEq)]
pub enum BudgetShape {
    Legacy(LegacyBudget),
    Hierarchical(BudgetHierarchy),
}

impl BudgetShape {
    /// Classify a JSON value.
    ///
    /// A `directCosts` container means hierarchical. Otherwise any scalar
    /// legacy field means legacy. Anything else is a structural error.
    ///
    /// # Errors
    ///
    /// - [`ValidationError::NotAnObject`] if `value` is not an object
    /// - [`ValidationError::InvalidContainer`] if a container is not an object
    /// - [`ValidationError::MissingContainer`] if the value is neither shape
    pub fn detect(value: &Value) -> Result<Self, ValidationError> {
        let Value::Object(object) = value else {
            return Err(ValidationError::NotAnObject {
                found: ValidationError::json_type_name(value),
            });
        };

        let direct_key = CostCategory::DirectConstruction.container_key();
        if object.contains_key(direct_key) {
            tracing::debug!("budget shape: hierarchical");
            return BudgetHierarchy::from_object(object).map(Self::Hierarchical);
        }

        if let Some(legacy) = LegacyBudget::from_object(object) {
            tracing::debug!(total = legacy.total(), "budget shape: legacy flat");
            let recorded = object.get(GRAND_TOTAL_KEY).map(parse_numeric_or_zero);
            if recorded.is_some_and(|recorded| !amounts_match(recorded, legacy.total())) {
                tracing::warn!(
                    recorded = recorded.unwrap_or_default(),
                    computed = legacy.total(),
                    "legacy budget total disagrees with its fields; using the field sum"
                );
            }
            return Ok(Self::Legacy(legacy));
        }

        Err(ValidationError::MissingContainer(direct_key.to_owned()))
    }

    #[must_use]
    pub const fn is_legacy(&self) -> bool {
        matches!(self, Self::Legacy(_))
    }

    #[must_use]
    pub fn into_hierarchy(self) -> BudgetHierarchy {
        match self {
            Self::Legacy(legacy) => BudgetHierarchy::from(&legacy),
            Self::Hierarchical(budget) => budget,
        }
    }
}

/// Normalize any supported budget value into the canonical hierarchy.
///
/// Idempotent: converting the serialized output again yields an equal budget.
///
/// # Errors
///
/// See [`BudgetShape::detect`].
pub fn convert(value: &Value) -> Result<BudgetHierarchy, ValidationError> {
    BudgetShape::detect(value).map(BudgetShape::into_hierarchy)
}

const fn is_scalar(value: &Value) -> bool {
    !matches!(value, Value::Object(_) | Value::Array(_))
}
