//! Central schema registry for engine boundary types.
//!
//! The `SchemaRegistry` builds JSON Schemas from the engine crates' types at
//! construction time using [`schemars::schema_for!`] and provides validation via
//! `jsonschema`.

use std::collections::HashMap;

use schemars::schema_for;

use crate::error::SchemaError;

/// Named JSON Schemas for every input and output shape.
pub struct SchemaRegistry {
    schemas: HashMap<&'static str, serde_json::Value>,
}

macro_rules! register {
    ($map:expr, $name:expr, $ty:ty) => {
        $map.insert($name, schema_for!($ty).to_value());
    };
}

impl SchemaRegistry {
    /// Build a registry containing budget, spending, and wastage schemas.
    #[must_use]
    pub fn new() -> Self {
        let mut schemas = HashMap::new();

        // --- Budgets (2) ---
        register!(schemas, "budget", trowel_budget::BudgetHierarchy);
        register!(schemas, "legacy_budget", trowel_budget::LegacyBudget);

        // --- Spending (5) ---
        register!(schemas, "spending_input", trowel_spending::SpendingInput);
        register!(schemas, "spending_summary", trowel_spending::SpendingSummary);
        register!(
            schemas,
            "budget_recommendation",
            trowel_spending::BudgetRecommendation
        );
        register!(schemas, "expense_request", trowel_spending::ExpenseRequest);
        register!(schemas, "expense_check", trowel_spending::ExpenseCheck);

        // --- Wastage (6) ---
        register!(schemas, "material", trowel_wastage::MaterialQuantities);
        register!(
            schemas,
            "discrepancy_thresholds",
            trowel_wastage::DiscrepancyThresholds
        );
        register!(
            schemas,
            "material_discrepancy_result",
            trowel_wastage::MaterialDiscrepancyResult
        );
        register!(schemas, "portfolio_input", trowel_wastage::PortfolioInput);
        register!(
            schemas,
            "project_wastage_summary",
            trowel_wastage::ProjectWastageSummary
        );
        register!(
            schemas,
            "portfolio_wastage_summary",
            trowel_wastage::PortfolioWastageSummary
        );

        Self { schemas }
    }

    /// Get a schema by name. Returns `None` if not found.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&serde_json::Value> {
        self.schemas.get(name)
    }

    /// Validate a JSON value against a named schema.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::NotFound` if the schema name is unknown, or
    /// `SchemaError::ValidationFailed` if validation produces errors.
    pub fn validate(&self, name: &str, instance: &serde_json::Value) -> Result<(), SchemaError> {
        let schema = self
            .get(name)
            .ok_or_else(|| SchemaError::NotFound(name.to_string()))?;

        let validator = jsonschema::validator_for(schema)
            .map_err(|e| SchemaError::Generation(format!("{e}")))?;

        let errors: Vec<String> = validator
            .iter_errors(instance)
            .map(|e| format!("{e}"))
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(SchemaError::ValidationFailed { errors })
        }
    }

    /// List all registered schema names.
    #[must_use]
    pub fn list(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = self.schemas.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Number of registered schemas.
    #[must_use]
    pub fn schema_count(&self) -> usize {
        self.schemas.len()
    }
}

impl Default for SchemaRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn registry() -> SchemaRegistry {
        SchemaRegistry::new()
    }

    #[test]
    fn registry_has_expected_count() {
        // 2 budget + 5 spending + 6 wastage
        assert_eq!(registry().schema_count(), 13);
    }

    #[test]
    fn registry_list_is_sorted() {
        let names = registry().list();
        let mut sorted = names.clone();
        sorted.sort_unstable();
        assert_eq!(names, sorted);
    }

    #[test]
    fn get_nonexistent_schema() {
        assert!(registry().get("nonexistent").is_none());
    }

    #[test]
    fn validate_nonexistent_schema_returns_not_found() {
        let result = registry().validate("bogus", &json!({}));
        assert!(matches!(result, Err(SchemaError::NotFound(_))));
    }

    #[test]
    fn validate_rejects_unknown_severity() {
        let invalid = json!({
            "severity": "SEVERE",
            "alerts": {
                "hasAnyAlert": true,
                "overDelivery": true,
                "underDelivery": false,
                "usageOverage": false,
                "wastage": false,
                "details": []
            },
            "metrics": {"deliveryVariance": 1.0, "unitCost": 1.0, "totalDiscrepancyCost": 1.0}
        });
        let result = registry().validate("material_discrepancy_result", &invalid);
        if let Err(SchemaError::ValidationFailed { errors }) = result {
            assert!(!errors.is_empty());
        } else {
            panic!("Expected ValidationFailed");
        }
    }

    #[test]
    fn validate_rejects_records_that_are_not_lists() {
        let invalid = json!({"materials": {"totalCost": 10}});
        assert!(registry().validate("spending_input", &invalid).is_err());
    }
}
