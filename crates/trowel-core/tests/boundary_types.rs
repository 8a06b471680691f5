//! Serde and JsonSchema checks for the shared boundary types.

use pretty_assertions::assert_eq;
use rstest::rstest;
use schemars::schema_for;
use serde::Deserialize;
use serde_json::{Value, json};
use trowel_core::numeric::lenient;
use trowel_core::{CostCategory, Severity, parse_numeric_or_zero, round_currency};

/// Validate a JSON value against a schemars-generated schema.
fn validate_against_schema(schema: &Value, instance: &Value) -> Vec<String> {
    let validator = jsonschema::validator_for(schema).expect("schema should be valid");
    validator
        .iter_errors(instance)
        .map(|e| format!("{e}"))
        .collect()
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct Row {
    #[serde(deserialize_with = "lenient::number")]
    total_cost: f64,
    #[serde(deserialize_with = "lenient::optional_number")]
    used_quantity: Option<f64>,
}

#[test]
fn severity_serializes_uppercase_and_matches_its_schema() {
    let schema = schema_for!(Severity).to_value();
    for severity in [Severity::None, Severity::Low, Severity::Critical] {
        let value = serde_json::to_value(severity).unwrap();
        assert_eq!(value, json!(severity.as_str()));
        assert!(validate_against_schema(&schema, &value).is_empty());
        let back: Severity = serde_json::from_value(value).unwrap();
        assert_eq!(back, severity);
    }
    assert!(!validate_against_schema(&schema, &json!("low")).is_empty());
}

#[test]
fn severity_order_drives_max() {
    let worst = [Severity::Low, Severity::Critical, Severity::Medium]
        .into_iter()
        .max()
        .unwrap();
    assert_eq!(worst, Severity::Critical);
    assert_eq!(Severity::DESCENDING[0], Severity::Critical);
}

#[test]
fn cost_category_schema_accepts_camel_case_names() {
    let schema = schema_for!(CostCategory).to_value();
    for category in CostCategory::ALL {
        let value = serde_json::to_value(category).unwrap();
        assert!(validate_against_schema(&schema, &value).is_empty());
    }
    assert!(!validate_against_schema(&schema, &json!("direct_construction")).is_empty());
}

#[rstest]
#[case(json!({"totalCost": 12.5}), 12.5)]
#[case(json!({"totalCost": " 40 "}), 40.0)]
#[case(json!({"totalCost": "abc"}), 0.0)]
#[case(json!({"totalCost": null}), 0.0)]
#[case(json!({"totalCost": [1]}), 0.0)]
#[case(json!({}), 0.0)]
fn lenient_fields_coerce_to_zero(#[case] input: Value, #[case] expected: f64) {
    let row: Row = serde_json::from_value(input).unwrap();
    assert!((row.total_cost - expected).abs() < f64::EPSILON);
}

#[test]
fn optional_fields_keep_null_distinct_from_zero() {
    let untracked: Row = serde_json::from_value(json!({"usedQuantity": null})).unwrap();
    let zero: Row = serde_json::from_value(json!({"usedQuantity": "0"})).unwrap();
    assert_eq!(untracked.used_quantity, None);
    assert_eq!(zero.used_quantity, Some(0.0));
}

#[test]
fn coerced_strings_round_at_the_boundary() {
    let rounded = round_currency(parse_numeric_or_zero(&json!("19.999")));
    assert!((rounded - 20.0).abs() < f64::EPSILON);
    let tiny = round_currency(parse_numeric_or_zero(&json!("-0.001")));
    assert_eq!(serde_json::to_string(&tiny).unwrap(), "0.0");
}
