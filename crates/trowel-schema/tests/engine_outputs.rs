//! Engine outputs validate against their registered schemas.

use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use trowel_budget::convert;
use trowel_schema::{SchemaError, SchemaRegistry};
use trowel_spending::{BudgetRecommendation, ExpenseCheck, SpendingInput};
use trowel_wastage::{
    DiscrepancyDetector, DiscrepancyThresholds, MaterialQuantities, PortfolioInput,
    ReportOptions, evaluate_portfolio,
};

fn assert_valid(registry: &SchemaRegistry, name: &str, value: &Value) {
    if let Err(err) = registry.validate(name, value) {
        panic!("{name} failed validation: {err}");
    }
}

#[test]
fn converted_budget_matches_budget_schema() {
    let registry = SchemaRegistry::new();
    let budget = convert(&json!({"materials": 100, "labour": 50, "contingency": 20})).unwrap();
    assert_valid(&registry, "budget", &serde_json::to_value(&budget).unwrap());
}

#[test]
fn spending_outputs_match_their_schemas() {
    let registry = SchemaRegistry::new();
    let input = json!({
        "materials": [{"totalCost": 1200, "phaseId": "foundation", "status": "ordered"}],
        "labour": [{"totalHours": 12, "hourlyRate": 40, "floorId": "L2"}],
        "minimums": [{"category": "equipment", "amount": 500}],
    });
    assert_valid(&registry, "spending_input", &input);

    let summary = SpendingInput::from_value(input).unwrap().summarize();
    assert_valid(
        &registry,
        "spending_summary",
        &serde_json::to_value(summary.rounded()).unwrap(),
    );

    let recommendation = BudgetRecommendation::from_summary(&summary, 0.1).rounded();
    assert_valid(
        &registry,
        "budget_recommendation",
        &serde_json::to_value(&recommendation).unwrap(),
    );

    let check = ExpenseCheck::evaluate(100_000.0, 85_000.0, 20_000.0, 80.0);
    assert_valid(&registry, "expense_check", &serde_json::to_value(&check).unwrap());
}

#[test]
fn wastage_outputs_match_their_schemas() {
    let registry = SchemaRegistry::new();
    let material = MaterialQuantities {
        material_id: Some("m-1".into()),
        ordered_quantity: 100.0,
        delivered_quantity: 130.0,
        unit_cost: Some(50.0),
        ..MaterialQuantities::default()
    };
    let result = DiscrepancyDetector::default().evaluate(&material);
    let value = serde_json::to_value(result.rounded()).unwrap();
    assert_valid(&registry, "material_discrepancy_result", &value);
    assert_eq!(value["severity"], json!("HIGH"));

    let input = json!({"projects": [{"projectId": "p1", "materials": [serde_json::to_value(&material).unwrap()]}]});
    assert_valid(&registry, "portfolio_input", &input);
    let portfolio = evaluate_portfolio(
        &PortfolioInput::from_value(input).unwrap().projects,
        &DiscrepancyThresholds::default(),
        &ReportOptions::default(),
    )
    .unwrap();
    assert_valid(
        &registry,
        "portfolio_wastage_summary",
        &serde_json::to_value(portfolio.rounded()).unwrap(),
    );
}

#[test]
fn default_thresholds_match_threshold_schema() {
    let registry = SchemaRegistry::new();
    let value = serde_json::to_value(DiscrepancyThresholds::default()).unwrap();
    assert_valid(&registry, "discrepancy_thresholds", &value);

    let err = registry
        .validate("discrepancy_thresholds", &json!({"wastage": {"critical": "high"}}))
        .unwrap_err();
    assert!(matches!(err, SchemaError::ValidationFailed { .. }));
}

#[test]
fn partial_band_tables_match_threshold_schema() {
    let registry = SchemaRegistry::new();
    let partial = json!({"overDelivery": {"high": 30}, "cost": null});
    assert_valid(&registry, "discrepancy_thresholds", &partial);
    let parsed: DiscrepancyThresholds = serde_json::from_value(partial).unwrap();
    assert!((parsed.over_delivery.critical - 50.0).abs() < f64::EPSILON);
}
