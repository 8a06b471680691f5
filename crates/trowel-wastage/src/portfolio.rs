//! Batch evaluation across projects.
//!
//! Projects are independent, so each one is evaluated on the rayon pool and the
//! per-project summaries are merged afterwards.

use rayon::prelude::*;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::detect::{DiscrepancyDetector, MaterialDiscrepancyResult};
use crate::error::WastageError;
use crate::material::MaterialQuantities;
use crate::summary::{PortfolioWastageSummary, ProjectEvaluation, ReportOptions};
use crate::thresholds::DiscrepancyThresholds;

/// A project's materials, with optional project-specific thresholds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProjectMaterials {
    pub project_id: String,
    #[serde(default)]
    pub project_name: Option<String>,
    #[serde(default)]
    pub thresholds: Option<DiscrepancyThresholds>,
    #[serde(default)]
    pub materials: Vec<MaterialQuantities>,
}

/// Input for a portfolio run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioInput {
    pub projects: Vec<ProjectMaterials>,
}

impl PortfolioInput {
    /// # Errors
    ///
    /// Returns [`WastageError::Input`] when the structure is wrong.
    pub fn from_value(value: serde_json::Value) -> Result<Self, WastageError> {
        Ok(serde_json::from_value(value)?)
    }
}

impl ProjectMaterials {
    fn detector(&self, fallback: &DiscrepancyDetector) -> Result<DiscrepancyDetector, WastageError> {
        match &self.thresholds {
            Some(thresholds) => Ok(DiscrepancyDetector::new(thresholds.clone())?),
            None => Ok(fallback.clone()),
        }
    }

    /// Evaluate every material of this project.
    #[must_use]
    pub fn evaluate_with(&self, detector: &DiscrepancyDetector) -> Vec<MaterialDiscrepancyResult> {
        self.materials.iter().map(|m| detector.evaluate(m)).collect()
    }
}

/// Evaluate one project. The summary is `None` when no material alerts.
///
/// # Errors
///
/// Returns [`WastageError::Validation`] when the project carries invalid
/// thresholds.
pub fn evaluate_project(
    project: &ProjectMaterials,
    detector: &DiscrepancyDetector,
    options: &ReportOptions,
) -> Result<ProjectEvaluation, WastageError> {
    let detector = project.detector(detector)?;
    let results = project.evaluate_with(&detector);
    Ok(ProjectEvaluation::from_results(
        &project.project_id,
        project.project_name.as_deref(),
        &results,
        options.top_materials,
    ))
}

/// Evaluate every project in parallel and rank the ones with alerts.
///
/// # Errors
///
/// Returns [`WastageError::Validation`] when `thresholds`, or any project's own
/// thresholds, are invalid.
pub fn evaluate_portfolio(
    projects: &[ProjectMaterials],
    thresholds: &DiscrepancyThresholds,
    options: &ReportOptions,
) -> Result<PortfolioWastageSummary, WastageError> {
    let detector = DiscrepancyDetector::new(thresholds.clone())?;
    debug!(projects = projects.len(), "evaluating portfolio");

    let evaluations = projects
        .par_iter()
        .map(|project| evaluate_project(project, &detector, options))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(PortfolioWastageSummary::from_evaluations(
        evaluations,
        options.top_projects,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use trowel_core::ValidationError;

    #[test]
    fn project_thresholds_override_the_portfolio_default() {
        let input = PortfolioInput::from_value(json!({
            "projects": [{
                "projectId": "strict",
                "thresholds": {"overDelivery": {"critical": 2, "high": 1.5, "medium": 1, "low": 0.5}},
                "materials": [{"orderedQuantity": 100, "deliveredQuantity": 103, "unitCost": 1}],
            }, {
                "projectId": "lenient",
                "materials": [{"orderedQuantity": 100, "deliveredQuantity": 103, "unitCost": 1}],
            }]
        }))
        .unwrap();

        let portfolio = evaluate_portfolio(
            &input.projects,
            &DiscrepancyThresholds::default(),
            &ReportOptions::default(),
        )
        .unwrap();

        assert_eq!(portfolio.projects_evaluated, 2);
        assert_eq!(portfolio.projects_with_alerts, 1);
        assert_eq!(portfolio.top_projects[0].project_id, "strict");
        assert_eq!(portfolio.top_projects[0].severity, trowel_core::Severity::Critical);
    }

    #[test]
    fn invalid_project_thresholds_fail_the_batch() {
        let project = ProjectMaterials {
            project_id: "bad".into(),
            thresholds: Some(DiscrepancyThresholds {
                cost: crate::SeverityBands::new(1.0, 2.0, 3.0, 4.0),
                ..DiscrepancyThresholds::default()
            }),
            ..ProjectMaterials::default()
        };
        let err = evaluate_portfolio(
            &[project],
            &DiscrepancyThresholds::default(),
            &ReportOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            WastageError::Validation(ValidationError::InvalidThresholds { .. })
        ));
    }
}
