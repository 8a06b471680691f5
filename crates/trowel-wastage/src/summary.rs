//! Per-project and cross-project severity roll-ups.
//!
//! Costs accumulate unrounded; the `rounded` methods produce the output copy.

use std::cmp::Ordering;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use trowel_core::{Severity, round_currency};

use crate::detect::MaterialDiscrepancyResult;

/// How many entries the ranked lists keep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct ReportOptions {
    pub top_projects: usize,
    pub top_materials: usize,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            top_projects: 5,
            top_materials: 5,
        }
    }
}

/// Materials per severity tier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SeverityCounts {
    pub critical: usize,
    pub high: usize,
    pub medium: usize,
    pub low: usize,
    pub none: usize,
}

impl SeverityCounts {
    pub const fn record(&mut self, severity: Severity) {
        match severity {
            Severity::Critical => self.critical += 1,
            Severity::High => self.high += 1,
            Severity::Medium => self.medium += 1,
            Severity::Low => self.low += 1,
            Severity::None => self.none += 1,
        }
    }

    #[must_use]
    pub const fn get(&self, severity: Severity) -> usize {
        match severity {
            Severity::Critical => self.critical,
            Severity::High => self.high,
            Severity::Medium => self.medium,
            Severity::Low => self.low,
            Severity::None => self.none,
        }
    }

    /// Tally every result by tier.
    #[must_use]
    pub fn from_results(results: &[MaterialDiscrepancyResult]) -> Self {
        results.iter().fold(Self::default(), |mut counts, result| {
            counts.record(result.severity);
            counts
        })
    }

    /// Materials at any alerting tier.
    #[must_use]
    pub const fn alerting(&self) -> usize {
        self.critical + self.high + self.medium + self.low
    }

    #[must_use]
    pub const fn merged(self, other: Self) -> Self {
        Self {
            critical: self.critical + other.critical,
            high: self.high + other.high,
            medium: self.medium + other.medium,
            low: self.low + other.low,
            none: self.none + other.none,
        }
    }
}

/// One material's share of a project's discrepancy cost.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MaterialCost {
    pub material_id: Option<String>,
    pub name: Option<String>,
    pub severity: Severity,
    pub cost: f64,
}

/// Wastage roll-up for one project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProjectWastageSummary {
    pub project_id: String,
    pub project_name: Option<String>,
    pub severity: Severity,
    pub counts: SeverityCounts,
    pub materials_evaluated: usize,
    pub materials_with_alerts: usize,
    pub total_discrepancy_cost: f64,
    pub top_materials: Vec<MaterialCost>,
}

impl ProjectWastageSummary {
    /// Roll up a project's results. `None` when no material alerts.
    #[must_use]
    pub fn from_results(
        project_id: &str,
        project_name: Option<&str>,
        results: &[MaterialDiscrepancyResult],
        top_materials: usize,
    ) -> Option<Self> {
        let counts = SeverityCounts::from_results(results);
        let mut severity = Severity::None;
        let mut total = 0.0;
        let mut costs = Vec::new();

        for result in results {
            if !result.has_any_alert() {
                continue;
            }
            severity = severity.max(result.severity);
            total += result.total_discrepancy_cost();
            costs.push(MaterialCost {
                material_id: result.material_id.clone(),
                name: result.name.clone(),
                severity: result.severity,
                cost: result.total_discrepancy_cost(),
            });
        }

        if costs.is_empty() {
            return None;
        }
        costs.sort_by(|a, b| {
            b.cost
                .partial_cmp(&a.cost)
                .unwrap_or(Ordering::Equal)
                .then_with(|| b.severity.cmp(&a.severity))
        });
        costs.truncate(top_materials);

        Some(Self {
            project_id: project_id.to_owned(),
            project_name: project_name.map(str::to_owned),
            severity,
            counts,
            materials_evaluated: results.len(),
            materials_with_alerts: counts.alerting(),
            total_discrepancy_cost: total,
            top_materials: costs,
        })
    }

    #[must_use]
    pub fn rounded(&self) -> Self {
        let mut out = self.clone();
        out.total_discrepancy_cost = round_currency(out.total_discrepancy_cost);
        for material in &mut out.top_materials {
            material.cost = round_currency(material.cost);
        }
        out
    }
}

/// One evaluated project: tier counts for all of its materials, plus the
/// roll-up when at least one material alerts.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectEvaluation {
    pub counts: SeverityCounts,
    pub summary: Option<ProjectWastageSummary>,
}

impl ProjectEvaluation {
    #[must_use]
    pub fn from_results(
        project_id: &str,
        project_name: Option<&str>,
        results: &[MaterialDiscrepancyResult],
        top_materials: usize,
    ) -> Self {
        Self {
            counts: SeverityCounts::from_results(results),
            summary: ProjectWastageSummary::from_results(
                project_id,
                project_name,
                results,
                top_materials,
            ),
        }
    }
}

/// Wastage roll-up across projects.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioWastageSummary {
    pub projects_evaluated: usize,
    pub projects_with_alerts: usize,
    /// Materials per tier across every evaluated project, clean ones included.
    pub counts: SeverityCounts,
    pub total_discrepancy_cost: f64,
    /// Highest-cost projects first; ties by project id.
    pub top_projects: Vec<ProjectWastageSummary>,
}

impl PortfolioWastageSummary {
    /// Merge every project's evaluation and rank the alerting ones.
    #[must_use]
    pub fn from_evaluations(evaluations: Vec<ProjectEvaluation>, top_projects: usize) -> Self {
        let projects_evaluated = evaluations.len();
        let counts = evaluations
            .iter()
            .fold(SeverityCounts::default(), |acc, e| acc.merged(e.counts));
        let projects = evaluations.into_iter().filter_map(|e| e.summary).collect();
        Self {
            counts,
            ..Self::from_projects(projects_evaluated, projects, top_projects)
        }
    }

    /// Merge per-project summaries and rank them by discrepancy cost.
    ///
    /// Projects with zero cost are counted in the totals but not ranked. Only
    /// the given projects contribute to `counts`; use
    /// [`Self::from_evaluations`] to include clean projects.
    #[must_use]
    pub fn from_projects(
        projects_evaluated: usize,
        mut projects: Vec<ProjectWastageSummary>,
        top_projects: usize,
    ) -> Self {
        let counts = projects
            .iter()
            .fold(SeverityCounts::default(), |acc, p| acc.merged(p.counts));
        let total = projects.iter().map(|p| p.total_discrepancy_cost).sum();
        let projects_with_alerts = projects.len();

        projects.retain(|p| p.total_discrepancy_cost > 0.0);
        projects.sort_by(rank);
        projects.truncate(top_projects);

        Self {
            projects_evaluated,
            projects_with_alerts,
            counts,
            total_discrepancy_cost: total,
            top_projects: projects,
        }
    }

    #[must_use]
    pub fn rounded(&self) -> Self {
        Self {
            projects_evaluated: self.projects_evaluated,
            projects_with_alerts: self.projects_with_alerts,
            counts: self.counts,
            total_discrepancy_cost: round_currency(self.total_discrepancy_cost),
            top_projects: self
                .top_projects
                .iter()
                .map(ProjectWastageSummary::rounded)
                .collect(),
        }
    }
}

fn rank(a: &ProjectWastageSummary, b: &ProjectWastageSummary) -> Ordering {
    b.total_discrepancy_cost
        .partial_cmp(&a.total_discrepancy_cost)
        .unwrap_or(Ordering::Equal)
        .then_with(|| a.project_id.cmp(&b.project_id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn result(id: &str, severity: Severity, cost: f64) -> MaterialDiscrepancyResult {
        let mut result = MaterialDiscrepancyResult {
            material_id: Some(id.to_owned()),
            severity,
            ..MaterialDiscrepancyResult::default()
        };
        result.alerts.has_any_alert = severity.is_alert();
        result.metrics.total_discrepancy_cost = cost;
        result
    }

    fn project(id: &str, cost: f64) -> ProjectWastageSummary {
        ProjectWastageSummary::from_results(id, None, &[result("m", Severity::Low, cost)], 5)
            .unwrap()
    }

    #[test]
    fn project_without_alerts_is_omitted() {
        let results = [result("a", Severity::None, 0.0), result("b", Severity::None, 0.0)];
        assert_eq!(
            ProjectWastageSummary::from_results("p", None, &results, 5),
            None
        );
    }

    #[test]
    fn project_counts_every_tier_and_sums_alerting_cost() {
        let results = [
            result("a", Severity::High, 1500.0),
            result("b", Severity::None, 0.0),
            result("c", Severity::Critical, 200.0),
            result("d", Severity::Low, 300.0),
        ];
        let summary = ProjectWastageSummary::from_results("p", Some("Tower"), &results, 2).unwrap();

        assert_eq!(summary.severity, Severity::Critical);
        assert_eq!(summary.counts.get(Severity::None), 1);
        assert_eq!(summary.counts.alerting(), 3);
        assert_eq!(summary.materials_evaluated, 4);
        assert_eq!(summary.materials_with_alerts, 3);
        assert!((summary.total_discrepancy_cost - 2000.0).abs() < f64::EPSILON);
        let top: Vec<_> = summary
            .top_materials
            .iter()
            .map(|m| m.material_id.as_deref().unwrap_or_default())
            .collect();
        assert_eq!(top, vec!["a", "d"]);
    }

    #[test]
    fn portfolio_ranks_by_cost_and_drops_zero_cost_projects() {
        let costs = [500.0, 1500.0, 0.0, 3000.0, 200.0, 4000.0, 900.0];
        let projects = costs
            .iter()
            .enumerate()
            .map(|(i, cost)| project(&format!("p{i}"), *cost))
            .collect();
        let portfolio = PortfolioWastageSummary::from_projects(7, projects, 5);

        let ranked: Vec<_> = portfolio
            .top_projects
            .iter()
            .map(|p| (p.project_id.as_str(), p.total_discrepancy_cost))
            .collect();
        assert_eq!(
            ranked,
            vec![
                ("p5", 4000.0),
                ("p3", 3000.0),
                ("p1", 1500.0),
                ("p6", 900.0),
                ("p0", 500.0),
            ]
        );
        assert_eq!(portfolio.projects_with_alerts, 7);
        assert!((portfolio.total_discrepancy_cost - 10_100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn clean_projects_still_count_toward_tiers() {
        let evaluations = vec![
            ProjectEvaluation::from_results("dirty", None, &[result("a", Severity::High, 900.0)], 5),
            ProjectEvaluation::from_results(
                "clean",
                None,
                &[result("b", Severity::None, 0.0), result("c", Severity::None, 0.0)],
                5,
            ),
        ];
        let portfolio = PortfolioWastageSummary::from_evaluations(evaluations, 5);

        assert_eq!(portfolio.projects_evaluated, 2);
        assert_eq!(portfolio.projects_with_alerts, 1);
        assert_eq!(portfolio.counts.none, 2);
        assert_eq!(portfolio.counts.high, 1);
        assert_eq!(portfolio.top_projects.len(), 1);
    }

    #[test]
    fn equal_costs_rank_by_project_id() {
        let projects = vec![project("b", 100.0), project("a", 100.0), project("c", 100.0)];
        let portfolio = PortfolioWastageSummary::from_projects(3, projects, 2);
        let ids: Vec<_> = portfolio.top_projects.iter().map(|p| p.project_id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn rounding_is_applied_after_summing() {
        let projects = vec![project("a", 0.004), project("b", 0.004), project("c", 0.004)];
        let portfolio = PortfolioWastageSummary::from_projects(3, projects, 5).rounded();
        assert!((portfolio.total_discrepancy_cost - 0.01).abs() < f64::EPSILON);
        assert!(portfolio.top_projects.iter().all(|p| p.total_discrepancy_cost.abs() < f64::EPSILON));
    }
}
