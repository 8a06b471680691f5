//! # trowel-wastage
//!
//! Material discrepancy detection and wastage reporting for Trowel.
//!
//! - [`DiscrepancyThresholds`]: per-variance percentage bands and cost bands
//! - [`DiscrepancyDetector`]: classifies one material into a [`Severity`] tier
//!   with a cost impact
//! - [`ProjectWastageSummary`] / [`PortfolioWastageSummary`]: severity counts and
//!   projects ranked by discrepancy cost
//! - [`evaluate_portfolio`]: evaluates projects in parallel
//!
//! # Usage
//!
//! ```
//! use trowel_core::Severity;
//! use trowel_wastage::{DiscrepancyDetector, MaterialQuantities};
//!
//! let material = MaterialQuantities {
//!     ordered_quantity: 100.0,
//!     delivered_quantity: 130.0,
//!     unit_cost: Some(50.0),
//!     ..MaterialQuantities::default()
//! };
//! let result = DiscrepancyDetector::default().evaluate(&material);
//! assert_eq!(result.severity, Severity::High);
//! assert_eq!(result.metrics.total_discrepancy_cost, 1500.0);
//! ```
//!
//! [`Severity`]: trowel_core::Severity

pub mod detect;
pub mod error;
pub mod material;
pub mod portfolio;
pub mod summary;
pub mod thresholds;

pub use detect::{
    DiscrepancyAlerts, DiscrepancyDetector, DiscrepancyMetrics, MaterialDiscrepancyResult,
    ThresholdBasis, VarianceAlert,
};
pub use error::WastageError;
pub use material::MaterialQuantities;
pub use portfolio::{PortfolioInput, ProjectMaterials, evaluate_portfolio, evaluate_project};
pub use summary::{
    MaterialCost, PortfolioWastageSummary, ProjectEvaluation, ProjectWastageSummary, ReportOptions,
    SeverityCounts,
};
pub use thresholds::{DiscrepancyThresholds, PartialBands, SeverityBands, VarianceKind};
