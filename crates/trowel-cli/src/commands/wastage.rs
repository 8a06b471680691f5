use anyhow::Context;
use trowel_config::TrowelConfig;
use trowel_wastage::{DiscrepancyDetector, MaterialQuantities, PortfolioInput, evaluate_portfolio};

use crate::cli::GlobalFlags;
use crate::cli::subcommands::WastageCommands;
use crate::commands::input::read_json;
use crate::output::output;

/// Handle `trowel wastage`.
pub fn handle(
    action: &WastageCommands,
    config: &TrowelConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let thresholds = config.discrepancy.thresholds();
    match action {
        WastageCommands::Material { input } => {
            let material: MaterialQuantities =
                serde_json::from_value(read_json(input)?).context("invalid material")?;
            let detector = DiscrepancyDetector::new(thresholds)?;
            output(&detector.evaluate(&material).rounded(), flags.format)
        }
        WastageCommands::Portfolio { input, top } => {
            let portfolio = PortfolioInput::from_value(read_json(input)?)?;
            let mut options = config.reporting.options();
            if let Some(top) = top {
                options.top_projects = *top;
            }
            let summary = evaluate_portfolio(&portfolio.projects, &thresholds, &options)?;
            output(&summary.rounded(), flags.format)
        }
    }
}
