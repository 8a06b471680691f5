use anyhow::Context;
use trowel_config::TrowelConfig;
use trowel_spending::{BudgetRecommendation, ExpenseRequest, SpendingInput};

use crate::cli::GlobalFlags;
use crate::cli::subcommands::SpendingCommands;
use crate::commands::input::read_json;
use crate::output::output;

/// Handle `trowel spending`.
pub fn handle(
    action: &SpendingCommands,
    config: &TrowelConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        SpendingCommands::Summarize { input } => {
            let spending = SpendingInput::from_value(read_json(input)?)?;
            output(&spending.summarize().rounded(), flags.format)
        }
        SpendingCommands::Recommend {
            input,
            buffer_ratio,
            as_budget,
        } => {
            let spending = SpendingInput::from_value(read_json(input)?)?;
            let ratio = buffer_ratio.unwrap_or(config.allocation.buffer_ratio);
            if ratio < 0.0 {
                tracing::warn!(ratio, "negative buffer ratio treated as zero");
            }
            let recommendation = BudgetRecommendation::from_summary(&spending.summarize(), ratio);
            if *as_budget {
                output(&recommendation.to_budget(), flags.format)
            } else {
                output(&recommendation.rounded(), flags.format)
            }
        }
        SpendingCommands::CheckExpense { input } => {
            let request: ExpenseRequest =
                serde_json::from_value(read_json(input)?).context("invalid expense request")?;
            let check = request.check(config.allocation.warning_threshold_percent);
            output(&check, flags.format)
        }
    }
}
