use serde::Serialize;
use serde_json::Value;
use trowel_budget::{BudgetHierarchy, SumMismatch, apply_raw_edit, convert};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::InputArgs;
use crate::cli::subcommands::BudgetCommands;
use crate::commands::input::read_json;
use crate::output::output;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CheckResponse {
    consistent: bool,
    total: f64,
    mismatches: Vec<SumMismatch>,
}

/// Handle `trowel budget`.
pub fn handle(action: &BudgetCommands, flags: &GlobalFlags) -> anyhow::Result<()> {
    match action {
        BudgetCommands::Convert { input } => output(&load(input)?, flags.format),
        BudgetCommands::Edit { path, value, input } => {
            let budget = load(input)?;
            let edited = apply_raw_edit(&budget, path, &Value::String(value.clone()))?;
            output(&edited, flags.format)
        }
        BudgetCommands::Check { input } => {
            let budget = load(input)?;
            let mismatches = budget.check_invariants();
            output(
                &CheckResponse {
                    consistent: mismatches.is_empty(),
                    total: budget.total,
                    mismatches,
                },
                flags.format,
            )
        }
    }
}

fn load(input: &InputArgs) -> anyhow::Result<BudgetHierarchy> {
    Ok(convert(&read_json(input)?)?)
}
