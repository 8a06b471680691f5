use clap::Subcommand;

use crate::cli::root_commands::InputArgs;

/// Spending commands.
#[derive(Clone, Debug, Subcommand)]
pub enum SpendingCommands {
    /// Actual, committed, and minimum spending per scope and category.
    Summarize {
        #[command(flatten)]
        input: InputArgs,
    },
    /// Recommend allocations from existing spending.
    Recommend {
        #[command(flatten)]
        input: InputArgs,
        /// Buffer ratio (defaults to `allocation.buffer_ratio`)
        #[arg(long)]
        buffer_ratio: Option<f64>,
        /// Emit the project recommendation as a canonical budget
        #[arg(long)]
        as_budget: bool,
    },
    /// Check whether a new expense fits the remaining budget.
    CheckExpense {
        #[command(flatten)]
        input: InputArgs,
    },
}
