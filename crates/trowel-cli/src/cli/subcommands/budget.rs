use clap::Subcommand;

use crate::cli::root_commands::InputArgs;

/// Budget commands.
#[derive(Clone, Debug, Subcommand)]
pub enum BudgetCommands {
    /// Normalize a legacy or partial budget into the canonical hierarchy.
    Convert {
        #[command(flatten)]
        input: InputArgs,
    },
    /// Set one field and recalculate the totals above it.
    Edit {
        /// Dotted path, e.g. `directCosts.materials.structural` or `contingencyReserve`
        path: String,
        /// New value; non-numeric input is treated as zero
        value: String,
        #[command(flatten)]
        input: InputArgs,
    },
    /// Report totals that disagree with the sums beneath them.
    Check {
        #[command(flatten)]
        input: InputArgs,
    },
}
