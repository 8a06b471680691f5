use clap::Subcommand;

use crate::cli::root_commands::InputArgs;

/// Wastage commands.
#[derive(Clone, Debug, Subcommand)]
pub enum WastageCommands {
    /// Classify one material's discrepancies.
    Material {
        #[command(flatten)]
        input: InputArgs,
    },
    /// Rank projects by discrepancy cost.
    Portfolio {
        #[command(flatten)]
        input: InputArgs,
        /// Projects to keep (defaults to `reporting.top_projects`)
        #[arg(long)]
        top: Option<usize>,
    },
}
