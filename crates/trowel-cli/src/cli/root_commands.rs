use clap::{Args, Subcommand};

use crate::cli::subcommands::{BudgetCommands, SpendingCommands, WastageCommands};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Convert, edit, and check project budgets.
    Budget {
        #[command(subcommand)]
        action: BudgetCommands,
    },
    /// Aggregate spending, recommend budgets, and check expenses.
    Spending {
        #[command(subcommand)]
        action: SpendingCommands,
    },
    /// Material discrepancy detection and wastage reports.
    Wastage {
        #[command(subcommand)]
        action: WastageCommands,
    },
    /// Print or validate against a JSON Schema.
    Schema(SchemaArgs),
}

/// JSON input source shared by every data command.
#[derive(Clone, Debug, Args)]
pub struct InputArgs {
    /// JSON file to read, or `-` for stdin
    #[arg(default_value = "-", value_name = "FILE")]
    pub input: String,
}

#[derive(Clone, Debug, Args)]
pub struct SchemaArgs {
    /// Schema name, or `list` to show all names
    pub name: String,

    /// Validate this JSON file (or `-` for stdin) instead of printing the schema
    #[arg(long, value_name = "FILE")]
    pub validate: Option<String>,
}
