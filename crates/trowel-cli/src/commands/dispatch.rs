use trowel_config::TrowelConfig;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;

/// Dispatch a parsed command to the corresponding handler module.
pub fn dispatch(
    command: &Commands,
    config: &TrowelConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match command {
        Commands::Budget { action } => commands::budget::handle(action, flags),
        Commands::Spending { action } => commands::spending::handle(action, config, flags),
        Commands::Wastage { action } => commands::wastage::handle(action, config, flags),
        Commands::Schema(args) => commands::schema::handle(args, flags),
    }
}
