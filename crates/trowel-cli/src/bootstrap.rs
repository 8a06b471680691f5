use anyhow::Context;
use trowel_config::TrowelConfig;

use crate::cli::GlobalFlags;

/// Load layered config, with `--config` on top of the user and project files.
pub fn load_config(flags: &GlobalFlags) -> anyhow::Result<TrowelConfig> {
    match &flags.config {
        Some(path) => {
            dotenvy::dotenv().ok();
            TrowelConfig::load_from(path)
                .with_context(|| format!("failed to load config from {}", path.display()))
        }
        None => TrowelConfig::load_with_dotenv().context("failed to load configuration"),
    }
}
