use anyhow::{anyhow, bail};
use serde_json::json;
use trowel_schema::{SchemaError, SchemaRegistry};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::SchemaArgs;
use crate::commands::input::read_json_from;
use crate::output::output;

/// Handle `trowel schema`.
pub fn handle(args: &SchemaArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    let registry = SchemaRegistry::new();

    if args.name == "list" {
        return output(&registry.list(), flags.format);
    }

    let Some(source) = &args.validate else {
        let schema = registry
            .get(&args.name)
            .ok_or_else(|| anyhow!("unknown schema '{}'; run `trowel schema list`", args.name))?;
        return output(schema, flags.format);
    };

    let document = read_json_from(source)?;
    match registry.validate(&args.name, &document) {
        Ok(()) => output(&json!({ "valid": true, "errors": [] }), flags.format),
        Err(SchemaError::ValidationFailed { errors }) => {
            output(&json!({ "valid": false, "errors": errors }), flags.format)?;
            bail!("{source} does not match schema '{}'", args.name)
        }
        Err(other) => Err(other.into()),
    }
}
