use dv_schema::SchemaRegistry;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::SchemaArgs;
use crate::output::output;

/// Handle `dvz schema`.
pub fn handle(args: &SchemaArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    let registry = SchemaRegistry::new()?;
    match &args.name {
        Some(name) => {
            let Some(schema) = registry.get(name) else {
                anyhow::bail!(
                    "unknown payload '{name}' (available: {})",
                    registry.list().join(", ")
                );
            };
            output(schema, flags.format)
        }
        None => output(&registry.list(), flags.format),
    }
}
