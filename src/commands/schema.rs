//! `confstack schema`

use anyhow::Result;

use confstack::domain::schema::{MergeStrategy, SchemaEntry, SchemaRegistry};
use confstack::domain::value_objects::ConfigKey;
use confstack::presentation::report::render_schema;

use super::CommandContext;

pub fn cmd_schema(ctx: &CommandContext, prefix: Option<&str>) -> Result<()> {
    let registry = SchemaRegistry::builtin();
    let prefix = prefix
        .filter(|p| !p.trim().is_empty())
        .map(ConfigKey::parse)
        .transpose()?;
    let entries: Vec<&SchemaEntry> = match &prefix {
        Some(prefix) => registry.entries_under(prefix).collect(),
        None => registry.entries().iter().collect(),
    };

    if ctx.json {
        let out: Vec<_> = entries
            .iter()
            .map(|e| {
                serde_json::json!({
                    "key": e.pattern,
                    "shape": e.shape.to_string(),
                    "replace_only": e.merge == MergeStrategy::Replace,
                    "secret": e.secret,
                    "env_aliases": e.env_aliases,
                    "doc": e.doc,
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    print!("{}", render_schema(entries));
    Ok(())
}
