//! `confstack sources`

use anyhow::Result;

use confstack::application::{SourceKind, SourceRecord};
use confstack::domain::services::CandidateScope;
use confstack::presentation::report::render_sources;

use super::CommandContext;

pub fn cmd_sources(ctx: &CommandContext) -> Result<()> {
    let resolution = ctx.resolve()?;

    if ctx.json {
        let sources: Vec<_> = resolution.sources.iter().map(source_json).collect();
        let out = serde_json::json!({
            "sources": sources,
            "warnings": resolution.warnings.iter().map(|w| w.to_string()).collect::<Vec<_>>(),
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    ctx.report_diagnostics(&resolution);
    print!(
        "{}",
        render_sources(&resolution.sources, ctx.stdout_color(&resolution))
    );
    Ok(())
}

fn source_json(source: &SourceRecord) -> serde_json::Value {
    let (kind, scope) = match &source.kind {
        SourceKind::File(scope) => ("file", Some(*scope)),
        SourceKind::Missing(scope) => ("missing", Some(*scope)),
        SourceKind::Include => ("include", None),
        SourceKind::Environment => ("env", None),
        SourceKind::CliFile => ("cli-file", None),
        SourceKind::CliValue(_) => ("cli-value", None),
    };
    let scope = scope.map(|scope| match scope {
        CandidateScope::Global => serde_json::json!("global"),
        CandidateScope::Directory { depth } => serde_json::json!({ "depth": depth }),
    });
    let key = match &source.kind {
        SourceKind::CliValue(key) => Some(key.to_string()),
        _ => None,
    };
    serde_json::json!({
        "kind": kind,
        "loaded": source.is_loaded(),
        "definition": source.definition.to_string(),
        "scope": scope,
        "key": key,
    })
}
