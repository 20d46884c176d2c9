//! `confstack check`

use anyhow::Result;

use confstack::presentation::report::render_warnings;
use confstack::presentation::style::{Styled, Tone};

use super::CommandContext;

pub fn cmd_check(ctx: &CommandContext, deny_warnings: bool) -> Result<()> {
    let resolution = match ctx.resolve() {
        Ok(resolution) => resolution,
        Err(err) => {
            if ctx.json {
                let out = serde_json::json!({
                    "ok": false,
                    "error": format!("{:#}", err),
                    "warnings": [],
                });
                println!("{}", serde_json::to_string_pretty(&out)?);
            } else {
                eprintln!("error: {:#}", err);
            }
            std::process::exit(1);
        }
    };

    let failed = deny_warnings && !resolution.warnings.is_empty();

    if ctx.json {
        let out = serde_json::json!({
            "ok": !failed,
            "error": serde_json::Value::Null,
            "warnings": resolution.warnings.iter().map(|w| serde_json::json!({
                "key": w.key,
                "message": w.to_string(),
                "source": w.definition.to_string(),
                "line": w.line,
                "help": w.help(),
            })).collect::<Vec<_>>(),
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        let color = ctx.stdout_color(&resolution);
        print!("{}", render_warnings(&resolution.warnings, color));
        let loaded = resolution.sources.iter().filter(|s| s.is_loaded()).count();
        let summary = if resolution.warnings.is_empty() {
            Styled::toned(Tone::Success, format!("configuration OK ({} sources)", loaded))
        } else {
            Styled::toned(
                if failed { Tone::Error } else { Tone::Warning },
                format!(
                    "configuration resolved with {} warning(s) ({} sources)",
                    resolution.warnings.len(),
                    loaded
                ),
            )
        };
        println!("{}", summary.render(color));
    }

    if failed {
        std::process::exit(1);
    }
    Ok(())
}
