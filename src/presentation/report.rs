//! Text reports: warnings, sources, overrides and schema listings.

use std::fmt::Write as _;

use crate::application::{SourceKind, SourceRecord};
use crate::domain::schema::{DefaultValue, MergeStrategy, SchemaEntry, Stability};
use crate::domain::services::{CandidateScope, Override};
use crate::domain::value_objects::ConfigWarning;
use crate::presentation::style::{Styled, Tone};

/// `warning: ...` lines, each followed by an optional help line.
pub fn render_warnings(warnings: &[ConfigWarning], color: bool) -> String {
    let mut out = String::new();
    for warning in warnings {
        let label = Styled::toned(Tone::Warning, "warning").bold().render(color);
        let _ = writeln!(out, "{}: {}", label, warning);
        if let Some(help) = warning.help() {
            let _ = writeln!(out, "  {} {}", Styled::toned(Tone::Info, "= help:").render(color), help);
        }
    }
    out
}

/// Sources in precedence order, lowest first.
pub fn render_sources(sources: &[SourceRecord], color: bool) -> String {
    let mut out = String::new();
    for source in sources {
        let (status, tone) = match &source.kind {
            SourceKind::Missing(_) => ("missing", Tone::Dim),
            // Extension-less `config`
            SourceKind::File(_)
                if source
                    .definition
                    .file()
                    .is_some_and(|p| p.extension().is_none()) =>
            {
                ("legacy", Tone::Warning)
            }
            _ => ("loaded", Tone::Success),
        };
        let scope = match &source.kind {
            SourceKind::File(scope) | SourceKind::Missing(scope) => scope_label(*scope),
            SourceKind::Include => "include".to_string(),
            SourceKind::Environment => "env".to_string(),
            SourceKind::CliFile => "--config file".to_string(),
            SourceKind::CliValue(key) => format!("--config {}", key),
        };
        let _ = writeln!(
            out,
            "{:<8} {:<16} {}",
            Styled::toned(tone, status).render(color),
            scope,
            source.definition
        );
    }
    out
}

fn scope_label(scope: CandidateScope) -> String {
    match scope {
        CandidateScope::Global => "global".to_string(),
        CandidateScope::Directory { depth: 0 } => "cwd".to_string(),
        CandidateScope::Directory { depth } => format!("ancestor +{}", depth),
    }
}

pub fn render_overrides(overrides: &[Override]) -> String {
    let mut out = String::new();
    for o in overrides {
        let _ = writeln!(out, "`{}` from {} overridden by {}", o.key, o.from, o.by);
    }
    out
}

/// One line per schema entry: pattern, shape, then flags.
pub fn render_schema<'a>(entries: impl IntoIterator<Item = &'a SchemaEntry>) -> String {
    let mut out = String::new();
    for entry in entries {
        let mut flags = Vec::new();
        if entry.shape.is_list_like() && entry.merge == MergeStrategy::Replace {
            flags.push("replace-only".to_string());
        }
        match entry.stability {
            Stability::Stable => {}
            Stability::Deprecated(_) => flags.push("deprecated".to_string()),
            Stability::Removed(_) => flags.push("removed".to_string()),
        }
        if entry.secret {
            flags.push("secret".to_string());
        }
        if let Some(default) = describe_default(entry.default) {
            flags.push(format!("default: {}", default));
        }
        if !entry.env_aliases.is_empty() {
            flags.push(format!("env: {}", entry.env_aliases.join(", ")));
        }

        let _ = write!(out, "{} : {}", entry.pattern, entry.shape);
        if !flags.is_empty() {
            let _ = write!(out, " [{}]", flags.join("; "));
        }
        out.push('\n');
    }
    out
}

fn describe_default(default: DefaultValue) -> Option<String> {
    match default {
        DefaultValue::None => None,
        DefaultValue::Str(s) => Some(format!("{:?}", s)),
        DefaultValue::Int(i) => Some(i.to_string()),
        DefaultValue::Bool(b) => Some(b.to_string()),
        DefaultValue::List(items) => Some(format!("{:?}", items)),
        DefaultValue::Parallelism => Some("number of CPUs".to_string()),
        DefaultValue::Inherit(var) => Some(format!("${}", var)),
    }
}
