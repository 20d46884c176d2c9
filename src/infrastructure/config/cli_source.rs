//! Explicit `--config` overrides.
//!
//! Each argument is either a path to a `.toml` file or a single TOML dotted
//! key assignment such as `build.jobs = 4` or `target."cfg(unix)".runner = "x"`.
//! Arguments are applied in order; later arguments win.

use std::path::Path;

use crate::domain::entities::ConfigValue;
use crate::domain::schema::SchemaRegistry;
use crate::domain::value_objects::{ConfigKey, Definition};
use crate::error::{ConfigError, ConfigResult};
use crate::infrastructure::config::toml_loader::{FileOrigin, LoadedLayer, TomlLoader};

/// One parsed override argument.
#[derive(Debug, Clone, PartialEq)]
pub enum CliOverride {
    /// A file, possibly with includes (lowest precedence first)
    File(Vec<LoadedLayer>),
    /// A single dotted-key assignment
    Value { key: ConfigKey, tree: ConfigValue },
}

impl CliOverride {
    pub fn trees(&self) -> Vec<&ConfigValue> {
        match self {
            CliOverride::File(layers) => layers.iter().map(|l| &l.tree).collect(),
            CliOverride::Value { tree, .. } => vec![tree],
        }
    }
}

/// Parse one `--config` argument.
pub fn parse_override(
    arg: &str,
    cwd: &Path,
    registry: &SchemaRegistry,
    loader: &TomlLoader<'_>,
) -> ConfigResult<CliOverride> {
    if arg.ends_with(".toml") {
        let path = cwd.join(arg);
        if let Some(layers) = loader.load(&path, FileOrigin::Override)? {
            return Ok(CliOverride::File(layers));
        }
        if !arg.contains('=') {
            return Err(ConfigError::InvalidOverride {
                arg: arg.to_string(),
                message: format!("file `{}` does not exist", path.display()),
            });
        }
    }

    let invalid = |message: &str| ConfigError::InvalidOverride {
        arg: arg.to_string(),
        message: message.to_string(),
    };

    let Some((key_text, value_text)) = split_assignment(arg) else {
        return Err(invalid(
            "expected a path to a .toml file or a `KEY = VALUE` expression (such as `build.jobs = 4`)",
        ));
    };

    let key = ConfigKey::parse(key_text).map_err(|e| invalid(&e.to_string()))?;

    let document = format!("value = {}", value_text.trim());
    let mut table: toml::Table = document
        .parse()
        .map_err(|e: toml::de::Error| invalid(&format!("invalid TOML value: {}", e.message().trim())))?;
    let value = table
        .remove("value")
        .ok_or_else(|| invalid("missing value"))?;
    if value.is_table() {
        return Err(invalid(
            "an inline table is not accepted; set each key separately with dotted keys",
        ));
    }

    if let Some(entry) = registry.lookup(&key) {
        if entry.secret {
            return Err(invalid(&format!(
                "`{}` cannot be set through --config for security reasons",
                key
            )));
        }
    }

    let definition = Definition::Cli(None);
    let value = ConfigValue::from_toml(definition.clone(), value)?;
    let mut tree = ConfigValue::empty_table(definition);
    tree.insert(&key, value)?;
    Ok(CliOverride::Value { key, tree })
}

/// Split at the first `=` outside a quoted key segment.
fn split_assignment(arg: &str) -> Option<(&str, &str)> {
    let mut in_quotes = false;
    let mut escaped = false;
    for (i, c) in arg.char_indices() {
        match c {
            _ if escaped => escaped = false,
            '\\' if in_quotes => escaped = true,
            '"' => in_quotes = !in_quotes,
            '=' if !in_quotes => return Some((&arg[..i], &arg[i + 1..])),
            _ => {}
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::fs::MemoryFs;
    use std::path::PathBuf;

    fn parse(arg: &str) -> ConfigResult<CliOverride> {
        let fs = MemoryFs::new().with_file("/cwd/extra.toml", "[net]\nretry = 9\n");
        let loader = TomlLoader::new(&fs);
        parse_override(arg, Path::new("/cwd"), &SchemaRegistry::builtin(), &loader)
    }

    fn value_of(ov: &CliOverride, key: &str) -> ConfigValue {
        ov.trees()[0]
            .get(&ConfigKey::parse(key).unwrap())
            .unwrap()
            .clone()
    }

    #[test]
    fn dotted_key_assignment() {
        let ov = parse("build.jobs = 4").unwrap();
        let jobs = value_of(&ov, "build.jobs");
        assert_eq!(jobs.as_i64(), Some(4));
        assert_eq!(jobs.definition(), &Definition::Cli(None));
    }

    #[test]
    fn quoted_segments_and_equals_inside_quotes() {
        let ov = parse(r#"target."cfg(target_os = \"linux\")".runner = "qemu""#).unwrap();
        match ov {
            CliOverride::Value { key, .. } => {
                assert_eq!(key.segments()[1], r#"cfg(target_os = "linux")"#);
            }
            other => panic!("unexpected override: {other:?}"),
        }
    }

    #[test]
    fn array_values() {
        let ov = parse(r#"build.rustflags = ["-W", "unused"]"#).unwrap();
        assert_eq!(value_of(&ov, "build.rustflags").as_list().unwrap().len(), 2);
    }

    #[test]
    fn file_argument_loads_file() {
        let ov = parse("extra.toml").unwrap();
        assert!(matches!(ov, CliOverride::File(_)));
        assert_eq!(
            value_of(&ov, "net.retry").definition(),
            &Definition::Cli(Some(PathBuf::from("/cwd/extra.toml")))
        );
    }

    #[test]
    fn missing_file_argument_is_an_error() {
        let err = parse("missing.toml").unwrap_err();
        assert!(err.to_string().contains("does not exist"));
    }

    #[test]
    fn inline_table_is_rejected() {
        let err = parse("build = { jobs = 4 }").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidOverride { .. }));
        assert!(err.to_string().contains("inline table"));
    }

    #[test]
    fn secrets_are_rejected() {
        assert!(parse("registry.token = \"abc\"").is_err());
        assert!(parse("registries.crates-io.token = \"abc\"").is_err());
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(parse("not an assignment").is_err());
        assert!(parse("build.jobs = ").is_err());
        assert!(parse("= 3").is_err());
        assert!(parse("build.ratio = 1.5").is_err());
    }
}
