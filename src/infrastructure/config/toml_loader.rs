//! TOML configuration file loading.
//!
//! Parses a file into a [`ConfigValue`] tree and expands its `include`
//! directive. Included files are loaded before the including file, so the
//! including file wins on conflicts; among includes, later entries win.

use std::io;
use std::path::{Path, PathBuf};

use crate::domain::entities::ConfigValue;
use crate::domain::ports::ConfigSource;
use crate::domain::value_objects::Definition;
use crate::error::{ConfigError, ConfigResult};

const INCLUDE_KEY: &str = "include";

/// How a file entered the hierarchy; decides the [`Definition`] of its values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileOrigin {
    /// Found by the directory walk or as the global file
    Discovered,
    /// Named by a `--config` argument
    Override,
}

impl FileOrigin {
    pub fn definition(self, path: &Path) -> Definition {
        match self {
            FileOrigin::Discovered => Definition::Path(path.to_path_buf()),
            FileOrigin::Override => Definition::Cli(Some(path.to_path_buf())),
        }
    }
}

/// One parsed file. A file with includes yields several layers.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedLayer {
    pub path: PathBuf,
    pub text: String,
    pub tree: ConfigValue,
}

pub struct TomlLoader<'a> {
    source: &'a dyn ConfigSource,
}

impl<'a> TomlLoader<'a> {
    pub fn new(source: &'a dyn ConfigSource) -> Self {
        Self { source }
    }

    /// Load `path` and everything it includes, lowest precedence first.
    /// Returns `None` when `path` does not exist.
    pub fn load(&self, path: &Path, origin: FileOrigin) -> ConfigResult<Option<Vec<LoadedLayer>>> {
        let mut stack = Vec::new();
        let mut layers = Vec::new();
        if self.load_into(path, origin, &mut stack, &mut layers)? {
            Ok(Some(layers))
        } else {
            Ok(None)
        }
    }

    fn load_into(
        &self,
        path: &Path,
        origin: FileOrigin,
        stack: &mut Vec<PathBuf>,
        layers: &mut Vec<LoadedLayer>,
    ) -> ConfigResult<bool> {
        if stack.iter().any(|p| p == path) {
            return Err(ConfigError::IncludeCycle {
                path: path.to_path_buf(),
            });
        }
        let Some(text) = self.source.read(path)? else {
            return Ok(false);
        };
        tracing::debug!(path = %path.display(), "loading configuration file");

        let definition = origin.definition(path);
        let mut table = parse_table(&text, &definition)?;
        let includes = match table.remove(INCLUDE_KEY) {
            Some(value) => parse_includes(value, path, &definition)?,
            None => Vec::new(),
        };

        stack.push(path.to_path_buf());
        for include in includes {
            let found = self.load_into(&include.path, origin, stack, layers)?;
            if !found {
                if include.optional {
                    tracing::debug!(path = %include.path.display(), "optional include not found");
                    continue;
                }
                return Err(ConfigError::Io {
                    path: include.path,
                    source: io::Error::new(
                        io::ErrorKind::NotFound,
                        format!("included from `{}` but does not exist", path.display()),
                    ),
                });
            }
        }
        stack.pop();

        let tree = ConfigValue::from_toml(definition, toml::Value::Table(table))?;
        layers.push(LoadedLayer {
            path: path.to_path_buf(),
            text,
            tree,
        });
        Ok(true)
    }
}

/// Parse TOML text into a table, reporting the error position.
pub fn parse_table(text: &str, definition: &Definition) -> ConfigResult<toml::Table> {
    text.parse::<toml::Table>().map_err(|e| {
        let (line, column) = match e.span() {
            Some(span) => {
                let (line, column) = line_and_column(text, span.start);
                (Some(line), Some(column))
            }
            None => (None, None),
        };
        ConfigError::Parse {
            origin: definition.clone(),
            line,
            column,
            message: e.message().trim().to_string(),
        }
    })
}

/// Parse TOML text straight into a tree.
pub fn parse_config(text: &str, definition: Definition) -> ConfigResult<ConfigValue> {
    let table = parse_table(text, &definition)?;
    ConfigValue::from_toml(definition, toml::Value::Table(table))
}

/// 1-indexed line and column of a byte offset.
fn line_and_column(text: &str, offset: usize) -> (usize, usize) {
    let before = &text[..offset.min(text.len())];
    let line = before.matches('\n').count() + 1;
    let column = before
        .rfind('\n')
        .map_or(before.chars().count(), |nl| before[nl + 1..].chars().count())
        + 1;
    (line, column)
}

#[derive(Debug, PartialEq, Eq)]
struct Include {
    path: PathBuf,
    optional: bool,
}

fn parse_includes(
    value: toml::Value,
    including: &Path,
    definition: &Definition,
) -> ConfigResult<Vec<Include>> {
    let invalid = |found: &str| ConfigError::SchemaViolation {
        key: INCLUDE_KEY.to_string(),
        expected: "a string, or a list of strings or `{ path, optional }` tables".to_string(),
        found: found.to_string(),
        definition: definition.clone(),
    };

    let entries = match value {
        toml::Value::String(_) | toml::Value::Table(_) => vec![value],
        toml::Value::Array(items) => items,
        other => return Err(invalid(other.type_str())),
    };

    let base = including.parent().unwrap_or(Path::new(""));
    entries
        .into_iter()
        .map(|entry| {
            let (raw, optional) = match entry {
                toml::Value::String(s) => (s, false),
                toml::Value::Table(mut t) => {
                    let raw = match t.remove("path") {
                        Some(toml::Value::String(s)) => s,
                        _ => return Err(invalid("a table without a string `path`")),
                    };
                    let optional = match t.remove("optional") {
                        None => false,
                        Some(toml::Value::Boolean(b)) => b,
                        Some(_) => return Err(invalid("a non-boolean `optional`")),
                    };
                    (raw, optional)
                }
                other => return Err(invalid(other.type_str())),
            };
            if !raw.ends_with(".toml") {
                return Err(ConfigError::SchemaViolation {
                    key: INCLUDE_KEY.to_string(),
                    expected: "a path ending in `.toml`".to_string(),
                    found: format!("string `{}`", raw),
                    definition: definition.clone(),
                });
            }
            Ok(Include {
                path: base.join(raw),
                optional,
            })
        })
        .collect()
}
