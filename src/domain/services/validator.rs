//! Validation and coercion of the merged tree against the schema.
//!
//! - Unknown leaves produce an `UnrecognizedKey` warning (with a typo
//!   suggestion when a sibling key is close) and are kept as-is
//! - Deprecated keys produce a warning; removed keys are an error
//! - Values are coerced to their declared shape. Strings are converted to
//!   booleans or integers only when they came from the environment, where
//!   everything is a string
//! - List-like shapes are normalized to lists

use crate::domain::entities::{ConfigTable, ConfigValue};
use crate::domain::schema::{SchemaEntry, SchemaRegistry, Shape, Stability};
use crate::domain::services::suggest::suggest;
use crate::domain::value_objects::{ConfigKey, ConfigWarning, Definition, WarningKind};
use crate::error::{ConfigError, ConfigResult};

#[derive(Debug, Clone, PartialEq)]
pub struct Validated {
    pub tree: ConfigValue,
    pub warnings: Vec<ConfigWarning>,
}

pub struct Validator<'a> {
    registry: &'a SchemaRegistry,
}

impl<'a> Validator<'a> {
    pub fn new(registry: &'a SchemaRegistry) -> Self {
        Self { registry }
    }

    /// Validate a whole tree. The first schema violation aborts.
    pub fn validate(&self, tree: ConfigValue) -> ConfigResult<Validated> {
        let mut warnings = Vec::new();
        let mut key = ConfigKey::root();
        let tree = self.visit(&mut key, tree, &mut warnings)?;
        Ok(Validated { tree, warnings })
    }

    fn visit(
        &self,
        key: &mut ConfigKey,
        value: ConfigValue,
        warnings: &mut Vec<ConfigWarning>,
    ) -> ConfigResult<ConfigValue> {
        if let Some(entry) = self.registry.lookup(key) {
            self.check_stability(entry, key, &value, warnings)?;
            return match entry.shape {
                Shape::Any => Ok(value),
                Shape::Table => match value {
                    ConfigValue::Table(table, def) => self.visit_table(key, table, def, warnings),
                    other => Err(violation(key, "a table".to_string(), &other)),
                },
                // `OneOf` with a table alternative: nested entries validate the table
                Shape::OneOf(_) if entry.shape.allows_children() => match value {
                    ConfigValue::Table(table, def) => self.visit_table(key, table, def, warnings),
                    other => coerce(key, entry.shape, entry, other),
                },
                shape => coerce(key, shape, entry, value),
            };
        }

        match value {
            ConfigValue::Table(table, def) if key.is_root() || self.registry.is_table_prefix(key) => {
                self.visit_table(key, table, def, warnings)
            }
            other if self.registry.is_table_prefix(key) => {
                Err(violation(key, "a table".to_string(), &other))
            }
            ConfigValue::Table(table, def) => {
                // Unknown table: report each leaf below it.
                self.visit_table(key, table, def, warnings)
            }
            leaf => {
                warnings.push(self.unrecognized(key, leaf.definition()));
                Ok(leaf)
            }
        }
    }

    fn visit_table(
        &self,
        key: &mut ConfigKey,
        table: ConfigTable,
        def: Definition,
        warnings: &mut Vec<ConfigWarning>,
    ) -> ConfigResult<ConfigValue> {
        let mut out = ConfigTable::new();
        for (k, v) in table {
            key.push(k.clone());
            let result = self.visit(key, v, warnings);
            key.pop();
            out.insert(k, result?);
        }
        Ok(ConfigValue::Table(out, def))
    }

    fn check_stability(
        &self,
        entry: &SchemaEntry,
        key: &ConfigKey,
        value: &ConfigValue,
        warnings: &mut Vec<ConfigWarning>,
    ) -> ConfigResult<()> {
        match entry.stability {
            Stability::Stable => Ok(()),
            Stability::Deprecated(note) => {
                warnings.push(ConfigWarning::new(
                    key.to_string(),
                    value.definition().clone(),
                    WarningKind::Deprecated {
                        note: note.to_string(),
                    },
                ));
                Ok(())
            }
            Stability::Removed(note) => Err(ConfigError::SchemaViolation {
                key: key.to_string(),
                expected: format!("no value (the key was removed: {})", note),
                found: value.describe(),
                definition: value.definition().clone(),
            }),
        }
    }

    fn unrecognized(&self, key: &ConfigKey, definition: &Definition) -> ConfigWarning {
        let suggestion = key.parent().zip(key.last()).and_then(|(parent, last)| {
            let siblings = self.registry.child_segments(&parent);
            suggest(last, siblings.iter().copied()).map(|s| parent.child(s).to_string())
        });
        tracing::debug!(key = %key, "unrecognized configuration key");
        ConfigWarning::new(
            key.to_string(),
            definition.clone(),
            WarningKind::UnrecognizedKey { suggestion },
        )
    }
}

/// Coerce one value to `shape`.
fn coerce(
    key: &ConfigKey,
    shape: Shape,
    entry: &SchemaEntry,
    value: ConfigValue,
) -> ConfigResult<ConfigValue> {
    let from_env = value.definition().is_environment();
    match (shape, value) {
        (Shape::String, v @ ConfigValue::String(..)) => Ok(v),
        (Shape::Integer, v @ ConfigValue::Integer(..)) => Ok(v),
        (Shape::Integer, ConfigValue::String(s, def)) if from_env => match s.trim().parse() {
            Ok(i) => Ok(ConfigValue::Integer(i, def)),
            Err(_) => Err(violation(key, shape.describe(), &ConfigValue::String(s, def))),
        },
        (Shape::Boolean, v @ ConfigValue::Boolean(..)) => Ok(v),
        (Shape::Boolean, ConfigValue::String(s, def)) if from_env => match s.trim() {
            "true" => Ok(ConfigValue::Boolean(true, def)),
            "false" => Ok(ConfigValue::Boolean(false, def)),
            _ => Err(violation(key, shape.describe(), &ConfigValue::String(s, def))),
        },
        (Shape::Enum(allowed), ConfigValue::String(s, def)) => {
            if allowed.contains(&s.as_str()) {
                Ok(ConfigValue::String(s, def))
            } else {
                Err(violation(key, shape.describe(), &ConfigValue::String(s, def)))
            }
        }
        (Shape::List | Shape::StringOrList | Shape::Args, ConfigValue::List(items, def)) => {
            check_string_items(key, shape, &items)?;
            Ok(ConfigValue::List(items, def))
        }
        (Shape::List, ConfigValue::String(s, def)) if from_env => Ok(split_list(entry, s, def)),
        (Shape::StringOrList, ConfigValue::String(s, def)) => {
            Ok(ConfigValue::List(vec![ConfigValue::String(s, def.clone())], def))
        }
        (Shape::Args, ConfigValue::String(s, def)) => Ok(split_list(entry, s, def)),
        (Shape::OneOf(alternatives), value) => {
            for alternative in alternatives {
                if let Ok(v) = coerce(key, *alternative, entry, value.clone()) {
                    return Ok(v);
                }
            }
            Err(violation(key, shape.describe(), &value))
        }
        (Shape::Any, value) => Ok(value),
        (Shape::Table, v @ ConfigValue::Table(..)) => Ok(v),
        (shape, value) => Err(violation(key, shape.describe(), &value)),
    }
}

fn split_list(entry: &SchemaEntry, raw: String, def: Definition) -> ConfigValue {
    let items = entry
        .list_separator
        .split(&raw)
        .into_iter()
        .map(|s| ConfigValue::String(s.to_string(), def.clone()))
        .collect();
    ConfigValue::List(items, def)
}

fn check_string_items(key: &ConfigKey, shape: Shape, items: &[ConfigValue]) -> ConfigResult<()> {
    match items.iter().find(|item| item.as_str().is_none()) {
        Some(bad) => Err(violation(key, shape.describe(), bad)),
        None => Ok(()),
    }
}

fn violation(key: &ConfigKey, expected: String, found: &ConfigValue) -> ConfigError {
    ConfigError::SchemaViolation {
        key: key.to_string(),
        expected,
        found: found.describe(),
        definition: found.definition().clone(),
    }
}

#[cfg(test)]
mod tests;
