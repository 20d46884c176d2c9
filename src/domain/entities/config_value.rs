//! Configuration value tree
//!
//! Every node carries the [`Definition`] it came from, so the merged tree can
//! still answer "where was this set?" for any leaf.

use std::collections::BTreeMap;
use std::fmt;

use crate::domain::value_objects::{ConfigKey, Definition};
use crate::error::{ConfigError, ConfigResult};

pub type ConfigTable = BTreeMap<String, ConfigValue>;

#[derive(Clone, PartialEq, Eq)]
pub enum ConfigValue {
    Integer(i64, Definition),
    String(String, Definition),
    Boolean(bool, Definition),
    List(Vec<ConfigValue>, Definition),
    Table(ConfigTable, Definition),
}

impl ConfigValue {
    pub fn empty_table(definition: Definition) -> Self {
        ConfigValue::Table(ConfigTable::new(), definition)
    }

    /// Convert a parsed TOML value, tagging every node with `definition`.
    ///
    /// Floats and datetimes have no place in the configuration model and are
    /// rejected.
    pub fn from_toml(definition: Definition, value: toml::Value) -> ConfigResult<Self> {
        let mut key = ConfigKey::root();
        Self::from_toml_at(&definition, value, &mut key)
    }

    fn from_toml_at(
        definition: &Definition,
        value: toml::Value,
        key: &mut ConfigKey,
    ) -> ConfigResult<Self> {
        Ok(match value {
            toml::Value::String(s) => ConfigValue::String(s, definition.clone()),
            toml::Value::Integer(i) => ConfigValue::Integer(i, definition.clone()),
            toml::Value::Boolean(b) => ConfigValue::Boolean(b, definition.clone()),
            toml::Value::Array(items) => ConfigValue::List(
                items
                    .into_iter()
                    .map(|item| Self::from_toml_at(definition, item, key))
                    .collect::<ConfigResult<_>>()?,
                definition.clone(),
            ),
            toml::Value::Table(table) => {
                let mut out = ConfigTable::new();
                for (k, v) in table {
                    key.push(k.clone());
                    let value = Self::from_toml_at(definition, v, key)?;
                    key.pop();
                    out.insert(k, value);
                }
                ConfigValue::Table(out, definition.clone())
            }
            other => {
                return Err(ConfigError::Parse {
                    origin: definition.clone(),
                    line: None,
                    column: None,
                    message: format!(
                        "unsupported TOML configuration type `{}` at `{}`",
                        other.type_str(),
                        key
                    ),
                })
            }
        })
    }

    pub fn to_toml(&self) -> toml::Value {
        match self {
            ConfigValue::Integer(i, _) => toml::Value::Integer(*i),
            ConfigValue::String(s, _) => toml::Value::String(s.clone()),
            ConfigValue::Boolean(b, _) => toml::Value::Boolean(*b),
            ConfigValue::List(items, _) => {
                toml::Value::Array(items.iter().map(ConfigValue::to_toml).collect())
            }
            ConfigValue::Table(table, _) => toml::Value::Table(
                table
                    .iter()
                    .map(|(k, v)| (k.clone(), v.to_toml()))
                    .collect(),
            ),
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        match self {
            ConfigValue::Integer(i, _) => serde_json::Value::from(*i),
            ConfigValue::String(s, _) => serde_json::Value::from(s.as_str()),
            ConfigValue::Boolean(b, _) => serde_json::Value::from(*b),
            ConfigValue::List(items, _) => {
                serde_json::Value::Array(items.iter().map(ConfigValue::to_json).collect())
            }
            ConfigValue::Table(table, _) => serde_json::Value::Object(
                table
                    .iter()
                    .map(|(k, v)| (k.clone(), v.to_json()))
                    .collect(),
            ),
        }
    }

    pub fn definition(&self) -> &Definition {
        match self {
            ConfigValue::Integer(_, def)
            | ConfigValue::String(_, def)
            | ConfigValue::Boolean(_, def)
            | ConfigValue::List(_, def)
            | ConfigValue::Table(_, def) => def,
        }
    }

    pub fn set_definition(&mut self, definition: Definition) {
        match self {
            ConfigValue::Integer(_, def)
            | ConfigValue::String(_, def)
            | ConfigValue::Boolean(_, def)
            | ConfigValue::List(_, def)
            | ConfigValue::Table(_, def) => *def = definition,
        }
    }

    /// Human-readable type name used in error messages.
    pub fn desc(&self) -> &'static str {
        match self {
            ConfigValue::Integer(..) => "integer",
            ConfigValue::String(..) => "string",
            ConfigValue::Boolean(..) => "boolean",
            ConfigValue::List(..) => "array",
            ConfigValue::Table(..) => "table",
        }
    }

    /// Type name plus the value itself for scalars: ``string `abc` ``.
    pub fn describe(&self) -> String {
        match self {
            ConfigValue::Integer(i, _) => format!("integer `{}`", i),
            ConfigValue::String(s, _) => format!("string `{}`", s),
            ConfigValue::Boolean(b, _) => format!("boolean `{}`", b),
            other => other.desc().to_string(),
        }
    }

    pub fn is_container(&self) -> bool {
        matches!(self, ConfigValue::List(..) | ConfigValue::Table(..))
    }

    pub fn as_table(&self) -> Option<&ConfigTable> {
        match self {
            ConfigValue::Table(table, _) => Some(table),
            _ => None,
        }
    }

    pub fn as_table_mut(&mut self) -> Option<&mut ConfigTable> {
        match self {
            ConfigValue::Table(table, _) => Some(table),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ConfigValue::String(s, _) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            ConfigValue::Integer(i, _) => Some(*i),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ConfigValue::Boolean(b, _) => Some(*b),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[ConfigValue]> {
        match self {
            ConfigValue::List(items, _) => Some(items),
            _ => None,
        }
    }

    /// Walk tables along `key`. The root key returns `self`.
    pub fn get(&self, key: &ConfigKey) -> Option<&ConfigValue> {
        let mut current = self;
        for part in key.parts() {
            current = current.as_table()?.get(part)?;
        }
        Some(current)
    }

    /// Set `value` at `key`, creating intermediate tables that carry the
    /// value's definition. Fails if an intermediate node is not a table.
    pub fn insert(&mut self, key: &ConfigKey, value: ConfigValue) -> ConfigResult<()> {
        let segments = key.segments();
        let Some((last, parents)) = segments.split_last() else {
            *self = value;
            return Ok(());
        };

        let mut current = self;
        let mut walked = ConfigKey::root();
        for part in parents {
            walked.push(part.clone());
            let definition = value.definition().clone();
            let here = current.definition().clone();
            let found = current.desc();
            let table = current
                .as_table_mut()
                .ok_or_else(|| ConfigError::MergeConflict {
                    key: walked.parent().unwrap_or_default().to_string(),
                    expected: "table",
                    found,
                    into: here,
                    from: definition.clone(),
                })?;
            current = table
                .entry(part.clone())
                .or_insert_with(|| ConfigValue::empty_table(definition));
        }

        let here = current.definition().clone();
        let found = current.desc();
        let from = value.definition().clone();
        match current.as_table_mut() {
            Some(table) => {
                table.insert(last.clone(), value);
                Ok(())
            }
            None => Err(ConfigError::MergeConflict {
                key: walked.to_string(),
                expected: "table",
                found,
                into: here,
                from,
            }),
        }
    }

    /// Visit every leaf (non-table value) with its full key, in key order.
    pub fn for_each_leaf<F>(&self, mut f: F)
    where
        F: FnMut(&ConfigKey, &ConfigValue),
    {
        let mut key = ConfigKey::root();
        self.walk_leaves(&mut key, &mut f);
    }

    fn walk_leaves<F>(&self, key: &mut ConfigKey, f: &mut F)
    where
        F: FnMut(&ConfigKey, &ConfigValue),
    {
        match self {
            ConfigValue::Table(table, _) => {
                for (k, v) in table {
                    key.push(k.clone());
                    v.walk_leaves(key, f);
                    key.pop();
                }
            }
            leaf => f(key, leaf),
        }
    }
}

impl fmt::Debug for ConfigValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigValue::Integer(i, def) => write!(f, "{} (from {})", i, def),
            ConfigValue::Boolean(b, def) => write!(f, "{} (from {})", b, def),
            ConfigValue::String(s, def) => write!(f, "{:?} (from {})", s, def),
            ConfigValue::List(items, def) => {
                write!(f, "{:?} (from {})", items, def)
            }
            ConfigValue::Table(table, def) => write!(f, "{:?} (from {})", table, def),
        }
    }
}
