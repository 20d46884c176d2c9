//! The final, validated configuration snapshot.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::de::DeserializeOwned;

use crate::domain::entities::ConfigValue;
use crate::domain::schema::{SchemaEntry, SchemaRegistry, Shape};
use crate::domain::value_objects::{
    ConfigKey, ConfigWarning, Definition, EnvSnapshot, WarningKind,
};
use crate::error::{ConfigError, ConfigResult};

/// Immutable result of resolution.
///
/// Cloning is cheap and the snapshot can be shared across threads.
/// Accessors return `Ok(None)` for keys that were never set; a value of the
/// wrong type is an error rather than a silent `None`.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    root: ConfigValue,
    registry: Arc<SchemaRegistry>,
    env: EnvSnapshot,
    cwd: PathBuf,
    config_dir: String,
}

impl PartialEq for ResolvedConfig {
    fn eq(&self, other: &Self) -> bool {
        self.inner.root == other.inner.root && self.inner.cwd == other.inner.cwd
    }
}

impl ResolvedConfig {
    pub fn new(
        root: ConfigValue,
        registry: Arc<SchemaRegistry>,
        env: EnvSnapshot,
        cwd: PathBuf,
        config_dir: impl Into<String>,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                root,
                registry,
                env,
                cwd,
                config_dir: config_dir.into(),
            }),
        }
    }

    /// The merged tree.
    pub fn root(&self) -> &ConfigValue {
        &self.inner.root
    }

    pub fn registry(&self) -> &SchemaRegistry {
        &self.inner.registry
    }

    pub fn cwd(&self) -> &Path {
        &self.inner.cwd
    }

    /// Raw value at `key`, table or leaf.
    pub fn get(&self, key: &str) -> ConfigResult<Option<&ConfigValue>> {
        let key = ConfigKey::parse(key)?;
        Ok(self.inner.root.get(&key))
    }

    /// Where the value at `key` was defined.
    pub fn definition(&self, key: &str) -> ConfigResult<Option<&Definition>> {
        Ok(self.get(key)?.map(ConfigValue::definition))
    }

    pub fn get_string(&self, key: &str) -> ConfigResult<Option<String>> {
        self.typed(key, "a string", |v| v.as_str().map(str::to_string))
    }

    pub fn get_i64(&self, key: &str) -> ConfigResult<Option<i64>> {
        self.typed(key, "an integer", ConfigValue::as_i64)
    }

    pub fn get_bool(&self, key: &str) -> ConfigResult<Option<bool>> {
        self.typed(key, "a boolean", ConfigValue::as_bool)
    }

    /// List of strings; list-like keys are already normalized to lists.
    pub fn get_list(&self, key: &str) -> ConfigResult<Option<Vec<String>>> {
        self.typed(key, "a list of strings", |v| {
            v.as_list()?
                .iter()
                .map(|item| item.as_str().map(str::to_string))
                .collect()
        })
    }

    /// A path value, resolved against the directory that holds the
    /// configuration directory it was set in.
    pub fn get_path(&self, key: &str) -> ConfigResult<Option<PathBuf>> {
        let Some(value) = self.get(key)? else {
            return Ok(None);
        };
        let raw = value.as_str().ok_or_else(|| mismatch(key, "a path string", value))?;
        let root = value
            .definition()
            .root(&self.inner.cwd, &self.inner.config_dir);
        Ok(Some(root.join(raw)))
    }

    /// Explicit value if set, otherwise the schema default.
    pub fn get_or_default(&self, key: &str) -> ConfigResult<Option<ConfigValue>> {
        let parsed = ConfigKey::parse(key)?;
        let entry = self.inner.registry.lookup(&parsed);
        let default = || entry.and_then(|entry| entry.default.materialize(&self.inner.env));
        match self.inner.root.get(&parsed) {
            // `jobs = "default"` asks for the built-in value
            Some(ConfigValue::String(s, _))
                if s == DEFAULT_SENTINEL && entry.is_some_and(accepts_sentinel) =>
            {
                Ok(default())
            }
            Some(value) => Ok(Some(value.clone())),
            None => Ok(default()),
        }
    }

    pub fn get_string_or_default(&self, key: &str) -> ConfigResult<Option<String>> {
        match self.get_or_default(key)? {
            None => Ok(None),
            Some(value) => match value.as_str() {
                Some(s) => Ok(Some(s.to_string())),
                None => Err(mismatch(key, "a string", &value)),
            },
        }
    }

    pub fn get_i64_or_default(&self, key: &str) -> ConfigResult<Option<i64>> {
        match self.get_or_default(key)? {
            None => Ok(None),
            Some(ConfigValue::Integer(i, _)) => Ok(Some(i)),
            // Inherited defaults arrive as strings
            Some(ConfigValue::String(s, def)) if def.is_environment() => {
                s.trim().parse().map(Some).map_err(|_| {
                    mismatch(key, "an integer", &ConfigValue::String(s.clone(), def.clone()))
                })
            }
            Some(other) => Err(mismatch(key, "an integer", &other)),
        }
    }

    pub fn get_bool_or_default(&self, key: &str) -> ConfigResult<Option<bool>> {
        match self.get_or_default(key)? {
            None => Ok(None),
            Some(value) => match value.as_bool() {
                Some(b) => Ok(Some(b)),
                None => Err(mismatch(key, "a boolean", &value)),
            },
        }
    }

    pub fn get_list_or_default(&self, key: &str) -> ConfigResult<Option<Vec<String>>> {
        match self.get_or_default(key)? {
            None => Ok(None),
            Some(ConfigValue::String(s, def)) if def.is_environment() => {
                Ok(Some(s.split_whitespace().map(str::to_string).collect()))
            }
            Some(value) => {
                let items: Option<Vec<String>> = value.as_list().and_then(|items| {
                    items
                        .iter()
                        .map(|item| item.as_str().map(str::to_string))
                        .collect()
                });
                items.map(Some).ok_or_else(|| mismatch(key, "a list of strings", &value))
            }
        }
    }

    /// Deserialize the table at `key` into `T`.
    ///
    /// An absent table deserializes from an empty one, so sections with
    /// all-optional fields always load. Keys present in the tree but unknown
    /// to `T` are returned as warnings.
    pub fn get_section<T>(&self, key: &str) -> ConfigResult<(T, Vec<ConfigWarning>)>
    where
        T: DeserializeOwned,
    {
        let parsed = ConfigKey::parse(key)?;
        let subtree = self.inner.root.get(&parsed);
        let value = subtree
            .map(ConfigValue::to_toml)
            .unwrap_or_else(|| toml::Value::Table(toml::Table::new()));

        let mut ignored = Vec::new();
        let section: T = serde_ignored::deserialize(value, |path| {
            ignored.push(path.to_string());
        })
        .map_err(|e: toml::de::Error| ConfigError::InvalidSection {
            key: key.to_string(),
            message: e.message().to_string(),
        })?;

        let warnings = ignored
            .into_iter()
            .map(|path| {
                let full = parsed_child(&parsed, &path);
                let definition = self
                    .inner
                    .root
                    .get(&full)
                    .map(|v| v.definition().clone())
                    .unwrap_or(Definition::BuiltIn);
                ConfigWarning::new(full.to_string(), definition, WarningKind::UnusedSectionField)
            })
            .collect();

        Ok((section, warnings))
    }

    fn typed<T, F>(&self, key: &str, expected: &str, extract: F) -> ConfigResult<Option<T>>
    where
        F: FnOnce(&ConfigValue) -> Option<T>,
    {
        match self.get(key)? {
            None => Ok(None),
            Some(value) => extract(value)
                .map(Some)
                .ok_or_else(|| mismatch(key, expected, value)),
        }
    }
}

/// Append a serde_ignored path (`a.b`) to `base`; list indices are kept as
/// plain segments.
fn parsed_child(base: &ConfigKey, path: &str) -> ConfigKey {
    let mut key = base.clone();
    for part in path.split('.') {
        key.push(part);
    }
    key
}

const DEFAULT_SENTINEL: &str = "default";

/// Whether the entry takes a value or the literal `"default"`.
fn accepts_sentinel(entry: &SchemaEntry) -> bool {
    match entry.shape {
        Shape::OneOf(alternatives) => alternatives.iter().any(|shape| {
            matches!(shape, Shape::Enum(values) if values.contains(&DEFAULT_SENTINEL))
        }),
        _ => false,
    }
}

fn mismatch(key: &str, expected: &str, found: &ConfigValue) -> ConfigError {
    ConfigError::SchemaViolation {
        key: key.to_string(),
        expected: expected.to_string(),
        found: found.describe(),
        definition: found.definition().clone(),
    }
}
