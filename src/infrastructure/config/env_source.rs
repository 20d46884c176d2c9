//! Environment variable layer.
//!
//! Turns `<PREFIX>_*` variables into a configuration tree. Values stay
//! strings (the validator coerces them) except for list-like keys, which are
//! split here so they merge with file lists: either a TOML array literal
//! (`[ "a", "b c" ]`) or the key's separator (whitespace unless declared
//! otherwise).
//!
//! Variables that map to no key are ignored. A variable that only matches
//! once uppercased (`CARGO_build_jobs`) is ignored with a warning.

use crate::domain::entities::ConfigValue;
use crate::domain::schema::{SchemaEntry, SchemaRegistry, Shape};
use crate::domain::services::EnvKeyMapper;
use crate::domain::value_objects::{
    AppProfile, ConfigKey, ConfigWarning, Definition, EnvSnapshot, WarningKind, WILDCARD,
};
use crate::error::{ConfigError, ConfigResult};

#[derive(Debug, Clone, PartialEq)]
pub struct EnvLayer {
    pub tree: ConfigValue,
    pub warnings: Vec<ConfigWarning>,
    /// Variables that contributed a value, with the key they set
    pub applied: Vec<(String, ConfigKey)>,
}

impl EnvLayer {
    pub fn is_empty(&self) -> bool {
        self.applied.is_empty()
    }
}

pub struct EnvLoader<'a> {
    registry: &'a SchemaRegistry,
    profile: &'a AppProfile,
    env: &'a EnvSnapshot,
}

impl<'a> EnvLoader<'a> {
    pub fn new(registry: &'a SchemaRegistry, profile: &'a AppProfile, env: &'a EnvSnapshot) -> Self {
        Self {
            registry,
            profile,
            env,
        }
    }

    /// Build the environment layer. `known` is the merged file tree, used to
    /// spell wildcard segments the way the files do.
    pub fn load(&self, known: &ConfigValue) -> ConfigResult<EnvLayer> {
        let prefix = self.profile.env_prefix.as_str();
        let mapper = EnvKeyMapper::new(self.registry, prefix).with_known_keys(known);
        let prefixed = format!("{}_", prefix);

        let mut layer = EnvLayer {
            tree: ConfigValue::empty_table(Definition::BuiltIn),
            warnings: Vec::new(),
            applied: Vec::new(),
        };

        for (name, raw) in self.env.iter() {
            if let Some(key) = mapper.map(name) {
                self.apply(&mut layer, name, &key, raw)?;
                continue;
            }
            let upper = name.to_ascii_uppercase();
            if upper != name && upper.starts_with(&prefixed) && mapper.map(&upper).is_some() {
                layer.warnings.push(ConfigWarning::new(
                    name,
                    Definition::Environment(name.to_string()),
                    WarningKind::EnvCaseMismatch { expected: upper },
                ));
            } else if name.starts_with(&prefixed) {
                tracing::trace!(var = name, "environment variable does not name a config key");
            }
        }

        for entry in self.registry.entries() {
            if entry.env_aliases.is_empty() || entry.pattern.contains(WILDCARD) {
                continue;
            }
            let key = ConfigKey::parse(entry.pattern)?;
            if layer.tree.get(&key).is_some() {
                continue;
            }
            if let Some((alias, raw)) = entry
                .env_aliases
                .iter()
                .find_map(|alias| self.env.get(alias).map(|raw| (*alias, raw)))
            {
                self.apply(&mut layer, alias, &key, raw)?;
            }
        }

        Ok(layer)
    }

    fn apply(&self, layer: &mut EnvLayer, name: &str, key: &ConfigKey, raw: &str) -> ConfigResult<()> {
        let definition = Definition::Environment(name.to_string());
        let value = match self.registry.lookup(key) {
            Some(entry) if takes_list(entry.shape) => list_value(entry, raw, definition)?,
            _ => ConfigValue::String(raw.to_string(), definition),
        };
        tracing::debug!(var = name, key = %key, "applying environment variable");
        layer.tree.insert(key, value)?;
        layer.applied.push((name.to_string(), key.clone()));
        Ok(())
    }
}

fn takes_list(shape: Shape) -> bool {
    match shape {
        Shape::OneOf(shapes) => shapes.iter().any(|s| s.is_list_like()),
        shape => shape.is_list_like(),
    }
}

fn list_value(entry: &SchemaEntry, raw: &str, definition: Definition) -> ConfigResult<ConfigValue> {
    let trimmed = raw.trim();
    if trimmed.starts_with('[') && trimmed.ends_with(']') {
        let document = format!("value = {}", trimmed);
        let mut table: toml::Table = document.parse().map_err(|e: toml::de::Error| {
            ConfigError::Parse {
                origin: definition.clone(),
                line: None,
                column: None,
                message: format!("invalid TOML array: {}", e.message().trim()),
            }
        })?;
        let value = table
            .remove("value")
            .unwrap_or_else(|| toml::Value::Array(Vec::new()));
        return ConfigValue::from_toml(definition, value);
    }
    let items = entry
        .list_separator
        .split(raw)
        .into_iter()
        .map(|s| ConfigValue::String(s.to_string(), definition.clone()))
        .collect();
    Ok(ConfigValue::List(items, definition))
}
