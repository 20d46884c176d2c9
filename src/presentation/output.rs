//! Value Rendering
//!
//! Prints a resolved value the way `cargo config get` does:
//!
//! - `toml`: one `dotted.key = value` line per leaf, optionally followed by
//!   a `# origin` comment (list items get one comment each)
//! - `json`: the value nested under its full key path
//! - `json-value`: the bare value
//!
//! Secret keys are always redacted.

use std::fmt::Write as _;

use crate::domain::entities::ConfigValue;
use crate::domain::schema::SchemaRegistry;
use crate::domain::value_objects::ConfigKey;

pub const REDACTED: &str = "[REDACTED]";

/// Output format for `get`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Dotted-key TOML lines
    #[default]
    Toml,
    /// JSON object rooted at the top-level table
    Json,
    /// JSON of the value alone
    JsonValue,
}

impl OutputFormat {
    pub fn supports_origin(self) -> bool {
        self == OutputFormat::Toml
    }
}

pub struct ValueRenderer<'a> {
    registry: &'a SchemaRegistry,
    show_origin: bool,
}

impl<'a> ValueRenderer<'a> {
    pub fn new(registry: &'a SchemaRegistry) -> Self {
        Self {
            registry,
            show_origin: false,
        }
    }

    pub fn with_show_origin(mut self, show_origin: bool) -> Self {
        self.show_origin = show_origin;
        self
    }

    pub fn render(
        &self,
        key: &ConfigKey,
        value: &ConfigValue,
        format: OutputFormat,
    ) -> serde_json::Result<String> {
        let value = self.redact(key, value);
        match format {
            OutputFormat::Toml => Ok(self.render_toml(key, &value)),
            OutputFormat::Json => {
                let mut json = value.to_json();
                for part in key.segments().iter().rev() {
                    let mut object = serde_json::Map::new();
                    object.insert(part.clone(), json);
                    json = serde_json::Value::Object(object);
                }
                serde_json::to_string_pretty(&json)
            }
            OutputFormat::JsonValue => serde_json::to_string_pretty(&value.to_json()),
        }
    }

    fn render_toml(&self, key: &ConfigKey, value: &ConfigValue) -> String {
        let mut out = String::new();
        value.for_each_leaf(|relative, leaf| {
            let mut full = key.clone();
            for part in relative.parts() {
                full.push(part);
            }
            self.toml_line(&mut out, &full, leaf);
        });
        out
    }

    fn toml_line(&self, out: &mut String, key: &ConfigKey, leaf: &ConfigValue) {
        match leaf {
            ConfigValue::List(items, _) if self.show_origin => {
                let _ = writeln!(out, "{} = [", key);
                for item in items {
                    let _ = writeln!(out, "    {}, # {}", item.to_toml(), item.definition());
                }
                let _ = writeln!(out, "]");
            }
            leaf if self.show_origin => {
                let _ = writeln!(out, "{} = {} # {}", key, leaf.to_toml(), leaf.definition());
            }
            leaf => {
                let _ = writeln!(out, "{} = {}", key, leaf.to_toml());
            }
        }
    }

    /// Copy of `value` with every secret leaf replaced.
    fn redact(&self, key: &ConfigKey, value: &ConfigValue) -> ConfigValue {
        match value {
            ConfigValue::Table(table, def) => {
                let table = table
                    .iter()
                    .map(|(k, v)| (k.clone(), self.redact(&key.child(k.clone()), v)))
                    .collect();
                ConfigValue::Table(table, def.clone())
            }
            leaf if self.registry.lookup(key).is_some_and(|e| e.secret) => {
                ConfigValue::String(REDACTED.to_string(), leaf.definition().clone())
            }
            leaf => leaf.clone(),
        }
    }
}
