//! Merge engine
//!
//! Folds configuration trees in precedence order (lowest first) into one.
//!
//! Rules:
//! - Tables merge recursively, key by key
//! - Lists append (lower layer first) unless the schema marks the key
//!   replace-only
//! - Scalars are replaced by the higher layer
//! - A container meeting a non-container is an error, except under keys the
//!   schema declares as `Any` or `OneOf`, where the higher layer replaces
//!   wholesale
//!
//! Every replacement is recorded as an [`Override`] so callers can explain
//! which layer won.

use crate::domain::entities::ConfigValue;
use crate::domain::schema::{MergeStrategy, SchemaRegistry, Shape};
use crate::domain::value_objects::{ConfigKey, Definition};
use crate::error::{ConfigError, ConfigResult};

/// A value that was replaced during merging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Override {
    pub key: ConfigKey,
    /// Definition of the replaced value
    pub from: Definition,
    /// Definition of the winning value
    pub by: Definition,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MergeOutcome {
    pub tree: ConfigValue,
    pub overrides: Vec<Override>,
}

/// Stateful merger that accumulates override records.
#[derive(Debug)]
pub struct ConfigMerger<'a> {
    registry: &'a SchemaRegistry,
    overrides: Vec<Override>,
}

impl<'a> ConfigMerger<'a> {
    pub fn new(registry: &'a SchemaRegistry) -> Self {
        Self {
            registry,
            overrides: Vec::new(),
        }
    }

    /// Merge `incoming` (higher precedence) into `base`.
    pub fn merge_into(&mut self, base: &mut ConfigValue, incoming: ConfigValue) -> ConfigResult<()> {
        let mut key = ConfigKey::root();
        self.merge_at(base, incoming, &mut key)
    }

    pub fn overrides(&self) -> &[Override] {
        &self.overrides
    }

    pub fn into_overrides(self) -> Vec<Override> {
        self.overrides
    }

    fn merge_at(
        &mut self,
        base: &mut ConfigValue,
        incoming: ConfigValue,
        key: &mut ConfigKey,
    ) -> ConfigResult<()> {
        let shape = self.registry.lookup(key).map(|e| e.shape);
        let incoming = normalize(incoming, shape);
        if let Some(shape) = shape {
            normalize_in_place(base, shape);
        }

        match incoming {
            ConfigValue::Table(new, _) if matches!(base, ConfigValue::Table(..)) => {
                let Some(old) = base.as_table_mut() else {
                    return Ok(());
                };
                for (k, v) in new {
                    match old.get_mut(&k) {
                        Some(existing) => {
                            key.push(k);
                            let result = self.merge_at(existing, v, key);
                            key.pop();
                            result?;
                        }
                        None => {
                            let child = key.child(k.clone());
                            let shape = self.registry.lookup(&child).map(|e| e.shape);
                            old.insert(k, normalize(v, shape));
                        }
                    }
                }
                Ok(())
            }
            ConfigValue::List(new, new_def) if matches!(base, ConfigValue::List(..)) => {
                match self.registry.merge_strategy(key) {
                    MergeStrategy::Append => {
                        if let ConfigValue::List(old, old_def) = base {
                            old.extend(new);
                            if new_def.is_higher_priority(old_def) {
                                *old_def = new_def;
                            }
                        }
                    }
                    MergeStrategy::Replace => {
                        self.record(key, base.definition().clone(), new_def.clone());
                        *base = ConfigValue::List(new, new_def);
                    }
                }
                Ok(())
            }
            new if base.is_container() || new.is_container() => {
                // Free-form and multi-shape keys may switch between a table
                // and a scalar across layers.
                if matches!(shape, Some(Shape::Any | Shape::OneOf(_))) {
                    self.record(key, base.definition().clone(), new.definition().clone());
                    *base = new;
                    return Ok(());
                }
                Err(ConfigError::MergeConflict {
                    key: key.to_string(),
                    expected: base.desc(),
                    found: new.desc(),
                    into: base.definition().clone(),
                    from: new.definition().clone(),
                })
            }
            new => {
                self.record(key, base.definition().clone(), new.definition().clone());
                *base = new;
                Ok(())
            }
        }
    }

    fn record(&mut self, key: &ConfigKey, from: Definition, by: Definition) {
        tracing::trace!(key = %key, from = %from, by = %by, "value overridden");
        self.overrides.push(Override {
            key: key.clone(),
            from,
            by,
        });
    }
}

/// Fold `layers` (lowest precedence first) into a single tree rooted at an
/// empty built-in table.
pub fn merge_layers<I>(registry: &SchemaRegistry, layers: I) -> ConfigResult<MergeOutcome>
where
    I: IntoIterator<Item = ConfigValue>,
{
    let mut merger = ConfigMerger::new(registry);
    let mut tree = ConfigValue::empty_table(Definition::BuiltIn);
    for layer in layers {
        merger.merge_into(&mut tree, layer)?;
    }
    Ok(MergeOutcome {
        tree,
        overrides: merger.into_overrides(),
    })
}

/// Bring a value into list form for list-like keys, so a lone string and a
/// list combine instead of conflicting.
fn normalize(value: ConfigValue, shape: Option<Shape>) -> ConfigValue {
    let Some(shape) = shape else {
        return value;
    };
    match (shape, value) {
        (Shape::StringOrList, ConfigValue::String(s, def)) => {
            ConfigValue::List(vec![ConfigValue::String(s, def.clone())], def)
        }
        (Shape::Args, ConfigValue::String(s, def)) => ConfigValue::List(
            s.split_whitespace()
                .map(|arg| ConfigValue::String(arg.to_string(), def.clone()))
                .collect(),
            def,
        ),
        (_, value) => value,
    }
}

fn normalize_in_place(value: &mut ConfigValue, shape: Shape) {
    if matches!(
        (shape, &*value),
        (Shape::StringOrList | Shape::Args, ConfigValue::String(..))
    ) {
        let taken = std::mem::replace(value, ConfigValue::empty_table(Definition::BuiltIn));
        *value = normalize(taken, Some(shape));
    }
}
