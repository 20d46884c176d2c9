//! Schema registry
//!
//! Declares every recognized key pattern with its value shape, merge
//! strategy, default and stability. Patterns are dotted keys where `*`
//! matches exactly one segment (`target.*.runner`).
//!
//! Lookup picks the most specific matching pattern: an exact pattern beats
//! one with wildcards, and fewer wildcards beat more. Ties go to the entry
//! declared first.

mod builtin;

use std::fmt;

use crate::domain::entities::ConfigValue;
use crate::domain::value_objects::{ConfigKey, Definition, EnvSnapshot, WILDCARD};
use crate::error::{ConfigError, ConfigResult};

/// Expected shape of a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    String,
    Integer,
    Boolean,
    /// A string restricted to the listed values
    Enum(&'static [&'static str]),
    /// A list of strings
    List,
    /// A single string, normalized to a one-element list
    StringOrList,
    /// A whitespace-separated command line, or a list of arguments
    Args,
    /// The first alternative that accepts the value wins
    OneOf(&'static [Shape]),
    /// A table whose contents are validated by more specific entries
    Table,
    /// Anything; contents are not validated
    Any,
}

impl Shape {
    /// Normalizes to a list during merging.
    pub fn is_list_like(&self) -> bool {
        matches!(self, Shape::List | Shape::StringOrList | Shape::Args)
    }

    /// A table may appear here, so more specific entries can live below.
    pub fn allows_children(&self) -> bool {
        match self {
            Shape::Table | Shape::Any => true,
            Shape::OneOf(shapes) => shapes.iter().any(Shape::allows_children),
            _ => false,
        }
    }

    /// How the shape reads in "expected ..." messages.
    pub fn describe(&self) -> String {
        match self {
            Shape::String => "a string".to_string(),
            Shape::Integer => "an integer".to_string(),
            Shape::Boolean => "a boolean".to_string(),
            Shape::Enum(values) => {
                let quoted: Vec<String> = values.iter().map(|v| format!("`{}`", v)).collect();
                format!("one of {}", quoted.join(", "))
            }
            Shape::List => "a list of strings".to_string(),
            Shape::StringOrList => "a string or a list of strings".to_string(),
            Shape::Args => "a command line string or a list of arguments".to_string(),
            Shape::OneOf(shapes) => shapes
                .iter()
                .map(Shape::describe)
                .collect::<Vec<_>>()
                .join(" or "),
            Shape::Table => "a table".to_string(),
            Shape::Any => "any value".to_string(),
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MergeStrategy {
    /// Lists from lower layers come first
    #[default]
    Append,
    /// The higher layer's list replaces the lower one
    Replace,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Stability {
    #[default]
    Stable,
    /// Still honored; a warning is emitted
    Deprecated(&'static str),
    /// Rejected with an error
    Removed(&'static str),
}

/// How an environment variable value is split into a list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListSeparator {
    #[default]
    Whitespace,
    Comma,
}

impl ListSeparator {
    pub fn split<'a>(&self, raw: &'a str) -> Vec<&'a str> {
        match self {
            ListSeparator::Whitespace => raw.split_whitespace().collect(),
            ListSeparator::Comma => raw
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .collect(),
        }
    }
}

/// Value used when a key is absent from every layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DefaultValue {
    #[default]
    None,
    Str(&'static str),
    Int(i64),
    Bool(bool),
    List(&'static [&'static str]),
    /// Logical CPU count
    Parallelism,
    /// Read from an unprefixed environment variable (`BROWSER`)
    Inherit(&'static str),
}

impl DefaultValue {
    /// Materialize the default. `Inherit` yields a string tagged with the
    /// variable it came from, or nothing when the variable is unset.
    pub fn materialize(&self, env: &EnvSnapshot) -> Option<ConfigValue> {
        let builtin = Definition::BuiltIn;
        match self {
            DefaultValue::None => None,
            DefaultValue::Str(s) => Some(ConfigValue::String((*s).to_string(), builtin)),
            DefaultValue::Int(i) => Some(ConfigValue::Integer(*i, builtin)),
            DefaultValue::Bool(b) => Some(ConfigValue::Boolean(*b, builtin)),
            DefaultValue::List(items) => Some(ConfigValue::List(
                items
                    .iter()
                    .map(|s| ConfigValue::String((*s).to_string(), Definition::BuiltIn))
                    .collect(),
                builtin,
            )),
            DefaultValue::Parallelism => {
                let jobs = std::thread::available_parallelism()
                    .map(|n| n.get())
                    .unwrap_or(1);
                Some(ConfigValue::Integer(jobs as i64, builtin))
            }
            DefaultValue::Inherit(var) => env.get(var).map(|value| {
                ConfigValue::String(value.to_string(), Definition::Environment(var.to_string()))
            }),
        }
    }
}

/// One recognized key pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaEntry {
    pub pattern: &'static str,
    pub shape: Shape,
    pub merge: MergeStrategy,
    pub default: DefaultValue,
    pub stability: Stability,
    /// Must not be set through `--config` key overrides; redacted in output
    pub secret: bool,
    /// Unprefixed variables read when the canonical variable is unset
    pub env_aliases: &'static [&'static str],
    pub list_separator: ListSeparator,
    pub doc: &'static str,
}

impl SchemaEntry {
    pub fn new(pattern: &'static str, shape: Shape) -> Self {
        Self {
            pattern,
            shape,
            merge: MergeStrategy::Append,
            default: DefaultValue::None,
            stability: Stability::Stable,
            secret: false,
            env_aliases: &[],
            list_separator: ListSeparator::Whitespace,
            doc: "",
        }
    }

    pub fn replace_only(mut self) -> Self {
        self.merge = MergeStrategy::Replace;
        self
    }

    pub fn default_value(mut self, default: DefaultValue) -> Self {
        self.default = default;
        self
    }

    pub fn deprecated(mut self, note: &'static str) -> Self {
        self.stability = Stability::Deprecated(note);
        self
    }

    pub fn removed(mut self, note: &'static str) -> Self {
        self.stability = Stability::Removed(note);
        self
    }

    pub fn secret(mut self) -> Self {
        self.secret = true;
        self
    }

    pub fn env_aliases(mut self, aliases: &'static [&'static str]) -> Self {
        self.env_aliases = aliases;
        self
    }

    pub fn comma_separated(mut self) -> Self {
        self.list_separator = ListSeparator::Comma;
        self
    }

    pub fn doc(mut self, doc: &'static str) -> Self {
        self.doc = doc;
        self
    }

    pub fn segments(&self) -> impl Iterator<Item = &'static str> {
        self.pattern.split('.')
    }

    fn wildcard_count(&self) -> usize {
        self.segments().filter(|s| *s == WILDCARD).count()
    }
}

/// The set of recognized keys.
#[derive(Debug, Clone)]
pub struct SchemaRegistry {
    entries: Vec<SchemaEntry>,
}

impl SchemaRegistry {
    /// Build a registry, rejecting overlapping patterns with conflicting
    /// shapes.
    pub fn new(entries: Vec<SchemaEntry>) -> ConfigResult<Self> {
        check_conflicts(&entries)?;
        Ok(Self { entries })
    }

    /// Registry with no entries; every key is unrecognized.
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// The built-in Cargo key set.
    pub fn builtin() -> Self {
        Self {
            entries: builtin::entries(),
        }
    }

    /// Add entries on top of an existing registry.
    pub fn extend(mut self, entries: Vec<SchemaEntry>) -> ConfigResult<Self> {
        self.entries.extend(entries);
        check_conflicts(&self.entries)?;
        Ok(self)
    }

    pub fn entries(&self) -> &[SchemaEntry] {
        &self.entries
    }

    /// All declared patterns, in declaration order.
    pub fn all_keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|e| e.pattern)
    }

    /// The most specific entry matching `key`.
    pub fn lookup(&self, key: &ConfigKey) -> Option<&SchemaEntry> {
        self.entries
            .iter()
            .filter(|e| key.matches(e.pattern))
            .min_by_key(|e| e.wildcard_count())
    }

    /// True if some entry lives strictly below `key`, so `key` must be a
    /// table.
    pub fn is_table_prefix(&self, key: &ConfigKey) -> bool {
        self.entries.iter().any(|e| {
            let segments: Vec<&str> = e.segments().collect();
            segments.len() > key.len()
                && key
                    .parts()
                    .zip(&segments)
                    .all(|(part, pattern)| *pattern == WILDCARD || *pattern == part)
        })
    }

    /// Literal segments that may follow `key`, used for suggestions.
    pub fn child_segments(&self, key: &ConfigKey) -> Vec<&'static str> {
        let mut children: Vec<&'static str> = self
            .entries
            .iter()
            .filter_map(|e| {
                let segments: Vec<&'static str> = e.segments().collect();
                if segments.len() <= key.len() {
                    return None;
                }
                let prefix_matches = key
                    .parts()
                    .zip(&segments)
                    .all(|(part, pattern)| *pattern == WILDCARD || *pattern == part);
                let next = segments[key.len()];
                (prefix_matches && next != WILDCARD).then_some(next)
            })
            .collect();
        children.sort_unstable();
        children.dedup();
        children
    }

    /// Merge strategy for lists at `key`; unknown keys append.
    pub fn merge_strategy(&self, key: &ConfigKey) -> MergeStrategy {
        self.lookup(key).map(|e| e.merge).unwrap_or_default()
    }

    /// Entries whose pattern starts with `prefix`, for `schema` listings.
    pub fn entries_under<'a>(
        &'a self,
        prefix: &'a ConfigKey,
    ) -> impl Iterator<Item = &'a SchemaEntry> + 'a {
        self.entries.iter().filter(move |e| {
            let segments: Vec<&str> = e.segments().collect();
            segments.len() >= prefix.len()
                && prefix
                    .parts()
                    .zip(&segments)
                    .all(|(part, pattern)| *pattern == part || *pattern == WILDCARD)
        })
    }
}

impl Default for SchemaRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Two patterns can name the same key: same length and every segment pair
/// is equal or has a wildcard.
fn overlaps(a: &[&str], b: &[&str]) -> bool {
    a.len() == b.len()
        && a
            .iter()
            .zip(b)
            .all(|(x, y)| x == y || *x == WILDCARD || *y == WILDCARD)
}

fn check_conflicts(entries: &[SchemaEntry]) -> ConfigResult<()> {
    let split: Vec<Vec<&str>> = entries.iter().map(|e| e.segments().collect()).collect();
    for (i, a) in entries.iter().enumerate() {
        for (j, b) in entries.iter().enumerate().skip(i + 1) {
            let (sa, sb) = (&split[i], &split[j]);
            let conflict = if sa == sb {
                true
            } else if sa.len() < sb.len() && overlaps(sa, &sb[..sa.len()]) {
                !a.shape.allows_children()
            } else if sb.len() < sa.len() && overlaps(sb, &sa[..sb.len()]) {
                !b.shape.allows_children()
            } else {
                false
            };
            if conflict {
                return Err(ConfigError::SchemaConflict {
                    key: b.pattern.to_string(),
                    other: a.pattern.to_string(),
                });
            }
        }
    }
    Ok(())
}
