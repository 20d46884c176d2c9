//! `get` use case: look up one key (or the whole tree) in a resolved
//! configuration.

use crate::domain::entities::{ConfigValue, ResolvedConfig};
use crate::domain::value_objects::ConfigKey;
use crate::error::ConfigResult;

#[derive(Debug, Clone, PartialEq)]
pub enum QueryResult {
    Found { key: ConfigKey, value: ConfigValue },
    /// The key is valid but no source set it
    NotSet { key: ConfigKey },
}

impl QueryResult {
    pub fn key(&self) -> &ConfigKey {
        match self {
            QueryResult::Found { key, .. } | QueryResult::NotSet { key } => key,
        }
    }

    pub fn value(&self) -> Option<&ConfigValue> {
        match self {
            QueryResult::Found { value, .. } => Some(value),
            QueryResult::NotSet { .. } => None,
        }
    }
}

pub struct ConfigQuery<'a> {
    config: &'a ResolvedConfig,
}

impl<'a> ConfigQuery<'a> {
    pub fn new(config: &'a ResolvedConfig) -> Self {
        Self { config }
    }

    /// `None` or an empty key selects the whole tree.
    pub fn query(&self, key: Option<&str>) -> ConfigResult<QueryResult> {
        let key = match key {
            Some(text) if !text.trim().is_empty() => ConfigKey::parse(text)?,
            _ => ConfigKey::root(),
        };
        let result = match self.config.root().get(&key) {
            Some(value) => QueryResult::Found {
                key,
                value: value.clone(),
            },
            None => QueryResult::NotSet { key },
        };
        Ok(result)
    }
}
