//! Error types for confstack
//!
//! Library errors use `thiserror`; the binary wraps them in `anyhow`.

use std::path::PathBuf;

use thiserror::Error;

use crate::domain::value_objects::Definition;

/// Result type alias for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Main error type for configuration discovery, merging and validation
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A candidate file exists but could not be read
    #[error("failed to read configuration file `{}`: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Contents are not well-formed TOML, or use an unsupported value type
    #[error("could not parse configuration in {origin}{}: {message}", format_position(*line, *column))]
    Parse {
        origin: Definition,
        line: Option<usize>,
        column: Option<usize>,
        message: String,
    },

    /// A value does not fit the shape its schema entry declares
    #[error("invalid configuration for key `{key}`: expected {expected}, but found {found} in {definition}")]
    SchemaViolation {
        key: String,
        expected: String,
        found: String,
        definition: Definition,
    },

    /// A container and a non-container met at the same key while merging
    #[error("failed to merge key `{key}` from {from} into {into}: expected {expected}, but found {found}")]
    MergeConflict {
        key: String,
        expected: &'static str,
        found: &'static str,
        into: Definition,
        from: Definition,
    },

    /// An explicit override argument was rejected
    #[error("invalid --config argument `{arg}`: {message}")]
    InvalidOverride { arg: String, message: String },

    /// An `include` chain revisited a file
    #[error("config `include` cycle detected with path `{}`", path.display())]
    IncludeCycle { path: PathBuf },

    /// Two schema entries overlap with incompatible shapes
    #[error("schema entry `{key}` conflicts with `{other}`")]
    SchemaConflict { key: String, other: String },

    /// A dotted key could not be parsed
    #[error("invalid config key `{key}`: {message}")]
    InvalidKey { key: String, message: String },

    /// A configuration subtree could not be deserialized into a typed section
    #[error("could not load section `{key}`: {message}")]
    InvalidSection { key: String, message: String },
}

fn format_position(line: Option<usize>, column: Option<usize>) -> String {
    match (line, column) {
        (Some(line), Some(column)) => format!(" at line {}, column {}", line, column),
        (Some(line), None) => format!(" at line {}", line),
        _ => String::new(),
    }
}

impl ConfigError {
    /// The dotted key this error is about, if it concerns a single key.
    pub fn key(&self) -> Option<&str> {
        match self {
            ConfigError::SchemaViolation { key, .. }
            | ConfigError::MergeConflict { key, .. }
            | ConfigError::InvalidKey { key, .. }
            | ConfigError::InvalidSection { key, .. } => Some(key),
            _ => None,
        }
    }
}
