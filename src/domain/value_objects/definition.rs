//! Definition value object
//!
//! Records where a configuration value came from.

use std::fmt;
use std::path::{Path, PathBuf};

/// Origin of a configuration value.
///
/// Variants are ordered by precedence: a built-in default loses to a file,
/// a file loses to the environment, and the environment loses to an explicit
/// `--config` override.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Definition {
    /// A schema default, or a container created by the engine itself.
    BuiltIn,
    /// A configuration file (discovered or included).
    Path(PathBuf),
    /// An environment variable, by name.
    Environment(String),
    /// An explicit override. Carries the file when the override named one.
    Cli(Option<PathBuf>),
}

impl Definition {
    /// Numeric precedence rank; higher wins.
    pub fn rank(&self) -> u8 {
        match self {
            Definition::BuiltIn => 0,
            Definition::Path(_) => 1,
            Definition::Environment(_) => 2,
            Definition::Cli(_) => 3,
        }
    }

    /// Returns true if `self` takes precedence over `other`.
    pub fn is_higher_priority(&self, other: &Definition) -> bool {
        self.rank() > other.rank()
    }

    /// The file this definition points at, if any.
    pub fn file(&self) -> Option<&Path> {
        match self {
            Definition::Path(p) | Definition::Cli(Some(p)) => Some(p),
            _ => None,
        }
    }

    pub fn is_environment(&self) -> bool {
        matches!(self, Definition::Environment(_))
    }

    /// Directory that relative paths in this value are resolved against.
    ///
    /// For a file inside a configuration directory (`<dir>/.cargo/config.toml`)
    /// this is `<dir>`. Anything else resolves against `cwd`.
    pub fn root<'a>(&'a self, cwd: &'a Path, config_dir: &str) -> &'a Path {
        let Some(file) = self.file() else {
            return cwd;
        };
        let Some(parent) = file.parent() else {
            return cwd;
        };
        if parent.file_name().is_some_and(|name| name == config_dir) {
            parent.parent().unwrap_or(parent)
        } else {
            parent
        }
    }
}

impl fmt::Display for Definition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Definition::BuiltIn => write!(f, "default"),
            Definition::Path(p) | Definition::Cli(Some(p)) => write!(f, "{}", p.display()),
            Definition::Environment(key) => write!(f, "environment variable `{}`", key),
            Definition::Cli(None) => write!(f, "--config cli option"),
        }
    }
}
