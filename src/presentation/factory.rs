//! Resolver Factory
//!
//! Builds a [`ConfigResolver`] from command-line options. This is the
//! dependency injection point for the binary.

use std::path::PathBuf;

use crate::application::ConfigResolver;
use crate::domain::value_objects::{AppProfile, EnvSnapshot};

/// Options shared by every subcommand.
#[derive(Debug, Clone, Default)]
pub struct ResolveOptions {
    /// Directory to resolve from; the process directory when unset
    pub cwd: Option<PathBuf>,
    /// Application name (`cargo` unless set)
    pub app: Option<String>,
    /// `--config` arguments, in order
    pub config_overrides: Vec<String>,
}

impl ResolveOptions {
    pub fn profile(&self) -> AppProfile {
        self.app
            .as_deref()
            .map(AppProfile::named)
            .unwrap_or_default()
    }
}

/// Create a resolver reading the real file system and `env`.
pub fn create_resolver(options: &ResolveOptions, env: EnvSnapshot) -> ConfigResolver {
    let cwd = options.cwd.clone().unwrap_or_else(|| PathBuf::from("."));
    ConfigResolver::new(cwd)
        .with_profile(options.profile())
        .with_env(env)
        .with_cli_overrides(options.config_overrides.iter().cloned())
}
