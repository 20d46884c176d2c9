//! Typed views over a resolved configuration.
//!
//! Each section deserializes one table of the merged tree:
//! `[build]`, `[term]`, `[net]`, `[http]`, `[future-incompat-report]` and
//! `[registries]`. Fields the struct does not know come back as warnings.

mod types;

use serde::de::DeserializeOwned;

use crate::domain::entities::ResolvedConfig;
use crate::domain::value_objects::ConfigWarning;
use crate::error::ConfigResult;

pub use types::{
    BuildConfig, ColorMode, FutureIncompatConfig, HttpConfig, IncompatFrequency, JobsConfig,
    NetConfig, ProgressConfig, ProgressWhen, RegistriesConfig, RegistryConfig, SshConfig,
    SslVersionConfig, SslVersionRange, StringOrVec, TermConfig,
};

/// A struct that mirrors one top-level table.
pub trait Section: DeserializeOwned {
    /// Dotted key of the table
    const KEY: &'static str;

    fn load(config: &ResolvedConfig) -> ConfigResult<(Self, Vec<ConfigWarning>)> {
        config.get_section(Self::KEY)
    }
}

impl Section for BuildConfig {
    const KEY: &'static str = "build";
}

impl Section for TermConfig {
    const KEY: &'static str = "term";
}

impl Section for NetConfig {
    const KEY: &'static str = "net";
}

impl Section for HttpConfig {
    const KEY: &'static str = "http";
}

impl Section for FutureIncompatConfig {
    const KEY: &'static str = "future-incompat-report";
}

impl Section for RegistriesConfig {
    const KEY: &'static str = "registries";
}
