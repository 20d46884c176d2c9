//! Configuration layer sources: files, environment and `--config` overrides.

pub mod cli_source;
pub mod env_source;
pub mod toml_loader;

pub use cli_source::{parse_override, CliOverride};
pub use env_source::{EnvLayer, EnvLoader};
pub use toml_loader::{parse_config, parse_table, FileOrigin, LoadedLayer, TomlLoader};
