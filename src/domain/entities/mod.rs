//! Domain Entities
//!
//! - `ConfigValue` - A node of the configuration tree, tagged with its origin
//! - `ResolvedConfig` - The merged, validated snapshot handed to consumers

mod config_value;
mod resolved_config;

pub use config_value::{ConfigTable, ConfigValue};
pub use resolved_config::ResolvedConfig;
