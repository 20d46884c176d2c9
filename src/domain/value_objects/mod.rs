//! Domain Value Objects
//!
//! Immutable value types that represent domain concepts.

mod app_profile;
mod config_key;
mod config_warning;
mod definition;
mod env_snapshot;

pub use app_profile::AppProfile;
pub use config_key::{env_segment, escape_key_part, ConfigKey, WILDCARD};
pub use config_warning::{ConfigWarning, WarningKind};
pub use definition::Definition;
pub use env_snapshot::EnvSnapshot;
