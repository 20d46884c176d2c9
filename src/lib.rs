//! confstack - hierarchical configuration resolution with Cargo semantics
//!
//! Discovers `.cargo/config.toml` files from a working directory up to the
//! filesystem root plus the global `$CARGO_HOME/config.toml`, merges them
//! (closer directories win, lists append), applies `CARGO_*` environment
//! variables and `--config` overrides, and validates the result against a
//! schema of recognized keys.
//!
//! ```no_run
//! use confstack::ConfigResolver;
//!
//! let resolution = ConfigResolver::new(".").resolve()?;
//! for warning in &resolution.warnings {
//!     eprintln!("warning: {}", warning);
//! }
//! let jobs = resolution.config.get_i64_or_default("build.jobs")?;
//! # Ok::<(), confstack::ConfigError>(())
//! ```

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod presentation;

// Re-exports for convenience
pub use application::{ConfigQuery, ConfigResolver, QueryResult, Resolution};
pub use domain::entities::{ConfigValue, ResolvedConfig};
pub use domain::schema::{SchemaEntry, SchemaRegistry, Shape};
pub use domain::value_objects::{AppProfile, ConfigKey, ConfigWarning, Definition, EnvSnapshot};
pub use error::{ConfigError, ConfigResult};
