//! Domain Layer
//!
//! The core of confstack: keys, values, the schema and the pure services that
//! merge and validate configuration trees.
//!
//! ## Structure
//!
//! - `value_objects/` - Immutable value types (ConfigKey, Definition, ConfigWarning)
//! - `entities/` - The configuration value tree and the resolved snapshot
//! - `schema/` - The schema registry and the built-in key set
//! - `services/` - Hierarchy walk, merge engine, env key mapping, validation
//! - `ports/` - Interface definitions for infrastructure
//!
//! Services never touch the file system; loading goes through `ports`.

pub mod entities;
pub mod ports;
pub mod schema;
pub mod services;
pub mod value_objects;
