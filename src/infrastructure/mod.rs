//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles all I/O operations.
//!
//! ## Structure
//!
//! - `fs/` - ConfigSource implementations (local disk, in-memory) and home lookup
//! - `config/` - TOML file loading, environment and `--config` layers

pub mod config;
pub mod fs;

// Re-export for convenience
pub use fs::{LocalFs, MemoryFs};
