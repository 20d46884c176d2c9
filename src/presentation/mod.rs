//! Presentation Layer
//!
//! This layer handles:
//! - Creating the resolver from command-line options
//! - Output formatting (toml/json values, text reports)
//!
//! ## Structure
//!
//! - `factory` - Builds a `ConfigResolver` (dependency injection)
//! - `output` - Value rendering for `get`
//! - `report` - Warnings, sources and schema listings
//! - `style` - Terminal colors

pub mod factory;
pub mod output;
pub mod report;
pub mod style;

pub use factory::{create_resolver, ResolveOptions};
pub use output::{OutputFormat, ValueRenderer};
