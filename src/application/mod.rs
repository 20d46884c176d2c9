//! Application Layer
//!
//! Use cases that orchestrate the resolution flow.
//! This layer:
//! - Depends on Domain layer (entities, services, ports)
//! - Does NOT contain business rules (those are in Domain)
//! - Coordinates between Infrastructure and Domain
//!
//! ## Use Cases
//!
//! - `ConfigResolver` - Discover, load, merge and validate every source
//! - `ConfigQuery` - Look up one key in a resolved configuration

pub mod query;
pub mod resolve;

pub use query::{ConfigQuery, QueryResult};
pub use resolve::{ConfigResolver, Resolution, SourceKind, SourceRecord};
