//! Domain Services
//!
//! Pure logic over configuration trees. None of these touch the file system.

mod config_merger;
mod env_key_mapper;
mod hierarchy_resolver;
pub mod suggest;
mod validator;

pub use config_merger::{merge_layers, ConfigMerger, MergeOutcome, Override};
pub use env_key_mapper::EnvKeyMapper;
pub use hierarchy_resolver::{CandidateScope, ConfigCandidate, Discover, HierarchyResolver};
pub(crate) use hierarchy_resolver::normalize_lexically;
pub use validator::{Validated, Validator};
