//! Common test utilities for confstack integration tests.
//!
//! - `TestEnv`: a workspace and a global configuration directory in temp
//!   directories, with helpers to write config files and run the binary

#![allow(dead_code)]

pub mod env;

pub use env::*;
