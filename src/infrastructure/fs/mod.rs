//! File System Implementations
//!
//! Concrete implementations of the ConfigSource port, plus home directory
//! lookup.

mod home;
mod local;
mod memory;

pub use home::{
    global_config_dir, home_dir, search_stop, CONFSTACK_TEST_HOME_VAR, CONFSTACK_TEST_ROOT_VAR,
};
pub use local::LocalFs;
pub use memory::MemoryFs;
