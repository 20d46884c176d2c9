//! Global configuration directory resolution.
//!
//! The global directory is `$<PREFIX>_HOME` when set (`CARGO_HOME`),
//! otherwise `<home>/<config dir>` (`~/.cargo`).
//!
//! `dirs::home_dir()` ignores `HOME` on Windows, so the home directory can
//! be overridden with `CONFSTACK_TEST_HOME` for test isolation. Likewise
//! `CONFSTACK_TEST_ROOT` stops the directory walk so tests never see
//! configuration above their sandbox.

use std::path::{Path, PathBuf};

use crate::domain::value_objects::{AppProfile, EnvSnapshot};

/// Environment variable for test isolation of the home directory.
pub const CONFSTACK_TEST_HOME_VAR: &str = "CONFSTACK_TEST_HOME";

/// Environment variable bounding the upward walk in tests.
pub const CONFSTACK_TEST_ROOT_VAR: &str = "CONFSTACK_TEST_ROOT";

/// Directory where the upward walk stops, if one is set.
pub fn search_stop(env: &EnvSnapshot) -> Option<PathBuf> {
    env.get(CONFSTACK_TEST_ROOT_VAR)
        .filter(|dir| !dir.is_empty())
        .map(PathBuf::from)
}

/// The user's home directory.
pub fn home_dir(env: &EnvSnapshot) -> Option<PathBuf> {
    env.get(CONFSTACK_TEST_HOME_VAR)
        .map(PathBuf::from)
        .or_else(dirs::home_dir)
}

/// Directory holding the global configuration file.
///
/// A relative `$<PREFIX>_HOME` is taken relative to `cwd`.
pub fn global_config_dir(profile: &AppProfile, env: &EnvSnapshot, cwd: &Path) -> Option<PathBuf> {
    if let Some(dir) = env.get(&profile.home_var).filter(|d| !d.is_empty()) {
        return Some(cwd.join(dir));
    }
    home_dir(env).map(|home| home.join(&profile.config_dir))
}
