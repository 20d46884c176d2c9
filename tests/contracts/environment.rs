//! Environment contracts
//!
//! Prefixed variables map onto schema keys and are coerced to the key's
//! declared type.

use confstack::{Definition, EnvSnapshot};

use crate::common::*;

/// CONTRACT: `CARGO_BUILD_JOBS=4` is the integer 4 at `build.jobs`.
#[test]
fn contract_env_integer_beats_file() {
    let env = TestEnv::new();
    env.config("", "[build]\njobs = 1\n");

    let resolution = env
        .resolver_with_env("", EnvSnapshot::empty().with_var("CARGO_BUILD_JOBS", "4"))
        .resolve()
        .unwrap();

    assert_eq!(resolution.config.get_i64("build.jobs").unwrap(), Some(4));
}

/// CONTRACT: wildcard tables take their name from the variable.
#[test]
fn contract_env_wildcard_table() {
    let env = TestEnv::new();
    let snapshot = EnvSnapshot::empty()
        .with_var("CARGO_REGISTRIES_MY_REGISTRY_INDEX", "https://example.com/index");

    let resolution = env.resolver_with_env("", snapshot).resolve().unwrap();

    assert_eq!(
        resolution
            .config
            .get_string("registries.my-registry.index")
            .unwrap()
            .as_deref(),
        Some("https://example.com/index")
    );
}

/// CONTRACT: env lists append after file lists.
#[test]
fn contract_env_list_appends() {
    let env = TestEnv::new();
    env.config("", "[build]\nrustflags = [\"-Wfile\"]\n");

    let resolution = env
        .resolver_with_env(
            "",
            EnvSnapshot::empty().with_var("CARGO_BUILD_RUSTFLAGS", "-Wenv -Wmore"),
        )
        .resolve()
        .unwrap();

    assert_eq!(
        resolution.config.get_list("build.rustflags").unwrap(),
        Some(vec![
            "-Wfile".to_string(),
            "-Wenv".to_string(),
            "-Wmore".to_string(),
        ])
    );
}

/// CONTRACT: unrelated variables never reach the tree.
#[test]
fn contract_unrelated_env_is_ignored() {
    let env = TestEnv::new();
    let snapshot = EnvSnapshot::empty()
        .with_var("PATH", "/usr/bin")
        .with_var("CARGO_PKG_NAME", "demo");

    let resolution = env.resolver_with_env("", snapshot).resolve().unwrap();

    assert!(resolution.config.get("pkg").unwrap().is_none());
    assert!(!resolution
        .sources
        .iter()
        .any(|s| s.definition == Definition::Environment("PATH".into())));
}

/// CONTRACT: `"default"` from the environment falls back to the built-in
/// job count.
#[test]
fn contract_env_jobs_default_uses_builtin() {
    let env = TestEnv::new();

    let resolution = env
        .resolver_with_env("", EnvSnapshot::empty().with_var("CARGO_BUILD_JOBS", "default"))
        .resolve()
        .unwrap();

    let jobs = resolution.config.get_i64_or_default("build.jobs").unwrap();
    assert!(jobs.unwrap() >= 1);
}
