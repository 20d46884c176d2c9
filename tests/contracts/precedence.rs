//! Precedence contracts
//!
//! Closer directories beat ancestors, the global file is lowest, the
//! environment beats files and explicit overrides beat everything.

use confstack::{ConfigValue, Definition, EnvSnapshot};

use crate::common::*;

/// CONTRACT: a key set in exactly one source resolves to that source's value.
#[test]
fn contract_single_source_value_is_kept() {
    let env = TestEnv::new();
    env.config("a", "[net]\nretry = 7\n");

    let resolution = env.resolver("a/b/c").resolve().unwrap();

    assert_eq!(resolution.config.get_i64("net.retry").unwrap(), Some(7));
    assert_eq!(
        resolution.config.definition("net.retry").unwrap(),
        Some(&Definition::Path(env.config_path("a")))
    );
}

/// CONTRACT: the descendant directory wins over its ancestor.
#[test]
fn contract_descendant_beats_ancestor() {
    let env = TestEnv::new();
    env.config("", "[term]\ncolor = \"never\"\n")
        .config("project", "[term]\ncolor = \"always\"\n");

    let resolution = env.resolver("project").resolve().unwrap();

    assert_eq!(
        resolution.config.get_string("term.color").unwrap().as_deref(),
        Some("always")
    );
    assert!(resolution
        .overrides
        .iter()
        .any(|o| o.key.to_string() == "term.color"
            && o.from == Definition::Path(env.config_path(""))));
}

/// CONTRACT: the global file is the lowest-precedence file.
#[test]
fn contract_global_file_is_lowest() {
    let env = TestEnv::new();
    env.global_config("[net]\nretry = 1\noffline = true\n")
        .config("", "[net]\nretry = 2\n");

    let resolution = env.resolver("").resolve().unwrap();

    assert_eq!(resolution.config.get_i64("net.retry").unwrap(), Some(2));
    assert_eq!(resolution.config.get_bool("net.offline").unwrap(), Some(true));
}

/// CONTRACT: the environment beats every file; overrides beat the environment.
#[test]
fn contract_env_then_cli() {
    let env = TestEnv::new();
    env.config("", "[build]\njobs = 2\nincremental = false\n");

    let snapshot = EnvSnapshot::empty()
        .with_var("CARGO_BUILD_JOBS", "4")
        .with_var("CARGO_BUILD_INCREMENTAL", "true");
    let resolution = env
        .resolver_with_env("", snapshot)
        .with_cli_overrides(["build.jobs = 8"])
        .resolve()
        .unwrap();

    assert_eq!(resolution.config.get_i64("build.jobs").unwrap(), Some(8));
    assert_eq!(
        resolution.config.get_bool("build.incremental").unwrap(),
        Some(true)
    );
    assert_eq!(
        resolution.config.definition("build.incremental").unwrap(),
        Some(&Definition::Environment("CARGO_BUILD_INCREMENTAL".into()))
    );
}

/// CONTRACT: missing files at any level are empty contributions.
#[test]
fn contract_missing_files_are_empty() {
    let env = TestEnv::new();
    env.mkdir("x/y/z");

    let resolution = env.resolver("x/y/z").resolve().unwrap();

    assert!(resolution.warnings.is_empty());
    assert!(matches!(
        resolution.config.root(),
        ConfigValue::Table(table, _) if table.is_empty()
    ));
    assert!(resolution.sources.iter().all(|s| !s.is_loaded()));
}

/// CONTRACT: resolving the same sources twice gives equal results.
#[test]
fn contract_resolution_is_idempotent() {
    let env = TestEnv::new();
    env.global_config("[alias]\nb = \"build\"\n")
        .config("", "[build]\nrustflags = [\"-W\", \"warnings\"]\n")
        .config("p", "[build]\nrustflags = \"-C opt-level=2\"\njobs = 3\n");

    let resolver = env.resolver("p");
    let first = resolver.resolve().unwrap();
    let second = resolver.resolve().unwrap();

    assert_eq!(first.config.root(), second.config.root());
    assert_eq!(first.warnings, second.warnings);
    assert_eq!(first.overrides, second.overrides);
}

/// CONTRACT: later `--config` arguments win over earlier ones.
#[test]
fn contract_later_override_wins() {
    let env = TestEnv::new();
    env.write("extra.toml", "[net]\nretry = 5\n");

    let resolution = env
        .resolver("")
        .with_cli_overrides(["net.retry = 1", "extra.toml"])
        .resolve()
        .unwrap();

    assert_eq!(resolution.config.get_i64("net.retry").unwrap(), Some(5));
    assert_eq!(
        resolution.config.definition("net.retry").unwrap(),
        Some(&Definition::Cli(Some(env.path("extra.toml"))))
    );
}

/// CONTRACT: `..` in the start directory walks real ancestors only, each
/// once.
#[test]
fn contract_parent_dir_segments_walk_real_ancestors() {
    let env = TestEnv::new();
    env.config("a", "[build]\nrustflags = [\"-Wa\"]\n")
        .config("a/b", "[build]\nrustflags = [\"-Wb\"]\n[net]\nretry = 9\n");

    let resolution = env.resolver("a/b/..").resolve().unwrap();

    assert_eq!(
        resolution.config.get_list("build.rustflags").unwrap(),
        Some(vec!["-Wa".to_string()])
    );
    assert_eq!(resolution.config.get_i64("net.retry").unwrap(), None);
    let loaded: Vec<_> = resolution.sources.iter().filter(|s| s.is_loaded()).collect();
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0].definition, Definition::Path(env.config_path("a")));
}
