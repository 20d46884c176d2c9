//! Validation contracts
//!
//! Type errors abort resolution and name the key; unknown keys only warn.

use confstack::domain::value_objects::WarningKind;
use confstack::{ConfigError, EnvSnapshot};

use crate::common::*;

/// CONTRACT: a non-numeric value for an integer key is a schema violation.
#[test]
fn contract_non_numeric_env_is_schema_violation() {
    let env = TestEnv::new();

    let err = env
        .resolver_with_env(
            "",
            EnvSnapshot::empty().with_var("CARGO_NET_RETRY", "not-a-number"),
        )
        .resolve()
        .unwrap_err();

    assert!(matches!(err, ConfigError::SchemaViolation { ref key, .. } if key == "net.retry"));
}

/// CONTRACT: file strings are not coerced to booleans.
#[test]
fn contract_file_string_for_boolean_is_rejected() {
    let env = TestEnv::new();
    env.config("", "[net]\noffline = \"true\"\n");

    let err = env.resolver("").resolve().unwrap_err();

    assert_eq!(err.key(), Some("net.offline"));
}

/// CONTRACT: an unknown key warns and resolution still succeeds.
#[test]
fn contract_unknown_key_warns() {
    let env = TestEnv::new();
    env.config("", "[totally.unknown]\nkey = 1\n");

    let resolution = env.resolver("").resolve().unwrap();

    assert_eq!(resolution.warnings.len(), 1);
    let warning = &resolution.warnings[0];
    assert_eq!(warning.key, "totally.unknown.key");
    assert!(matches!(warning.kind, WarningKind::UnrecognizedKey { .. }));
    assert_eq!(warning.line, Some(2));
    assert_eq!(
        resolution.config.get_i64("totally.unknown.key").unwrap(),
        Some(1)
    );
}

/// CONTRACT: malformed TOML aborts with the file and position.
#[test]
fn contract_parse_error_names_file() {
    let env = TestEnv::new();
    env.config("", "[build\njobs = 1\n");

    let err = env.resolver("").resolve().unwrap_err();

    match err {
        ConfigError::Parse { origin, line, .. } => {
            assert_eq!(origin.file(), Some(env.config_path("").as_path()));
            assert!(line.is_some());
        }
        other => panic!("expected a parse error, got {other:?}"),
    }
}

/// CONTRACT: a candidate that exists but cannot be read aborts resolution.
#[test]
fn contract_unreadable_candidate_is_io_error() {
    let env = TestEnv::new();
    std::fs::create_dir_all(env.config_path("")).unwrap();

    let err = env.resolver("").resolve().unwrap_err();

    match err {
        ConfigError::Io { path, .. } => assert_eq!(path, env.config_path("")),
        other => panic!("expected an io error, got {other:?}"),
    }
}

/// CONTRACT: a table and a scalar never merge.
#[test]
fn contract_container_mismatch_is_merge_conflict() {
    let env = TestEnv::new();
    env.config("", "[net.ssh]\nknown-hosts = [\"host ssh-ed25519 AAAA\"]\n")
        .config("p", "[net]\nssh = \"none\"\n");

    let err = env.resolver("p").resolve().unwrap_err();

    assert!(matches!(err, ConfigError::MergeConflict { ref key, .. } if key == "net.ssh"));
}

/// CONTRACT: removed keys are errors, deprecated keys are warnings.
#[test]
fn contract_removed_and_deprecated_keys() {
    let env = TestEnv::new();
    env.config("", "[build]\npipelining = true\n");
    let resolution = env.resolver("").resolve().unwrap();
    assert!(matches!(
        resolution.warnings[0].kind,
        WarningKind::Deprecated { .. }
    ));

    let removed = TestEnv::new();
    removed.config("", "[cargo-new]\nname = \"me\"\n");
    let err = removed.resolver("").resolve().unwrap_err();
    assert_eq!(err.key(), Some("cargo-new.name"));
}
