//! List merging contracts
//!
//! Lists append lower-precedence entries first unless the key is
//! replace-only.

use crate::common::*;

/// CONTRACT: list keys concatenate, ancestor entries first.
#[test]
fn contract_lists_append_ancestor_first() {
    let env = TestEnv::new();
    env.config("", "[build]\nrustflags = [\"-W\", \"warnings\"]\n")
        .config("crate", "[build]\nrustflags = [\"-C\", \"opt-level=2\"]\n");

    let resolution = env.resolver("crate").resolve().unwrap();

    assert_eq!(
        resolution.config.get_list("build.rustflags").unwrap(),
        Some(vec![
            "-W".to_string(),
            "warnings".to_string(),
            "-C".to_string(),
            "opt-level=2".to_string(),
        ])
    );
}

/// CONTRACT: a whitespace string and a list combine for argument keys.
#[test]
fn contract_args_string_joins_list() {
    let env = TestEnv::new();
    env.config("", "[build]\nrustflags = \"-W warnings\"\n")
        .config("crate", "[build]\nrustflags = [\"-Dunsafe_code\"]\n");

    let resolution = env.resolver("crate").resolve().unwrap();

    assert_eq!(
        resolution.config.get_list("build.rustflags").unwrap(),
        Some(vec![
            "-W".to_string(),
            "warnings".to_string(),
            "-Dunsafe_code".to_string(),
        ])
    );
}

/// CONTRACT: replace-only lists keep only the higher-precedence value.
#[test]
fn contract_replace_only_list() {
    let env = TestEnv::new();
    env.config("", "[target.x86_64-unknown-linux-gnu]\nrunner = [\"qemu\", \"-L\"]\n")
        .config(
            "crate",
            "[target.x86_64-unknown-linux-gnu]\nrunner = [\"valgrind\"]\n",
        );

    let resolution = env.resolver("crate").resolve().unwrap();

    assert_eq!(
        resolution
            .config
            .get_list("target.x86_64-unknown-linux-gnu.runner")
            .unwrap(),
        Some(vec!["valgrind".to_string()])
    );
}

/// CONTRACT: includes load before the including file, so the file wins.
#[test]
fn contract_include_is_lower_than_includer() {
    let env = TestEnv::new();
    env.write(
        ".cargo/shared.toml",
        "[build]\nrustflags = [\"-Ashared\"]\n[net]\nretry = 9\n",
    )
    .config(
        "",
        "include = \"shared.toml\"\n[build]\nrustflags = [\"-Aown\"]\n[net]\nretry = 1\n",
    );

    let resolution = env.resolver("").resolve().unwrap();

    assert_eq!(resolution.config.get_i64("net.retry").unwrap(), Some(1));
    assert_eq!(
        resolution.config.get_list("build.rustflags").unwrap(),
        Some(vec!["-Ashared".to_string(), "-Aown".to_string()])
    );
}
