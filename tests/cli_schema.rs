//! `confstack schema` and global flags

mod common;

use common::TestEnv;

#[test]
fn schema_filters_by_prefix() {
    let env = TestEnv::new();

    let result = env.run("", &["schema", "term.progress"]);

    assert!(result.success, "schema failed: {}", result.stderr);
    let keys: Vec<&str> = result
        .stdout
        .lines()
        .filter_map(|l| l.split_whitespace().next())
        .collect();
    assert_eq!(
        keys,
        ["term.progress.when", "term.progress.width", "term.progress.term-integration"]
    );
}

#[test]
fn schema_json_marks_secrets() {
    let env = TestEnv::new();

    let result = env.run("", &["--json", "schema", "registry"]);

    assert!(result.success, "schema failed: {}", result.stderr);
    let json: serde_json::Value = serde_json::from_str(&result.stdout).unwrap();
    let token = json
        .as_array()
        .unwrap()
        .iter()
        .find(|e| e["key"] == "registry.token")
        .unwrap();
    assert_eq!(token["secret"], true);
}

#[test]
fn version_flag() {
    let env = TestEnv::new();

    let result = env.run("", &["--version"]);

    assert!(result.success);
    assert!(result.stdout.starts_with("confstack "));
}

#[test]
fn app_flag_switches_directory_and_prefix() {
    let env = TestEnv::new();
    env.write(".tool/config.toml", "[net]\nretry = 4\n");

    let result = env.run_with_env(
        "",
        &["--app", "tool", "get", "net.retry"],
        &[("CARGO_NET_RETRY", "1")],
    );

    assert!(result.success, "get failed: {}", result.stderr);
    assert_eq!(result.stdout, "net.retry = 4\n");

    let result = env.run_with_env(
        "",
        &["--app", "tool", "get", "net.retry"],
        &[("TOOL_NET_RETRY", "6")],
    );
    assert_eq!(result.stdout, "net.retry = 6\n");
}
