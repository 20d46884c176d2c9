use super::*;
use std::path::PathBuf;

fn file_def() -> Definition {
    Definition::Path(PathBuf::from("/p/.cargo/config.toml"))
}

fn from_file(text: &str) -> ConfigValue {
    let table: toml::Table = text.parse().unwrap();
    ConfigValue::from_toml(file_def(), toml::Value::Table(table)).unwrap()
}

fn env_tree(key: &str, value: &str) -> ConfigValue {
    let mut root = ConfigValue::empty_table(Definition::BuiltIn);
    let key = ConfigKey::parse(key).unwrap();
    let def = Definition::Environment(key.as_env_key("CARGO"));
    root.insert(&key, ConfigValue::String(value.to_string(), def))
        .unwrap();
    root
}

fn validate(tree: ConfigValue) -> ConfigResult<Validated> {
    Validator::new(&SchemaRegistry::builtin()).validate(tree)
}

fn get<'t>(tree: &'t ConfigValue, key: &str) -> &'t ConfigValue {
    tree.get(&ConfigKey::parse(key).unwrap()).unwrap()
}

#[test]
fn valid_tree_passes_unchanged() {
    let tree = from_file("[build]\njobs = 4\n[term]\ncolor = \"always\"\n");
    let validated = validate(tree.clone()).unwrap();
    assert_eq!(validated.tree, tree);
    assert!(validated.warnings.is_empty());
}

#[test]
fn unknown_key_warns_and_is_kept() {
    let validated = validate(from_file("[totally.unknown]\nkey = 1\n")).unwrap();
    assert_eq!(validated.warnings.len(), 1);
    let warning = &validated.warnings[0];
    assert_eq!(warning.key, "totally.unknown.key");
    assert_eq!(warning.definition, file_def());
    assert_eq!(
        warning.kind,
        WarningKind::UnrecognizedKey { suggestion: None }
    );
    assert_eq!(get(&validated.tree, "totally.unknown.key").as_i64(), Some(1));
}

#[test]
fn typo_gets_a_suggestion() {
    let validated = validate(from_file("[build]\njbos = 4\n")).unwrap();
    assert_eq!(
        validated.warnings[0].kind,
        WarningKind::UnrecognizedKey {
            suggestion: Some("build.jobs".to_string())
        }
    );
}

#[test]
fn env_strings_are_coerced() {
    let validated = validate(env_tree("build.jobs", "4")).unwrap();
    assert_eq!(get(&validated.tree, "build.jobs").as_i64(), Some(4));

    let validated = validate(env_tree("term.verbose", "true")).unwrap();
    assert_eq!(get(&validated.tree, "term.verbose").as_bool(), Some(true));
}

#[test]
fn env_integer_that_does_not_parse_is_an_error() {
    let err = validate(env_tree("net.retry", "not-a-number")).unwrap_err();
    match err {
        ConfigError::SchemaViolation {
            key,
            expected,
            found,
            definition,
        } => {
            assert_eq!(key, "net.retry");
            assert_eq!(expected, "an integer");
            assert_eq!(found, "string `not-a-number`");
            assert_eq!(
                definition,
                Definition::Environment("CARGO_NET_RETRY".into())
            );
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn file_strings_are_not_coerced() {
    let err = validate(from_file("[term]\nverbose = \"true\"\n")).unwrap_err();
    assert!(matches!(err, ConfigError::SchemaViolation { ref key, .. } if key == "term.verbose"));
}

#[test]
fn jobs_accepts_default_keyword() {
    let validated = validate(from_file("[build]\njobs = \"default\"\n")).unwrap();
    assert_eq!(get(&validated.tree, "build.jobs").as_str(), Some("default"));
    assert!(validate(from_file("[build]\njobs = \"many\"\n")).is_err());
}

#[test]
fn enum_rejects_unknown_values() {
    let err = validate(from_file("[term]\ncolor = \"sometimes\"\n")).unwrap_err();
    assert!(err.to_string().contains("one of `auto`, `always`, `never`"));
}

#[test]
fn string_or_list_normalizes_to_list() {
    let validated = validate(from_file("[build]\ntarget = \"wasm32-unknown-unknown\"\n")).unwrap();
    let target = get(&validated.tree, "build.target").as_list().unwrap();
    assert_eq!(target.len(), 1);
}

#[test]
fn args_string_is_split() {
    let validated = validate(from_file("[target.x]\nrunner = \"qemu -L /usr\"\n")).unwrap();
    let runner = get(&validated.tree, "target.x.runner").as_list().unwrap();
    let args: Vec<_> = runner.iter().map(|v| v.as_str().unwrap()).collect();
    assert_eq!(args, vec!["qemu", "-L", "/usr"]);
}

#[test]
fn list_items_must_be_strings() {
    let err = validate(from_file("[build]\nrustflags = [\"-W\", 3]\n")).unwrap_err();
    assert!(matches!(err, ConfigError::SchemaViolation { ref found, .. } if found == "integer `3`"));
}

#[test]
fn scalar_where_table_expected() {
    let err = validate(from_file("build = 5\n")).unwrap_err();
    assert!(
        matches!(err, ConfigError::SchemaViolation { ref key, ref expected, .. } if key == "build" && expected == "a table")
    );
}

#[test]
fn deprecated_key_warns() {
    let validated = validate(from_file("[build]\npipelining = true\n")).unwrap();
    assert!(matches!(
        validated.warnings[0].kind,
        WarningKind::Deprecated { .. }
    ));
    assert_eq!(get(&validated.tree, "build.pipelining").as_bool(), Some(true));
}

#[test]
fn removed_key_is_an_error() {
    let err = validate(from_file("[cargo-new]\nname = \"me\"\n")).unwrap_err();
    assert!(err.to_string().contains("cargo-new.name"));
}

#[test]
fn free_form_tables_are_not_inspected() {
    let validated = validate(from_file("[env]\nFOO = { value = \"x\", anything = 1 }\n")).unwrap();
    assert!(validated.warnings.is_empty());
}

#[test]
fn tls_version_accepts_string_or_table() {
    assert!(validate(from_file("[http]\nssl-version = \"tlsv1.3\"\n")).is_ok());
    assert!(validate(from_file("[http.ssl-version]\nmin = \"tlsv1.2\"\nmax = \"tlsv1.3\"\n")).is_ok());
    assert!(validate(from_file("[http.ssl-version]\nmin = \"ssl3\"\n")).is_err());
}

#[test]
fn env_list_is_split_on_separator() {
    let validated = validate(env_tree("unstable.build-std", "std, core")).unwrap();
    let items: Vec<_> = get(&validated.tree, "unstable.build-std")
        .as_list()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap().to_string())
        .collect();
    assert_eq!(items, vec!["std", "core"]);
}
