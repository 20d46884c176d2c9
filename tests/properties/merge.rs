//! Property tests for layer merging.

use std::path::PathBuf;

use proptest::prelude::*;

use confstack::domain::services::merge_layers;
use confstack::infrastructure::config::parse_config;
use confstack::{ConfigValue, Definition, SchemaRegistry};

fn layer(index: usize, retry: Option<i64>, flags: &[String]) -> ConfigValue {
    let mut text = String::from("[net]\n");
    if let Some(retry) = retry {
        text.push_str(&format!("retry = {}\n", retry));
    }
    let quoted: Vec<String> = flags.iter().map(|f| format!("\"{}\"", f)).collect();
    text.push_str(&format!("[build]\nrustflags = [{}]\n", quoted.join(", ")));
    let definition = Definition::Path(PathBuf::from(format!("/l{}/.cargo/config.toml", index)));
    parse_config(&text, definition).unwrap()
}

fn flag() -> impl Strategy<Value = String> {
    proptest::string::string_regex("-[A-Za-z]{1,6}").unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 64,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: the last layer that sets a scalar wins, and appended lists
    /// keep layer order.
    #[test]
    fn property_last_scalar_wins_lists_concatenate(
        layers in proptest::collection::vec(
            (proptest::option::of(0i64..100), proptest::collection::vec(flag(), 0..4)),
            1..6,
        )
    ) {
        let registry = SchemaRegistry::builtin();
        let trees: Vec<ConfigValue> = layers
            .iter()
            .enumerate()
            .map(|(i, (retry, flags))| layer(i, *retry, flags))
            .collect();

        let outcome = merge_layers(&registry, trees).unwrap();

        let expected_retry = layers.iter().rev().find_map(|(retry, _)| *retry);
        let retry = outcome
            .tree
            .get(&"net.retry".parse().unwrap())
            .and_then(ConfigValue::as_i64);
        prop_assert_eq!(retry, expected_retry);

        let expected_flags: Vec<String> = layers.iter().flat_map(|(_, f)| f.clone()).collect();
        let flags: Vec<String> = outcome
            .tree
            .get(&"build.rustflags".parse().unwrap())
            .and_then(ConfigValue::as_list)
            .unwrap()
            .iter()
            .filter_map(|v| v.as_str().map(str::to_string))
            .collect();
        prop_assert_eq!(flags, expected_flags);
    }

    /// PROPERTY: merging is deterministic.
    #[test]
    fn property_merge_is_deterministic(
        retries in proptest::collection::vec(proptest::option::of(0i64..10), 1..5)
    ) {
        let registry = SchemaRegistry::builtin();
        let build = || -> Vec<ConfigValue> {
            retries.iter().enumerate().map(|(i, r)| layer(i, *r, &[])).collect()
        };
        let first = merge_layers(&registry, build()).unwrap();
        let second = merge_layers(&registry, build()).unwrap();
        prop_assert_eq!(first, second);
    }

    /// PROPERTY: the file loader never panics on arbitrary text.
    #[test]
    fn property_parse_config_never_panics(text in "(?s).{0,256}") {
        let _ = parse_config(&text, Definition::BuiltIn);
    }
}
