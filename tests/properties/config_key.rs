//! Property tests for dotted key parsing.

use proptest::prelude::*;

use confstack::ConfigKey;

fn segment() -> impl Strategy<Value = String> {
    prop_oneof![
        proptest::string::string_regex("[a-z][a-z0-9_-]{0,12}").unwrap(),
        // Needs quoting: dots, parens, spaces
        proptest::string::string_regex("cfg\\([a-z ]{1,8}\\)\\.?[a-z]{0,4}").unwrap(),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 64,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: a key's display form parses back to the same key.
    #[test]
    fn property_display_round_trips(parts in proptest::collection::vec(segment(), 1..=5)) {
        let key = ConfigKey::from_parts(parts.clone());
        let parsed = ConfigKey::parse(&key.to_string()).unwrap();
        prop_assert_eq!(parsed.segments(), parts.as_slice());
    }

    /// PROPERTY: parsing never panics on arbitrary input.
    #[test]
    fn property_parse_never_panics(input in "(?s).{0,64}") {
        let _ = ConfigKey::parse(&input);
    }

    /// PROPERTY: environment names are upper-case with no dots or dashes.
    #[test]
    fn property_env_key_is_shouty(parts in proptest::collection::vec(segment(), 1..=4)) {
        let env = ConfigKey::from_parts(parts).as_env_key("CARGO");
        prop_assert!(env.starts_with("CARGO_"));
        prop_assert!(!env.contains('.'));
        prop_assert!(!env.contains('-'));
        prop_assert!(!env.chars().any(|c| c.is_ascii_lowercase()));
    }
}
