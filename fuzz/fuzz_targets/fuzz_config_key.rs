#![no_main]

use libfuzzer_sys::fuzz_target;

use confstack::domain::services::EnvKeyMapper;
use confstack::{ConfigKey, SchemaRegistry};

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        if let Ok(key) = ConfigKey::parse(text) {
            // Display output must parse back
            assert_eq!(ConfigKey::parse(&key.to_string()).ok(), Some(key));
        }

        let registry = SchemaRegistry::builtin();
        let _ = EnvKeyMapper::new(&registry, "CARGO").map(text);
    }
});
