#![no_main]

use libfuzzer_sys::fuzz_target;

use confstack::infrastructure::config::parse_config;
use confstack::Definition;

fuzz_target!(|data: &[u8]| {
    if let Ok(content) = std::str::from_utf8(data) {
        // Loading arbitrary file contents must never panic
        let _ = parse_config(content, Definition::BuiltIn);
    }
});
