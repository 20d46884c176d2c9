//! Built-in schema: the keys Cargo understands.

use super::{DefaultValue, SchemaEntry, Shape};

const COLOR: &[&str] = &["auto", "always", "never"];
const TLS: &[&str] = &["default", "tlsv1", "tlsv1.0", "tlsv1.1", "tlsv1.2", "tlsv1.3"];

const INT_OR_DEFAULT: &[Shape] = &[Shape::Integer, Shape::Enum(&["default"])];
const INT_OR_STRING: &[Shape] = &[Shape::Integer, Shape::String];
const BOOL_OR_STRING: &[Shape] = &[Shape::Boolean, Shape::String];
const DEBUG_LEVEL: &[Shape] = &[Shape::Boolean, Shape::Integer, Shape::String];
const TLS_VERSION: &[Shape] = &[Shape::Enum(TLS), Shape::Table];

pub(super) fn entries() -> Vec<SchemaEntry> {
    use Shape::*;

    vec![
        // [alias]
        SchemaEntry::new("alias.*", Args)
            .replace_only()
            .doc("Command alias expanded before dispatch"),
        // [build]
        SchemaEntry::new("build.jobs", OneOf(INT_OR_DEFAULT))
            .default_value(DefaultValue::Parallelism)
            .doc("Number of parallel jobs; defaults to the logical CPU count"),
        SchemaEntry::new("build.rustc", String).env_aliases(&["RUSTC"]),
        SchemaEntry::new("build.rustc-wrapper", String).env_aliases(&["RUSTC_WRAPPER"]),
        SchemaEntry::new("build.rustc-workspace-wrapper", String)
            .env_aliases(&["RUSTC_WORKSPACE_WRAPPER"]),
        SchemaEntry::new("build.rustdoc", String).env_aliases(&["RUSTDOC"]),
        SchemaEntry::new("build.target", StringOrList)
            .replace_only()
            .doc("Default target triple(s)"),
        SchemaEntry::new("build.target-dir", String)
            .env_aliases(&["CARGO_TARGET_DIR"])
            .doc("Directory for all generated artifacts"),
        SchemaEntry::new("build.build-dir", String),
        SchemaEntry::new("build.artifact-dir", String),
        SchemaEntry::new("build.out-dir", String).deprecated("renamed to `build.artifact-dir`"),
        SchemaEntry::new("build.rustflags", Args)
            .env_aliases(&["RUSTFLAGS"])
            .doc("Extra flags passed to every compiler invocation"),
        SchemaEntry::new("build.rustdocflags", Args).env_aliases(&["RUSTDOCFLAGS"]),
        SchemaEntry::new("build.incremental", Boolean),
        SchemaEntry::new("build.dep-info-basedir", String),
        SchemaEntry::new("build.pipelining", Boolean)
            .deprecated("pipelining is always enabled and the key has no effect"),
        SchemaEntry::new("build.warnings", Enum(&["warn", "allow", "deny"])),
        SchemaEntry::new("build.sbom", Boolean),
        // [cache]
        SchemaEntry::new("cache.auto-clean-frequency", String),
        // [cargo-new]
        SchemaEntry::new("cargo-new.vcs", Enum(&["git", "hg", "pijul", "fossil", "none"])),
        SchemaEntry::new("cargo-new.name", String)
            .removed("new packages no longer get an `authors` field"),
        SchemaEntry::new("cargo-new.email", String)
            .removed("new packages no longer get an `authors` field"),
        // [credential-alias]
        SchemaEntry::new("credential-alias.*", Args).replace_only(),
        // [doc]
        SchemaEntry::new("doc.browser", Args)
            .replace_only()
            .default_value(DefaultValue::Inherit("BROWSER"))
            .doc("Browser used by `doc --open`; falls back to $BROWSER"),
        // [env]
        SchemaEntry::new("env.*", Any).doc("Environment variables set for build scripts and rustc"),
        // [future-incompat-report]
        SchemaEntry::new("future-incompat-report.frequency", Enum(&["always", "never"]))
            .default_value(DefaultValue::Str("always")),
        // [host]
        SchemaEntry::new("host.linker", String),
        SchemaEntry::new("host.runner", Args).replace_only(),
        SchemaEntry::new("host.rustflags", Args),
        // [http]
        SchemaEntry::new("http.debug", Boolean),
        SchemaEntry::new("http.proxy", String),
        SchemaEntry::new("http.timeout", Integer).default_value(DefaultValue::Int(30)),
        SchemaEntry::new("http.cainfo", String),
        SchemaEntry::new("http.proxy-cainfo", String),
        SchemaEntry::new("http.check-revoke", Boolean),
        SchemaEntry::new("http.low-speed-limit", Integer).default_value(DefaultValue::Int(10)),
        SchemaEntry::new("http.multiplexing", Boolean).default_value(DefaultValue::Bool(true)),
        SchemaEntry::new("http.user-agent", String),
        SchemaEntry::new("http.ssl-version", OneOf(TLS_VERSION)),
        SchemaEntry::new("http.ssl-version.min", Enum(TLS)),
        SchemaEntry::new("http.ssl-version.max", Enum(TLS)),
        // [install]
        SchemaEntry::new("install.root", String),
        // [net]
        SchemaEntry::new("net.retry", Integer).default_value(DefaultValue::Int(3)),
        SchemaEntry::new("net.git-fetch-with-cli", Boolean),
        SchemaEntry::new("net.offline", Boolean).default_value(DefaultValue::Bool(false)),
        SchemaEntry::new("net.ssh.known-hosts", List),
        // [patch]
        SchemaEntry::new("patch.*", Any),
        // paths
        SchemaEntry::new("paths", List).doc("Local path overrides for dependencies"),
        // [profile]
        SchemaEntry::new("profile.*.opt-level", OneOf(INT_OR_STRING)),
        SchemaEntry::new("profile.*.debug", OneOf(DEBUG_LEVEL)),
        SchemaEntry::new("profile.*.lto", OneOf(BOOL_OR_STRING)),
        SchemaEntry::new("profile.*.strip", OneOf(BOOL_OR_STRING)),
        SchemaEntry::new("profile.*.codegen-units", Integer),
        SchemaEntry::new("profile.*.debug-assertions", Boolean),
        SchemaEntry::new("profile.*.overflow-checks", Boolean),
        SchemaEntry::new("profile.*.incremental", Boolean),
        SchemaEntry::new("profile.*.panic", Enum(&["unwind", "abort"])),
        SchemaEntry::new("profile.*.rpath", Boolean),
        SchemaEntry::new("profile.*.split-debuginfo", String),
        SchemaEntry::new("profile.*.inherits", String),
        SchemaEntry::new("profile.*.package", Any),
        SchemaEntry::new("profile.*.build-override", Any),
        // [registries]
        SchemaEntry::new("registries.*.index", String),
        SchemaEntry::new("registries.*.token", String).secret(),
        SchemaEntry::new("registries.*.credential-provider", Args).replace_only(),
        SchemaEntry::new("registries.*.protocol", Enum(&["git", "sparse"])),
        // [registry]
        SchemaEntry::new("registry.default", String)
            .default_value(DefaultValue::Str("crates-io")),
        SchemaEntry::new("registry.token", String).secret(),
        SchemaEntry::new("registry.credential-provider", Args).replace_only(),
        SchemaEntry::new("registry.global-credential-providers", List),
        SchemaEntry::new("registry.secret-key", String).secret(),
        SchemaEntry::new("registry.secret-key-subject", String),
        // [resolver]
        SchemaEntry::new(
            "resolver.incompatible-rust-versions",
            Enum(&["allow", "fallback"]),
        ),
        SchemaEntry::new(
            "resolver.feature-unification",
            Enum(&["selected", "workspace", "package"]),
        ),
        // [source]
        SchemaEntry::new("source.*.replace-with", String),
        SchemaEntry::new("source.*.directory", String),
        SchemaEntry::new("source.*.registry", String),
        SchemaEntry::new("source.*.local-registry", String),
        SchemaEntry::new("source.*.git", String),
        SchemaEntry::new("source.*.branch", String),
        SchemaEntry::new("source.*.tag", String),
        SchemaEntry::new("source.*.rev", String),
        // [target]
        SchemaEntry::new("target.*.linker", String),
        SchemaEntry::new("target.*.runner", Args)
            .replace_only()
            .doc("Wrapper used to run binaries and tests for the target"),
        SchemaEntry::new("target.*.rustflags", Args),
        SchemaEntry::new("target.*.rustdocflags", Args),
        // [term]
        SchemaEntry::new("term.verbose", Boolean).default_value(DefaultValue::Bool(false)),
        SchemaEntry::new("term.quiet", Boolean).default_value(DefaultValue::Bool(false)),
        SchemaEntry::new("term.color", Enum(COLOR)).default_value(DefaultValue::Str("auto")),
        SchemaEntry::new("term.hyperlinks", Boolean),
        SchemaEntry::new("term.unicode", Boolean),
        SchemaEntry::new("term.progress.when", Enum(COLOR))
            .default_value(DefaultValue::Str("auto")),
        SchemaEntry::new("term.progress.width", Integer),
        SchemaEntry::new("term.progress.term-integration", Boolean),
        // [unstable]
        SchemaEntry::new("unstable.build-std", List).comma_separated(),
        SchemaEntry::new("unstable.build-std-features", List).comma_separated(),
        SchemaEntry::new("unstable.*", Any),
    ]
}
