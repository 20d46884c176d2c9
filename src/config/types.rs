//! Typed section definitions

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A value that may be written as one string or as a list of strings.
///
/// The merge already normalizes list-like keys, so this only matters for
/// trees built by hand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StringOrVec {
    One(String),
    Many(Vec<String>),
}

impl StringOrVec {
    pub fn into_vec(self) -> Vec<String> {
        match self {
            StringOrVec::One(s) => s.split_whitespace().map(str::to_string).collect(),
            StringOrVec::Many(v) => v,
        }
    }
}

/// `build.jobs`: a count, or `"default"`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum JobsConfig {
    Integer(i64),
    String(String),
}

/// `[build]`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct BuildConfig {
    // deprecated, still accepted
    pub pipelining: Option<bool>,
    pub dep_info_basedir: Option<String>,
    pub target_dir: Option<String>,
    pub incremental: Option<bool>,
    pub target: Option<StringOrVec>,
    pub jobs: Option<JobsConfig>,
    pub rustflags: Option<StringOrVec>,
    pub rustdocflags: Option<StringOrVec>,
    pub rustc_wrapper: Option<String>,
    pub rustc_workspace_wrapper: Option<String>,
    pub rustc: Option<String>,
    pub rustdoc: Option<String>,
    pub out_dir: Option<String>,
    pub build_dir: Option<String>,
    pub artifact_dir: Option<String>,
    pub warnings: Option<String>,
    pub sbom: Option<bool>,
}

impl BuildConfig {
    /// Number of jobs, falling back to `default` when unset, `"default"`,
    /// or non-positive.
    pub fn jobs_or(&self, default: u32) -> u32 {
        match &self.jobs {
            Some(JobsConfig::Integer(n)) if *n > 0 => u32::try_from(*n).unwrap_or(default),
            Some(JobsConfig::Integer(n)) if *n < 0 => {
                let reduced = i64::from(default) + n;
                u32::try_from(reduced.max(1)).unwrap_or(1)
            }
            _ => default,
        }
    }

    /// `build.target` as a list of triples (or target spec paths).
    pub fn targets(&self) -> Vec<String> {
        self.target.clone().map(StringOrVec::into_vec).unwrap_or_default()
    }
}

/// Color output mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    #[default]
    Auto,
    Always,
    Never,
}

/// When to show progress bars
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ProgressWhen {
    #[default]
    Auto,
    Never,
    Always,
}

/// `[term.progress]`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ProgressConfig {
    #[serde(default)]
    pub when: ProgressWhen,
    pub width: Option<u32>,
    pub term_integration: Option<bool>,
}

/// `[term]`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct TermConfig {
    pub verbose: Option<bool>,
    pub quiet: Option<bool>,
    #[serde(default)]
    pub color: ColorMode,
    pub hyperlinks: Option<bool>,
    pub unicode: Option<bool>,
    pub progress: Option<ProgressConfig>,
}

impl TermConfig {
    /// `always` progress needs a width.
    pub fn progress_is_valid(&self) -> bool {
        !matches!(
            self.progress,
            Some(ProgressConfig {
                when: ProgressWhen::Always,
                width: None,
                ..
            })
        )
    }
}

/// `[net.ssh]`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SshConfig {
    pub known_hosts: Option<Vec<String>>,
}

/// `[net]`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct NetConfig {
    pub retry: Option<u32>,
    pub offline: Option<bool>,
    pub git_fetch_with_cli: Option<bool>,
    pub ssh: Option<SshConfig>,
}

/// `http.ssl-version`: one version, or a `min`/`max` range
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SslVersionConfig {
    Single(String),
    Range(SslVersionRange),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SslVersionRange {
    pub min: Option<String>,
    pub max: Option<String>,
}

/// `[http]`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct HttpConfig {
    pub proxy: Option<String>,
    pub low_speed_limit: Option<u32>,
    pub timeout: Option<u64>,
    pub cainfo: Option<String>,
    pub proxy_cainfo: Option<String>,
    pub check_revoke: Option<bool>,
    pub user_agent: Option<String>,
    pub debug: Option<bool>,
    pub multiplexing: Option<bool>,
    pub ssl_version: Option<SslVersionConfig>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum IncompatFrequency {
    #[default]
    Always,
    Never,
}

/// `[future-incompat-report]`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FutureIncompatConfig {
    #[serde(default)]
    pub frequency: IncompatFrequency,
}

/// `[registries.<name>]`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct RegistryConfig {
    pub index: Option<String>,
    pub token: Option<String>,
    pub credential_provider: Option<StringOrVec>,
    pub protocol: Option<String>,
}

/// `[registries]`
pub type RegistriesConfig = BTreeMap<String, RegistryConfig>;
