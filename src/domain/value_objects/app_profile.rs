//! Naming conventions for the tool whose configuration is being resolved.

/// Where an application keeps its configuration and how its environment
/// variables are spelled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppProfile {
    /// Per-directory configuration folder (`.cargo`)
    pub config_dir: String,
    /// File name stem inside that folder (`config` → `config.toml`)
    pub file_stem: String,
    /// Environment variable prefix (`CARGO`)
    pub env_prefix: String,
    /// Variable naming the global configuration directory (`CARGO_HOME`)
    pub home_var: String,
}

impl AppProfile {
    /// Cargo's own layout.
    pub fn cargo() -> Self {
        Self::named("cargo")
    }

    /// Layout for a tool called `name`: `.name/config.toml`, `NAME_*`
    /// variables and `NAME_HOME`.
    pub fn named(name: &str) -> Self {
        let upper: String = name
            .chars()
            .map(|c| match c {
                '-' | '.' => '_',
                c => c.to_ascii_uppercase(),
            })
            .collect();
        Self {
            config_dir: format!(".{}", name),
            file_stem: "config".to_string(),
            env_prefix: upper.clone(),
            home_var: format!("{}_HOME", upper),
        }
    }

    /// `config.toml`
    pub fn file_name(&self) -> String {
        format!("{}.toml", self.file_stem)
    }

    /// Extension-less legacy name (`config`)
    pub fn legacy_file_name(&self) -> &str {
        &self.file_stem
    }
}

impl Default for AppProfile {
    fn default() -> Self {
        Self::cargo()
    }
}
