//! Resolution use case
//!
//! Runs the whole pipeline: walk the hierarchy, load files (with includes),
//! merge them lowest precedence first, apply the environment, apply
//! `--config` overrides, then validate against the schema.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::domain::entities::{ConfigValue, ResolvedConfig};
use crate::domain::ports::ConfigSource;
use crate::domain::schema::SchemaRegistry;
use crate::domain::services::{
    normalize_lexically, CandidateScope, ConfigCandidate, ConfigMerger, HierarchyResolver,
    Override, Validator,
};
use crate::domain::value_objects::{
    AppProfile, ConfigKey, ConfigWarning, Definition, EnvSnapshot, WarningKind,
};
use crate::error::{ConfigError, ConfigResult};
use crate::infrastructure::config::{
    parse_override, CliOverride, EnvLoader, FileOrigin, LoadedLayer, TomlLoader,
};
use crate::infrastructure::fs::{global_config_dir, search_stop, LocalFs};

/// What kind of layer a source contributed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceKind {
    /// A file found by the directory walk or as the global file
    File(CandidateScope),
    /// A file pulled in by an `include` directive
    Include,
    /// A candidate location with no file
    Missing(CandidateScope),
    Environment,
    CliFile,
    CliValue(ConfigKey),
}

/// One entry of the precedence stack, lowest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceRecord {
    pub definition: Definition,
    pub kind: SourceKind,
}

impl SourceRecord {
    pub fn is_loaded(&self) -> bool {
        !matches!(self.kind, SourceKind::Missing(_))
    }
}

/// Everything a resolution produced.
#[derive(Debug, Clone)]
pub struct Resolution {
    pub config: ResolvedConfig,
    pub warnings: Vec<ConfigWarning>,
    /// Sources in precedence order, lowest first
    pub sources: Vec<SourceRecord>,
    pub overrides: Vec<Override>,
}

/// Builder for one resolution.
#[derive(Clone)]
pub struct ConfigResolver {
    cwd: PathBuf,
    profile: AppProfile,
    env: Option<EnvSnapshot>,
    global_dir: Option<Option<PathBuf>>,
    search_stop: Option<PathBuf>,
    cli_overrides: Vec<String>,
    registry: Arc<SchemaRegistry>,
    source: Arc<dyn ConfigSource>,
}

impl std::fmt::Debug for ConfigResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigResolver")
            .field("cwd", &self.cwd)
            .field("profile", &self.profile)
            .field("global_dir", &self.global_dir)
            .field("search_stop", &self.search_stop)
            .field("cli_overrides", &self.cli_overrides)
            .finish_non_exhaustive()
    }
}

impl ConfigResolver {
    pub fn new(cwd: impl Into<PathBuf>) -> Self {
        Self {
            cwd: cwd.into(),
            profile: AppProfile::cargo(),
            env: None,
            global_dir: None,
            search_stop: None,
            cli_overrides: Vec::new(),
            registry: Arc::new(SchemaRegistry::builtin()),
            source: Arc::new(LocalFs::new()),
        }
    }

    pub fn with_profile(mut self, profile: AppProfile) -> Self {
        self.profile = profile;
        self
    }

    /// Environment to read instead of the process environment.
    pub fn with_env(mut self, env: EnvSnapshot) -> Self {
        self.env = Some(env);
        self
    }

    /// Global configuration directory; `None` disables the global file.
    /// Without this, `$<PREFIX>_HOME` or `~/.<name>` is used.
    pub fn with_global_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.global_dir = Some(dir);
        self
    }

    /// Last directory the upward walk visits. Without this,
    /// `CONFSTACK_TEST_ROOT` is used when set.
    pub fn with_search_stop(mut self, dir: impl Into<PathBuf>) -> Self {
        self.search_stop = Some(dir.into());
        self
    }

    pub fn with_cli_overrides<I, S>(mut self, overrides: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.cli_overrides = overrides.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_registry(mut self, registry: SchemaRegistry) -> Self {
        self.registry = Arc::new(registry);
        self
    }

    pub fn with_source(mut self, source: Arc<dyn ConfigSource>) -> Self {
        self.source = source;
        self
    }

    /// The directory walk this resolver will perform.
    pub fn hierarchy(&self) -> ConfigResult<HierarchyResolver> {
        let cwd = self.absolute_cwd()?;
        let env = self.env();
        Ok(self.hierarchy_for(&cwd, &env))
    }

    pub fn resolve(&self) -> ConfigResult<Resolution> {
        let cwd = self.absolute_cwd()?;
        let env = self.env();
        let hierarchy = self.hierarchy_for(&cwd, &env);
        let loader = TomlLoader::new(self.source.as_ref());

        let mut warnings = Vec::new();
        let mut sources = Vec::new();
        let mut texts: HashMap<PathBuf, String> = HashMap::new();
        let mut merger = ConfigMerger::new(&self.registry);
        let mut tree = ConfigValue::empty_table(Definition::BuiltIn);

        // Files: global first, then from the filesystem root down to cwd.
        let candidates: Vec<ConfigCandidate> = hierarchy.discover().collect();
        for candidate in candidates.iter().rev() {
            let Some(path) = self.pick_file(candidate, &mut warnings) else {
                sources.push(SourceRecord {
                    definition: Definition::Path(candidate.path.clone()),
                    kind: SourceKind::Missing(candidate.scope),
                });
                continue;
            };
            let Some(layers) = loader.load(&path, FileOrigin::Discovered)? else {
                continue;
            };
            for layer in layers {
                let kind = if layer.path == path {
                    SourceKind::File(candidate.scope)
                } else {
                    SourceKind::Include
                };
                self.absorb(&mut merger, &mut tree, layer, kind, &mut sources, &mut texts)?;
            }
        }

        // Environment
        let env_layer = EnvLoader::new(&self.registry, &self.profile, &env).load(&tree)?;
        warnings.extend(env_layer.warnings);
        for (name, _) in &env_layer.applied {
            sources.push(SourceRecord {
                definition: Definition::Environment(name.clone()),
                kind: SourceKind::Environment,
            });
        }
        if !env_layer.applied.is_empty() {
            merger.merge_into(&mut tree, env_layer.tree)?;
        }

        // Explicit overrides, in argument order
        for arg in &self.cli_overrides {
            match parse_override(arg, &cwd, &self.registry, &loader)? {
                CliOverride::File(layers) => {
                    for layer in layers {
                        self.absorb(
                            &mut merger,
                            &mut tree,
                            layer,
                            SourceKind::CliFile,
                            &mut sources,
                            &mut texts,
                        )?;
                    }
                }
                CliOverride::Value { key, tree: value } => {
                    tracing::debug!(key = %key, "applying --config override");
                    merger.merge_into(&mut tree, value)?;
                    sources.push(SourceRecord {
                        definition: Definition::Cli(None),
                        kind: SourceKind::CliValue(key),
                    });
                }
            }
        }

        let validated = Validator::new(&self.registry).validate(tree)?;
        warnings.extend(validated.warnings);
        for warning in &mut warnings {
            if warning.line.is_none() {
                warning.line = warning
                    .definition
                    .file()
                    .and_then(|file| texts.get(file))
                    .and_then(|text| find_key_line(text, &warning.key));
            }
        }

        let overrides = merger.into_overrides();
        tracing::debug!(
            sources = sources.iter().filter(|s| s.is_loaded()).count(),
            warnings = warnings.len(),
            overrides = overrides.len(),
            "configuration resolved"
        );

        Ok(Resolution {
            config: ResolvedConfig::new(
                validated.tree,
                Arc::clone(&self.registry),
                env,
                cwd,
                self.profile.config_dir.clone(),
            ),
            warnings,
            sources,
            overrides,
        })
    }

    fn absorb(
        &self,
        merger: &mut ConfigMerger<'_>,
        tree: &mut ConfigValue,
        layer: LoadedLayer,
        kind: SourceKind,
        sources: &mut Vec<SourceRecord>,
        texts: &mut HashMap<PathBuf, String>,
    ) -> ConfigResult<()> {
        sources.push(SourceRecord {
            definition: layer.tree.definition().clone(),
            kind,
        });
        merger.merge_into(tree, layer.tree)?;
        texts.insert(layer.path, layer.text);
        Ok(())
    }

    /// Choose between `config` and `config.toml` in one directory.
    fn pick_file(
        &self,
        candidate: &ConfigCandidate,
        warnings: &mut Vec<ConfigWarning>,
    ) -> Option<PathBuf> {
        let legacy = self.source.exists(&candidate.legacy_path);
        let preferred = self.source.exists(&candidate.path);
        match (legacy, preferred) {
            (true, true) => {
                warnings.push(ConfigWarning::new(
                    candidate.legacy_path.display().to_string(),
                    Definition::Path(candidate.legacy_path.clone()),
                    WarningKind::BothFilesExist {
                        ignored: candidate.path.clone(),
                    },
                ));
                Some(candidate.legacy_path.clone())
            }
            (true, false) => {
                warnings.push(ConfigWarning::new(
                    candidate.legacy_path.display().to_string(),
                    Definition::Path(candidate.legacy_path.clone()),
                    WarningKind::LegacyFileName {
                        preferred: candidate.path.clone(),
                    },
                ));
                Some(candidate.legacy_path.clone())
            }
            (false, true) => Some(candidate.path.clone()),
            (false, false) => None,
        }
    }

    fn env(&self) -> EnvSnapshot {
        self.env.clone().unwrap_or_else(EnvSnapshot::capture)
    }

    /// Absolute working directory with `.` segments dropped, so recorded
    /// paths read `/a/.cargo/config.toml` rather than `/a/./.cargo/...`.
    fn absolute_cwd(&self) -> ConfigResult<PathBuf> {
        let cwd = if self.cwd.is_absolute() {
            self.cwd.clone()
        } else {
            std::env::current_dir()
                .map(|dir| dir.join(&self.cwd))
                .map_err(|source| ConfigError::Io {
                    path: self.cwd.clone(),
                    source,
                })?
        };
        Ok(normalize_lexically(&cwd))
    }

    fn hierarchy_for(&self, cwd: &Path, env: &EnvSnapshot) -> HierarchyResolver {
        let global = match &self.global_dir {
            Some(dir) => dir.clone(),
            None => global_config_dir(&self.profile, env, cwd),
        };
        HierarchyResolver::new(cwd.to_path_buf(), self.profile.clone())
            .with_global_dir(global)
            .with_search_stop(self.search_stop.clone().or_else(|| search_stop(env)))
    }
}

/// Line (1-indexed) where `key` is assigned in `content`, tracking table
/// headers. Falls back to the first line mentioning the last segment.
fn find_key_line(content: &str, key: &str) -> Option<usize> {
    let target = ConfigKey::parse(key).ok()?;
    let mut table = ConfigKey::root();
    for (i, line) in content.lines().enumerate() {
        let trimmed = line.trim();
        if let Some(header) = table_header(trimmed) {
            table = ConfigKey::parse(header).unwrap_or_default();
            if target.starts_with(&table) && table.len() == target.len() {
                return Some(i + 1);
            }
            continue;
        }
        let Some((lhs, _)) = split_unquoted(trimmed, '=') else {
            continue;
        };
        let Ok(local) = ConfigKey::parse(lhs) else {
            continue;
        };
        let mut full = table.clone();
        for part in local.parts() {
            full.push(part);
        }
        if target.starts_with(&full) {
            return Some(i + 1);
        }
    }
    let needle = target.last()?;
    content
        .lines()
        .position(|line| line.contains(needle))
        .map(|i| i + 1)
}

/// Interior of a `[table]` or `[[array]]` header line.
fn table_header(line: &str) -> Option<&str> {
    let rest = line.strip_prefix("[[").or_else(|| line.strip_prefix('['))?;
    split_unquoted(rest, ']').map(|(header, _)| header)
}

/// Split at the first `stop` outside a quoted key segment.
fn split_unquoted(text: &str, stop: char) -> Option<(&str, &str)> {
    let mut quote = None;
    let mut escaped = false;
    for (i, c) in text.char_indices() {
        match quote {
            Some('"') if escaped => escaped = false,
            Some('"') if c == '\\' => escaped = true,
            Some(q) if c == q => quote = None,
            Some(_) => {}
            None if c == '"' || c == '\'' => quote = Some(c),
            None if c == stop => return Some((&text[..i], &text[i + c.len_utf8()..])),
            None => {}
        }
    }
    None
}
