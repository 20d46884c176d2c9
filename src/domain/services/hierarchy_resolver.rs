//! Hierarchy resolver
//!
//! Enumerates candidate configuration locations, most specific first: the
//! start directory, each ancestor up to the filesystem root (or the search
//! stop), then the global directory. The walk is lazy and never touches the
//! file system; the loader decides which candidates exist.

use std::collections::HashSet;
use std::path::{Component, Path, PathBuf};

use crate::domain::value_objects::AppProfile;

/// Where a candidate sits in the hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateScope {
    /// `depth` 0 is the start directory, 1 its parent, and so on
    Directory { depth: usize },
    Global,
}

/// One location that may hold a configuration file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigCandidate {
    /// The configuration directory (`<dir>/.cargo`, or the global directory)
    pub config_dir: PathBuf,
    /// Preferred file (`config.toml`)
    pub path: PathBuf,
    /// Extension-less legacy file (`config`)
    pub legacy_path: PathBuf,
    pub scope: CandidateScope,
}

impl ConfigCandidate {
    fn new(config_dir: PathBuf, profile: &AppProfile, scope: CandidateScope) -> Self {
        Self {
            path: config_dir.join(profile.file_name()),
            legacy_path: config_dir.join(profile.legacy_file_name()),
            config_dir,
            scope,
        }
    }

    pub fn is_global(&self) -> bool {
        self.scope == CandidateScope::Global
    }
}

#[derive(Debug, Clone)]
pub struct HierarchyResolver {
    start: PathBuf,
    global_dir: Option<PathBuf>,
    search_stop: Option<PathBuf>,
    profile: AppProfile,
}

impl HierarchyResolver {
    /// `start` is normalized lexically so the walk only visits real
    /// ancestors.
    pub fn new(start: PathBuf, profile: AppProfile) -> Self {
        Self {
            start: normalize_lexically(&start),
            global_dir: None,
            search_stop: None,
            profile,
        }
    }

    /// Directory holding the global `config.toml` (e.g. `$CARGO_HOME`).
    pub fn with_global_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.global_dir = dir;
        self
    }

    /// Stop ascending after this directory. Ignored unless it is an
    /// ancestor of (or equal to) the start directory.
    pub fn with_search_stop(mut self, stop: Option<PathBuf>) -> Self {
        self.search_stop = stop;
        self
    }

    pub fn start(&self) -> &Path {
        &self.start
    }

    /// A fresh walk; each call starts over.
    pub fn discover(&self) -> Discover<'_> {
        Discover {
            resolver: self,
            next_dir: Some(&self.start),
            depth: 0,
            seen: HashSet::new(),
            global_done: false,
        }
    }
}

impl<'a> IntoIterator for &'a HierarchyResolver {
    type Item = ConfigCandidate;
    type IntoIter = Discover<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.discover()
    }
}

/// Lazy iterator returned by [`HierarchyResolver::discover`].
#[derive(Debug)]
pub struct Discover<'a> {
    resolver: &'a HierarchyResolver,
    next_dir: Option<&'a Path>,
    depth: usize,
    seen: HashSet<PathBuf>,
    global_done: bool,
}

impl Iterator for Discover<'_> {
    type Item = ConfigCandidate;

    fn next(&mut self) -> Option<Self::Item> {
        let resolver = self.resolver;
        if let Some(dir) = self.next_dir {
            let stop_here = resolver.search_stop.as_deref() == Some(dir);
            self.next_dir = if stop_here {
                None
            } else {
                dir.parent().filter(|p| !p.as_os_str().is_empty())
            };

            let config_dir = dir.join(&resolver.profile.config_dir);
            self.seen.insert(config_dir.clone());
            let depth = self.depth;
            self.depth += 1;
            return Some(ConfigCandidate::new(
                config_dir,
                &resolver.profile,
                CandidateScope::Directory { depth },
            ));
        }

        if !self.global_done {
            self.global_done = true;
            if let Some(global) = &resolver.global_dir {
                if !self.seen.contains(global) {
                    return Some(ConfigCandidate::new(
                        global.clone(),
                        &resolver.profile,
                        CandidateScope::Global,
                    ));
                }
                tracing::debug!(
                    dir = %global.display(),
                    "global configuration directory already visited by the walk"
                );
            }
        }
        None
    }
}

/// Resolve `.` and `..` without touching the filesystem. `..` never climbs
/// past the root; leading `..` of a relative path is kept.
pub(crate) fn normalize_lexically(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => out.push(Component::ParentDir),
            },
            other => out.push(other),
        }
    }
    out
}
