//! In-memory ConfigSource, for tests and embedding.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::domain::ports::ConfigSource;
use crate::error::ConfigResult;

/// Files held in a map; anything not in the map is missing.
#[derive(Debug, Clone, Default)]
pub struct MemoryFs {
    files: BTreeMap<PathBuf, String>,
}

impl MemoryFs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        self.files.insert(path.into(), content.into());
        self
    }
}

impl ConfigSource for MemoryFs {
    fn read(&self, path: &Path) -> ConfigResult<Option<String>> {
        Ok(self.files.get(path).cloned())
    }

    fn exists(&self, path: &Path) -> bool {
        self.files.contains_key(path)
    }
}
