//! Local File System Implementation
//!
//! Implements the ConfigSource port for local disk reads.

use std::io::ErrorKind;
use std::path::Path;

use crate::domain::ports::ConfigSource;
use crate::domain::value_objects::Definition;
use crate::error::{ConfigError, ConfigResult};

#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFs;

impl LocalFs {
    pub fn new() -> Self {
        Self
    }
}

impl ConfigSource for LocalFs {
    fn read(&self, path: &Path) -> ConfigResult<Option<String>> {
        match std::fs::read_to_string(path) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) if e.kind() == ErrorKind::InvalidData => Err(ConfigError::Parse {
                origin: Definition::Path(path.to_path_buf()),
                line: None,
                column: None,
                message: "file is not valid UTF-8".to_string(),
            }),
            Err(source) => Err(ConfigError::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    fn exists(&self, path: &Path) -> bool {
        // Anything at the path counts; `read` reports non-files
        path.symlink_metadata().is_ok()
    }
}
