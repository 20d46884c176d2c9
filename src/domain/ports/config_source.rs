//! Config source port - abstracts reading configuration files.

use std::path::Path;

use crate::error::ConfigResult;

/// Read access to configuration files.
///
/// The loader only ever reads; the engine never writes configuration.
pub trait ConfigSource: Send + Sync {
    /// Read a file as UTF-8 text. A missing file is `Ok(None)`; any other
    /// failure (permissions, a directory in the way) is an error.
    fn read(&self, path: &Path) -> ConfigResult<Option<String>>;

    /// Check if anything exists at the given path, file or not.
    fn exists(&self, path: &Path) -> bool;
}

impl<S: ConfigSource + ?Sized> ConfigSource for &S {
    fn read(&self, path: &Path) -> ConfigResult<Option<String>> {
        (**self).read(path)
    }

    fn exists(&self, path: &Path) -> bool {
        (**self).exists(path)
    }
}
