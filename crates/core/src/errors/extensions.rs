//! Extension traits for error handling

use super::types::{Error, Result};
use std::path::PathBuf;

/// Extension trait for attaching a path and operation to I/O results
pub trait IoResultExt<T> {
    /// Convert an I/O error into [`Error::FileSystem`] for `path`
    fn with_path(self, path: impl Into<PathBuf>, operation: &str) -> Result<T>;
}

impl<T> IoResultExt<T> for std::result::Result<T, std::io::Error> {
    fn with_path(self, path: impl Into<PathBuf>, operation: &str) -> Result<T> {
        self.map_err(|source| Error::file_system(path, operation, source))
    }
}
