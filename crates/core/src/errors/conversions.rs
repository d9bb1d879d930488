//! Conversion implementations for error types

use super::types::Error;
use std::path::PathBuf;

// No path is known here; prefer `IoResultExt::with_path`
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Error::FileSystem {
            path: PathBuf::new(),
            operation: "unknown".to_string(),
            source: error,
        }
    }
}
