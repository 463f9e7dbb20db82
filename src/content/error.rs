//! Content loading errors

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading or parsing a content file.
///
/// A missing file is not an error; loaders report it as `Ok(None)`.
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("IO error when reading `{}`", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed front-matter in `{}`: {message}", path.display())]
    FrontMatter { path: PathBuf, message: String },
}

impl ContentError {
    /// Path of the file that failed
    pub fn path(&self) -> &PathBuf {
        match self {
            ContentError::Io { path, .. } | ContentError::FrontMatter { path, .. } => path,
        }
    }
}
