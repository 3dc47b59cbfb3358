//! Error types for page rendering.

use std::path::PathBuf;

use thiserror::Error;

/// Page rendering errors.
#[derive(Debug, Error)]
pub enum PageError {
    /// Failed to read or write a file.
    #[error("failed to access {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The build name pattern failed to compile.
    #[error("invalid build name pattern")]
    Pattern(#[from] regex::Error),
}

/// Result type for page operations.
pub type PageResult<T> = Result<T, PageError>;

pub(crate) fn io_error(path: &std::path::Path) -> impl FnOnce(std::io::Error) -> PageError {
    let path = path.to_path_buf();
    move |source| PageError::Io { path, source }
}
