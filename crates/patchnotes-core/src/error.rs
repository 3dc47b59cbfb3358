//! Core error types.

use thiserror::Error;

use crate::StoreError;

/// Core-related errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Git error.
    #[error("git error: {0}")]
    Git(#[from] patchnotes_git::GitError),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(#[from] patchnotes_config::ConfigError),

    /// Patch note storage error.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// The ledger holds no usable hash and the policy forbids guessing.
    #[error("last processed commit is unknown ({0}); pass --since or fix the ledger")]
    MarkerUnknown(std::path::PathBuf),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;
