//! Git abstraction layer for patchnotes.
//!
//! This crate provides the Git operations the patch note run needs:
//! - Repository discovery
//! - HEAD resolution
//! - One-line log entries for a commit range

mod error;
mod repository;

pub use error::{GitError, GitResult};
pub use repository::Repository;
