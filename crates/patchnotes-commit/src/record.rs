//! A single parsed commit.

use serde::{Deserialize, Serialize};

/// One commit as it appears in the patch notes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitRecord {
    /// The abbreviated commit hash, kept as an opaque token.
    pub hash: String,

    /// The configured category, or [`MISC_CATEGORY`](crate::MISC_CATEGORY).
    pub category: String,

    /// The commit message without its recognized tag.
    pub message: String,
}

impl CommitRecord {
    /// Creates a new commit record.
    #[must_use]
    pub fn new(
        hash: impl Into<String>,
        category: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            hash: hash.into(),
            category: category.into(),
            message: message.into(),
        }
    }
}
