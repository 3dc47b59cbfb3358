//! Commit history sources.

use patchnotes_git::Repository;

use crate::CoreResult;

/// Supplies one-line log entries for a commit range.
pub trait CommitSource {
    /// Returns the abbreviated hash of the current HEAD commit.
    ///
    /// # Errors
    ///
    /// Returns an error if HEAD cannot be resolved.
    fn head(&self) -> CoreResult<String>;

    /// Returns `<hash> <subject>` lines for commits reachable from `head`
    /// but not from `since`, newest first. `None` means the whole history.
    ///
    /// # Errors
    ///
    /// Returns an error if either revision is unknown or history cannot be read.
    fn log_lines(&self, since: Option<&str>, head: &str) -> CoreResult<Vec<String>>;
}

impl CommitSource for Repository {
    fn head(&self) -> CoreResult<String> {
        Ok(self.head_short_hash()?)
    }

    fn log_lines(&self, since: Option<&str>, head: &str) -> CoreResult<Vec<String>> {
        Ok(self.oneline_log(since, head)?)
    }
}
