//! Git repository wrapper.

use std::path::Path;

use git2::{Commit, ErrorCode, Oid, Repository as Git2Repo, Sort};
use tracing::debug;

use crate::{GitError, GitResult};

/// A Git repository wrapper.
pub struct Repository {
    inner: Git2Repo,
}

impl Repository {
    /// Opens a repository at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the path is not a valid Git repository.
    pub fn open(path: impl AsRef<Path>) -> GitResult<Self> {
        let path = path.as_ref();
        let inner = Git2Repo::open(path).map_err(|_| GitError::NotARepo(path.to_path_buf()))?;
        Ok(Self { inner })
    }

    /// Discovers the repository containing the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if no repository is found.
    pub fn discover(path: impl AsRef<Path>) -> GitResult<Self> {
        let path = path.as_ref();
        let inner =
            Git2Repo::discover(path).map_err(|_| GitError::NotARepo(path.to_path_buf()))?;
        Ok(Self { inner })
    }

    /// Returns the repository root path.
    #[must_use]
    pub fn path(&self) -> &Path {
        self.inner.workdir().unwrap_or_else(|| self.inner.path())
    }

    /// Returns the abbreviated hash of the HEAD commit.
    ///
    /// # Errors
    ///
    /// Returns [`GitError::NoCommits`] if HEAD does not point at a commit yet.
    pub fn head_short_hash(&self) -> GitResult<String> {
        let head = match self.inner.head() {
            Ok(head) => head,
            Err(e) if matches!(e.code(), ErrorCode::UnbornBranch | ErrorCode::NotFound) => {
                return Err(GitError::NoCommits);
            }
            Err(e) => return Err(e.into()),
        };
        let commit = head.peel_to_commit()?;
        short_hash(&commit)
    }

    /// Returns one-line log entries for `since..head`, newest first.
    ///
    /// Each entry is `<abbreviated hash> <summary>`, the same shape as
    /// `git log --pretty=oneline --abbrev-commit`. With `since` set to `None`
    /// every commit reachable from `head` is listed.
    ///
    /// # Errors
    ///
    /// Returns [`GitError::RevisionNotFound`] if either revision does not
    /// resolve to a commit.
    pub fn oneline_log(&self, since: Option<&str>, head: &str) -> GitResult<Vec<String>> {
        let mut revwalk = self.inner.revwalk()?;
        revwalk.set_sorting(Sort::TOPOLOGICAL | Sort::TIME)?;
        revwalk.push(self.resolve(head)?)?;

        // Stop at the last processed commit
        if let Some(since) = since {
            revwalk.hide(self.resolve(since)?)?;
        }

        let mut lines = Vec::new();
        for oid in revwalk {
            let commit = self.inner.find_commit(oid?)?;
            let line = format!("{} {}", short_hash(&commit)?, commit.summary().unwrap_or(""));
            lines.push(line);
        }

        debug!(?since, head, count = lines.len(), "read commit range");
        Ok(lines)
    }

    /// Resolves a revision (hash, abbreviated hash, branch, tag) to a commit id.
    fn resolve(&self, rev: &str) -> GitResult<Oid> {
        let object = self
            .inner
            .revparse_single(rev)
            .map_err(|_| GitError::RevisionNotFound(rev.to_string()))?;
        let commit = object
            .peel_to_commit()
            .map_err(|_| GitError::RevisionNotFound(rev.to_string()))?;
        Ok(commit.id())
    }
}

fn short_hash(commit: &Commit<'_>) -> GitResult<String> {
    let buf = commit.as_object().short_id()?;
    Ok(buf
        .as_str()
        .map_or_else(|| commit.id().to_string(), String::from))
}
