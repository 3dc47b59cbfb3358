//! Last-processed commit tracking.
//!
//! The ledger is a small text file whose first token is the abbreviated hash
//! of the newest commit already included in patch notes. A run reads it once
//! to bound the log range and overwrites it only after its notes are stored.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::CoreResult;

/// Persisted range marker.
#[derive(Debug, Clone)]
pub struct Ledger {
    path: PathBuf,
}

impl Ledger {
    /// Creates a ledger backed by the given file.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the backing file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the last processed commit hash.
    ///
    /// Returns `None` when the file is missing, empty, unreadable or does not
    /// start with a hex hash. Each case is logged.
    pub fn last_processed(&self) -> Option<String> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!(path = %self.path.display(), "no ledger yet");
                return None;
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "cannot read ledger");
                return None;
            }
        };

        let Some(token) = content.split_whitespace().next() else {
            warn!(path = %self.path.display(), "ledger is empty");
            return None;
        };

        if !is_commit_hash(token) {
            warn!(path = %self.path.display(), token, "ledger does not hold a commit hash");
            return None;
        }

        debug!(hash = token, "read last processed commit");
        Some(token.to_string())
    }

    /// Overwrites the ledger with `hash`.
    ///
    /// The new content is written to a sibling file and renamed into place so
    /// a crash never leaves a truncated ledger behind.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn record(&self, hash: &str) -> CoreResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, format!("{hash}\n"))?;
        fs::rename(&tmp, &self.path)?;

        info!(hash, path = %self.path.display(), "recorded last processed commit");
        Ok(())
    }
}

fn is_commit_hash(token: &str) -> bool {
    (4..=40).contains(&token.len()) && token.chars().all(|c| c.is_ascii_hexdigit())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn ledger(dir: &TempDir) -> Ledger {
        Ledger::new(dir.path().join("ledger.txt"))
    }

    #[test]
    fn test_missing_file() {
        let dir = TempDir::new().unwrap();
        assert_eq!(ledger(&dir).last_processed(), None);
    }

    #[test]
    fn test_empty_file() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("ledger.txt"), "  \n").unwrap();
        assert_eq!(ledger(&dir).last_processed(), None);
    }

    #[test]
    fn test_malformed_file() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("ledger.txt"), "HEAD\n").unwrap();
        assert_eq!(ledger(&dir).last_processed(), None);

        fs::write(dir.path().join("ledger.txt"), "ab\n").unwrap();
        assert_eq!(ledger(&dir).last_processed(), None);
    }

    #[test]
    fn test_directory_instead_of_file() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("ledger.txt")).unwrap();
        assert_eq!(ledger(&dir).last_processed(), None);
    }

    #[test]
    fn test_reads_first_token() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("ledger.txt"),
            "abc1234 written by hand\nsecond line\n",
        )
        .unwrap();
        assert_eq!(ledger(&dir).last_processed(), Some("abc1234".to_string()));
    }

    #[test]
    fn test_record_then_read() {
        let dir = TempDir::new().unwrap();
        let ledger = ledger(&dir);

        ledger.record("abc123").unwrap();
        assert_eq!(ledger.last_processed(), Some("abc123".to_string()));

        ledger.record("def456").unwrap();
        assert_eq!(ledger.last_processed(), Some("def456".to_string()));
        assert_eq!(fs::read_to_string(ledger.path()).unwrap(), "def456\n");
        assert!(!dir.path().join("ledger.tmp").exists());
    }

    #[test]
    fn test_record_creates_parent() {
        let dir = TempDir::new().unwrap();
        let ledger = Ledger::new(dir.path().join("state").join("ledger.txt"));

        ledger.record("abc123").unwrap();
        assert_eq!(ledger.last_processed(), Some("abc123".to_string()));
    }

    #[test]
    fn test_is_commit_hash() {
        assert!(is_commit_hash("abc1234"));
        assert!(is_commit_hash(&"f".repeat(40)));
        assert!(!is_commit_hash("abc"));
        assert!(!is_commit_hash(&"f".repeat(41)));
        assert!(!is_commit_hash("main"));
    }
}
