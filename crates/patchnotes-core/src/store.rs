//! Per-build patch note storage.
//!
//! Notes live inside the build's directory so the page renderer finds them
//! next to the platform downloads:
//! ```text
//! <builds_dir>/
//! ├── build_08_14_20/
//! │   ├── patch_notes_build_08_14_20.json
//! │   ├── windows_build_08_14_20
//! │   └── ...
//! └── ...
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use patchnotes_commit::CategoryMapping;
use patchnotes_config::MergePolicy;
use thiserror::Error;
use tracing::{debug, info};

use crate::BuildId;

/// Patch note storage errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Failed to read or write a file.
    #[error("failed to access {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to serialize the mapping.
    #[error("failed to serialize patch notes")]
    Serialize(#[source] serde_json::Error),

    /// Stored notes could not be parsed.
    #[error("corrupt patch notes at {path}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Notes already exist and the merge policy rejects a second save.
    #[error("patch notes already exist for build {build}")]
    AlreadyExists { build: String },
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Name of the notes file inside a build directory, e.g.
/// `patch_notes_build_08_14_20.json`.
#[must_use]
pub fn notes_file_name(build_dir_name: &str) -> String {
    format!("patch_notes_{build_dir_name}.json")
}

/// Reads and writes each build's [`CategoryMapping`].
#[derive(Debug, Clone)]
pub struct PatchNoteStore {
    builds_dir: PathBuf,
    policy: MergePolicy,
}

impl PatchNoteStore {
    /// Creates a store rooted at the builds directory.
    #[must_use]
    pub fn new(builds_dir: impl Into<PathBuf>, policy: MergePolicy) -> Self {
        Self {
            builds_dir: builds_dir.into(),
            policy,
        }
    }

    /// Path of the notes file for a build.
    #[must_use]
    pub fn notes_path(&self, build: &BuildId) -> PathBuf {
        let dir_name = build.dir_name();
        self.builds_dir
            .join(&dir_name)
            .join(notes_file_name(&dir_name))
    }

    /// Loads a build's notes, if any were stored.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(&self, build: &BuildId) -> StoreResult<Option<CategoryMapping>> {
        let path = self.notes_path(build);
        if !path.exists() {
            return Ok(None);
        }
        Self::load_path(&path).map(Some)
    }

    /// Loads notes from an explicit file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_path(path: &Path) -> StoreResult<CategoryMapping> {
        let content = fs::read_to_string(path).map_err(io_error(path))?;
        serde_json::from_str(&content).map_err(|source| StoreError::Corrupt {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Stores a build's notes, combining them with existing notes according
    /// to the merge policy. Returns the file written.
    ///
    /// # Errors
    ///
    /// Returns an error if existing notes cannot be read, the policy rejects
    /// the save, or the file cannot be written. Nothing is written on error.
    pub fn save(&self, build: &BuildId, mapping: CategoryMapping) -> StoreResult<PathBuf> {
        let path = self.notes_path(build);

        let mapping = match (self.load(build)?, self.policy) {
            (None, _) | (Some(_), MergePolicy::Overwrite) => mapping,
            (Some(mut existing), MergePolicy::Append) => {
                debug!(build = %build, existing = existing.len(), "appending to stored notes");
                existing.merge(mapping);
                existing
            }
            (Some(_), MergePolicy::Reject) => {
                return Err(StoreError::AlreadyExists {
                    build: build.to_string(),
                });
            }
        };

        let json = serde_json::to_string_pretty(&mapping).map_err(StoreError::Serialize)?;
        write_replacing(&path, json.as_bytes())?;

        info!(build = %build, path = %path.display(), commits = mapping.len(), "stored patch notes");
        Ok(path)
    }
}

/// Writes to a sibling temp file and renames it over `path`.
fn write_replacing(path: &Path, contents: &[u8]) -> StoreResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(io_error(parent))?;
    }

    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, contents).map_err(io_error(&tmp))?;
    fs::rename(&tmp, path).map_err(io_error(path))?;
    Ok(())
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> StoreError {
    let path = path.to_path_buf();
    move |source| StoreError::Io { path, source }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use patchnotes_commit::CommitRecord;
    use tempfile::TempDir;

    fn build() -> BuildId {
        BuildId::from_date(NaiveDate::from_ymd_opt(2020, 8, 14).unwrap(), "%m_%d_%y")
    }

    fn mapping(records: &[(&str, &str, &str)]) -> CategoryMapping {
        let mut mapping = CategoryMapping::new(["feature", "bugfix"]);
        for (hash, category, message) in records {
            mapping
                .push(CommitRecord::new(*hash, *category, *message))
                .unwrap();
        }
        mapping
    }

    #[test]
    fn test_notes_path() {
        let store = PatchNoteStore::new("/srv/builds", MergePolicy::Append);
        assert_eq!(
            store.notes_path(&build()),
            PathBuf::from("/srv/builds/build_08_14_20/patch_notes_build_08_14_20.json")
        );
    }

    #[test]
    fn test_load_missing() {
        let dir = TempDir::new().unwrap();
        let store = PatchNoteStore::new(dir.path(), MergePolicy::Append);
        assert!(store.load(&build()).unwrap().is_none());
    }

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let store = PatchNoteStore::new(dir.path(), MergePolicy::Append);
        let notes = mapping(&[
            ("h1", "feature", "Added sprint"),
            ("h3", "bugfix", "Fixed crash"),
            ("h2", "Misc", "[bogus] oops"),
            ("h0", "feature", "Added jump"),
        ]);

        let path = store.save(&build(), notes.clone()).unwrap();
        assert!(path.exists());
        assert!(!path.with_extension("json.tmp").exists());

        let loaded = store.load(&build()).unwrap().unwrap();
        assert_eq!(loaded, notes);
    }

    #[test]
    fn test_saved_file_has_renderer_keys() {
        let dir = TempDir::new().unwrap();
        let store = PatchNoteStore::new(dir.path(), MergePolicy::Append);
        let path = store.save(&build(), mapping(&[])).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap();
        assert!(value["feature"].is_array());
        assert!(value["bugfix"].is_array());
        assert!(value["Misc"].is_array());
    }

    #[test]
    fn test_append_policy() {
        let dir = TempDir::new().unwrap();
        let store = PatchNoteStore::new(dir.path(), MergePolicy::Append);

        store
            .save(&build(), mapping(&[("h1", "bugfix", "morning fix")]))
            .unwrap();
        store
            .save(&build(), mapping(&[("h2", "bugfix", "evening fix")]))
            .unwrap();

        let loaded = store.load(&build()).unwrap().unwrap();
        let hashes: Vec<_> = loaded
            .get("bugfix")
            .unwrap()
            .iter()
            .map(|r| r.hash.as_str())
            .collect();
        assert_eq!(hashes, vec!["h1", "h2"]);
    }

    #[test]
    fn test_overwrite_policy() {
        let dir = TempDir::new().unwrap();
        let store = PatchNoteStore::new(dir.path(), MergePolicy::Overwrite);

        store
            .save(&build(), mapping(&[("h1", "bugfix", "morning fix")]))
            .unwrap();
        store
            .save(&build(), mapping(&[("h2", "feature", "evening feature")]))
            .unwrap();

        let loaded = store.load(&build()).unwrap().unwrap();
        assert!(loaded.get("bugfix").unwrap().is_empty());
        assert_eq!(loaded.len(), 1);
    }

    #[test]
    fn test_reject_policy() {
        let dir = TempDir::new().unwrap();
        let store = PatchNoteStore::new(dir.path(), MergePolicy::Reject);
        let first = mapping(&[("h1", "bugfix", "morning fix")]);

        store.save(&build(), first.clone()).unwrap();
        let result = store.save(&build(), mapping(&[("h2", "bugfix", "evening fix")]));

        assert!(matches!(result, Err(StoreError::AlreadyExists { .. })));
        assert_eq!(store.load(&build()).unwrap().unwrap(), first);
    }

    #[test]
    fn test_corrupt_existing_is_not_replaced() {
        let dir = TempDir::new().unwrap();
        let store = PatchNoteStore::new(dir.path(), MergePolicy::Append);
        let path = store.notes_path(&build());
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "not json").unwrap();

        let result = store.save(&build(), mapping(&[("h1", "feature", "x")]));

        assert!(matches!(result, Err(StoreError::Corrupt { .. })));
        assert_eq!(fs::read_to_string(&path).unwrap(), "not json");
    }

    #[test]
    fn test_unwritable_destination() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("builds");
        fs::write(&blocker, "a file where a directory should be").unwrap();
        let store = PatchNoteStore::new(&blocker, MergePolicy::Append);

        let result = store.save(&build(), mapping(&[]));
        assert!(matches!(result, Err(StoreError::Io { .. })));
    }

    #[test]
    fn test_notes_file_name() {
        insta::assert_snapshot!(notes_file_name("build_08_14_20"), @"patch_notes_build_08_14_20.json");
    }
}
