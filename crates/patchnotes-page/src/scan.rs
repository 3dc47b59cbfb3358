//! Builds directory scanning.

use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use patchnotes_commit::CategoryMapping;
use patchnotes_core::{PatchNoteStore, notes_file_name};
use regex::Regex;
use tracing::{debug, info, warn};

use crate::PageResult;
use crate::error::io_error;

/// A platform download link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Download {
    /// Platform name, e.g. `windows`.
    pub platform: String,
    /// Link relative to the page, e.g.
    /// `daily-builds/build_08_14_20/windows_build_08_14_20`.
    pub href: String,
}

/// One build directory as shown on the page.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildEntry {
    /// Directory name, e.g. `build_08_14_20`.
    pub name: String,
    /// Date encoded in the name, when it parses with the configured format.
    pub date: Option<NaiveDate>,
    /// One link per configured platform.
    pub downloads: Vec<Download>,
    /// Stored patch notes, if present and readable.
    pub notes: Option<CategoryMapping>,
}

/// Collects the builds under a builds directory.
#[derive(Debug)]
pub struct BuildScanner {
    name_pattern: Regex,
    link_prefix: String,
    platforms: Vec<String>,
    date_format: String,
}

impl BuildScanner {
    /// Creates a scanner.
    ///
    /// `link_prefix` is the builds directory as seen from the page.
    ///
    /// # Errors
    ///
    /// Returns an error if the build name pattern cannot be compiled.
    pub fn new(link_prefix: &str, platforms: &[String], date_format: &str) -> PageResult<Self> {
        Ok(Self {
            name_pattern: Regex::new(r"^build_(?P<id>\S+)$")?,
            link_prefix: link_prefix.trim_end_matches('/').to_string(),
            platforms: platforms.to_vec(),
            date_format: date_format.to_string(),
        })
    }

    /// Lists every build directory, newest first.
    ///
    /// A missing builds directory yields no builds.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory exists but cannot be listed.
    pub fn scan(&self, builds_dir: &Path) -> PageResult<Vec<BuildEntry>> {
        if !builds_dir.exists() {
            info!(path = %builds_dir.display(), "builds directory does not exist yet");
            return Ok(Vec::new());
        }

        let mut builds = Vec::new();
        for entry in fs::read_dir(builds_dir).map_err(io_error(builds_dir))? {
            let entry = entry.map_err(io_error(builds_dir))?;
            if !entry.path().is_dir() {
                continue;
            }
            let Some(name) = entry.file_name().to_str().map(str::to_string) else {
                warn!(path = %entry.path().display(), "skipping build with non UTF-8 name");
                continue;
            };
            builds.push(self.entry(&entry.path(), name));
        }

        builds.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| b.name.cmp(&a.name)));
        debug!(count = builds.len(), "scanned builds");
        Ok(builds)
    }

    fn entry(&self, dir: &Path, name: String) -> BuildEntry {
        let date = self
            .name_pattern
            .captures(&name)
            .and_then(|caps| NaiveDate::parse_from_str(&caps["id"], &self.date_format).ok());

        let downloads = self
            .platforms
            .iter()
            .map(|platform| Download {
                platform: platform.clone(),
                href: format!("{}/{name}/{platform}_{name}", self.link_prefix),
            })
            .collect();

        let notes_path = dir.join(notes_file_name(&name));
        let notes = if notes_path.is_file() {
            match PatchNoteStore::load_path(&notes_path) {
                Ok(notes) => Some(notes),
                Err(err) => {
                    warn!(build = %name, error = %err, "ignoring unreadable patch notes");
                    None
                }
            }
        } else {
            None
        };

        BuildEntry {
            name,
            date,
            downloads,
            notes,
        }
    }
}

/// Lists the builds under `builds_dir`, newest first.
///
/// # Errors
///
/// Returns an error if the directory exists but cannot be listed.
pub fn scan_builds(
    builds_dir: &Path,
    link_prefix: &str,
    platforms: &[String],
    date_format: &str,
) -> PageResult<Vec<BuildEntry>> {
    BuildScanner::new(link_prefix, platforms, date_format)?.scan(builds_dir)
}
