//! Configuration schema.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};

use crate::{ConfigError, ConfigResult};

/// Reserved fallback category name.
const MISC: &str = "Misc";

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Repository to read commits from.
    #[serde(default)]
    pub repository: RepositoryConfig,

    /// Recognized commit categories.
    #[serde(default)]
    pub categories: CategoriesConfig,

    /// Range marker storage.
    #[serde(default)]
    pub ledger: LedgerConfig,

    /// Website layout and patch note storage.
    #[serde(default)]
    pub site: SiteConfig,

    /// Diagnostic log file.
    #[serde(default)]
    pub log: LogConfig,
}

impl Config {
    /// Makes every relative path absolute against `base`.
    #[must_use]
    pub fn resolved_against(mut self, base: &Path) -> Self {
        let resolve = |path: &mut PathBuf| {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        };
        resolve(&mut self.repository.path);
        resolve(&mut self.ledger.path);
        resolve(&mut self.site.root);
        resolve(&mut self.log.file);
        self
    }

    /// Checks values that deserialization alone cannot.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] describing the first problem found.
    pub fn validate(&self) -> ConfigResult<()> {
        self.categories.validate()?;
        self.site.validate()?;
        Ok(())
    }
}

/// Repository configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositoryConfig {
    /// Path to the git work tree.
    #[serde(default = "default_repository_path")]
    pub path: PathBuf,
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        Self {
            path: default_repository_path(),
        }
    }
}

fn default_repository_path() -> PathBuf {
    PathBuf::from(".")
}

/// Category configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoriesConfig {
    /// Tags recognized inside `[...]` at the start of a commit subject.
    #[serde(default = "default_categories")]
    pub names: Vec<String>,
}

impl Default for CategoriesConfig {
    fn default() -> Self {
        Self {
            names: default_categories(),
        }
    }
}

fn default_categories() -> Vec<String> {
    vec!["bugfix".to_string(), "feature".to_string()]
}

impl CategoriesConfig {
    fn validate(&self) -> ConfigResult<()> {
        if self.names.is_empty() {
            return Err(ConfigError::Invalid("no categories configured".to_string()));
        }

        let mut seen = HashSet::new();
        for name in &self.names {
            if name.is_empty() {
                return Err(ConfigError::Invalid("empty category name".to_string()));
            }
            if name == MISC {
                return Err(ConfigError::Invalid(format!(
                    "category name `{MISC}` is reserved"
                )));
            }
            if name.chars().any(|c| c.is_whitespace() || c == '[' || c == ']') {
                return Err(ConfigError::Invalid(format!(
                    "category `{name}` contains whitespace or brackets"
                )));
            }
            if !seen.insert(name.as_str()) {
                return Err(ConfigError::Invalid(format!(
                    "category `{name}` is listed twice"
                )));
            }
        }

        Ok(())
    }
}

/// What to do when the range marker is missing or unreadable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MarkerPolicy {
    /// Treat the whole history as new.
    #[default]
    FullHistory,
    /// Stop without producing output.
    Abort,
}

/// Ledger configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerConfig {
    /// File holding the last processed commit hash.
    #[serde(default = "default_ledger_path")]
    pub path: PathBuf,

    /// Behavior when the ledger cannot provide a hash.
    #[serde(default)]
    pub on_unknown: MarkerPolicy,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            path: default_ledger_path(),
            on_unknown: MarkerPolicy::default(),
        }
    }
}

fn default_ledger_path() -> PathBuf {
    PathBuf::from("ledger.txt")
}

/// What to do when patch notes already exist for the build.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MergePolicy {
    /// Append the new commits after the stored ones.
    #[default]
    Append,
    /// Replace the stored notes.
    Overwrite,
    /// Fail the run.
    Reject,
}

/// Website configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Website root directory.
    #[serde(default = "default_site_root")]
    pub root: PathBuf,

    /// Builds directory, relative to `root`. Also used in page links.
    #[serde(default = "default_builds")]
    pub builds: String,

    /// Generated page, relative to `root`.
    #[serde(default = "default_page")]
    pub page: String,

    /// Platforms each build ships for.
    #[serde(default = "default_platforms")]
    pub platforms: Vec<String>,

    /// `strftime` pattern of the build identifier.
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Behavior when patch notes already exist for the build.
    #[serde(default)]
    pub on_existing: MergePolicy,

    /// Show the fallback category on the page.
    #[serde(default)]
    pub include_misc: bool,

    /// Section headings per category.
    #[serde(default = "default_labels")]
    pub labels: HashMap<String, String>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            root: default_site_root(),
            builds: default_builds(),
            page: default_page(),
            platforms: default_platforms(),
            date_format: default_date_format(),
            on_existing: MergePolicy::default(),
            include_misc: false,
            labels: default_labels(),
        }
    }
}

fn default_site_root() -> PathBuf {
    PathBuf::from("website")
}

fn default_builds() -> String {
    "daily-builds".to_string()
}

fn default_page() -> String {
    "index.html".to_string()
}

fn default_platforms() -> Vec<String> {
    vec![
        "windows".to_string(),
        "mac".to_string(),
        "linux".to_string(),
    ]
}

fn default_date_format() -> String {
    "%m_%d_%y".to_string()
}

fn default_labels() -> HashMap<String, String> {
    HashMap::from([
        ("feature".to_string(), "Features".to_string()),
        ("bugfix".to_string(), "Bug Fixes".to_string()),
        (MISC.to_string(), "Other Changes".to_string()),
    ])
}

impl SiteConfig {
    /// Absolute directory holding one subdirectory per build.
    #[must_use]
    pub fn builds_dir(&self) -> PathBuf {
        self.root.join(&self.builds)
    }

    /// Absolute path of the generated page.
    #[must_use]
    pub fn page_path(&self) -> PathBuf {
        self.root.join(&self.page)
    }

    /// Heading for a category, falling back to the category name.
    #[must_use]
    pub fn label<'a>(&'a self, category: &'a str) -> &'a str {
        self.labels.get(category).map_or(category, String::as_str)
    }

    fn validate(&self) -> ConfigResult<()> {
        if self.platforms.is_empty() {
            return Err(ConfigError::Invalid("no platforms configured".to_string()));
        }
        if self.platforms.iter().any(|p| p.is_empty() || p.contains(['/', '\\'])) {
            return Err(ConfigError::Invalid(
                "platform names must be non-empty and contain no path separators".to_string(),
            ));
        }
        validate_date_format(&self.date_format)
    }
}

fn validate_date_format(format: &str) -> ConfigResult<()> {
    if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
        return Err(ConfigError::Invalid(format!(
            "invalid date format `{format}`"
        )));
    }

    let sample = NaiveDate::from_ymd_opt(2020, 8, 14)
        .map(|d| d.format(format).to_string())
        .unwrap_or_default();
    if sample.is_empty() || sample.contains(['/', '\\']) {
        return Err(ConfigError::Invalid(format!(
            "date format `{format}` cannot name a directory"
        )));
    }

    Ok(())
}

/// Log configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// Append-only diagnostic log.
    #[serde(default = "default_log_file")]
    pub file: PathBuf,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            file: default_log_file(),
        }
    }
}

fn default_log_file() -> PathBuf {
    PathBuf::from("patchnotes.log")
}
