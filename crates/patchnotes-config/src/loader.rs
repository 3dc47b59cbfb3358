//! Configuration loader.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::{Config, ConfigError, ConfigResult};

/// Default configuration file name.
pub const CONFIG_FILE_NAME: &str = "patchnotes.toml";

const DEFAULT_CONFIG: &str = r#"# patchnotes configuration
# Relative paths are resolved against the directory holding this file.

[repository]
# Git work tree whose history feeds the patch notes.
path = "."

[categories]
# Tags recognized as `[tag]` after the commit hash. Anything else lands in "Misc".
names = ["bugfix", "feature"]

[ledger]
# Holds the last commit already included in patch notes.
path = "ledger.txt"
# "full-history" or "abort" when the ledger is missing or unreadable.
on_unknown = "full-history"

[site]
root = "website"
builds = "daily-builds"
page = "index.html"
platforms = ["windows", "mac", "linux"]
date_format = "%m_%d_%y"
# "append", "overwrite" or "reject" when today's build already has notes.
on_existing = "append"
include_misc = false

[site.labels]
feature = "Features"
bugfix = "Bug Fixes"
Misc = "Other Changes"

[log]
file = "patchnotes.log"
"#;

/// Returns the annotated configuration written by `patchnotes init`.
#[must_use]
pub fn default_config_toml() -> &'static str {
    DEFAULT_CONFIG
}

/// Loads and validates configuration from the given path.
///
/// Relative paths in the file are resolved against the file's directory.
///
/// # Errors
///
/// Returns an error if the file cannot be read, parsed or validated.
pub fn load_config(path: impl AsRef<Path>) -> ConfigResult<Config> {
    let path = path.as_ref();
    debug!(?path, "loading configuration");

    if !path.exists() {
        return Err(ConfigError::NotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    config.validate()?;

    let base = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => std::env::current_dir()?,
    };

    Ok(config.resolved_against(&base))
}

/// Finds the configuration file starting from the given directory.
///
/// Walks up the directory tree until a configuration file is found.
///
/// # Errors
///
/// Returns [`ConfigError::NotFound`] if no ancestor holds a configuration file.
pub fn find_config_from(start_dir: impl AsRef<Path>) -> ConfigResult<PathBuf> {
    let start_dir = start_dir.as_ref();
    let mut dir = start_dir;

    loop {
        let config_path = dir.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Ok(config_path);
        }

        match dir.parent() {
            Some(parent) => dir = parent,
            None => break,
        }
    }

    Err(ConfigError::NotFound(start_dir.join(CONFIG_FILE_NAME)))
}

/// Finds and loads configuration starting from the given directory.
///
/// # Errors
///
/// Returns an error if no configuration file is found or it cannot be loaded.
pub fn load_config_from_dir(start_dir: impl AsRef<Path>) -> ConfigResult<Config> {
    let path = find_config_from(start_dir)?;
    load_config(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MarkerPolicy;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_config_file_name() {
        assert_eq!(CONFIG_FILE_NAME, "patchnotes.toml");
    }

    #[test]
    fn test_load_config_not_found() {
        let result = load_config("/nonexistent/path/patchnotes.toml");
        match result {
            Err(ConfigError::NotFound(path)) => {
                assert!(path.to_string_lossy().contains("patchnotes.toml"));
            }
            _ => panic!("Expected NotFound error"),
        }
    }

    #[test]
    fn test_load_config_empty_file_resolves_paths() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join(CONFIG_FILE_NAME);
        fs::write(&config_path, "").unwrap();

        let config = load_config(&config_path).unwrap();
        assert_eq!(config.ledger.path, temp_dir.path().join("ledger.txt"));
        assert_eq!(
            config.site.builds_dir(),
            temp_dir.path().join("website").join("daily-builds")
        );
    }

    #[test]
    fn test_load_config_invalid_toml() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join(CONFIG_FILE_NAME);
        fs::write(&config_path, "this is not valid toml [[[").unwrap();

        let result = load_config(&config_path);
        assert!(matches!(result, Err(ConfigError::InvalidToml(_))));
    }

    #[test]
    fn test_load_config_runs_validation() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join(CONFIG_FILE_NAME);
        fs::write(
            &config_path,
            r#"
            [categories]
            names = []
        "#,
        )
        .unwrap();

        let result = load_config(&config_path);
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_default_config_toml_parses() {
        let config: Config = toml::from_str(default_config_toml()).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.ledger.on_unknown, MarkerPolicy::FullHistory);
        assert_eq!(config.site.label("Misc"), "Other Changes");
    }

    #[test]
    fn test_default_config_toml_header() {
        let first_line = default_config_toml().lines().next().unwrap();
        insta::assert_snapshot!(first_line, @"# patchnotes configuration");
    }

    #[test]
    fn test_find_config_in_parent() {
        let parent_dir = TempDir::new().unwrap();
        fs::write(
            parent_dir.path().join(CONFIG_FILE_NAME),
            r#"
            [categories]
            names = ["feature"]
        "#,
        )
        .unwrap();

        let child_dir = parent_dir.path().join("subdir");
        fs::create_dir(&child_dir).unwrap();

        let found = find_config_from(&child_dir).unwrap();
        assert_eq!(found, parent_dir.path().join(CONFIG_FILE_NAME));

        let config = load_config_from_dir(&child_dir).unwrap();
        assert_eq!(config.categories.names, vec!["feature"]);
        // Paths resolve against the file's directory, not the start directory.
        assert_eq!(config.ledger.path, parent_dir.path().join("ledger.txt"));
    }

    #[test]
    fn test_find_config_missing() {
        let temp_dir = TempDir::new().unwrap();
        let start = temp_dir.path().join("project").join("Assets");
        fs::create_dir_all(&start).unwrap();

        // Nothing inside the temp dir holds a config, so the search either
        // fails for `start` or ends above the temp dir.
        match find_config_from(&start) {
            Err(ConfigError::NotFound(path)) => assert_eq!(path, start.join(CONFIG_FILE_NAME)),
            Err(err) => panic!("unexpected error: {err}"),
            Ok(path) => assert!(!path.starts_with(temp_dir.path()), "found {path:?}"),
        }
    }

    #[test]
    fn test_find_config_stops_at_nearest() {
        let temp_dir = TempDir::new().unwrap();
        let project = temp_dir.path().join("project");
        let start = project.join("Assets").join("Scenes");
        fs::create_dir_all(&start).unwrap();
        fs::write(temp_dir.path().join(CONFIG_FILE_NAME), "").unwrap();
        fs::write(project.join(CONFIG_FILE_NAME), "").unwrap();

        assert_eq!(
            find_config_from(&start).unwrap(),
            project.join(CONFIG_FILE_NAME)
        );
    }
}
