//! Command implementations.

use anyhow::{Context, Result};
use patchnotes_config::Config;
use patchnotes_git::Repository;

pub mod generate;
pub mod init;
pub mod placeholders;
pub mod render;
pub mod status;

/// Opens the configured repository, searching upwards from
/// `repository.path` for the enclosing work tree.
fn open_repository(config: &Config) -> Result<Repository> {
    let path = &config.repository.path;
    Repository::discover(path).with_context(|| format!("failed to open {}", path.display()))
}
