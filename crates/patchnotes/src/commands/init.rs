//! Initialize command.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::Args;
use patchnotes_config::{CONFIG_FILE_NAME, default_config_toml};
use tracing::info;

/// Arguments for the init command.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Force overwrite existing configuration
    #[arg(short, long)]
    pub force: bool,
}

/// Runs the init command.
///
/// Writes to `target` when given, otherwise to `patchnotes.toml` in the
/// current directory.
pub fn run(args: &InitArgs, target: Option<&Path>) -> Result<()> {
    let path = match target {
        Some(path) => path.to_path_buf(),
        None => PathBuf::from(CONFIG_FILE_NAME),
    };

    if path.exists() && !args.force {
        bail!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }

    fs::write(&path, default_config_toml())
        .with_context(|| format!("failed to write {}", path.display()))?;

    info!(path = %path.display(), "wrote default configuration");
    println!("Created {}", path.display());
    Ok(())
}
