//! Placeholders command.

use anyhow::{Context, Result};
use patchnotes_config::Config;
use patchnotes_page::ensure_placeholders;

/// Runs the placeholders command.
pub fn run(config: &Config) -> Result<()> {
    let builds_dir = config.site.builds_dir();
    let created = ensure_placeholders(&builds_dir, &config.site.platforms)
        .with_context(|| format!("failed to fill {}", builds_dir.display()))?;

    println!("Created {created} placeholder file(s)");
    Ok(())
}
