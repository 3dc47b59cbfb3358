//! Render command.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use patchnotes_config::Config;
use patchnotes_page::{BuildPageFormatter, scan_builds, write_page};

/// Arguments for the render command.
#[derive(Debug, Args)]
pub struct RenderArgs {
    /// Output file (default: site root + site page)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Runs the render command.
pub fn run(args: &RenderArgs, config: &Config) -> Result<()> {
    let site = &config.site;
    let builds = scan_builds(
        &site.builds_dir(),
        &site.builds,
        &site.platforms,
        &site.date_format,
    )
    .context("failed to scan builds")?;

    let html = BuildPageFormatter::from_config(config).format(&builds);
    let path = args.output.clone().unwrap_or_else(|| site.page_path());
    write_page(&path, &html).context("failed to write build page")?;

    println!("Rendered {} build(s) to {}", builds.len(), path.display());
    Ok(())
}
