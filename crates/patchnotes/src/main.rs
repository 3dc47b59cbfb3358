//! patchnotes CLI - categorized patch notes for daily builds.

use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;
mod logging;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli.run()
}
