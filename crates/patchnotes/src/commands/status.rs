//! Status command.

use anyhow::{Context, Result};
use patchnotes_config::Config;
use patchnotes_core::PatchRun;

use super::open_repository;

/// Runs the status command.
pub fn run(config: &Config) -> Result<()> {
    let run = PatchRun::from_config(open_repository(config)?, config);
    let pending = run.pending().context("failed to resolve pending commits")?;

    println!("Ledger:  {}", pending.marker.as_deref().unwrap_or("none"));
    println!("HEAD:    {}", pending.head);
    println!("Pending: {} commit(s)", pending.lines.len());
    Ok(())
}
