//! CLI definition.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use patchnotes_config::{Config, load_config, load_config_from_dir};
use tracing::{debug, error};
use tracing_appender::non_blocking::WorkerGuard;

use crate::{commands, logging};

/// Generate categorized patch notes for daily builds from git history.
#[derive(Debug, Parser)]
#[command(name = "patchnotes")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (default: nearest patchnotes.toml upwards)
    #[arg(short, long, global = true, env = "PATCHNOTES_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Write a default patchnotes.toml
    Init(commands::init::InitArgs),

    /// Collect new commits into today's build notes
    Generate(commands::generate::GenerateArgs),

    /// Show the ledger, HEAD and pending commit count
    Status,

    /// Render the daily builds page
    Render(commands::render::RenderArgs),

    /// Create empty platform files for every build
    Placeholders,
}

impl Cli {
    /// Runs the CLI command.
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Init(args) => {
                let _guard = logging::init(self.verbose, None)?;
                commands::init::run(&args, self.config.as_deref())
            }
            Commands::Generate(args) => with_config(self.config.as_deref(), self.verbose, |config| {
                commands::generate::run(&args, config)
            }),
            Commands::Status => {
                with_config(self.config.as_deref(), self.verbose, commands::status::run)
            }
            Commands::Render(args) => with_config(self.config.as_deref(), self.verbose, |config| {
                commands::render::run(&args, config)
            }),
            Commands::Placeholders => {
                with_config(self.config.as_deref(), self.verbose, commands::placeholders::run)
            }
        }
    }
}

/// Loads configuration, installs logging and runs `command`.
///
/// Failures are logged before the log writer is flushed.
fn with_config(
    path: Option<&Path>,
    verbose: bool,
    command: impl FnOnce(&Config) -> Result<()>,
) -> Result<()> {
    let config = load(path)?;
    let _guard: Option<WorkerGuard> = logging::init(verbose, Some(&config.log.file))?;
    debug!(repository = %config.repository.path.display(), "configuration loaded");

    let result = command(&config);
    if let Err(err) = &result {
        error!("command failed: {err:#}");
    }
    result
}

fn load(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => load_config(path)
            .with_context(|| format!("failed to load configuration from {}", path.display())),
        None => {
            let cwd = std::env::current_dir().context("failed to read current directory")?;
            load_config_from_dir(&cwd).context("failed to load configuration")
        }
    }
}
