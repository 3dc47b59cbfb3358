//! Generate command.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Args;
use patchnotes_commit::CategoryMapping;
use patchnotes_config::Config;
use patchnotes_core::{BuildId, PatchRun, RunOutcome};

use super::open_repository;

/// Arguments for the generate command.
#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// Start after this revision instead of the ledger's commit
    #[arg(long)]
    pub since: Option<String>,

    /// Build date as YYYY-MM-DD (default: today)
    #[arg(long, value_parser = parse_date)]
    pub date: Option<NaiveDate>,

    /// Show the notes without storing them or updating the ledger
    #[arg(long)]
    pub dry_run: bool,
}

fn parse_date(value: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
}

/// Runs the generate command.
pub fn run(args: &GenerateArgs, config: &Config) -> Result<()> {
    let repo = open_repository(config)?;

    let format = &config.site.date_format;
    let build = match args.date {
        Some(date) => BuildId::from_date(date, format),
        None => BuildId::today(format),
    };

    let mut run = PatchRun::from_config(repo, config).dry_run(args.dry_run);
    if let Some(since) = &args.since {
        run = run.since(since.clone());
    }

    match run.execute(&build).context("failed to generate patch notes")? {
        RunOutcome::NoNewCommits { head } => {
            println!("No new commits (HEAD is {head})");
        }
        RunOutcome::DryRun {
            pending,
            categorized,
        } => {
            println!(
                "Dry run for build {build}: {} commit(s) up to {}",
                pending.lines.len(),
                pending.head
            );
            print_records(&categorized.mapping);
            print_rejected(categorized.rejected.len());
        }
        RunOutcome::Stored {
            path,
            pending,
            categorized,
            ..
        } => {
            println!("Stored patch notes for build {build} in {}", path.display());
            print_counts(&categorized.mapping);
            print_rejected(categorized.rejected.len());
            println!("Ledger now at {}", pending.head);
        }
    }

    Ok(())
}

fn print_counts(mapping: &CategoryMapping) {
    for (category, records) in mapping {
        println!("  {category}: {}", records.len());
    }
}

fn print_records(mapping: &CategoryMapping) {
    for (category, records) in mapping {
        println!("  {category}: {}", records.len());
        for record in records {
            println!("    - {} ({})", record.message, record.hash);
        }
    }
}

fn print_rejected(count: usize) {
    if count > 0 {
        println!("  skipped {count} unparseable line(s)");
    }
}
