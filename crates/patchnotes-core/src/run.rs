//! One patch note run: range → categorize → store → advance ledger.

use std::path::PathBuf;

use patchnotes_config::{Config, MarkerPolicy};
use tracing::{info, warn};

use crate::{
    BuildId, Categorized, Categorizer, CommitSource, CoreError, CoreResult, Ledger,
    PatchNoteStore,
};

/// Commits waiting to be included in patch notes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pending {
    /// HEAD captured at the start of the run.
    pub head: String,

    /// Hash read from the ledger, `None` when unknown or overridden.
    pub marker: Option<String>,

    /// Exclusive lower bound, `None` for the whole history.
    pub since: Option<String>,

    /// One-line log entries in `since..head`, newest first.
    pub lines: Vec<String>,
}

/// How a run ended.
#[derive(Debug)]
pub enum RunOutcome {
    /// Nothing new since the last run. Nothing was written.
    NoNewCommits {
        /// HEAD at the start of the run.
        head: String,
    },

    /// Commits were categorized but, as requested, not stored.
    DryRun {
        /// The pending range.
        pending: Pending,
        /// The categorized commits.
        categorized: Categorized,
    },

    /// Notes were stored and the ledger now points at `head`.
    Stored {
        /// Build the notes belong to.
        build: BuildId,
        /// File the notes were written to.
        path: PathBuf,
        /// The range that was processed.
        pending: Pending,
        /// The categorized commits of this run (before any merge).
        categorized: Categorized,
    },
}

/// Drives a single patch note run.
pub struct PatchRun<S> {
    source: S,
    categorizer: Categorizer,
    ledger: Ledger,
    store: PatchNoteStore,
    marker_policy: MarkerPolicy,
    since: Option<String>,
    dry_run: bool,
}

impl<S: CommitSource> PatchRun<S> {
    /// Creates a run from its parts.
    #[must_use]
    pub fn new(
        source: S,
        categorizer: Categorizer,
        ledger: Ledger,
        store: PatchNoteStore,
        marker_policy: MarkerPolicy,
    ) -> Self {
        Self {
            source,
            categorizer,
            ledger,
            store,
            marker_policy,
            since: None,
            dry_run: false,
        }
    }

    /// Creates a run wired from configuration.
    #[must_use]
    pub fn from_config(source: S, config: &Config) -> Self {
        Self::new(
            source,
            Categorizer::new(&config.categories.names),
            Ledger::new(&config.ledger.path),
            PatchNoteStore::new(config.site.builds_dir(), config.site.on_existing),
            config.ledger.on_unknown,
        )
    }

    /// Starts from `rev` instead of the ledger.
    #[must_use]
    pub fn since(mut self, rev: impl Into<String>) -> Self {
        self.since = Some(rev.into());
        self
    }

    /// Categorizes without storing notes or touching the ledger.
    #[must_use]
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Returns the ledger this run reads and advances.
    #[must_use]
    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Resolves the pending range without writing anything.
    ///
    /// # Errors
    ///
    /// Returns an error if HEAD or the range cannot be read, or the ledger is
    /// unusable under [`MarkerPolicy::Abort`].
    pub fn pending(&self) -> CoreResult<Pending> {
        let head = self.source.head()?;
        let marker = match self.since {
            Some(_) => None,
            None => self.ledger.last_processed(),
        };
        let since = self.start_point(marker.as_deref())?;
        let lines = self.source.log_lines(since.as_deref(), &head)?;
        Ok(Pending {
            head,
            marker,
            since,
            lines,
        })
    }

    /// Executes the run for `build`.
    ///
    /// The ledger is advanced only after the notes were stored, so a failed
    /// run is retried over the same range next time.
    ///
    /// # Errors
    ///
    /// Returns an error if the range cannot be resolved or the notes cannot
    /// be stored. The ledger is unchanged on error.
    pub fn execute(&self, build: &BuildId) -> CoreResult<RunOutcome> {
        let pending = self.pending()?;
        info!(head = %pending.head, since = ?pending.since, count = pending.lines.len(), "resolved commit range");

        if pending.lines.is_empty() {
            info!("no new commits, skipping patch notes");
            return Ok(RunOutcome::NoNewCommits { head: pending.head });
        }

        let categorized = self.categorizer.categorize(&pending.lines);
        if !categorized.rejected.is_empty() {
            warn!(
                count = categorized.rejected.len(),
                "some log lines were skipped"
            );
        }

        if self.dry_run {
            return Ok(RunOutcome::DryRun {
                pending,
                categorized,
            });
        }

        let path = self.store.save(build, categorized.mapping.clone())?;
        self.ledger.record(&pending.head)?;

        Ok(RunOutcome::Stored {
            build: build.clone(),
            path,
            pending,
            categorized,
        })
    }

    fn start_point(&self, marker: Option<&str>) -> CoreResult<Option<String>> {
        if let Some(rev) = &self.since {
            return Ok(Some(rev.clone()));
        }

        match (marker, self.marker_policy) {
            (Some(hash), _) => Ok(Some(hash.to_string())),
            (None, MarkerPolicy::FullHistory) => {
                warn!(ledger = %self.ledger.path().display(), "last processed commit unknown, using full history");
                Ok(None)
            }
            (None, MarkerPolicy::Abort) => {
                Err(CoreError::MarkerUnknown(self.ledger.path().to_path_buf()))
            }
        }
    }
}
