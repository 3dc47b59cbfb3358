//! Core library for patchnotes.
//!
//! This crate turns one-line git log entries into categorized patch notes:
//! parsing and bucketing commits, tracking the last processed commit between
//! runs, and storing each build's notes where the page renderer finds them.

mod build;
mod categorizer;
mod error;
mod ledger;
mod parser;
mod run;
mod source;
mod store;

pub use build::BuildId;
pub use categorizer::{Categorized, Categorizer};
pub use error::{CoreError, CoreResult};
pub use ledger::Ledger;
pub use parser::{ParseFailure, TagParser};
pub use run::{PatchRun, Pending, RunOutcome};
pub use source::CommitSource;
pub use store::{PatchNoteStore, StoreError, StoreResult, notes_file_name};
