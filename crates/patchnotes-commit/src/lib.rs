//! Commit types for patchnotes.
//!
//! This crate provides the data shared by every other patchnotes crate:
//! - [`CommitRecord`]: One commit after its log line has been parsed
//! - [`CategoryMapping`]: Commit records bucketed by category

mod mapping;
mod record;

pub use mapping::{CategoryMapping, MappingError};
pub use record::CommitRecord;

/// Fallback category for commits whose tag is not configured.
pub const MISC_CATEGORY: &str = "Misc";
