//! Bracketed-tag commit line parser.
//!
//! Log lines look like `<hash> [<tag>] <message>`. The tag is matched against
//! the configured categories with its brackets stripped; an unmatched tag is
//! kept at the front of the message and the commit goes to
//! [`MISC_CATEGORY`].

use std::collections::HashSet;

use patchnotes_commit::{CommitRecord, MISC_CATEGORY};
use thiserror::Error;

/// A log line without a hash, a tag and a message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot parse log line {line:?}")]
pub struct ParseFailure {
    /// The raw line, unmodified.
    pub line: String,
}

/// Parses one-line log entries into commit records.
#[derive(Debug, Clone)]
pub struct TagParser {
    categories: HashSet<String>,
}

impl TagParser {
    /// Creates a parser recognizing the given categories.
    #[must_use]
    pub fn new<I, S>(categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            categories: categories.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns whether `tag` is a configured category.
    #[must_use]
    pub fn recognizes(&self, tag: &str) -> bool {
        self.categories.contains(tag)
    }

    /// Parses one log line.
    ///
    /// # Errors
    ///
    /// Returns [`ParseFailure`] if the line does not split into a non-empty
    /// hash, a tag token and a message.
    pub fn parse(&self, line: &str) -> Result<CommitRecord, ParseFailure> {
        let failure = || ParseFailure {
            line: line.to_string(),
        };

        let trimmed = line.trim_end_matches(['\n', '\r']);
        let (hash, rest) = trimmed.split_once(char::is_whitespace).ok_or_else(failure)?;
        let (tag, message) = rest.split_once(char::is_whitespace).ok_or_else(failure)?;
        if hash.is_empty() {
            return Err(failure());
        }

        let candidate = tag.trim_matches(['[', ']']);
        if self.recognizes(candidate) {
            Ok(CommitRecord::new(hash, candidate, message))
        } else {
            Ok(CommitRecord::new(
                hash,
                MISC_CATEGORY,
                format!("{tag} {message}"),
            ))
        }
    }
}
