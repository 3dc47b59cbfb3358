//! Date-derived build identifiers.

use std::fmt;

use chrono::{Local, NaiveDate};

/// Names one day's build, e.g. `08_14_20` for the default `%m_%d_%y` format.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BuildId(String);

impl BuildId {
    /// Formats `date` with a `strftime` pattern.
    #[must_use]
    pub fn from_date(date: NaiveDate, format: &str) -> Self {
        Self(date.format(format).to_string())
    }

    /// Identifier for the local current date.
    #[must_use]
    pub fn today(format: &str) -> Self {
        Self::from_date(Local::now().date_naive(), format)
    }

    /// Returns the identifier text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Name of the directory holding this build, `build_<id>`.
    #[must_use]
    pub fn dir_name(&self) -> String {
        format!("build_{}", self.0)
    }
}

impl fmt::Display for BuildId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
