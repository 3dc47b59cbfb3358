//! Buckets parsed commits by category.

use patchnotes_commit::CategoryMapping;
use tracing::warn;

use crate::{ParseFailure, TagParser};

/// Result of categorizing a batch of log lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Categorized {
    /// Parsed commits by category, in input order.
    pub mapping: CategoryMapping,

    /// Lines that could not be parsed, in input order.
    pub rejected: Vec<ParseFailure>,
}

/// Turns log lines into a [`CategoryMapping`].
#[derive(Debug, Clone)]
pub struct Categorizer {
    categories: Vec<String>,
    parser: TagParser,
}

impl Categorizer {
    /// Creates a categorizer for the configured categories.
    #[must_use]
    pub fn new(categories: &[String]) -> Self {
        Self {
            categories: categories.to_vec(),
            parser: TagParser::new(categories.iter().cloned()),
        }
    }

    /// Returns a mapping with every configured bucket and no records.
    #[must_use]
    pub fn empty_mapping(&self) -> CategoryMapping {
        CategoryMapping::new(self.categories.iter().cloned())
    }

    /// Parses each line and appends the result to its bucket.
    ///
    /// Unparseable lines are logged once each and skipped.
    pub fn categorize<I, S>(&self, lines: I) -> Categorized
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut mapping = self.empty_mapping();
        let mut rejected = Vec::new();

        for line in lines {
            match self.parser.parse(line.as_ref()) {
                Ok(record) => {
                    if let Err(err) = mapping.push(record) {
                        warn!(%err, "dropping commit without a bucket");
                    }
                }
                Err(failure) => {
                    warn!(line = %failure.line, "skipping unparseable log line");
                    rejected.push(failure);
                }
            }
        }

        Categorized { mapping, rejected }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use patchnotes_commit::CommitRecord;

    fn categorizer() -> Categorizer {
        Categorizer::new(&["feature".to_string(), "bugfix".to_string()])
    }

    #[test]
    fn test_empty_input_has_all_keys() {
        let result = categorizer().categorize(Vec::<String>::new());
        let keys: Vec<_> = result.mapping.categories().collect();
        assert_eq!(keys, vec!["Misc", "bugfix", "feature"]);
        assert!(result.mapping.is_empty());
        assert!(result.rejected.is_empty());
    }

    #[test]
    fn test_buckets_example() {
        let lines = [
            "h1 [feature] Added sprint",
            "h2 [bogus] oops",
            "h3 [bugfix] Fixed crash",
        ];

        let result = categorizer().categorize(lines);

        assert_eq!(
            result.mapping.get("feature").unwrap(),
            &[CommitRecord::new("h1", "feature", "Added sprint")]
        );
        assert_eq!(
            result.mapping.get("bugfix").unwrap(),
            &[CommitRecord::new("h3", "bugfix", "Fixed crash")]
        );
        assert_eq!(
            result.mapping.get("Misc").unwrap(),
            &[CommitRecord::new("h2", "Misc", "[bogus] oops")]
        );
        assert!(result.rejected.is_empty());
    }

    #[test]
    fn test_keeps_input_order_and_duplicates() {
        let lines = [
            "h3 [feature] newest",
            "h2 [feature] middle",
            "h1 [feature] oldest",
            "h1 [feature] oldest",
        ];

        let result = categorizer().categorize(lines);
        let hashes: Vec<_> = result
            .mapping
            .get("feature")
            .unwrap()
            .iter()
            .map(|r| r.hash.as_str())
            .collect();
        assert_eq!(hashes, vec!["h3", "h2", "h1", "h1"]);
    }

    #[test]
    fn test_malformed_lines_are_skipped() {
        let lines = ["h1 [feature] Added sprint", "garbage", "h2 [bugfix]"];

        let result = categorizer().categorize(lines);

        assert_eq!(result.mapping.len(), 1);
        assert_eq!(result.rejected.len(), 2);
        assert_eq!(result.rejected[0].line, "garbage");
        assert_eq!(result.rejected[1].line, "h2 [bugfix]");
    }

    #[test]
    fn test_malformed_only_matches_empty_mapping() {
        let c = categorizer();
        let result = c.categorize(["garbage"]);
        assert_eq!(result.mapping, c.empty_mapping());
        assert_eq!(result.rejected.len(), 1);
    }

    #[test]
    fn test_idempotent() {
        let lines = vec![
            "h1 [feature] Added sprint".to_string(),
            "h2 [bogus] oops".to_string(),
            "nope".to_string(),
            "h3 [bugfix] Fixed crash".to_string(),
        ];

        let c = categorizer();
        let first = c.categorize(&lines);
        let second = c.categorize(&lines);

        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_vec(&first.mapping).unwrap(),
            serde_json::to_vec(&second.mapping).unwrap()
        );
    }
}
