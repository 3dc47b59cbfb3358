//! Commit records grouped by category.

use std::collections::BTreeMap;
use std::collections::btree_map;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{CommitRecord, MISC_CATEGORY};

/// Errors raised when a mapping would gain a key it was not built with.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MappingError {
    /// The record's category has no bucket in this mapping.
    #[error("unknown category: {0}")]
    UnknownCategory(String),
}

/// Commit records bucketed by category.
///
/// Every bucket exists from construction on, even when it stays empty, and no
/// bucket is ever added afterwards except through [`CategoryMapping::merge`].
/// Within a bucket, records keep the order they were pushed in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryMapping {
    buckets: BTreeMap<String, Vec<CommitRecord>>,
}

impl CategoryMapping {
    /// Creates an empty mapping with one bucket per category plus
    /// [`MISC_CATEGORY`].
    #[must_use]
    pub fn new<I, S>(categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut buckets: BTreeMap<String, Vec<CommitRecord>> = categories
            .into_iter()
            .map(|c| (c.into(), Vec::new()))
            .collect();
        buckets.entry(MISC_CATEGORY.to_string()).or_default();
        Self { buckets }
    }

    /// Appends a record to the bucket named by its category.
    ///
    /// # Errors
    ///
    /// Returns [`MappingError::UnknownCategory`] if the mapping has no bucket
    /// for the record's category. The mapping is left unchanged.
    pub fn push(&mut self, record: CommitRecord) -> Result<(), MappingError> {
        match self.buckets.get_mut(&record.category) {
            Some(bucket) => {
                bucket.push(record);
                Ok(())
            }
            None => Err(MappingError::UnknownCategory(record.category)),
        }
    }

    /// Appends every bucket of `newer` after the matching bucket of `self`.
    ///
    /// Buckets present on only one side are kept.
    pub fn merge(&mut self, newer: CategoryMapping) {
        for (category, records) in newer.buckets {
            self.buckets.entry(category).or_default().extend(records);
        }
    }

    /// Returns the records of one category.
    #[must_use]
    pub fn get(&self, category: &str) -> Option<&[CommitRecord]> {
        self.buckets.get(category).map(Vec::as_slice)
    }

    /// Returns whether the mapping has a bucket for the category.
    #[must_use]
    pub fn contains_category(&self, category: &str) -> bool {
        self.buckets.contains_key(category)
    }

    /// Returns the category names in key order.
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.buckets.keys().map(String::as_str)
    }

    /// Iterates over `(category, records)` pairs in key order.
    pub fn iter(&self) -> btree_map::Iter<'_, String, Vec<CommitRecord>> {
        self.buckets.iter()
    }

    /// Total number of records across all buckets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    /// Returns true if no bucket holds a record.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buckets.values().all(Vec::is_empty)
    }
}

impl<'a> IntoIterator for &'a CategoryMapping {
    type Item = (&'a String, &'a Vec<CommitRecord>);
    type IntoIter = btree_map::Iter<'a, String, Vec<CommitRecord>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
