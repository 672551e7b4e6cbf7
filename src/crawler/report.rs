use crate::api::{FailureKind, FetchError};
use indexmap::IndexMap;

/// A single item (city or station) that produced no data
#[derive(Debug)]
pub struct ItemFailure {
    /// City code or station id
    pub key: String,
    /// Name used in progress output
    pub label: String,
    pub error: FetchError,
}

/// Outcome of one crawl stage
///
/// Per-item failures never stop a stage; they are collected here next to
/// the successful records, which keep the order they were fetched in.
#[derive(Debug)]
pub struct StageReport<T> {
    pub records: IndexMap<String, T>,
    pub failures: Vec<ItemFailure>,
    /// Items a request was issued for
    pub attempted: usize,
    pub published: usize,
    pub publish_failures: usize,
    /// Pacing pauses taken between items
    pub pauses: u32,
}

impl<T> StageReport<T> {
    pub fn new() -> Self {
        Self {
            records: IndexMap::new(),
            failures: Vec::new(),
            attempted: 0,
            published: 0,
            publish_failures: 0,
            pauses: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn failures_of(&self, kind: FailureKind) -> usize {
        self.failures
            .iter()
            .filter(|failure| failure.error.kind() == kind)
            .count()
    }

    pub(crate) fn record_failure(&mut self, key: &str, label: &str, error: FetchError) {
        self.failures.push(ItemFailure {
            key: key.to_string(),
            label: label.to_string(),
            error,
        });
    }
}

impl<T> Default for StageReport<T> {
    fn default() -> Self {
        Self::new()
    }
}
