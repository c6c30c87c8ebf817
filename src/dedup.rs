//! Deduplication state for a filtering run
//!
//! The seen-set only exists when `--dedupe` is given; the pipeline holds it
//! as an `Option` so "off" and "on with nothing seen yet" stay distinct.

use ahash::RandomState;
use hashbrown::HashSet;

/// In-memory first-occurrence tracker
///
/// Grows monotonically for the whole run.
#[derive(Debug, Default)]
pub struct SeenSet {
    set: HashSet<String, RandomState>,
}

impl SeenSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `word`; returns true on its first occurrence
    pub fn insert(&mut self, word: &str) -> bool {
        if self.set.contains(word) {
            return false;
        }
        self.set.insert(word.to_owned());
        true
    }

    /// Number of unique words seen
    pub fn len(&self) -> usize {
        self.set.len()
    }

    pub fn is_empty(&self) -> bool {
        self.set.is_empty()
    }
}
