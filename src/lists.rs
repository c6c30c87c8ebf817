//! Exact-match override lists (blacklist / whitelist)

use crate::encoding::{strip_terminators, LineReader};
use crate::error::{FilterError, Result};
use ahash::RandomState;
use encoding_rs::Encoding;
use hashbrown::HashSet;
use std::path::Path;

/// Read-only set of exact words
#[derive(Debug, Clone, Default)]
pub struct WordSet {
    words: HashSet<String, RandomState>,
}

impl WordSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a newline-delimited file, skipping blank lines
    ///
    /// A missing file is an error, never an empty set.
    pub fn load(path: &Path, encoding: &'static Encoding) -> Result<Self> {
        if !path.is_file() {
            return Err(FilterError::MissingFile(path.to_path_buf()));
        }

        let mut set = Self::new();
        for line in LineReader::open(path, encoding)? {
            set.insert(strip_terminators(&line?));
        }

        log::debug!("Loaded {} words from {:?}", set.len(), path);
        Ok(set)
    }

    /// Load when a path is given, empty set otherwise
    pub fn load_optional(path: Option<&Path>, encoding: &'static Encoding) -> Result<Self> {
        match path {
            Some(path) => Self::load(path, encoding),
            None => Ok(Self::new()),
        }
    }

    /// Add a word; blank words are ignored
    pub fn insert(&mut self, word: &str) {
        if !word.is_empty() {
            self.words.insert(word.to_owned());
        }
    }

    #[inline]
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl<'a> FromIterator<&'a str> for WordSet {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut set = Self::new();
        for word in iter {
            set.insert(word);
        }
        set
    }
}
