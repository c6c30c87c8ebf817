//! Filter pipeline
//!
//! A stateless decision ([`accept`]) plus one accumulator (the optional
//! seen-set), threaded through a single linear scan of the input lines.

use crate::dedup::SeenSet;
use crate::encoding::strip_terminators;
use crate::error::Result;
use crate::filter::{accept, FilterConfig};
use crate::lists::WordSet;
use crate::output::WordSink;
use crate::progress::ProcessingStats;

/// Outcome for one input line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict<'a> {
    /// Empty after stripping terminators; never evaluated
    Blank,
    Rejected,
    /// Accepted but already emitted earlier
    Duplicate,
    Emit(&'a str),
}

pub struct Pipeline<'a> {
    config: &'a FilterConfig,
    blacklist: &'a WordSet,
    whitelist: &'a WordSet,
    seen: Option<SeenSet>,
}

impl<'a> Pipeline<'a> {
    pub fn new(config: &'a FilterConfig, blacklist: &'a WordSet, whitelist: &'a WordSet) -> Self {
        Self {
            config,
            blacklist,
            whitelist,
            seen: config.dedupe().then(SeenSet::new),
        }
    }

    /// Dedupe state; `None` when deduplication is off
    pub fn seen(&self) -> Option<&SeenSet> {
        self.seen.as_ref()
    }

    /// Decide what happens to one raw line
    pub fn feed<'l>(&mut self, raw: &'l str) -> Verdict<'l> {
        let stripped = strip_terminators(raw);
        if stripped.is_empty() {
            return Verdict::Blank;
        }

        let word = if self.config.strip() { stripped } else { raw };

        if !accept(word, self.config, self.blacklist, self.whitelist) {
            return Verdict::Rejected;
        }

        if let Some(ref mut seen) = self.seen {
            if !seen.insert(word) {
                return Verdict::Duplicate;
            }
        }

        Verdict::Emit(word)
    }

    /// Feed every line of `lines` and write survivors to `sink` in order
    ///
    /// Stops at the first read or write error; lines emitted before it stay
    /// emitted.
    pub fn run<I, S>(&mut self, lines: I, sink: &mut S, stats: &mut ProcessingStats) -> Result<()>
    where
        I: IntoIterator<Item = Result<String>>,
        S: WordSink + ?Sized,
    {
        for line in lines {
            let line = line?;
            stats.add_line(line.len() as u64);

            match self.feed(&line) {
                Verdict::Blank => stats.add_blank(),
                Verdict::Rejected => stats.add_rejected(),
                Verdict::Duplicate => stats.add_duplicate(),
                Verdict::Emit(word) => {
                    sink.write_word(word)?;
                    stats.add_emitted();
                }
            }
        }

        Ok(())
    }
}

/// Filter an in-memory list of lines, returning the emitted words
pub fn filter_lines<'l, I>(
    lines: I,
    config: &FilterConfig,
    blacklist: &WordSet,
    whitelist: &WordSet,
) -> Vec<String>
where
    I: IntoIterator<Item = &'l str>,
{
    let mut pipeline = Pipeline::new(config, blacklist, whitelist);
    lines
        .into_iter()
        .filter_map(|line| match pipeline.feed(line) {
            Verdict::Emit(word) => Some(word.to_string()),
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FilterError;
    use crate::filter::ClassFlags;
    use std::io;

    fn run(lines: &[&str], config: &FilterConfig) -> Vec<String> {
        filter_lines(lines.iter().copied(), config, &WordSet::new(), &WordSet::new())
    }

    #[test]
    fn test_require_lower_with_dedupe() {
        let config = FilterConfig::builder()
            .require(ClassFlags {
                lower: true,
                ..ClassFlags::default()
            })
            .dedupe(true)
            .build()
            .unwrap();

        assert_eq!(run(&["cat", "Dog", "123", "cat"], &config), vec!["cat", "Dog"]);
    }

    #[test]
    fn test_length_window() {
        let config = FilterConfig::builder()
            .min_len(Some(3))
            .max_len(Some(5))
            .build()
            .unwrap();

        assert_eq!(run(&["ab", "abcde", "abcdef"], &config), vec!["abcde"]);
    }

    #[test]
    fn test_blacklist_exact_match() {
        let config = FilterConfig::default();
        let blacklist: WordSet = ["bad"].into_iter().collect();

        let out = filter_lines(["good", "bad", "bad2"], &config, &blacklist, &WordSet::new());
        assert_eq!(out, vec!["good", "bad2"]);
    }

    #[test]
    fn test_exclude_digits_only() {
        let config = FilterConfig::builder().exclude(Some(r"\d+")).build().unwrap();

        assert_eq!(run(&["abc", "123", "a1b"], &config), vec!["abc", "a1b"]);
    }

    #[test]
    fn test_dedupe_keeps_first_position() {
        let config = FilterConfig::builder().dedupe(true).build().unwrap();

        assert_eq!(
            run(&["b", "a", "b", "c", "a"], &config),
            vec!["b", "a", "c"]
        );
    }

    #[test]
    fn test_without_dedupe_duplicates_pass() {
        let config = FilterConfig::default();
        let list = WordSet::new();

        assert!(Pipeline::new(&config, &list, &list).seen().is_none());
        assert_eq!(run(&["a", "a"], &config), vec!["a", "a"]);
    }

    #[test]
    fn test_dedupe_on_starts_empty() {
        let config = FilterConfig::builder().dedupe(true).build().unwrap();
        let list = WordSet::new();
        let pipeline = Pipeline::new(&config, &list, &list);

        assert!(pipeline.seen().is_some_and(|seen| seen.is_empty()));
    }

    #[test]
    fn test_blank_lines_never_change_output() {
        let config = FilterConfig::builder().max_len(Some(4)).build().unwrap();

        let plain = run(&["one\n", "three\n", "two\n"], &config);
        let padded = run(&["\n", "one\n", "\r\n", "\n", "three\n", "two\n", "\n"], &config);

        assert_eq!(plain, vec!["one", "two"]);
        assert_eq!(plain, padded);
    }

    #[test]
    fn test_strip_crlf() {
        let config = FilterConfig::builder()
            .forbid(ClassFlags {
                special: true,
                ..ClassFlags::default()
            })
            .build()
            .unwrap();

        assert_eq!(run(&["word\r\n"], &config), vec!["word"]);
    }

    #[test]
    fn test_no_strip_keeps_terminators() {
        let config = FilterConfig::builder().strip(false).build().unwrap();
        assert_eq!(run(&["word\r\n", "\r\n", "last"], &config), vec!["word\r\n", "last"]);

        // `\r` and `\n` count as special characters when they are not stripped
        let config = FilterConfig::builder()
            .strip(false)
            .forbid(ClassFlags {
                special: true,
                ..ClassFlags::default()
            })
            .build()
            .unwrap();
        assert_eq!(run(&["dos\r\n", "unix\n", "last"], &config), vec!["last"]);
    }

    #[test]
    fn test_whitelisted_word_is_still_deduped() {
        let config = FilterConfig::builder().dedupe(true).min_len(Some(10)).build().unwrap();
        let whitelist: WordSet = ["vip"].into_iter().collect();

        let out = filter_lines(["vip", "short", "vip"], &config, &WordSet::new(), &whitelist);
        assert_eq!(out, vec!["vip"]);
    }

    #[test]
    fn test_run_counts_and_writes() {
        let config = FilterConfig::builder()
            .min_len(Some(2))
            .dedupe(true)
            .build()
            .unwrap();
        let list = WordSet::new();
        let mut pipeline = Pipeline::new(&config, &list, &list);
        let mut sink: Vec<String> = Vec::new();
        let mut stats = ProcessingStats::new();

        let lines = ["ab\n", "\n", "a\n", "ab\n", "cd"].map(|l| Ok::<_, FilterError>(l.to_string()));
        pipeline.run(lines, &mut sink, &mut stats).unwrap();

        assert_eq!(sink, vec!["ab", "cd"]);
        assert_eq!(stats.total_lines, 5);
        assert_eq!(stats.blank_lines, 1);
        assert_eq!(stats.rejected_lines, 1);
        assert_eq!(stats.duplicate_lines, 1);
        assert_eq!(stats.emitted_lines, 2);
    }

    #[test]
    fn test_run_stops_at_read_error_keeping_prior_output() {
        let config = FilterConfig::default();
        let list = WordSet::new();
        let mut pipeline = Pipeline::new(&config, &list, &list);
        let mut sink: Vec<String> = Vec::new();
        let mut stats = ProcessingStats::new();

        let lines = vec![
            Ok("first\n".to_string()),
            Err(FilterError::io("input.txt", io::Error::from(io::ErrorKind::InvalidData))),
            Ok("never\n".to_string()),
        ];

        assert!(pipeline.run(lines, &mut sink, &mut stats).is_err());
        assert_eq!(sink, vec!["first"]);
    }
}
