//! Word filtering module
//!
//! Holds the immutable filter configuration and the accept/reject decision
//! for a single word. Rules are checked in a fixed order and the first one
//! that applies decides:
//!
//! 1. whitelist membership (accept)
//! 2. blacklist membership (reject)
//! 3. length bounds
//! 4. character-class requirements
//! 5. character-class prohibitions
//! 6. include regex (full match)
//! 7. exclude regex (full match)

use crate::encoding::TextEncoding;
use crate::error::{FilterError, Result};
use crate::lists::WordSet;
use regex::Regex;

/// Character classes a word can be required to contain or forbidden from containing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharClass {
    Upper,
    Lower,
    /// ASCII decimal digit `0-9`
    Digit,
    /// Neither alphabetic nor a decimal digit
    Special,
}

impl CharClass {
    pub const ALL: [CharClass; 4] = [Self::Upper, Self::Lower, Self::Digit, Self::Special];

    #[inline]
    pub fn contains(self, c: char) -> bool {
        match self {
            Self::Upper => c.is_uppercase(),
            Self::Lower => c.is_lowercase(),
            Self::Digit => c.is_ascii_digit(),
            Self::Special => !(c.is_alphabetic() || c.is_ascii_digit()),
        }
    }

    /// True if any character of `word` belongs to this class
    #[inline]
    pub fn present_in(self, word: &str) -> bool {
        word.chars().any(|c| self.contains(c))
    }
}

/// One boolean per character class
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClassFlags {
    pub upper: bool,
    pub lower: bool,
    pub digit: bool,
    pub special: bool,
}

impl ClassFlags {
    pub fn is_set(&self, class: CharClass) -> bool {
        match class {
            CharClass::Upper => self.upper,
            CharClass::Lower => self.lower,
            CharClass::Digit => self.digit,
            CharClass::Special => self.special,
        }
    }

    pub fn any(&self) -> bool {
        self.upper || self.lower || self.digit || self.special
    }

    /// Enabled classes in evaluation order
    pub fn enabled(&self) -> impl Iterator<Item = CharClass> + '_ {
        CharClass::ALL.into_iter().filter(move |class| self.is_set(*class))
    }
}

/// A regex that must match the whole word
#[derive(Debug, Clone)]
pub struct FullMatch {
    source: String,
    regex: Regex,
}

impl FullMatch {
    pub fn new(pattern: &str) -> Result<Self> {
        let invalid = |source| FilterError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        };

        // Compile the bare pattern first so `a)(b` cannot close the anchor group
        Regex::new(pattern).map_err(invalid)?;
        let regex = Regex::new(&format!(r"\A(?:{})\z", pattern)).map_err(invalid)?;

        Ok(Self {
            source: pattern.to_string(),
            regex,
        })
    }

    #[inline]
    pub fn matches(&self, word: &str) -> bool {
        self.regex.is_match(word)
    }

    /// The pattern as the user wrote it
    pub fn as_str(&self) -> &str {
        &self.source
    }
}

/// Resolved filter configuration
///
/// Built once through [`FilterConfigBuilder`] and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct FilterConfig {
    min_len: Option<usize>,
    max_len: Option<usize>,
    require: ClassFlags,
    forbid: ClassFlags,
    include: Option<FullMatch>,
    exclude: Option<FullMatch>,
    dedupe: bool,
    strip: bool,
    encoding: TextEncoding,
}

impl FilterConfig {
    pub fn builder() -> FilterConfigBuilder {
        FilterConfigBuilder::new()
    }

    pub fn min_len(&self) -> Option<usize> {
        self.min_len
    }

    pub fn max_len(&self) -> Option<usize> {
        self.max_len
    }

    pub fn require(&self) -> ClassFlags {
        self.require
    }

    pub fn forbid(&self) -> ClassFlags {
        self.forbid
    }

    pub fn include(&self) -> Option<&FullMatch> {
        self.include.as_ref()
    }

    pub fn exclude(&self) -> Option<&FullMatch> {
        self.exclude.as_ref()
    }

    pub fn dedupe(&self) -> bool {
        self.dedupe
    }

    pub fn strip(&self) -> bool {
        self.strip
    }

    pub fn encoding(&self) -> TextEncoding {
        self.encoding
    }

    /// Check length, class and regex rules (steps 3-7)
    #[inline]
    pub fn matches(&self, word: &str) -> bool {
        if self.min_len.is_some() || self.max_len.is_some() {
            let len = if word.is_ascii() {
                word.len()
            } else {
                word.chars().count()
            };

            if self.min_len.is_some_and(|min| len < min) {
                return false;
            }
            if self.max_len.is_some_and(|max| len > max) {
                return false;
            }
        }

        if self.require.enabled().any(|class| !class.present_in(word)) {
            return false;
        }

        if self.forbid.enabled().any(|class| class.present_in(word)) {
            return false;
        }

        if let Some(ref include) = self.include {
            if !include.matches(word) {
                return false;
            }
        }

        if let Some(ref exclude) = self.exclude {
            if exclude.matches(word) {
                return false;
            }
        }

        true
    }

    /// Check if any programmatic rule is active
    pub fn has_filters(&self) -> bool {
        self.min_len.is_some()
            || self.max_len.is_some()
            || self.require.any()
            || self.forbid.any()
            || self.include.is_some()
            || self.exclude.is_some()
    }
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            min_len: None,
            max_len: None,
            require: ClassFlags::default(),
            forbid: ClassFlags::default(),
            include: None,
            exclude: None,
            dedupe: false,
            strip: true,
            encoding: TextEncoding::default(),
        }
    }
}

/// Builder for [`FilterConfig`]
///
/// Patterns are compiled and bounds validated in [`build`](Self::build), so
/// every configuration error surfaces before any input is read.
#[derive(Debug, Clone)]
pub struct FilterConfigBuilder {
    min_len: Option<usize>,
    max_len: Option<usize>,
    require: ClassFlags,
    forbid: ClassFlags,
    include: Option<String>,
    exclude: Option<String>,
    dedupe: bool,
    strip: bool,
    encoding: TextEncoding,
}

impl FilterConfigBuilder {
    pub fn new() -> Self {
        Self {
            min_len: None,
            max_len: None,
            require: ClassFlags::default(),
            forbid: ClassFlags::default(),
            include: None,
            exclude: None,
            dedupe: false,
            strip: true,
            encoding: TextEncoding::default(),
        }
    }

    pub fn min_len(mut self, min: Option<usize>) -> Self {
        self.min_len = min;
        self
    }

    pub fn max_len(mut self, max: Option<usize>) -> Self {
        self.max_len = max;
        self
    }

    pub fn require(mut self, flags: ClassFlags) -> Self {
        self.require = flags;
        self
    }

    pub fn forbid(mut self, flags: ClassFlags) -> Self {
        self.forbid = flags;
        self
    }

    /// Full-match include pattern; empty patterns are ignored
    pub fn include(mut self, pattern: Option<&str>) -> Self {
        self.include = pattern.filter(|p| !p.is_empty()).map(str::to_string);
        self
    }

    /// Full-match exclude pattern; empty patterns are ignored
    pub fn exclude(mut self, pattern: Option<&str>) -> Self {
        self.exclude = pattern.filter(|p| !p.is_empty()).map(str::to_string);
        self
    }

    pub fn dedupe(mut self, dedupe: bool) -> Self {
        self.dedupe = dedupe;
        self
    }

    pub fn strip(mut self, strip: bool) -> Self {
        self.strip = strip;
        self
    }

    pub fn encoding(mut self, encoding: TextEncoding) -> Self {
        self.encoding = encoding;
        self
    }

    pub fn build(self) -> Result<FilterConfig> {
        if let (Some(min), Some(max)) = (self.min_len, self.max_len) {
            if min > max {
                return Err(FilterError::InvalidBounds { min, max });
            }
        }

        let include = self.include.as_deref().map(FullMatch::new).transpose()?;
        let exclude = self.exclude.as_deref().map(FullMatch::new).transpose()?;

        Ok(FilterConfig {
            min_len: self.min_len,
            max_len: self.max_len,
            require: self.require,
            forbid: self.forbid,
            include,
            exclude,
            dedupe: self.dedupe,
            strip: self.strip,
            encoding: self.encoding,
        })
    }
}

impl Default for FilterConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Decide whether a single non-empty word survives filtering
///
/// Whitelist membership wins over everything, blacklist membership over
/// every remaining rule.
#[inline]
pub fn accept(word: &str, config: &FilterConfig, blacklist: &WordSet, whitelist: &WordSet) -> bool {
    if !whitelist.is_empty() && whitelist.contains(word) {
        return true;
    }

    if !blacklist.is_empty() && blacklist.contains(word) {
        return false;
    }

    config.matches(word)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty() -> WordSet {
        WordSet::new()
    }

    fn lower_required() -> ClassFlags {
        ClassFlags {
            lower: true,
            ..ClassFlags::default()
        }
    }

    #[test]
    fn test_length_bounds_inclusive() {
        let config = FilterConfig::builder()
            .min_len(Some(3))
            .max_len(Some(5))
            .build()
            .unwrap();

        assert!(!config.matches("ab"));
        assert!(config.matches("abc"));
        assert!(config.matches("abcde"));
        assert!(!config.matches("abcdef"));
    }

    #[test]
    fn test_unicode_length() {
        let config = FilterConfig::builder().max_len(Some(5)).build().unwrap();

        assert!(config.matches("hëllo")); // 5 chars, 6 bytes
        assert!(!config.matches("hëllos"));
    }

    #[test]
    fn test_require_lower_is_presence_based() {
        let config = FilterConfig::builder().require(lower_required()).build().unwrap();

        assert!(config.matches("Dog"));
        assert!(config.matches("cat"));
        assert!(!config.matches("DOG"));
        assert!(!config.matches("123"));
    }

    #[test]
    fn test_require_all_classes() {
        let all = ClassFlags {
            upper: true,
            lower: true,
            digit: true,
            special: true,
        };
        let config = FilterConfig::builder().require(all).build().unwrap();

        assert!(config.matches("Passw0rd!"));
        assert!(!config.matches("Passw0rd"));
        assert!(!config.matches("passw0rd!"));
        assert!(!config.matches("Password!"));
    }

    #[test]
    fn test_prohibitions() {
        let no_upper = FilterConfig::builder()
            .forbid(ClassFlags {
                upper: true,
                ..ClassFlags::default()
            })
            .build()
            .unwrap();
        assert!(no_upper.matches("lower123"));
        assert!(!no_upper.matches("lowerX"));

        let no_special = FilterConfig::builder()
            .forbid(ClassFlags {
                special: true,
                ..ClassFlags::default()
            })
            .build()
            .unwrap();
        assert!(no_special.matches("äbc123"));
        assert!(!no_special.matches("abc-123"));
        assert!(!no_special.matches("two words"));
    }

    #[test]
    fn test_special_is_non_alphanumeric() {
        assert!(CharClass::Special.contains('!'));
        assert!(CharClass::Special.contains(' '));
        assert!(!CharClass::Special.contains('é'));
        assert!(!CharClass::Special.contains('7'));
        assert!(CharClass::Upper.contains('Ä'));
        assert!(CharClass::Lower.contains('ß'));
    }

    #[test]
    fn test_digit_is_decimal_only() {
        for c in ['½', 'Ⅻ', '²', '٣'] {
            assert!(!CharClass::Digit.contains(c), "{c:?}");
        }
        // Every character lands in exactly one of alphabetic, digit, special
        assert!(CharClass::Special.contains('½'));
        assert!(CharClass::Special.contains('٣'));
        assert!(!CharClass::Special.contains('Ⅻ'));

        let require_digit = FilterConfig::builder()
            .require(ClassFlags {
                digit: true,
                ..ClassFlags::default()
            })
            .build()
            .unwrap();
        assert!(require_digit.matches("a1"));
        assert!(!require_digit.matches("a½"));
        assert!(!require_digit.matches("aⅫ"));
        assert!(!require_digit.matches("a٣"));

        let no_digit = FilterConfig::builder()
            .forbid(ClassFlags {
                digit: true,
                ..ClassFlags::default()
            })
            .build()
            .unwrap();
        assert!(no_digit.matches("a½"));
        assert!(!no_digit.matches("a7"));
    }

    #[test]
    fn test_full_match_include() {
        let config = FilterConfig::builder().include(Some("[a-z]+")).build().unwrap();

        assert!(config.matches("abc"));
        assert!(!config.matches("abc1"));
        assert!(!config.matches("1abc"));
    }

    #[test]
    fn test_full_match_exclude() {
        let config = FilterConfig::builder().exclude(Some(r"\d+")).build().unwrap();

        assert!(config.matches("abc"));
        assert!(!config.matches("123"));
        assert!(config.matches("a1b"));
    }

    #[test]
    fn test_alternation_is_fully_anchored() {
        let pattern = FullMatch::new("cat|dog").unwrap();

        assert!(pattern.matches("cat"));
        assert!(pattern.matches("dog"));
        assert!(!pattern.matches("cats"));
        assert!(!pattern.matches("hotdog"));
        assert_eq!(pattern.as_str(), "cat|dog");
    }

    #[test]
    fn test_invalid_pattern() {
        let result = FilterConfig::builder().include(Some("[a-z")).build();
        assert!(matches!(result, Err(FilterError::InvalidPattern { .. })));
        assert!(FullMatch::new("(unclosed").is_err());
        assert!(FullMatch::new("a)(b").is_err());
        assert!(FullMatch::new(r"^\w+$").is_ok());
    }

    #[test]
    fn test_invalid_bounds() {
        let result = FilterConfig::builder().min_len(Some(9)).max_len(Some(3)).build();
        assert!(matches!(result, Err(FilterError::InvalidBounds { min: 9, max: 3 })));
    }

    #[test]
    fn test_empty_pattern_is_ignored() {
        let config = FilterConfig::builder().include(Some("")).build().unwrap();
        assert!(config.include().is_none());
        assert!(!config.has_filters());
    }

    #[test]
    fn test_whitelist_dominates_every_rule() {
        let config = FilterConfig::builder()
            .min_len(Some(10))
            .require(lower_required())
            .include(Some("x+"))
            .build()
            .unwrap();
        let whitelist: WordSet = ["AB"].into_iter().collect();
        let blacklist: WordSet = ["AB"].into_iter().collect();

        assert!(accept("AB", &config, &blacklist, &whitelist));
        assert!(!accept("CD", &config, &blacklist, &whitelist));
    }

    #[test]
    fn test_blacklist_dominates_rules() {
        let config = FilterConfig::default();
        let blacklist: WordSet = ["bad"].into_iter().collect();

        assert!(accept("good", &config, &blacklist, &empty()));
        assert!(!accept("bad", &config, &blacklist, &empty()));
        assert!(accept("bad2", &config, &blacklist, &empty()));
    }

    #[test]
    fn test_no_rules_accepts_everything() {
        let config = FilterConfig::default();

        assert!(accept("anything", &config, &empty(), &empty()));
        assert!(accept("  ", &config, &empty(), &empty()));
    }
}
