//! Command-line interface definition for wordlist-cut
//!
//! Provides argument parsing and resolution of the arguments into an
//! immutable [`FilterConfig`].

use crate::encoding::TextEncoding;
use crate::error::Result;
use crate::filter::{ClassFlags, FilterConfig};
use clap::Parser;
use std::path::PathBuf;

/// Declarative wordlist filter
///
/// Filter wordlists by length, character classes, regex patterns and
/// exact-match lists, with optional deduplication.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "wordlist-cut",
    author = "m0h1nd4",
    version,
    about = "Declarative wordlist filter: length, character classes, regex, allow/deny lists, dedupe",
    long_about = r#"
Read words (one per line) from files or stdin, keep the ones that pass every
configured rule and write them, in input order, to a file or stdout.

Rules are checked in this order; the first one that applies decides:
    1. --whitelist   listed words are always kept
    2. --blacklist   listed words are always dropped
    3. --min-len / --max-len (characters, inclusive)
    4. --require-upper / --require-lower / --require-digit / --require-special
    5. --no-upper / --no-lower / --no-digit / --no-special
    6. --match       the whole word must match
    7. --exclude     words that match as a whole are dropped
Blank lines are always dropped. --dedupe keeps only the first occurrence.

EXAMPLES:
    # Passwords of 8 to 12 characters with at least one digit
    wordlist-cut -i rockyou.txt --min-len 8 --max-len 12 --require-digit

    # Lowercase-only words, deduplicated, from stdin
    cat words.txt | wordlist-cut --match '[a-z]+' --dedupe

    # Drop purely numeric entries and a custom deny list
    wordlist-cut -i list.txt --exclude '\d+' --blacklist deny.txt -o clean.txt

    # Every .txt file under a directory, latin1 encoded
    wordlist-cut -i /wordlists/ --recursive --encoding latin1 --dedupe
"#,
    after_help = "For more information, visit: https://github.com/m0h1nd4/wordlist-cut"
)]
pub struct Args {
    /// Input files or directories, read in order (default: stdin; "-" also means stdin)
    #[arg(short, long, value_name = "PATH", num_args = 1..)]
    pub input: Vec<PathBuf>,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Minimum word length in characters (inclusive)
    #[arg(long, value_name = "N")]
    pub min_len: Option<usize>,

    /// Maximum word length in characters (inclusive)
    #[arg(long, value_name = "N")]
    pub max_len: Option<usize>,

    /// Require at least one uppercase character
    #[arg(long, default_value_t = false)]
    pub require_upper: bool,

    /// Require at least one lowercase character
    #[arg(long, default_value_t = false)]
    pub require_lower: bool,

    /// Require at least one digit
    #[arg(long, default_value_t = false)]
    pub require_digit: bool,

    /// Require at least one special (non-alphanumeric) character
    #[arg(long, default_value_t = false)]
    pub require_special: bool,

    /// Reject words containing an uppercase character
    #[arg(long, default_value_t = false)]
    pub no_upper: bool,

    /// Reject words containing a lowercase character
    #[arg(long, default_value_t = false)]
    pub no_lower: bool,

    /// Reject words containing a digit
    #[arg(long, default_value_t = false)]
    pub no_digit: bool,

    /// Reject words containing a special (non-alphanumeric) character
    #[arg(long, default_value_t = false)]
    pub no_special: bool,

    /// Keep only words that fully match this regex
    #[arg(short = 'm', long = "match", value_name = "REGEX")]
    pub pattern: Option<String>,

    /// Drop words that fully match this regex
    #[arg(short = 'x', long, value_name = "REGEX")]
    pub exclude: Option<String>,

    /// File of words to always drop
    #[arg(long, value_name = "FILE")]
    pub blacklist: Option<PathBuf>,

    /// File of words to always keep
    #[arg(long, value_name = "FILE")]
    pub whitelist: Option<PathBuf>,

    /// Emit only the first occurrence of each word
    #[arg(short, long, default_value_t = false)]
    pub dedupe: bool,

    /// Strip trailing CR/LF before evaluating words (default)
    #[arg(long, default_value_t = false, overrides_with = "no_strip")]
    pub strip: bool,

    /// Keep trailing CR/LF as part of each word
    #[arg(long, default_value_t = false, overrides_with = "strip")]
    pub no_strip: bool,

    /// Text encoding for all file I/O ("auto" detects per input file)
    #[arg(short, long, value_name = "LABEL", default_value = "utf-8")]
    pub encoding: String,

    /// Descend into subdirectories of directory inputs
    #[arg(short, long, default_value_t = false)]
    pub recursive: bool,

    /// File extensions read from directory inputs ("*" for all)
    #[arg(long, value_name = "EXT", default_value = "txt")]
    pub extensions: String,

    /// Print a summary to stderr when done
    #[arg(long, default_value_t = false)]
    pub stats: bool,

    /// Show a spinner on stderr while scanning
    #[arg(long, default_value_t = false)]
    pub progress: bool,

    /// Quiet mode - errors only
    #[arg(short, long, default_value_t = false)]
    pub quiet: bool,

    /// Verbose mode - detailed logging
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

impl Args {
    /// Whether line terminators are stripped; `--no-strip` unless overridden by a later `--strip`
    pub fn strip(&self) -> bool {
        !self.no_strip
    }

    pub fn required_classes(&self) -> ClassFlags {
        ClassFlags {
            upper: self.require_upper,
            lower: self.require_lower,
            digit: self.require_digit,
            special: self.require_special,
        }
    }

    pub fn forbidden_classes(&self) -> ClassFlags {
        ClassFlags {
            upper: self.no_upper,
            lower: self.no_lower,
            digit: self.no_digit,
            special: self.no_special,
        }
    }

    pub fn text_encoding(&self) -> Result<TextEncoding> {
        TextEncoding::from_label(&self.encoding)
    }

    /// Resolve the arguments into the immutable filter configuration
    ///
    /// Compiles both patterns and validates bounds and encoding.
    pub fn filter_config(&self) -> Result<FilterConfig> {
        FilterConfig::builder()
            .min_len(self.min_len)
            .max_len(self.max_len)
            .require(self.required_classes())
            .forbid(self.forbidden_classes())
            .include(self.pattern.as_deref())
            .exclude(self.exclude.as_deref())
            .dedupe(self.dedupe)
            .strip(self.strip())
            .encoding(self.text_encoding()?)
            .build()
    }

    /// Parse file extensions to read from directories
    pub fn get_extensions(&self) -> Vec<String> {
        self.extensions
            .split(',')
            .map(|s| s.trim().trim_start_matches('.').to_lowercase())
            .filter(|s| !s.is_empty())
            .collect()
    }
}
