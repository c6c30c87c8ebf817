//! # Wordlist Cut
//!
//! Declarative wordlist filtering for password lists and lexicon cleanup.
//!
//! ## Features
//!
//! - **Override lists**: whitelist (always keep) and blacklist (always drop)
//! - **Length bounds**: inclusive min/max, counted in characters
//! - **Character classes**: require or forbid uppercase, lowercase, digits, specials
//! - **Regex patterns**: full-string include and exclude patterns
//! - **Deduplication**: first occurrence wins, input order preserved
//! - **Encodings**: any WHATWG label, or per-file detection
//!
//! ## Usage
//!
//! ```bash
//! # 8-12 characters with at least one digit
//! wordlist-cut -i wordlist.txt --min-len 8 --max-len 12 --require-digit
//!
//! # Lowercase-only words, deduplicated
//! wordlist-cut -i wordlist.txt --match '[a-z]+' --dedupe -o clean.txt
//! ```
//!
//! ## Example
//!
//! ```rust
//! use wordlist_cut::filter::{ClassFlags, FilterConfig};
//! use wordlist_cut::lists::WordSet;
//! use wordlist_cut::pipeline::filter_lines;
//!
//! let config = FilterConfig::builder()
//!     .require(ClassFlags { lower: true, ..ClassFlags::default() })
//!     .dedupe(true)
//!     .build()
//!     .unwrap();
//!
//! let out = filter_lines(["cat", "Dog", "123", "cat"], &config, &WordSet::new(), &WordSet::new());
//! assert_eq!(out, vec!["cat", "Dog"]);
//! ```

pub mod cli;
pub mod dedup;
pub mod encoding;
pub mod error;
pub mod filter;
pub mod lists;
pub mod output;
pub mod pipeline;
pub mod processor;
pub mod progress;

pub use cli::Args;
pub use error::FilterError;
pub use filter::{accept, FilterConfig};
pub use lists::WordSet;
pub use pipeline::Pipeline;
pub use processor::{Processor, ProcessorConfig};
