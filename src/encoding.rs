//! Encoding resolution, detection and transcoding module
//!
//! Every input is decoded to UTF-8 before filtering and every emitted word is
//! encoded back with the configured encoding.

use crate::error::{FilterError, Result};
use chardetng::EncodingDetector;
use encoding_rs::Encoding;
use encoding_rs_io::{DecodeReaderBytes, DecodeReaderBytesBuilder};
use std::borrow::Cow;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::{Path, PathBuf};

/// Label that asks for per-file detection instead of a fixed encoding
pub const AUTO_LABEL: &str = "auto";

/// Read buffer size for line readers
const READ_BUFFER_SIZE: usize = 64 * 1024;

/// Encoding selected with `--encoding`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEncoding {
    /// A fixed encoding used for every file and the output
    Fixed(&'static Encoding),
    /// Detect each input file's encoding; UTF-8 everywhere else
    Auto,
}

impl TextEncoding {
    /// Resolve a WHATWG encoding label (`utf-8`, `latin1`, `utf-16le`, ...) or `auto`
    pub fn from_label(label: &str) -> Result<Self> {
        let label = label.trim();
        if label.eq_ignore_ascii_case(AUTO_LABEL) {
            return Ok(Self::Auto);
        }
        Encoding::for_label(label.as_bytes())
            .map(Self::Fixed)
            .ok_or_else(|| FilterError::UnknownEncoding(label.to_string()))
    }

    /// Encoding for sources that are not sniffed (stdin, list files)
    pub fn fallback(&self) -> &'static Encoding {
        match self {
            Self::Fixed(encoding) => *encoding,
            Self::Auto => encoding_rs::UTF_8,
        }
    }

    /// Encoding used for a specific input file
    pub fn for_file(&self, path: &Path) -> Result<&'static Encoding> {
        match self {
            Self::Fixed(encoding) => Ok(*encoding),
            Self::Auto => {
                let info = detect_encoding(path)?;
                log::debug!(
                    "Detected {} for {:?} (confidence {:.1})",
                    info.name,
                    path,
                    info.confidence
                );
                Ok(info.encoding)
            }
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Fixed(encoding) => encoding.name(),
            Self::Auto => AUTO_LABEL,
        }
    }
}

impl Default for TextEncoding {
    fn default() -> Self {
        Self::Fixed(encoding_rs::UTF_8)
    }
}

/// Result of encoding detection
#[derive(Debug, Clone)]
pub struct EncodingInfo {
    /// Detected encoding name
    pub name: &'static str,
    /// Confidence level (0.0 - 1.0)
    pub confidence: f32,
    /// The encoding_rs Encoding reference
    pub encoding: &'static Encoding,
}

impl Default for EncodingInfo {
    fn default() -> Self {
        Self {
            name: "UTF-8",
            confidence: 1.0,
            encoding: encoding_rs::UTF_8,
        }
    }
}

/// Detect the encoding of a file by sampling its content
pub fn detect_encoding(path: &Path) -> Result<EncodingInfo> {
    let mut file = File::open(path).map_err(|e| FilterError::io(path, e))?;

    // First 64KB is enough to decide
    let mut sample = vec![0u8; READ_BUFFER_SIZE];
    let bytes_read = file.read(&mut sample).map_err(|e| FilterError::io(path, e))?;
    sample.truncate(bytes_read);

    if bytes_read == 0 {
        return Ok(EncodingInfo::default());
    }

    if let Some(encoding) = detect_bom(&sample) {
        return Ok(EncodingInfo {
            name: encoding.name(),
            confidence: 1.0,
            encoding,
        });
    }

    if std::str::from_utf8(&sample).is_ok() {
        return Ok(EncodingInfo::default());
    }

    let mut detector = EncodingDetector::new();
    detector.feed(&sample, true);
    let encoding = detector.guess(None, true);

    let confidence = if encoding == encoding_rs::UTF_8 { 0.5 } else { 0.8 };

    Ok(EncodingInfo {
        name: encoding.name(),
        confidence,
        encoding,
    })
}

/// Detect BOM (Byte Order Mark) at the start of content
fn detect_bom(content: &[u8]) -> Option<&'static Encoding> {
    Encoding::for_bom(content).map(|(encoding, _)| encoding)
}

/// Line reader that decodes its source to UTF-8.
///
/// Lines are yielded raw, terminators included; stripping is up to the
/// caller. Invalid sequences become U+FFFD instead of failing the read.
pub struct LineReader<R: Read> {
    reader: BufReader<DecodeReaderBytes<R, Vec<u8>>>,
    origin: PathBuf,
    line_buffer: String,
}

impl<R: Read> LineReader<R> {
    /// Wrap a byte source; `origin` names it in error messages
    pub fn new(inner: R, encoding: &'static Encoding, origin: impl Into<PathBuf>) -> Self {
        let decoder = DecodeReaderBytesBuilder::new()
            .encoding(Some(encoding))
            .bom_override(true)
            .strip_bom(true)
            .build(inner);

        Self {
            reader: BufReader::with_capacity(READ_BUFFER_SIZE, decoder),
            origin: origin.into(),
            line_buffer: String::with_capacity(256),
        }
    }
}

impl LineReader<File> {
    /// Open a file for line reading
    pub fn open(path: &Path, encoding: &'static Encoding) -> Result<Self> {
        let file = File::open(path).map_err(|e| FilterError::io(path, e))?;
        Ok(Self::new(file, encoding, path))
    }
}

impl<R: Read> Iterator for LineReader<R> {
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        self.line_buffer.clear();

        match self.reader.read_line(&mut self.line_buffer) {
            Ok(0) => None,
            Ok(_) => {
                if self.line_buffer.contains(char::REPLACEMENT_CHARACTER) {
                    log::warn!("Invalid byte sequence in {:?}, replaced", self.origin);
                }
                Some(Ok(self.line_buffer.clone()))
            }
            Err(e) => Some(Err(FilterError::io(self.origin.clone(), e))),
        }
    }
}

/// Strip trailing line terminators (`\n` and `\r`)
#[inline]
pub fn strip_terminators(line: &str) -> &str {
    line.trim_end_matches(&['\n', '\r'][..])
}

/// Encode a UTF-8 string for output
///
/// Characters the target cannot represent are written as numeric character
/// references. UTF-16 targets are written as UTF-8.
pub fn encode_text<'a>(text: &'a str, encoding: &'static Encoding) -> Cow<'a, [u8]> {
    if encoding == encoding_rs::UTF_8 {
        return Cow::Borrowed(text.as_bytes());
    }

    let (encoded, _, had_errors) = encoding.encode(text);
    if had_errors {
        log::warn!("Unmappable characters in {:?} for {}", text, encoding.name());
    }
    encoded
}
