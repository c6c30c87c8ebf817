//! Output management module
//!
//! Accepted words go to a [`WordSink`]. The real sink is an [`OutputWriter`]
//! over a file or stdout; tests collect into a `Vec<String>`.

use crate::encoding::encode_text;
use crate::error::{FilterError, Result};
use encoding_rs::Encoding;
use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Default buffer size for output writing (1MB)
const DEFAULT_BUFFER_SIZE: usize = 1024 * 1024;

/// Destination for accepted words, one per line
pub trait WordSink {
    fn write_word(&mut self, word: &str) -> Result<()>;
}

impl WordSink for Vec<String> {
    fn write_word(&mut self, word: &str) -> Result<()> {
        self.push(word.to_string());
        Ok(())
    }
}

/// Buffered, encoding-aware line writer
///
/// The underlying handle is flushed and closed when the writer is dropped,
/// including on early returns after a failed write.
pub struct OutputWriter {
    writer: BufWriter<Box<dyn Write>>,
    path: PathBuf,
    encoding: &'static Encoding,
    lines_written: u64,
}

impl OutputWriter {
    /// Create (or truncate) an output file
    pub fn create(path: &Path, encoding: &'static Encoding) -> Result<Self> {
        let file: File = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)
            .map_err(|e| FilterError::Io {
                path: path.to_path_buf(),
                source: e,
            })?;

        Ok(Self::from_writer(Box::new(file), path, encoding))
    }

    /// Write to standard output
    pub fn stdout(encoding: &'static Encoding) -> Self {
        Self::from_writer(Box::new(io::stdout().lock()), Path::new("<stdout>"), encoding)
    }

    pub fn from_writer(inner: Box<dyn Write>, path: &Path, encoding: &'static Encoding) -> Self {
        Self {
            writer: BufWriter::with_capacity(DEFAULT_BUFFER_SIZE, inner),
            path: path.to_path_buf(),
            encoding,
            lines_written: 0,
        }
    }

    /// Write a line to the output
    ///
    /// A line that already ends in `\n` (unstripped input) gets no second
    /// terminator.
    pub fn write_line(&mut self, line: &str) -> Result<()> {
        let bytes = encode_text(line, self.encoding);
        self.write_raw(&bytes)?;
        if !line.ends_with('\n') {
            self.write_raw(b"\n")?;
        }
        self.lines_written += 1;
        Ok(())
    }

    fn write_raw(&mut self, bytes: &[u8]) -> Result<()> {
        self.writer.write_all(bytes).map_err(|e| self.error(e))
    }

    /// Flush the buffer to the underlying handle
    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush().map_err(|e| self.error(e))
    }

    fn error(&self, source: io::Error) -> FilterError {
        FilterError::Io {
            path: self.path.clone(),
            source,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn lines_written(&self) -> u64 {
        self.lines_written
    }
}

impl WordSink for OutputWriter {
    fn write_word(&mut self, word: &str) -> Result<()> {
        self.write_line(word)
    }
}

impl Drop for OutputWriter {
    fn drop(&mut self) {
        if let Err(e) = self.writer.flush() {
            log::warn!("Failed to flush {:?}: {}", self.path, e);
        }
    }
}
