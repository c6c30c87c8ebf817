//! Progress display module
//!
//! Styled status messages, the optional scan spinner and run statistics.
//! Everything here writes to stderr; stdout carries the filtered words.

use bytesize::ByteSize;
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::{Duration, Instant};

/// Print a section header
pub fn print_header(text: &str) {
    eprintln!("\n{} {}", "▶".green(), text.green().bold());
}

/// Print an info message
pub fn print_info(text: &str) {
    eprintln!("  {} {}", "ℹ".cyan(), text);
}

/// Print a success message
pub fn print_success(text: &str) {
    eprintln!("  {} {}", "✔".green(), text.green());
}

/// Print a warning message
pub fn print_warning(text: &str) {
    eprintln!("  {} {}", "⚠".yellow(), text.yellow());
}

/// Print an error message
pub fn print_error(text: &str) {
    eprintln!("  {} {}", "✖".red(), text.red());
}

/// Create a styled spinner for the line scan
///
/// Hidden unless `visible`, so callers can tick it unconditionally.
pub fn create_spinner(msg: &str, visible: bool) -> ProgressBar {
    if !visible {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new_spinner();

    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {pos} lines ({per_sec}) {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ "),
    );

    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));

    pb
}

/// Counters for one filtering run
#[derive(Debug)]
pub struct ProcessingStats {
    pub files: u64,
    pub bytes_read: u64,
    pub total_lines: u64,
    pub blank_lines: u64,
    pub rejected_lines: u64,
    pub duplicate_lines: u64,
    pub emitted_lines: u64,
    pub start_time: Instant,
}

impl ProcessingStats {
    pub fn new() -> Self {
        Self {
            files: 0,
            bytes_read: 0,
            total_lines: 0,
            blank_lines: 0,
            rejected_lines: 0,
            duplicate_lines: 0,
            emitted_lines: 0,
            start_time: Instant::now(),
        }
    }

    pub fn add_file(&mut self) {
        self.files += 1;
    }

    /// Count a line of `bytes` decoded bytes
    pub fn add_line(&mut self, bytes: u64) {
        self.total_lines += 1;
        self.bytes_read += bytes;
    }

    pub fn add_blank(&mut self) {
        self.blank_lines += 1;
    }

    pub fn add_rejected(&mut self) {
        self.rejected_lines += 1;
    }

    pub fn add_duplicate(&mut self) {
        self.duplicate_lines += 1;
    }

    pub fn add_emitted(&mut self) {
        self.emitted_lines += 1;
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    pub fn lines_per_second(&self) -> f64 {
        let elapsed = self.elapsed().as_secs_f64();
        if elapsed > 0.0 {
            self.total_lines as f64 / elapsed
        } else {
            0.0
        }
    }

    /// Print final statistics
    pub fn print_summary(&self) {
        eprintln!();
        eprintln!("{}", "═".repeat(60).green());
        eprintln!("{}", "                    FILTERING COMPLETE".green().bold());
        eprintln!("{}", "═".repeat(60).green());
        eprintln!();

        eprintln!("  {} {}", "Sources read:   ".green(), self.files);
        eprintln!("  {} {}", "Data read:      ".green(), ByteSize(self.bytes_read));
        eprintln!();

        eprintln!("  {} {}", "Total lines:    ".green(), format_number(self.total_lines));
        eprintln!("  {} {}", "Blank lines:    ".green(), format_number(self.blank_lines));
        eprintln!("  {} {}", "Rejected:       ".yellow(), format_number(self.rejected_lines));
        eprintln!("  {} {}", "Duplicates:     ".yellow(), format_number(self.duplicate_lines));
        eprintln!(
            "  {} {}",
            "Emitted:        ".green().bold(),
            format_number(self.emitted_lines).green().bold()
        );

        eprintln!();
        eprintln!("  {} {}", "Duration:       ".green(), format_duration(self.elapsed()));
        eprintln!("  {} {:.2} lines/sec", "Throughput:     ".green(), self.lines_per_second());
        eprintln!();
        eprintln!("{}", "═".repeat(60).green());
    }
}

impl Default for ProcessingStats {
    fn default() -> Self {
        Self::new()
    }
}

/// Format a number with thousand separators
fn format_number(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::new();
    let chars: Vec<char> = s.chars().collect();

    for (i, c) in chars.iter().enumerate() {
        if i > 0 && (chars.len() - i) % 3 == 0 {
            result.push(',');
        }
        result.push(*c);
    }

    result
}

/// Format duration as human-readable string
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();

    if secs < 60 {
        format!("{:.1}s", duration.as_secs_f64())
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m", secs / 3600, (secs % 3600) / 60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(123), "123");
        assert_eq!(format_number(1234), "1,234");
        assert_eq!(format_number(1234567), "1,234,567");
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::from_secs(30)), "30.0s");
        assert_eq!(format_duration(Duration::from_secs(90)), "1m 30s");
        assert_eq!(format_duration(Duration::from_secs(3661)), "1h 1m");
    }

    #[test]
    fn test_stats() {
        let mut stats = ProcessingStats::new();

        stats.add_file();
        stats.add_line(4);
        stats.add_line(6);
        stats.add_blank();
        stats.add_emitted();

        assert_eq!(stats.files, 1);
        assert_eq!(stats.total_lines, 2);
        assert_eq!(stats.bytes_read, 10);
        assert_eq!(stats.blank_lines, 1);
        assert_eq!(stats.emitted_lines, 1);
    }

    #[test]
    fn test_hidden_spinner() {
        let pb = create_spinner("Scanning", false);
        assert!(pb.is_hidden());
    }
}
