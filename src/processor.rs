//! Core processing engine
//!
//! Resolves inputs, opens the output sink and drives the filter pipeline over
//! every source in order.

use crate::cli::Args;
use crate::encoding::LineReader;
use crate::filter::FilterConfig;
use crate::lists::WordSet;
use crate::output::OutputWriter;
use crate::pipeline::Pipeline;
use crate::progress::{
    create_spinner, print_header, print_info, print_success, print_warning, ProcessingStats,
};

use anyhow::Context;
use indicatif::ProgressBar;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Path that stands for standard input
const STDIN_PATH: &str = "-";

/// One resolved input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    Stdin,
    File(PathBuf),
}

/// Run options that do not affect which words survive
#[derive(Debug, Clone, Default)]
pub struct ProcessorConfig {
    pub output: Option<PathBuf>,
    pub recursive: bool,
    pub extensions: Vec<String>,
    pub progress: bool,
    pub stats: bool,
    pub quiet: bool,
    pub verbose: bool,
}

impl ProcessorConfig {
    pub fn from_args(args: &Args) -> Self {
        Self {
            output: args.output.clone(),
            recursive: args.recursive,
            extensions: args.get_extensions(),
            progress: args.progress && !args.quiet,
            stats: args.stats && !args.quiet,
            quiet: args.quiet,
            verbose: args.verbose,
        }
    }
}

/// Main processor
pub struct Processor {
    filter: FilterConfig,
    blacklist: WordSet,
    whitelist: WordSet,
    config: ProcessorConfig,
}

impl Processor {
    pub fn new(filter: FilterConfig, blacklist: WordSet, whitelist: WordSet, config: ProcessorConfig) -> Self {
        Self {
            filter,
            blacklist,
            whitelist,
            config,
        }
    }

    /// Build the filter configuration and load both override lists
    ///
    /// Every configuration error surfaces here, before any output exists.
    pub fn from_args(args: &Args) -> anyhow::Result<Self> {
        let filter = args.filter_config()?;
        let list_encoding = filter.encoding().fallback();

        let blacklist = WordSet::load_optional(args.blacklist.as_deref(), list_encoding)
            .context("Failed to load blacklist")?;
        let whitelist = WordSet::load_optional(args.whitelist.as_deref(), list_encoding)
            .context("Failed to load whitelist")?;

        if !filter.has_filters() && blacklist.is_empty() && whitelist.is_empty() && !filter.dedupe() {
            log::info!("No rules configured, non-blank lines pass through unchanged");
        }

        Ok(Self::new(filter, blacklist, whitelist, ProcessorConfig::from_args(args)))
    }

    pub fn filter(&self) -> &FilterConfig {
        &self.filter
    }

    pub fn blacklist(&self) -> &WordSet {
        &self.blacklist
    }

    pub fn whitelist(&self) -> &WordSet {
        &self.whitelist
    }

    /// Filter `inputs` (stdin when empty) into the configured output
    pub fn process(&self, inputs: &[PathBuf]) -> anyhow::Result<ProcessingStats> {
        let sources = self.collect_sources(inputs)?;
        let output_encoding = self.filter.encoding().fallback();

        // Opened before the scan; closed by Drop on every exit path
        let mut sink = match self.config.output {
            Some(ref path) => OutputWriter::create(path, output_encoding)
                .with_context(|| format!("Failed to open output {:?}", path))?,
            None => OutputWriter::stdout(output_encoding),
        };

        if self.config.verbose {
            print_header("Filtering...");
            print_info(&format!("Sources: {}", sources.len()));
            print_info(&format!("Output:  {:?}", sink.path()));
        }

        let mut pipeline = Pipeline::new(&self.filter, &self.blacklist, &self.whitelist);
        let mut stats = ProcessingStats::new();
        let spinner = create_spinner("Scanning...", self.config.progress);

        for source in &sources {
            stats.add_file();
            self.process_source(source, &mut pipeline, &mut sink, &mut stats, &spinner)?;
        }

        sink.flush().context("Failed to flush output")?;
        spinner.finish_and_clear();

        if let Some(seen) = pipeline.seen() {
            log::debug!("{} unique words, {} duplicates dropped", seen.len(), stats.duplicate_lines);
        }

        if self.config.stats {
            stats.print_summary();
        }

        if self.config.verbose {
            print_success(&format!("{} words written to {:?}", sink.lines_written(), sink.path()));
        }

        Ok(stats)
    }

    fn process_source(
        &self,
        source: &InputSource,
        pipeline: &mut Pipeline<'_>,
        sink: &mut OutputWriter,
        stats: &mut ProcessingStats,
        spinner: &ProgressBar,
    ) -> anyhow::Result<()> {
        match source {
            InputSource::Stdin => {
                log::debug!("Reading standard input");
                let reader = LineReader::new(io::stdin().lock(), self.filter.encoding().fallback(), "<stdin>");
                pipeline
                    .run(reader.inspect(|_| spinner.inc(1)), sink, stats)
                    .context("Failed while filtering standard input")
            }
            InputSource::File(path) => {
                log::debug!("Reading {:?}", path);
                spinner.set_message(format!("{:?}", path.file_name().unwrap_or_default()));

                let encoding = self.filter.encoding().for_file(path)?;
                let reader = LineReader::open(path, encoding)?;
                pipeline
                    .run(reader.inspect(|_| spinner.inc(1)), sink, stats)
                    .with_context(|| format!("Failed while filtering {:?}", path))
            }
        }
    }

    /// Resolve input paths into an ordered list of sources
    ///
    /// Directories expand to their matching files sorted by path. A path
    /// that does not exist fails the whole run before anything is written.
    pub fn collect_sources(&self, inputs: &[PathBuf]) -> anyhow::Result<Vec<InputSource>> {
        if inputs.is_empty() {
            return Ok(vec![InputSource::Stdin]);
        }

        let mut sources = Vec::new();

        for input in inputs {
            if input.as_os_str() == STDIN_PATH {
                sources.push(InputSource::Stdin);
            } else if input.is_file() {
                sources.push(InputSource::File(input.clone()));
            } else if input.is_dir() {
                let files = self.collect_dir(input)?;
                if files.is_empty() && !self.config.quiet {
                    print_warning(&format!("No matching files in {:?}", input));
                }
                sources.extend(files.into_iter().map(InputSource::File));
            } else {
                anyhow::bail!("Input path does not exist: {:?}", input);
            }
        }

        Ok(sources)
    }

    fn collect_dir(&self, dir: &Path) -> anyhow::Result<Vec<PathBuf>> {
        let walker = if self.config.recursive {
            WalkDir::new(dir)
        } else {
            WalkDir::new(dir).max_depth(1)
        };

        let mut files = Vec::new();
        for entry in walker.sort_by_file_name() {
            let entry = entry.with_context(|| format!("Failed to read directory {:?}", dir))?;
            let path = entry.path();

            if entry.file_type().is_file() && self.wants_extension(path) {
                files.push(path.to_path_buf());
            }
        }

        Ok(files)
    }

    fn wants_extension(&self, path: &Path) -> bool {
        if self.config.extensions.iter().any(|ext| ext == "*") {
            return true;
        }

        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| self.config.extensions.contains(&ext.to_lowercase()))
    }
}
