//! Wordlist Cut - declarative wordlist filtering
//!
//! Main entry point for the command-line application.

use clap::Parser;
use std::process;

use wordlist_cut::cli::Args;
use wordlist_cut::processor::Processor;
use wordlist_cut::progress::{print_error, print_header, print_info};

fn main() {
    // Parse command-line arguments
    let args = Args::parse();

    // Set up logging; RUST_LOG still wins when set
    let level = if args.verbose {
        "debug"
    } else if args.quiet {
        "error"
    } else {
        "warn"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    if let Err(e) = run(args) {
        print_error(&format!("{}", e));

        // Print chain of errors
        for cause in e.chain().skip(1) {
            print_error(&format!("  Caused by: {}", cause));
        }

        process::exit(1);
    }
}

fn run(args: Args) -> anyhow::Result<()> {
    // Every configuration error surfaces here, before any output exists
    let processor = Processor::from_args(&args)?;

    if args.verbose {
        print_config(&args, &processor);
    }

    processor.process(&args.input)?;

    Ok(())
}

/// Print configuration summary
fn print_config(args: &Args, processor: &Processor) {
    let filter = processor.filter();

    print_header("Configuration");

    if args.input.is_empty() {
        print_info("Input:        <stdin>");
    } else {
        print_info(&format!("Input:        {:?}", args.input));
    }

    match args.output {
        Some(ref path) => print_info(&format!("Output:       {:?}", path)),
        None => print_info("Output:       <stdout>"),
    }

    print_info(&format!("Length:       {:?}..={:?}", filter.min_len(), filter.max_len()));
    print_info(&format!("Require:      {:?}", filter.require()));
    print_info(&format!("Forbid:       {:?}", filter.forbid()));

    if let Some(pattern) = filter.include() {
        print_info(&format!("Match:        {}", pattern.as_str()));
    }

    if let Some(pattern) = filter.exclude() {
        print_info(&format!("Exclude:      {}", pattern.as_str()));
    }

    print_info(&format!("Whitelist:    {} words", processor.whitelist().len()));
    print_info(&format!("Blacklist:    {} words", processor.blacklist().len()));
    print_info(&format!("Dedupe:       {}", filter.dedupe()));
    print_info(&format!("Strip:        {}", filter.strip()));
    print_info(&format!("Encoding:     {}", filter.encoding().name()));
}
