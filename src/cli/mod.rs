//! Command-line interface for boxcount
//!
//! A single command: read a file of targets, count the minimum boxes for
//! each line in parallel, and print the grand total.

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::time::Instant;

pub mod output;

pub use output::{Output, OutputFormat};

use crate::config::BoxConfig;
use crate::pipeline;

/// Count the minimum number of boxes (sizes 5, 16, 42, 59) for every line of a file
#[derive(Parser, Debug)]
#[command(
    name = crate::PKG_NAME,
    version = crate::VERSION,
    about = "Count the minimum number of boxes (sizes 5, 16, 42, 59) for every line of a file",
    long_about = "Reads one non-negative integer per line, finds the fewest boxes of sizes \
                  5, 16, 42 and 59 that add up to exactly that number, and prints the total \
                  across all lines. Any invalid or unpackable line aborts the run."
)]
pub struct Cli {
    /// Text file with one non-negative integer per line (blank lines are ignored)
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Number of worker threads (0 = one per CPU core)
    #[arg(short, long, value_name = "N")]
    pub workers: Option<usize>,

    /// Capacity of the job and result queues
    #[arg(long, value_name = "N")]
    pub queue_capacity: Option<usize>,

    /// Use custom configuration file (TOML)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Output format for the total
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Increase verbosity (can be repeated)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        setup_logging(self.verbose, self.quiet);

        let output = Output::new(self.verbose > 0, self.quiet);
        let config = BoxConfig::load_with_overrides(self.config.as_deref(), self.cli_overrides())?;

        output.verbose(&format!("Reading {}", self.input.display()));
        let start_time = Instant::now();

        let summary = pipeline::run_file(&self.input, &config.pipeline)?;

        output.success(&format!(
            "Packed {} lines with {} workers in {:.2}s",
            summary.lines,
            summary.workers,
            start_time.elapsed().as_secs_f64()
        ));

        output.summary(&summary, self.format)
    }

    /// Only flags the user actually passed; absent ones must not mask the file
    fn cli_overrides(&self) -> Option<serde_json::Value> {
        let mut pipeline = serde_json::Map::new();
        if let Some(workers) = self.workers {
            pipeline.insert("workers".to_string(), workers.into());
        }
        if let Some(queue_capacity) = self.queue_capacity {
            pipeline.insert("queue_capacity".to_string(), queue_capacity.into());
        }

        if pipeline.is_empty() {
            None
        } else {
            Some(serde_json::json!({ "pipeline": pipeline }))
        }
    }
}

fn setup_logging(verbose: u8, quiet: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if quiet {
            return tracing_subscriber::EnvFilter::new("error");
        }
        match verbose {
            0 => tracing_subscriber::EnvFilter::new("warn"),
            1 => tracing_subscriber::EnvFilter::new("info"),
            2 => tracing_subscriber::EnvFilter::new("debug"),
            _ => tracing_subscriber::EnvFilter::new("trace"),
        }
    });

    // Ignore the error if a subscriber is already installed (tests)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
