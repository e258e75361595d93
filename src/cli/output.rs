//! Output formatting for boxcount
//!
//! The result line is the only thing written to stdout. Status messages go
//! to stderr so the total can be piped or captured cleanly.

use anyhow::Result;
use console::style;

use crate::pipeline::Summary;

/// Format used for the final summary
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// `Total boxes: <sum>`
    #[default]
    Text,
    /// Single-line JSON object
    Json,
}

/// Output handler for consistent CLI formatting
pub struct Output {
    verbose: bool,
    quiet: bool,
}

impl Output {
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self { verbose, quiet }
    }

    /// Print a verbose message (only if verbose mode is enabled)
    pub fn verbose(&self, message: &str) {
        if self.verbose && !self.quiet {
            eprintln!("{} {}", style("ℹ").dim(), style(message).dim());
        }
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        if self.verbose && !self.quiet {
            eprintln!("{} {}", style("✔").green(), message);
        }
    }

    /// Print the final summary to stdout
    pub fn summary(&self, summary: &Summary, format: OutputFormat) -> Result<()> {
        println!("{}", render_summary(summary, format)?);
        Ok(())
    }
}

pub fn render_summary(summary: &Summary, format: OutputFormat) -> Result<String> {
    Ok(match format {
        OutputFormat::Text => format!("Total boxes: {}", summary.total_boxes),
        OutputFormat::Json => serde_json::to_string(summary)?,
    })
}
