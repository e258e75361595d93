//! # boxcount - exact minimum box counting
//!
//! For every integer in a line-oriented input, boxcount finds the fewest boxes
//! of sizes 5, 16, 42 and 59 that add up to exactly that integer, then reports
//! the total across all lines.
//!
//! - **Exact solver**: closed-form handling of the two smallest sizes keeps the
//!   search quadratic in `N/59 * N/42` instead of enumerating every size
//! - **Streaming worker pool**: bounded job and result queues give
//!   back-pressure in both directions, so memory stays flat on large inputs
//! - **Fail-fast**: an unparseable line or an unpackable target aborts the
//!   run; no partial total is ever printed
//!
//! ## Quick Start
//!
//! ```bash
//! boxcount targets.txt
//! # Total boxes: 1234
//!
//! boxcount --workers 4 --format json targets.txt
//! ```
//!
//! ## Library Usage
//!
//! ```rust
//! use boxcount::config::PipelineConfig;
//! use boxcount::packing::min_boxes;
//! use boxcount::pipeline::run_pipeline;
//! use std::io::Cursor;
//!
//! assert_eq!(min_boxes(64), Some(2));
//! assert_eq!(min_boxes(3), None);
//!
//! let summary = run_pipeline(Cursor::new("5\n16\n42\n59\n"), &PipelineConfig::default())?;
//! assert_eq!(summary.total_boxes, 4);
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod cli;
pub mod config;
pub mod packing;
pub mod parallel;
pub mod pipeline;

pub use cli::Cli;
pub use config::BoxConfig;

/// Result type alias for boxcount operations
pub type Result<T> = anyhow::Result<T>;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const PKG_NAME: &str = env!("CARGO_PKG_NAME");
