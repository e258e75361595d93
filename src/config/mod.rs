//! Configuration for boxcount
//!
//! Settings come from the embedded `default-config.toml`, an optional TOML
//! file passed with `--config`, and command-line overrides, in that order of
//! increasing priority. Nothing is read implicitly from disk or the
//! environment.

pub mod core;

pub use self::core::{BoxConfig, PipelineConfig};
