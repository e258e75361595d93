use anyhow::{Result, bail};
use figment::{
    Figment,
    providers::{Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::parallel::WorkerPool;

// Embed the default config at compile time
const DEFAULT_CONFIG: &str = include_str!("../../default-config.toml");

/// Worker pool and queue settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Number of solver threads (0 = derive from CPU cores)
    pub workers: usize,
    /// Percentage of CPU cores used when `workers` is 0 (1-100)
    pub thread_percentage: u8,
    /// Capacity of the job queue and of the result queue
    pub queue_capacity: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            workers: 0,
            thread_percentage: 100,
            queue_capacity: 4096,
        }
    }
}

impl PipelineConfig {
    /// Worker count after resolving auto-detection
    pub fn resolved_workers(&self) -> usize {
        WorkerPool::<(), ()>::calculate_optimal_workers(self.workers, self.thread_percentage)
    }

    pub fn validate(&self) -> Result<()> {
        if !(1..=100).contains(&self.thread_percentage) {
            bail!(
                "pipeline.thread_percentage must be between 1 and 100, got {}",
                self.thread_percentage
            );
        }
        if self.queue_capacity == 0 {
            bail!("pipeline.queue_capacity must be at least 1");
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoxConfig {
    pub pipeline: PipelineConfig,
}

impl BoxConfig {
    /// Load embedded defaults only
    pub fn load() -> Result<Self> {
        Self::load_with_overrides(None, None)
    }

    /// Layer, lowest priority first: embedded defaults, `custom_config`,
    /// then `cli_overrides` (a partial JSON object with the same shape).
    pub fn load_with_overrides(
        custom_config: Option<&Path>,
        cli_overrides: Option<serde_json::Value>,
    ) -> Result<Self> {
        tracing::trace!("CONFIG LOAD: Starting");

        let mut figment = Figment::new().merge(Toml::string(DEFAULT_CONFIG));

        if let Some(custom_path) = custom_config {
            // An explicitly requested file must exist
            if !custom_path.is_file() {
                bail!("Config file not found: {}", custom_path.display());
            }
            tracing::debug!("Loading config file {}", custom_path.display());
            figment = figment.merge(Toml::file(custom_path));
        }

        if let Some(overrides) = cli_overrides {
            tracing::trace!("CONFIG LOAD: Applying CLI overrides {}", overrides);
            figment = figment.merge(Serialized::defaults(overrides));
        }

        let config: BoxConfig = figment.extract()?;
        config.pipeline.validate()?;

        tracing::trace!("CONFIG LOAD: Final pipeline = {:?}", config.pipeline);
        Ok(config)
    }
}
