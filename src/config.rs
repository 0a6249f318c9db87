use crate::error::Result;
use crate::utils::constants::{DEFAULT_CHUNK_SIZE, DEFAULT_MAX_LINE_SIZE};
use serde::{Deserialize, Serialize};
use std::path::Path;
use validator::Validate;

/// Tunables for a scan run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ScanConfig {
    /// Target segment size in bytes, before extension to the next newline
    #[validate(range(min = 1))]
    pub chunk_size: u64,

    /// Longest line the segmenter will search across for a newline
    #[validate(range(min = 1))]
    pub max_line_size: usize,

    #[validate(range(min = 1))]
    pub max_workers: usize,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            max_line_size: DEFAULT_MAX_LINE_SIZE,
            max_workers: num_cpus::get(),
        }
    }
}

impl ScanConfig {
    /// Load defaults, layered with an optional settings file (TOML, JSON or
    /// YAML, picked by extension).
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let loaded: ScanConfig = config::Config::builder()
            .add_source(config::File::from(path))
            .build()?
            .try_deserialize()?;
        loaded.validate()?;
        Ok(loaded)
    }

    pub fn with_chunk_size(mut self, chunk_size: Option<u64>) -> Self {
        if let Some(chunk_size) = chunk_size {
            self.chunk_size = chunk_size;
        }
        self
    }

    pub fn with_max_line_size(mut self, max_line_size: Option<usize>) -> Self {
        if let Some(max_line_size) = max_line_size {
            self.max_line_size = max_line_size;
        }
        self
    }

    pub fn with_max_workers(mut self, max_workers: Option<usize>) -> Self {
        if let Some(max_workers) = max_workers {
            self.max_workers = max_workers;
        }
        self
    }
}
