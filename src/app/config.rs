//! Configuration for building and serving the state cache.

use std::path::PathBuf;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::tictactoe::FULL_DEPTH;

/// Default cache file, relative to the working directory
pub const DEFAULT_CACHE_PATH: &str = "state-cache.json";

/// On-disk layout of the cache file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
pub enum StorageFormat {
    /// Versioned JSON document (canonical)
    #[default]
    Json,
    /// The same document encoded as MessagePack
    Msgpack,
}

/// Configuration for the solver application.
///
/// # Examples
///
/// ```
/// use tttai::app::{SolverConfig, StorageFormat};
///
/// let config = SolverConfig::new("cache.msgpack")
///     .with_format(StorageFormat::Msgpack)
///     .with_depth(4)
///     .with_seed(42);
/// assert_eq!(config.depth, 4);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolverConfig {
    /// Cache file location
    pub cache_path: PathBuf,
    pub format: StorageFormat,
    /// Plies to enumerate from the empty board
    pub depth: usize,
    /// Seed for the random opponent (None = non-deterministic)
    pub seed: Option<u64>,
}

impl SolverConfig {
    /// Create a configuration for the given cache file.
    ///
    /// Uses JSON storage, full-depth enumeration and no seed.
    pub fn new(cache_path: impl Into<PathBuf>) -> Self {
        Self {
            cache_path: cache_path.into(),
            format: StorageFormat::default(),
            depth: FULL_DEPTH,
            seed: None,
        }
    }

    pub fn with_format(mut self, format: StorageFormat) -> Self {
        self.format = format;
        self
    }

    /// Set the enumeration depth; anything past a full board is capped.
    pub fn with_depth(mut self, depth: usize) -> Self {
        self.depth = depth.min(FULL_DEPTH);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_PATH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SolverConfig::default();
        assert_eq!(config.cache_path, PathBuf::from("state-cache.json"));
        assert_eq!(config.format, StorageFormat::Json);
        assert_eq!(config.depth, 9);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn test_depth_is_capped() {
        assert_eq!(SolverConfig::default().with_depth(20).depth, FULL_DEPTH);
    }
}
