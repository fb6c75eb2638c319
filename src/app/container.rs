//! Application container wiring the cache to its storage.
//!
//! The container owns the repository chosen for the configured format and
//! exposes the cache workflows the CLI runs: build, load, recompute, save.

use std::{path::Path, sync::Arc};

use log::info;

use super::config::{SolverConfig, StorageFormat};
use crate::{
    Result,
    adapters::{JsonRepository, MsgPackRepository},
    cache::StateCache,
    desirability::recompute_all,
    ports::CacheRepository,
    tictactoe::populate,
};

fn repository_for(format: StorageFormat) -> Arc<dyn CacheRepository + Send + Sync> {
    match format {
        StorageFormat::Json => Arc::new(JsonRepository::new()),
        StorageFormat::Msgpack => Arc::new(MsgPackRepository::new()),
    }
}

/// Application with an injected cache repository.
///
/// # Examples
///
/// ## Production usage
///
/// ```no_run
/// use tttai::app::{App, SolverConfig};
///
/// let app = App::new(SolverConfig::default());
/// let cache = app.build_cache()?;
/// app.save_cache(&cache)?;
/// # Ok::<(), tttai::Error>(())
/// ```
///
/// ## Testing with dependency injection
///
/// ```
/// use tttai::adapters::InMemoryRepository;
/// use tttai::app::App;
///
/// let app = App::for_testing()
///     .with_repository(InMemoryRepository::new())
///     .build();
/// let cache = app.build_cache()?;
/// app.save_cache(&cache)?;
/// assert_eq!(app.load_cache()?, cache);
/// # Ok::<(), tttai::Error>(())
/// ```
pub struct App {
    repository: Arc<dyn CacheRepository + Send + Sync>,
    config: SolverConfig,
}

impl App {
    /// Create an app whose repository matches `config.format`.
    pub fn new(config: SolverConfig) -> Self {
        Self {
            repository: repository_for(config.format),
            config,
        }
    }

    /// Builder for injecting a repository or configuration in tests.
    pub fn for_testing() -> AppBuilder {
        AppBuilder::new()
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    pub fn cache_path(&self) -> &Path {
        &self.config.cache_path
    }

    /// Returns an Arc-wrapped repository that can be shared across threads.
    pub fn repository(&self) -> Arc<dyn CacheRepository + Send + Sync> {
        Arc::clone(&self.repository)
    }

    /// Load the cache from the configured path.
    pub fn load_cache(&self) -> Result<StateCache> {
        self.repository.load(self.cache_path())
    }

    /// Save the cache to the configured path.
    pub fn save_cache(&self, cache: &StateCache) -> Result<()> {
        self.repository.save(cache, self.cache_path())
    }

    /// Enumerate from the empty board to the configured depth and score
    /// every class.
    pub fn build_cache(&self) -> Result<StateCache> {
        let mut cache = StateCache::new();
        let added = populate(&mut cache, self.config.depth);
        info!("populated {added} canonical classes to depth {}", self.config.depth);
        recompute_all(&mut cache)?;
        Ok(cache)
    }

    /// Load the cache, rescore it from scratch and return it.
    pub fn recompute(&self) -> Result<StateCache> {
        let mut cache = self.load_cache()?;
        recompute_all(&mut cache)?;
        Ok(cache)
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new(SolverConfig::default())
    }
}

/// Builder for constructing an app with custom dependencies.
///
/// # Examples
///
/// ```
/// use tttai::adapters::InMemoryRepository;
/// use tttai::app::{AppBuilder, SolverConfig};
///
/// let app = AppBuilder::new()
///     .with_repository(InMemoryRepository::new())
///     .with_config(SolverConfig::new("memory.json").with_depth(3))
///     .build();
/// assert_eq!(app.config().depth, 3);
/// ```
pub struct AppBuilder {
    repository: Option<Arc<dyn CacheRepository + Send + Sync>>,
    config: SolverConfig,
}

impl AppBuilder {
    pub fn new() -> Self {
        Self {
            repository: None,
            config: SolverConfig::default(),
        }
    }

    /// Set a custom cache repository.
    pub fn with_repository<R: CacheRepository + Send + Sync + 'static>(mut self, repo: R) -> Self {
        self.repository = Some(Arc::new(repo));
        self
    }

    pub fn with_config(mut self, config: SolverConfig) -> Self {
        self.config = config;
        self
    }

    /// Build the app with the configured dependencies.
    ///
    /// If no repository was specified, the configured format decides.
    pub fn build(self) -> App {
        App {
            repository: self
                .repository
                .unwrap_or_else(|| repository_for(self.config.format)),
            config: self.config,
        }
    }
}

impl Default for AppBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Load a JSON cache file from `path`.
pub fn load_cache(path: impl AsRef<Path>) -> Result<StateCache> {
    JsonRepository::new().load(path.as_ref())
}

/// Write `cache` as a JSON cache file at `path`.
pub fn save_cache(cache: &StateCache, path: impl AsRef<Path>) -> Result<()> {
    JsonRepository::new().save(cache, path.as_ref())
}
