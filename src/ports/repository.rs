//! Repository port for cache persistence.

use std::path::Path;

use crate::{Result, cache::StateCache};

/// Port for persisting and loading state caches.
///
/// This trait abstracts the storage mechanism so the core never depends on a
/// particular file format.
///
/// # Examples
///
/// ```no_run
/// use std::path::Path;
///
/// use tttai::ports::CacheRepository;
/// use tttai::StateCache;
///
/// fn save_cache<R: CacheRepository>(
///     repo: &R,
///     cache: &StateCache,
///     path: &Path,
/// ) -> tttai::Result<()> {
///     repo.save(cache, path)
/// }
/// ```
pub trait CacheRepository {
    /// Save a cache to persistent storage.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The path cannot be created or written to
    /// - Serialization fails
    fn save(&self, cache: &StateCache, path: &Path) -> Result<()>;

    /// Load a cache from persistent storage.
    ///
    /// On error no cache is produced; callers keep whatever they had.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file does not exist or cannot be read
    /// - The document version or any state code is malformed
    fn load(&self, path: &Path) -> Result<StateCache>;
}
