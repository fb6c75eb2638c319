//! In-memory cache repository for testing.
//!
//! This adapter keeps serialized documents in memory, so tests exercise the
//! full encode/decode path without touching the file system.

use std::{
    collections::HashMap,
    path::Path,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use crate::{
    Result, cache::StateCache, error::Error, persistence::CacheDocument,
    ports::CacheRepository,
};

/// In-memory repository for testing.
///
/// # Examples
///
/// ```
/// use std::path::Path;
///
/// use tttai::adapters::InMemoryRepository;
/// use tttai::ports::CacheRepository;
/// use tttai::{Board, StateCache};
///
/// let repo = InMemoryRepository::new();
/// let cache: StateCache = [Board::empty()].into_iter().collect();
///
/// repo.save(&cache, Path::new("cache"))?;
/// let loaded = repo.load(Path::new("cache"))?;
/// assert_eq!(loaded.len(), 1);
/// # Ok::<(), tttai::Error>(())
/// ```
///
/// # Thread Safety
///
/// All clones share the same underlying storage.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    storage: Arc<Mutex<HashMap<String, Vec<u8>>>>,
}

impl InMemoryRepository {
    /// Create a new empty in-memory repository.
    pub fn new() -> Self {
        Self::default()
    }

    fn storage(&self) -> MutexGuard<'_, HashMap<String, Vec<u8>>> {
        self.storage.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Get the number of caches currently stored.
    pub fn count(&self) -> usize {
        self.storage().len()
    }

    /// Check if a cache exists at the given path.
    pub fn contains(&self, path: &Path) -> bool {
        self.storage().contains_key(&path.to_string_lossy().to_string())
    }

    /// Store raw bytes under `path`, e.g. to simulate a corrupt file.
    pub fn insert_raw(&self, path: &Path, bytes: Vec<u8>) {
        self.storage().insert(path.to_string_lossy().to_string(), bytes);
    }
}

impl CacheRepository for InMemoryRepository {
    fn save(&self, cache: &StateCache, path: &Path) -> Result<()> {
        let bytes = serde_json::to_vec(&CacheDocument::from_cache(cache))?;
        self.insert_raw(path, bytes);
        Ok(())
    }

    fn load(&self, path: &Path) -> Result<StateCache> {
        let key = path.to_string_lossy().to_string();
        let storage = self.storage();

        let bytes = storage.get(&key).ok_or_else(|| Error::Io {
            operation: format!("load cache from in-memory storage at {path:?}"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "key not found in memory"),
        })?;

        CacheDocument::from_json_slice(bytes)?.into_cache()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tictactoe::Board;

    #[test]
    fn test_in_memory_save_and_load() {
        let repo = InMemoryRepository::new();
        let cache: StateCache = [Board::empty(), Board::from_code("X........").unwrap()]
            .into_iter()
            .collect();
        let path = Path::new("test_cache");

        assert_eq!(repo.count(), 0);
        assert!(!repo.contains(path));

        repo.save(&cache, path).unwrap();
        assert_eq!(repo.count(), 1);
        assert!(repo.contains(path));

        assert_eq!(repo.load(path).unwrap(), cache);
    }

    #[test]
    fn test_load_nonexistent_returns_error() {
        let repo = InMemoryRepository::new();
        assert!(repo.load(Path::new("nonexistent")).is_err());
    }

    #[test]
    fn test_corrupt_document_is_malformed() {
        let repo = InMemoryRepository::new();
        let path = Path::new("corrupt");
        repo.insert_raw(path, br#"{"version":2,"codes":["XXXX"]}"#.to_vec());
        assert!(matches!(
            repo.load(path),
            Err(Error::MalformedPersistence { .. })
        ));
    }

    #[test]
    fn test_clone_shares_storage() {
        let repo1 = InMemoryRepository::new();
        let repo2 = repo1.clone();
        let path = Path::new("shared");

        repo1.save(&StateCache::new(), path).unwrap();
        assert!(repo2.load(path).unwrap().is_empty());
        assert_eq!(repo2.count(), 1);
    }
}
