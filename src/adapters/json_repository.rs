//! JSON implementation of the cache repository.
//!
//! This is the canonical on-disk format: a [`CacheDocument`] written with
//! serde_json. Older files holding a bare array of board codes still load.

use std::{
    fs::{self, File},
    io::{BufWriter, Write},
    path::Path,
};

use log::info;

use crate::{
    Result, cache::StateCache, error::Error, persistence::CacheDocument,
    ports::CacheRepository,
};

/// JSON-file cache repository.
///
/// # Examples
///
/// ```no_run
/// use std::path::Path;
///
/// use tttai::adapters::JsonRepository;
/// use tttai::ports::CacheRepository;
///
/// let repo = JsonRepository::new();
/// let cache = repo.load(Path::new("state-cache.json"))?;
/// repo.save(&cache, Path::new("state-cache.json"))?;
/// # Ok::<(), tttai::Error>(())
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonRepository;

impl JsonRepository {
    /// Create a new JSON repository.
    pub fn new() -> Self {
        Self
    }
}

impl CacheRepository for JsonRepository {
    fn save(&self, cache: &StateCache, path: &Path) -> Result<()> {
        let file = File::create(path).map_err(|source| Error::Io {
            operation: format!("create file {path:?}"),
            source,
        })?;

        let document = CacheDocument::from_cache(cache);
        let mut writer = BufWriter::new(file);
        serde_json::to_writer(&mut writer, &document)?;
        writer.flush().map_err(|source| Error::Io {
            operation: format!("flush file {path:?}"),
            source,
        })?;
        info!("saved {} states to {}", document.codes.len(), path.display());
        Ok(())
    }

    fn load(&self, path: &Path) -> Result<StateCache> {
        let bytes = fs::read(path).map_err(|source| Error::Io {
            operation: format!("read file {path:?}"),
            source,
        })?;

        let cache = CacheDocument::from_json_slice(&bytes)?.into_cache()?;
        info!("loaded {} states from {}", cache.len(), path.display());
        Ok(cache)
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::{cache::CachedState, desirability::Desirability, tictactoe::Board};

    #[test]
    fn test_json_roundtrip() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let file_path = temp_dir.path().join("state-cache.json");

        let mut cache = StateCache::new();
        let board = Board::from_code("X...O....").unwrap();
        cache.add(board);
        cache.add(Board::empty());
        cache
            .update(CachedState::new(board).with_desirability(Desirability::new(3, -2)))
            .unwrap();

        let repo = JsonRepository::new();
        repo.save(&cache, &file_path).expect("Failed to save");
        let loaded = repo.load(&file_path).expect("Failed to load");

        assert_eq!(loaded, cache);
    }

    #[test]
    fn test_file_layout() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let file_path = temp_dir.path().join("state-cache.json");

        let cache: StateCache = [Board::empty()].into_iter().collect();
        JsonRepository::new().save(&cache, &file_path).unwrap();

        let text = std::fs::read_to_string(&file_path).unwrap();
        assert_eq!(text, r#"{"version":2,"codes":["........."]}"#);
    }

    #[test]
    fn test_load_legacy_array_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let file_path = temp_dir.path().join("legacy.json");
        std::fs::write(&file_path, r#"[".........", "X........", "..X......"]"#).unwrap();

        let loaded = JsonRepository::new().load(&file_path).unwrap();
        assert_eq!(loaded.len(), 2);
    }

    #[test]
    fn test_load_nonexistent_returns_error() {
        let repo = JsonRepository::new();
        let result = repo.load(Path::new("/tmp/nonexistent_12345.json"));
        assert!(matches!(result, Err(Error::Io { .. })));
    }

    #[test]
    fn test_save_to_invalid_path_returns_error() {
        let repo = JsonRepository::new();
        let result = repo.save(&StateCache::new(), Path::new("/invalid_dir_12345/cache.json"));
        assert!(result.is_err());
    }
}
