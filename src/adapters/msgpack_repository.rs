//! MessagePack implementation of the cache repository.
//!
//! Stores the same [`CacheDocument`] as the JSON adapter, encoded with
//! rmp_serde for a smaller file.

use std::{
    fs::File,
    io::{BufReader, BufWriter, Write},
    path::Path,
};

use log::info;

use crate::{
    Result, cache::StateCache, error::Error, persistence::CacheDocument,
    ports::CacheRepository,
};

/// MessagePack-based cache repository.
#[derive(Debug, Clone, Copy, Default)]
pub struct MsgPackRepository;

impl MsgPackRepository {
    /// Create a new MessagePack repository.
    pub fn new() -> Self {
        Self
    }
}

impl CacheRepository for MsgPackRepository {
    fn save(&self, cache: &StateCache, path: &Path) -> Result<()> {
        let file = File::create(path).map_err(|source| Error::Io {
            operation: format!("create file {path:?}"),
            source,
        })?;

        let document = CacheDocument::from_cache(cache);
        let mut writer = BufWriter::new(file);
        rmp_serde::encode::write(&mut writer, &document).map_err(|e| {
            Error::SerializationContext {
                operation: "serialize cache to MessagePack".to_string(),
                message: e.to_string(),
            }
        })?;
        writer.flush().map_err(|source| Error::Io {
            operation: format!("flush file {path:?}"),
            source,
        })?;

        info!("saved {} states to {}", document.codes.len(), path.display());
        Ok(())
    }

    fn load(&self, path: &Path) -> Result<StateCache> {
        let file = File::open(path).map_err(|source| Error::Io {
            operation: format!("open file {path:?}"),
            source,
        })?;

        let document: CacheDocument = rmp_serde::decode::from_read(BufReader::new(file))
            .map_err(|e| Error::MalformedPersistence {
                message: format!("unreadable MessagePack cache document: {e}"),
            })?;

        let cache = document.into_cache()?;
        info!("loaded {} states from {}", cache.len(), path.display());
        Ok(cache)
    }
}
