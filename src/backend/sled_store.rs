//! Durable backend over a sled database.

use std::path::Path;

use crate::errors::StoreError;

use super::StorageBackend;

/// File-backed storage using a sled tree.
///
/// Construction is fallible like any database open; once the backend exists,
/// operational errors are logged and mapped to the soft failure semantics of
/// [`StorageBackend`] so the store layer never sees them.
pub struct SledBackend {
    db: sled::Db,
}

impl SledBackend {
    /// Open (or create) a sled database at the given path.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let db = sled::open(path)?;
        Ok(Self { db })
    }

    /// Create a temporary sled database, deleted on drop.
    pub fn temp() -> Result<Self, StoreError> {
        let db = sled::Config::new().temporary(true).open()?;
        Ok(Self { db })
    }

    /// Direct access to the underlying sled database.
    pub fn db(&self) -> &sled::Db {
        &self.db
    }

    /// Flush pending writes to disk.
    pub fn flush(&self) -> Result<usize, StoreError> {
        Ok(self.db.flush()?)
    }
}

impl StorageBackend for SledBackend {
    fn read(&self, key: &str) -> Option<String> {
        match self.db.get(key) {
            Ok(Some(ivec)) => match String::from_utf8(ivec.to_vec()) {
                Ok(raw) => Some(raw),
                Err(err) => {
                    log::warn!("non-utf8 data under key {key}: {err}");
                    None
                }
            },
            Ok(None) => None,
            Err(err) => {
                log::warn!("sled read failed for key {key}: {err}");
                None
            }
        }
    }

    fn write(&self, key: &str, raw: &str) -> bool {
        match self.db.insert(key, raw.as_bytes()) {
            Ok(_) => true,
            Err(err) => {
                log::warn!("sled write failed for key {key}: {err}");
                false
            }
        }
    }

    fn remove(&self, key: &str) {
        if let Err(err) = self.db.remove(key) {
            log::warn!("sled remove failed for key {key}: {err}");
        }
    }

    fn keys(&self) -> Vec<String> {
        self.db
            .iter()
            .keys()
            .filter_map(|result| result.ok())
            .filter_map(|ivec| String::from_utf8(ivec.to_vec()).ok())
            .collect()
    }
}
