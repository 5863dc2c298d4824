//! The versioned store handle.
//!
//! A handle binds one backend key to one typed value and its current schema
//! version. Reads transparently migrate stale envelopes through the
//! configured [`MigrationSet`](crate::migration::MigrationSet) and persist
//! the upgraded value, so callers only ever observe the current shape.

use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::backend::StorageBackend;
use crate::config::StoreOptions;
use crate::envelope::{pack, unpack, Value};
use crate::errors::StoreResult;

/// A typed, versioned value persisted under a single prefixed key.
///
/// # Examples
///
/// ```
/// use versioned_store::backend::MemoryBackend;
/// use versioned_store::config::StoreOptions;
/// use versioned_store::store::VersionedStore;
///
/// let options = StoreOptions::builder().key("counter").version(1).build();
/// let store: VersionedStore<u64, _> = VersionedStore::new(MemoryBackend::new(), options)?;
///
/// assert!(store.get().is_none());
/// assert!(store.set(&41));
/// assert_eq!(store.get(), Some(41));
/// # Ok::<(), versioned_store::errors::StoreError>(())
/// ```
pub struct VersionedStore<T, B>
where
    B: StorageBackend,
{
    backend: B,
    options: StoreOptions,
    key: String,
    _phantom: PhantomData<fn() -> T>,
}

impl<T, B> VersionedStore<T, B>
where
    T: Serialize + DeserializeOwned,
    B: StorageBackend,
{
    /// Create a handle over `backend` with the given options.
    ///
    /// A migration set passed in the options was already validated at its
    /// own construction; only the key shape is checked here.
    pub fn new(backend: B, options: StoreOptions) -> StoreResult<Self> {
        options.validate_shape()?;
        let key = options.storage_key();

        Ok(Self {
            backend,
            options,
            key,
            _phantom: PhantomData,
        })
    }

    /// Read the stored value, migrating it to the current version if needed.
    ///
    /// Returns `None` when nothing usable is stored: the key is absent, the
    /// envelope cannot be decoded, validation rejects the value, or no
    /// migration path reaches the current version. With `auto_remove` set
    /// (the default) every unusable record is deleted on the way out, so the
    /// next read starts clean.
    pub fn get(&self) -> Option<T> {
        let raw = self.backend.read(&self.key)?;

        let Some(envelope) = unpack(&raw, self.options.verbose) else {
            self.clean();
            return None;
        };

        // the stored version is current; no migration required
        if envelope.version == self.options.version {
            if !self.check_value(&envelope.value) {
                self.clean();
                return None;
            }
            return self.decode(envelope.value);
        }

        let Some(migrations) = &self.options.migrations else {
            self.clean();
            return None;
        };

        match migrations.migrate(envelope, self.options.version) {
            Ok(value) => {
                if !self.check_value(&value) {
                    // migration succeeded but the result is not acceptable
                    self.clean();
                    return None;
                }

                let decoded = self.decode(value.clone())?;
                self.save(&value);
                Some(decoded)
            }
            Err(err) => {
                if self.options.verbose {
                    log::warn!("discarding stale record under {}: {err}", self.key);
                }
                self.clean();
                None
            }
        }
    }

    /// Persist `value` at the current version. Returns whether the write
    /// took effect.
    pub fn set(&self, value: &T) -> bool {
        let value = match serde_json::to_value(value) {
            Ok(value) => value,
            Err(err) => {
                if self.options.verbose {
                    log::warn!("failed to serialize value for {}: {err}", self.key);
                }
                return false;
            }
        };

        self.save(&value)
    }

    /// Delete the stored value.
    pub fn remove(&self) {
        self.backend.remove(&self.key);
    }

    /// The fully prefixed backend key this handle owns.
    pub fn storage_key(&self) -> &str {
        &self.key
    }

    /// Access the underlying backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Consume the handle and return the backend.
    pub fn into_backend(self) -> B {
        self.backend
    }

    fn save(&self, value: &Value) -> bool {
        let Some(packed) = pack(self.options.version, value) else {
            return false;
        };
        self.backend.write(&self.key, &packed)
    }

    fn clean(&self) {
        if self.options.auto_remove {
            self.backend.remove(&self.key);
        }
    }

    fn check_value(&self, value: &Value) -> bool {
        self.options
            .validate
            .as_ref()
            .is_none_or(|validate| validate(value))
    }

    fn decode(&self, value: Value) -> Option<T> {
        match serde_json::from_value(value) {
            Ok(decoded) => Some(decoded),
            Err(err) => {
                if self.options.verbose {
                    log::warn!("stored value under {} does not decode: {err}", self.key);
                }
                self.clean();
                None
            }
        }
    }
}

/// Remove every backend key carrying `prefix`.
///
/// The sweep companion to per-handle [`VersionedStore::remove`]; it clears
/// all values this library manages without touching foreign keys.
pub fn remove_all<B: StorageBackend>(backend: &B, prefix: &str) {
    for key in backend.keys() {
        if key.starts_with(prefix) {
            backend.remove(&key);
        }
    }
}
