//! Prelude module for convenient imports.
//!
//! Re-exports the types most callers need, so a single
//! `use versioned_store::prelude::*;` is enough to configure a store,
//! author migrations and handle errors.

pub use crate::backend::MemoryBackend;
#[cfg(feature = "sled")]
pub use crate::backend::SledBackend;
pub use crate::backend::StorageBackend;

pub use crate::config::{StoreOptions, ValueCheck, DEFAULT_PREFIX};

pub use crate::envelope::{Envelope, Value};

pub use crate::errors::{ConfigError, MigrateError, StoreError, StoreResult};

pub use crate::migration::{migrate, Migration, MigrationSet, Version};

pub use crate::store::{remove_all, VersionedStore};
