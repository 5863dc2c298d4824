//! Storage backend abstraction.
//!
//! A backend is a flat string-to-string keyspace with deliberately soft
//! failure semantics: reads that fail return `None`, writes that fail return
//! `false`, and nothing panics or errors across this boundary. The store
//! layer treats a failed backend operation the same as an absent value.

mod memory;
#[cfg(feature = "sled")]
mod sled_store;

pub use memory::MemoryBackend;
#[cfg(feature = "sled")]
pub use sled_store::SledBackend;

/// A key/value backend the versioned store can persist envelopes into.
pub trait StorageBackend {
    /// Read the raw text stored under `key`, or `None` if absent or
    /// unreadable.
    fn read(&self, key: &str) -> Option<String>;

    /// Write raw text under `key`. Returns whether the write took effect.
    fn write(&self, key: &str, raw: &str) -> bool;

    /// Delete `key`. Removing an absent key is not an error.
    fn remove(&self, key: &str);

    /// Every key currently present, in no particular order.
    fn keys(&self) -> Vec<String>;
}
