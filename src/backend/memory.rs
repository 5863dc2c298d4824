//! In-memory backend, the default for tests and ephemeral storage.

use std::collections::HashMap;
use std::sync::RwLock;

use super::StorageBackend;

/// A process-local backend over a locked map.
///
/// Plays the role browser `localStorage` plays for client-side stores: a
/// small, always-available keyspace with no durability. A poisoned lock is
/// treated as an unavailable backend rather than a panic.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries currently stored.
    pub fn len(&self) -> usize {
        self.entries.read().map(|map| map.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl StorageBackend for MemoryBackend {
    fn read(&self, key: &str) -> Option<String> {
        let entries = self.entries.read().ok()?;
        entries.get(key).cloned()
    }

    fn write(&self, key: &str, raw: &str) -> bool {
        let Ok(mut entries) = self.entries.write() else {
            return false;
        };
        entries.insert(key.to_string(), raw.to_string());
        true
    }

    fn remove(&self, key: &str) {
        if let Ok(mut entries) = self.entries.write() {
            entries.remove(key);
        }
    }

    fn keys(&self) -> Vec<String> {
        self.entries
            .read()
            .map(|entries| entries.keys().cloned().collect())
            .unwrap_or_default()
    }
}
