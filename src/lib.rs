//! # Versioned Store
//!
//! A type-safe, versioned key/value persistence helper for Rust with
//! transparent schema migration on read.
//!
//! ## Features
//!
//! - **Versioned envelopes**: every value is stored as `{version, value}`
//!   JSON, so stale data is detectable the moment it is read
//! - **Migration engine**: contiguous single-version steps evolve old values
//!   to the current schema, all-or-nothing
//! - **Validation gates**: optional per-step and per-store checks keep
//!   unexpected shapes from ever reaching callers
//! - **Pluggable backends**: in-memory for tests, sled for durable storage,
//!   or any implementation of [`backend::StorageBackend`]
//!
//! ## Quick Start
//!
//! ```
//! use versioned_store::prelude::*;
//! use serde_json::json;
//!
//! // v1 stored plain names; v2 wraps them into an object
//! let migrations = MigrationSet::new(vec![Migration::new(1, |name| {
//!     Ok(json!({ "name": name, "admin": false }))
//! })])?;
//!
//! let options = StoreOptions::builder()
//!     .key("user")
//!     .version(2)
//!     .migrations(migrations)
//!     .build();
//!
//! let backend = MemoryBackend::new();
//! // a record written by an older release of the application
//! backend.write("vstore::user", r#"{"version":1,"value":"alice"}"#);
//!
//! let store: VersionedStore<serde_json::Value, _> = VersionedStore::new(backend, options)?;
//! let user = store.get().unwrap();
//! assert_eq!(user, json!({ "name": "alice", "admin": false }));
//! # Ok::<(), versioned_store::errors::StoreError>(())
//! ```

pub mod backend;
pub mod config;
pub mod envelope;
pub mod errors;
pub mod migration;
pub mod prelude;
pub mod store;
