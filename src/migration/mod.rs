//! Versioned migration engine.
//!
//! This module evolves stale stored values to the caller's current schema
//! version. It is pure compute over in-memory values: it never touches the
//! storage backend, owns no state between calls, and either returns the fully
//! migrated value or an error carrying nothing at all.
//!
//! # Architecture
//!
//! Four pieces compose one `migrate` call:
//!
//! 1. the configuration gate ([`MigrationSet::new`]) validates the untrusted
//!    step list once and normalizes it,
//! 2. the path resolver ([`normalize`], [`has_path`], [`resolve_path`])
//!    decides whether an unbroken version chain covers the requested range
//!    and produces the ordered sub-sequence to run,
//! 3. the step executor ([`execute`]) left-folds the value through that
//!    sub-sequence, gating each transform on its optional validator,
//! 4. the orchestrator ([`migrate`], [`MigrationSet::migrate`]) wires the
//!    three together and collapses every failure into a single error channel.
//!
//! # Example
//!
//! ```
//! use versioned_store::envelope::Envelope;
//! use versioned_store::migration::{migrate, Migration};
//! use serde_json::json;
//!
//! let migrations = vec![
//!     Migration::new(1, |v| Ok(json!({ "name": v }))),
//!     Migration::new(2, |mut v| {
//!         v["active"] = json!(true);
//!         Ok(v)
//!     }),
//! ];
//!
//! let stale = Envelope::new(1, json!("alice"));
//! let value = migrate(&migrations, stale, 3)?;
//! assert_eq!(value, json!({ "name": "alice", "active": true }));
//! # Ok::<(), versioned_store::errors::MigrateError>(())
//! ```

mod executor;
mod path;
mod set;
mod step;

pub use executor::execute;
pub use path::{has_path, normalize, resolve_path};
pub use set::{migrate, MigrationSet};
pub use step::{Migration, UpFn, ValidateFn, Version};
