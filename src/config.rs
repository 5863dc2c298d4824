//! Store handle configuration via the builder pattern.

use std::fmt;
use std::sync::Arc;

use typed_builder::TypedBuilder;

use crate::envelope::Value;
use crate::errors::ConfigError;
use crate::migration::{MigrationSet, Version};

/// Prefix applied to every key unless the caller overrides it.
pub const DEFAULT_PREFIX: &str = "vstore::";

/// Caller-supplied check applied to a decoded value before it is handed out.
pub type ValueCheck = Arc<dyn Fn(&Value) -> bool + Send + Sync>;

/// Configuration for a [`VersionedStore`](crate::store::VersionedStore) handle.
///
/// Invalid shapes are unrepresentable through the builder; the residual
/// runtime checks (non-empty key and prefix) run when the handle is created.
///
/// # Examples
///
/// ```
/// use versioned_store::config::StoreOptions;
///
/// let options = StoreOptions::builder()
///     .key("settings")
///     .version(2)
///     .build();
///
/// assert_eq!(options.version, 2);
/// assert!(options.auto_remove);
/// ```
#[derive(Clone, TypedBuilder)]
#[builder(doc)]
pub struct StoreOptions {
    /// Key the value is stored under (before prefixing).
    #[builder(setter(into))]
    pub key: String,

    /// The current schema version; values at other versions are migrated or
    /// discarded on read.
    pub version: Version,

    /// Migrations used to evolve stale envelopes. Without them any outdated
    /// record is treated as unusable.
    #[builder(default, setter(strip_option))]
    pub migrations: Option<MigrationSet>,

    /// Check applied to every value before `get` returns it, including
    /// freshly migrated ones.
    #[builder(default, setter(strip_option))]
    pub validate: Option<ValueCheck>,

    /// Key prefix separating this library's keys from everything else in the
    /// backend.
    #[builder(default = DEFAULT_PREFIX.to_string(), setter(into))]
    pub prefix: String,

    /// Remove records that fail unpacking, validation or migration.
    #[builder(default = true)]
    pub auto_remove: bool,

    /// Emit advisory warnings through the log facade.
    #[builder(default = true)]
    pub verbose: bool,
}

impl StoreOptions {
    pub(crate) fn validate_shape(&self) -> Result<(), ConfigError> {
        if self.key.is_empty() {
            return Err(ConfigError::EmptyKey);
        }
        if self.prefix.is_empty() {
            // an empty prefix would make remove_all() sweep foreign keys
            return Err(ConfigError::EmptyPrefix);
        }
        Ok(())
    }

    /// The fully prefixed backend key.
    pub fn storage_key(&self) -> String {
        format!("{}{}", self.prefix, self.key)
    }
}

impl fmt::Debug for StoreOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoreOptions")
            .field("key", &self.key)
            .field("version", &self.version)
            .field("migrations", &self.migrations)
            .field("validate", &self.validate.is_some())
            .field("prefix", &self.prefix)
            .field("auto_remove", &self.auto_remove)
            .field("verbose", &self.verbose)
            .finish()
    }
}
