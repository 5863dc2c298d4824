//! Caller-authored migration steps.

use std::fmt;
use std::sync::Arc;

use crate::envelope::Value;

/// Schema version number.
pub type Version = u32;

/// Transform applied to a value when upgrading past a version.
///
/// An `Err` from the callable is a fault and always surfaces as a failed
/// migration, never as a panic or a partially transformed value.
pub type UpFn = Arc<dyn Fn(Value) -> anyhow::Result<Value> + Send + Sync>;

/// Optional precondition checked against the value before its transform runs.
///
/// Returning `Ok(false)` or `Err` both abort the pipeline.
pub type ValidateFn = Arc<dyn Fn(&Value) -> anyhow::Result<bool> + Send + Sync>;

/// A single-version schema evolution step.
///
/// A migration with `version = n` transforms a value that is currently at
/// exactly version `n` and advances it to `n + 1`. Steps are authored once as
/// static configuration and handed to the engine read-only.
///
/// # Examples
///
/// ```
/// use versioned_store::migration::Migration;
/// use serde_json::json;
///
/// let step = Migration::new(1, |value| {
///     Ok(json!({ "name": value, "active": true }))
/// })
/// .with_validate(|value| Ok(value.is_string()));
///
/// assert_eq!(step.version, 1);
/// assert!(step.has_validator());
/// ```
#[derive(Clone)]
pub struct Migration {
    /// The schema version this step transforms *from*.
    pub version: Version,
    pub(crate) up: UpFn,
    pub(crate) validate: Option<ValidateFn>,
}

impl Migration {
    /// Create a migration step for `version` with the given transform.
    pub fn new<F>(version: Version, up: F) -> Self
    where
        F: Fn(Value) -> anyhow::Result<Value> + Send + Sync + 'static,
    {
        Self {
            version,
            up: Arc::new(up),
            validate: None,
        }
    }

    /// Attach a precondition that gates whether the transform is applied.
    pub fn with_validate<F>(mut self, validate: F) -> Self
    where
        F: Fn(&Value) -> anyhow::Result<bool> + Send + Sync + 'static,
    {
        self.validate = Some(Arc::new(validate));
        self
    }

    /// Whether this step declares a precondition.
    pub fn has_validator(&self) -> bool {
        self.validate.is_some()
    }
}

impl fmt::Debug for Migration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Migration")
            .field("version", &self.version)
            .field("up", &"<fn>")
            .field("validate", &self.validate.is_some())
            .finish()
    }
}
