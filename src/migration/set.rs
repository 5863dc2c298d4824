//! The validated, normalized migration collection and the `migrate` entry
//! point composing validation, path resolution and execution.

use crate::envelope::{Envelope, Value};
use crate::errors::{ConfigError, MigrateError};

use super::executor::execute;
use super::path::{normalize, path_bounds};
use super::step::{Migration, Version};

/// A migration list that has passed the untrusted-input gate.
///
/// Construction is the single runtime boundary for caller-supplied
/// configuration; past it every call site works with static types. The steps
/// are held stably sorted ascending by version, so path resolution is a pure
/// index walk over the stored sequence.
///
/// # Examples
///
/// ```
/// use versioned_store::migration::{Migration, MigrationSet};
/// use serde_json::json;
///
/// let set = MigrationSet::new(vec![
///     Migration::new(2, |v| Ok(json!([v, 2]))),
///     Migration::new(1, |v| Ok(json!([v, 1]))),
/// ])?;
///
/// assert_eq!(set.len(), 2);
/// assert!(set.resolve_path(1, 3).is_some());
/// assert!(set.resolve_path(1, 4).is_none());
/// # Ok::<(), versioned_store::errors::ConfigError>(())
/// ```
#[derive(Debug, Clone)]
pub struct MigrationSet {
    migrations: Vec<Migration>,
}

impl MigrationSet {
    /// Validate and normalize a caller-supplied migration list.
    ///
    /// The input is consumed; the stored sequence is a fresh stable ordering
    /// and the caller never observes a reordering side effect. Duplicate
    /// versions are tolerated (the first occurrence wins boundary lookups)
    /// but flagged through the log facade as likely configuration mistakes.
    pub fn new(migrations: Vec<Migration>) -> Result<Self, ConfigError> {
        Self::check(&migrations)?;

        let ordered = normalize(migrations);

        for pair in ordered.windows(2) {
            if pair[0].version == pair[1].version {
                log::warn!(
                    "duplicate migration for version {}; the earlier entry will be used",
                    pair[0].version
                );
            }
        }

        Ok(Self { migrations: ordered })
    }

    /// Validate a migration list ahead of use, without consuming it.
    ///
    /// Useful at startup so configuration mistakes surface before the first
    /// stale record is read.
    pub fn check(migrations: &[Migration]) -> Result<(), ConfigError> {
        if migrations.is_empty() {
            return Err(ConfigError::EmptyMigrations);
        }
        Ok(())
    }

    /// The normalized steps, sorted ascending by version.
    pub fn migrations(&self) -> &[Migration] {
        &self.migrations
    }

    /// Number of steps in the set.
    pub fn len(&self) -> usize {
        self.migrations.len()
    }

    /// Always false; the gate rejects empty lists.
    pub fn is_empty(&self) -> bool {
        self.migrations.is_empty()
    }

    /// Versions present in the set, ascending.
    pub fn versions(&self) -> impl Iterator<Item = Version> + '_ {
        self.migrations.iter().map(|m| m.version)
    }

    /// The ordered sub-sequence spanning `from` to `to`, if an unbroken
    /// version chain exists.
    ///
    /// This is the inspection primitive: it resolves without executing
    /// anything, so tooling can report the path a stale record would take.
    pub fn resolve_path(&self, from: Version, to: Version) -> Option<&[Migration]> {
        let (start, end) = path_bounds(&self.migrations, from, to)?;
        Some(&self.migrations[start..=end])
    }

    /// Bring `current` to version `to` through this set.
    ///
    /// Exactly the resolved sub-sequence is executed; steps outside the path
    /// are never invoked even when the set contains them.
    pub fn migrate(&self, current: Envelope, to: Version) -> Result<Value, MigrateError> {
        let steps = self
            .resolve_path(current.version, to)
            .ok_or(MigrateError::NoPath {
                from: current.version,
                to,
            })?;

        execute(steps, current.value)
    }
}

/// Migrate a decoded record to the target version through an untrusted
/// migration list.
///
/// This is the one-call composition: gate the list, resolve the path from
/// `current.version` to `to`, and run the pipeline over `current.value`.
/// Every failure mode collapses to an `Err` carrying no value; the caller's
/// list is left untouched. Callers holding a long-lived [`MigrationSet`]
/// should prefer [`MigrationSet::migrate`], which skips re-normalization.
pub fn migrate(
    migrations: &[Migration],
    current: Envelope,
    to: Version,
) -> Result<Value, MigrateError> {
    let set = MigrationSet::new(migrations.to_vec())?;
    set.migrate(current, to)
}
