use thiserror::Error;

use crate::migration::Version;

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Migrate(#[from] MigrateError),
    #[error("Encoding Error: {0}")]
    Encode(#[from] serde_json::Error),
    #[cfg(feature = "sled")]
    #[error("Sled Error: {0}")]
    Sled(#[from] sled::Error),
}

/// Rejections at the untrusted-configuration boundary.
///
/// Structural shape checks live in the type system; what remains at runtime
/// is what types cannot express.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("migration list is empty; an empty list can never bridge a version gap")]
    EmptyMigrations,
    #[error("store key must not be empty")]
    EmptyKey,
    #[error("key prefix must not be empty")]
    EmptyPrefix,
}

/// Why a migration attempt failed.
///
/// Every variant means the same thing to the persistence layer: the stored
/// value could not be brought to the current version and no partial result
/// exists. The distinction is kept for logging and diagnostics only.
#[derive(Error, Debug)]
pub enum MigrateError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("no migration path from version {from} to {to}")]
    NoPath { from: Version, to: Version },
    #[error("migration validator at version {version} rejected the value")]
    StepValidation { version: Version },
    #[error("migration validator at version {version} faulted: {source}")]
    ValidatorFault {
        version: Version,
        #[source]
        source: anyhow::Error,
    },
    #[error("migration step at version {version} faulted: {source}")]
    StepExecution {
        version: Version,
        #[source]
        source: anyhow::Error,
    },
}
