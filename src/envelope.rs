//! The persisted `{version, value}` envelope and its JSON codec.
//!
//! Raw text in the backend is owned by this module; the migration engine only
//! ever sees already-decoded envelopes. Both directions of the codec convert
//! failure into `None` so no serialization error crosses the storage
//! boundary.

use serde::{Deserialize, Serialize};

use crate::migration::Version;

/// Opaque payload threaded through the store and the migration pipeline.
pub type Value = serde_json::Value;

/// A value paired with the schema version it was written at.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    pub version: Version,
    pub value: Value,
}

impl Envelope {
    pub fn new(version: Version, value: Value) -> Self {
        Self { version, value }
    }
}

/// Encode a value into envelope text for the backend.
///
/// Returns `None` if the envelope cannot be serialized.
pub fn pack(version: Version, value: &Value) -> Option<String> {
    let envelope = Envelope {
        version,
        value: value.clone(),
    };

    match serde_json::to_string(&envelope) {
        Ok(raw) => Some(raw),
        Err(err) => {
            log::warn!("failed to encode envelope at version {version}: {err}");
            None
        }
    }
}

/// Decode envelope text read from the backend.
///
/// Returns `None` when the text is not valid JSON or does not have the
/// envelope shape. With `verbose` set, a shape mismatch logs a warning since
/// it usually means the key was written by something other than this library.
pub fn unpack(raw: &str, verbose: bool) -> Option<Envelope> {
    let parsed: serde_json::Value = serde_json::from_str(raw).ok()?;

    match serde_json::from_value(parsed) {
        Ok(envelope) => Some(envelope),
        Err(err) => {
            if verbose {
                log::warn!(
                    "stored data does not look like a versioned envelope \
                     (was the key written by something else?): {err}"
                );
            }
            None
        }
    }
}
