//! Errors surfaced by atlas storage backends.

use thiserror::Error;
use uuid::Uuid;

/// Failures raised while loading records into a store or querying them back.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A record with this id was already inserted.
    #[error("duplicate {kind} record: {id}")]
    Duplicate {
        /// Record kind, e.g. `"society"` or `"variable"`.
        kind: &'static str,
        /// The colliding identifier.
        id: Uuid,
    },

    /// A record referenced another record that the store has never seen.
    #[error("{kind} record {id} references unknown {field}")]
    UnknownReference {
        /// Kind of the record being inserted.
        kind: &'static str,
        /// Identifier of the record being inserted.
        id: Uuid,
        /// The dangling field, e.g. `"language"`.
        field: &'static str,
    },

    /// The backend failed for reasons outside the data itself.
    #[error("storage backend error: {0}")]
    Backend(String),
}
