//! Errors surfaced by the search engine.

use ethnoatlas_store::StoreError;
use ethnoatlas_types::{Criterion, VariableId};
use thiserror::Error;

/// Failures raised while evaluating a query or building a legend.
#[derive(Debug, Error)]
pub enum SearchError {
    /// The storage backend failed.
    #[error("store error: {source}")]
    Store {
        /// The underlying store error.
        #[from]
        source: StoreError,
    },

    /// The query's sole criterion category had entries and none of them
    /// resolved to known records.
    #[error("no entries of the {category:?} criterion resolved")]
    CriterionNotFound {
        /// The single active category.
        category: Criterion,
    },

    /// A legend was requested for a variable that does not exist.
    #[error("variable {id} not found")]
    VariableNotFound {
        /// The unknown variable id.
        id: VariableId,
    },

    /// The code ids supplied for a variable selection do not exactly match
    /// the codes of that variable. This is a caller bug, not a data issue.
    #[error("supplied code set does not match the codes of variable {variable}")]
    CodeSetMismatch {
        /// The variable whose code set was violated.
        variable: VariableId,
    },

    /// Evidence was added to an aggregator that has already been finalized.
    #[error("result aggregator is already finalized")]
    AlreadyFinalized,

    /// Results were requested from an aggregator that was never finalized.
    #[error("result aggregator has not been finalized")]
    NotFinalized,
}
