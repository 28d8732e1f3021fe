//! Error type for the engine binary.

use thiserror::Error;

/// Failures surfaced by the engine binary.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration failed to load or parse.
    #[error("configuration error: {source}")]
    Config {
        /// The underlying configuration error.
        #[from]
        source: crate::config::ConfigError,
    },

    /// Seeding the sample atlas failed.
    #[error("store error: {source}")]
    Store {
        /// The underlying store error.
        #[from]
        source: ethnoatlas_store::StoreError,
    },

    /// A search operation failed.
    #[error("search error: {source}")]
    Search {
        /// The underlying search error.
        #[from]
        source: ethnoatlas_search::SearchError,
    },

    /// A query file could not be read.
    #[error("query file error: {source}")]
    QueryFile {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// A query file or result payload failed to (de)serialize.
    #[error("JSON error: {source}")]
    Json {
        /// The underlying JSON error.
        #[from]
        source: serde_json::Error,
    },
}
