//! Error types for newick parsing and pruning.

use thiserror::Error;

/// Errors produced while reading or rewriting a newick tree.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NewickError {
    /// The input contained no tree at all.
    #[error("empty newick input")]
    Empty,

    /// The input violated newick syntax.
    #[error("newick syntax error at offset {position}: {message}")]
    Syntax {
        /// Character offset where the reader gave up.
        position: usize,
        /// What the reader expected to see.
        message: String,
    },

    /// A prune target label matched no node in the tree.
    #[error("label not present in tree: {0}")]
    LabelNotFound(String),
}
