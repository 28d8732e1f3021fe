//! Newick tree handling for language phylogenies.
//!
//! Phylogenetic language trees arrive as raw newick text. This crate parses
//! them, prunes them down to a chosen set of labels while preserving branch
//! lengths, and serializes them back. It is pure computation: no I/O, no
//! async, no logging.
//!
//! # Architecture
//!
//! - [`tree`] -- The [`NewickTree`]/[`NewickNode`] structure, traversal
//!   helpers, and newick serialization.
//! - [`parse`] -- Recursive-descent reader for newick text.
//! - [`prune`] -- Prune-to-label-set with branch-length preservation.
//! - [`error`] -- [`NewickError`].
//!
//! # Pruning
//!
//! Pruning keeps the minimal topology connecting the target labels: the
//! targets themselves, branching points between them, and the root. Branch
//! lengths of collapsed unary chains accumulate onto the surviving child,
//! so distances between retained nodes never change. Pruning twice with the
//! same label set yields byte-identical newick text.
//!
//! # Usage
//!
//! ```
//! use std::collections::BTreeSet;
//! use ethnoatlas_phylo::NewickTree;
//!
//! let mut tree = NewickTree::parse("((haw:1,mri:1)poly:2,smo:3)root;")?;
//! let keep: BTreeSet<String> =
//!     ["haw", "mri"].into_iter().map(String::from).collect();
//! tree.prune(&keep)?;
//! assert_eq!(tree.to_newick(), "((haw:1,mri:1)poly:2);");
//! # Ok::<(), ethnoatlas_phylo::NewickError>(())
//! ```

pub mod error;
pub mod parse;
pub mod prune;
pub mod tree;

pub use error::NewickError;
pub use tree::{NewickNode, NewickTree};
