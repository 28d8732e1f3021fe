//! Data access for the atlas: storage traits, the in-memory reference
//! backend, and the seeded sample dataset.
//!
//! Search code is written against the [`AtlasStore`] and [`TreeStore`]
//! traits; [`MemoryAtlas`] implements both and is what the engine binary and
//! the test suites run on.
//!
//! # Modules
//!
//! - [`error`] -- Error types for store operations.
//! - [`traits`] -- [`AtlasStore`] and [`TreeStore`], the read seams the
//!   search core depends on.
//! - [`memory`] -- [`MemoryAtlas`], a `BTreeMap`-backed backend with
//!   referential checks on insert and deterministic query order.
//! - [`sample`] -- A small cross-linked dataset for the engine binary and
//!   the tests, returned together with [`SampleAtlasIds`].
//!
//! [`AtlasStore`]: traits::AtlasStore
//! [`TreeStore`]: traits::TreeStore
//! [`MemoryAtlas`]: memory::MemoryAtlas
//! [`SampleAtlasIds`]: sample::SampleAtlasIds

pub mod error;
pub mod memory;
pub mod sample;
pub mod traits;

// Re-export primary types at crate root.
pub use error::StoreError;
pub use memory::MemoryAtlas;
pub use sample::{SampleAtlasIds, sample_atlas};
pub use traits::{AtlasStore, TreeStore};
