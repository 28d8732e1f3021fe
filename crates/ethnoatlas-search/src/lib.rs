//! Faceted search over the cross-cultural atlas.
//!
//! A query names up to four facets: language classifications, coded
//! cultural variables, continuous environmental measurements, and
//! geographic regions. Each present facet is evaluated independently into
//! (society, evidence) hits, the hits are intersected across the active
//! categories (AND of ORs), and the phylogenetic trees covering the
//! survivors' languages are pruned down to exactly those languages.
//!
//! # Architecture
//!
//! - [`criteria`] -- The four independent facet evaluators.
//! - [`aggregate`] -- [`ResultAggregator`], the accumulate-then-finalize
//!   intersection state machine.
//! - [`trees`] -- Tree projection onto the matched language set.
//! - [`legend`] -- Equal-width binning and the environmental min/max scan.
//! - [`engine`] -- [`SearchEngine`], the facade tying it all together.
//! - [`error`] -- [`SearchError`].
//!
//! # Usage
//!
//! ```no_run
//! use ethnoatlas_search::SearchEngine;
//! use ethnoatlas_store::sample_atlas;
//! use ethnoatlas_types::{RegionFilter, SearchQuery};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let (atlas, ids) = sample_atlas()?;
//! let engine = SearchEngine::new(atlas);
//! let query = SearchQuery {
//!     geographic_regions: Some(vec![RegionFilter { id: ids.western_polynesia }]),
//!     ..SearchQuery::default()
//! };
//! let results = engine.search(&query).await?;
//! # Ok(())
//! # }
//! ```

pub mod aggregate;
pub mod criteria;
pub mod engine;
pub mod error;
pub mod legend;
pub mod trees;

pub use aggregate::ResultAggregator;
pub use engine::SearchEngine;
pub use error::SearchError;
pub use trees::project_trees;
