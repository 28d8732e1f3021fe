//! Shared type definitions for the EthnoAtlas search engine.
//!
//! This crate is the single source of truth for all types used across the
//! EthnoAtlas workspace. Query and result types flow downstream to
//! `TypeScript` via `ts-rs` for the client's map and legend rendering.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe UUID wrappers for all record identifiers
//! - [`geo`] -- Coordinate and polygon primitives with the containment test
//! - [`records`] -- Domain records as held by the external data store
//! - [`query`] -- Faceted search request types
//! - [`results`] -- Search response and legend payload types

pub mod geo;
pub mod ids;
pub mod query;
pub mod records;
pub mod results;

// Re-export all public types at crate root for convenience.
pub use geo::{GeoPoint, GeoPolygon};
pub use ids::{
    CodeId, CodedValueId, EnvironmentalValueId, EnvironmentalVariableId, LanguageFamilyId,
    LanguageId, LanguageTreeId, RegionId, SocietyId, SourceId, VariableId,
};
pub use query::{
    ClassificationFilter, Criterion, EnvOperator, EnvironmentalFilter, RegionFilter, SearchQuery,
    VariableSelection,
};
pub use records::{
    CodeDescription, CodedValue, DataType, EnvironmentalValue, EnvironmentalVariable,
    GeographicRegion, LabelScheme, Language, LanguageFamily, LanguageTree, Society, Source,
    VariableDescription,
};
pub use results::{
    ContinuousLegend, CulturalMatch, EnvironmentalMatch, MissingDataEntry, ProjectedTree,
    RangeBin, SearchResults, SocietyResult, ValueRange,
};
