//! Read-side traits implemented by atlas storage backends.
//!
//! Search code depends on these traits rather than on a concrete store, so
//! the in-memory reference backend and any future database-backed one are
//! interchangeable behind the same seam.

use async_trait::async_trait;
use ethnoatlas_types::{
    CodeDescription, CodeId, CodedValue, EnvironmentalValue, EnvironmentalVariable,
    EnvironmentalVariableId, GeoPolygon, GeographicRegion, Language, LanguageId, LanguageTree,
    LanguageTreeId, RegionId, Society, SocietyId, VariableDescription, VariableId,
};

use crate::error::StoreError;

/// Read access to societies, languages, variables, and environmental data.
///
/// Every method returns records in a deterministic order so that search
/// output is reproducible across runs.
#[async_trait]
pub trait AtlasStore: Send + Sync {
    /// Look up a single language. Returns `None` when the id is unknown.
    async fn language(&self, id: LanguageId) -> Result<Option<Language>, StoreError>;

    /// Resolve a batch of language ids, silently dropping unknown ones.
    async fn languages_by_ids(&self, ids: &[LanguageId]) -> Result<Vec<Language>, StoreError>;

    /// All societies whose mother tongue is one of the given languages.
    async fn societies_for_languages(
        &self,
        ids: &[LanguageId],
    ) -> Result<Vec<Society>, StoreError>;

    /// Resolve a batch of society ids, silently dropping unknown ones.
    async fn societies_by_ids(&self, ids: &[SocietyId]) -> Result<Vec<Society>, StoreError>;

    /// Look up a single cultural variable.
    async fn variable(&self, id: VariableId) -> Result<Option<VariableDescription>, StoreError>;

    /// Code descriptions attached to a cultural variable, ordered by code label.
    async fn codes_for_variable(&self, id: VariableId)
        -> Result<Vec<CodeDescription>, StoreError>;

    /// Every coded observation recorded against a cultural variable.
    async fn coded_values_for_variable(
        &self,
        id: VariableId,
    ) -> Result<Vec<CodedValue>, StoreError>;

    /// Coded observations for a variable restricted to a set of code ids.
    async fn coded_values_for_codes(
        &self,
        variable: VariableId,
        codes: &[CodeId],
    ) -> Result<Vec<CodedValue>, StoreError>;

    /// Look up a single environmental variable.
    async fn environmental_variable(
        &self,
        id: EnvironmentalVariableId,
    ) -> Result<Option<EnvironmentalVariable>, StoreError>;

    /// Every measurement recorded against an environmental variable.
    async fn environmental_values_for_variable(
        &self,
        id: EnvironmentalVariableId,
    ) -> Result<Vec<EnvironmentalValue>, StoreError>;

    /// Look up a single geographic region.
    async fn region(&self, id: RegionId) -> Result<Option<GeographicRegion>, StoreError>;

    /// Societies whose recorded location falls inside the polygon, boundary
    /// included.
    async fn societies_in_polygon(
        &self,
        polygon: &GeoPolygon,
    ) -> Result<Vec<Society>, StoreError>;
}

/// Read access to phylogenetic trees.
#[async_trait]
pub trait TreeStore: Send + Sync {
    /// Every tree that covers at least one of the given languages, each tree
    /// reported once no matter how many of its languages matched.
    async fn trees_for_languages(
        &self,
        ids: &[LanguageId],
    ) -> Result<Vec<LanguageTree>, StoreError>;

    /// Look up a single tree.
    async fn tree(&self, id: LanguageTreeId) -> Result<Option<LanguageTree>, StoreError>;
}
