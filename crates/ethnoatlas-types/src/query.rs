//! Query wire types for the faceted search.
//!
//! A [`SearchQuery`] carries up to four facets. A facet key that is present,
//! even with an empty entry list, marks its criterion category as active:
//! active categories participate in the final AND regardless of whether they
//! produced matches.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::ids::{CodeId, EnvironmentalVariableId, LanguageId, RegionId, VariableId};

/// The four criterion categories a query can activate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[serde(rename_all = "snake_case")]
pub enum Criterion {
    /// Linguistic classification facet.
    Language,
    /// Coded cultural variable facet.
    Cultural,
    /// Continuous environmental measurement facet.
    Environmental,
    /// Region polygon facet.
    Geographic,
}

/// One language classification selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct ClassificationFilter {
    /// Selected language id.
    pub id: LanguageId,
}

/// One cultural variable selection entry.
///
/// Categorical selections carry `id` (a code id). Continuous selections
/// carry either a `min`/`max` pair or, for the missing-data option, the
/// sentinel token in `code`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct VariableSelection {
    /// Variable the entry filters on.
    pub variable: VariableId,
    /// Selected code id, for categorical variables.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<CodeId>,
    /// Lower bound (exclusive), for continuous variables.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    /// Upper bound (exclusive), for continuous variables.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    /// Missing-data sentinel token, for continuous variables.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

/// Numeric predicate applied by an environmental filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[serde(rename_all = "lowercase")]
pub enum EnvOperator {
    /// `params[0] < v < params[1]`.
    InRange,
    /// `v > params[1] AND v < params[0]`. Reproduces the source system
    /// verbatim; only satisfiable when `params[1] < params[0]`.
    OutRange,
    /// `v > params[0]`.
    Gt,
    /// `v < params[0]`.
    Lt,
}

/// One environmental filter entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct EnvironmentalFilter {
    /// Environmental variable to filter on.
    pub id: EnvironmentalVariableId,
    /// Predicate to apply.
    pub operator: EnvOperator,
    /// Predicate parameters; arity depends on the operator.
    pub params: Vec<f64>,
}

/// One geographic region selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct RegionFilter {
    /// Selected region id.
    pub id: RegionId,
}

/// A faceted search request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct SearchQuery {
    /// Language classification facet entries.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language_classifications: Option<Vec<ClassificationFilter>>,
    /// Cultural variable facet entries.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variable_codes: Option<Vec<VariableSelection>>,
    /// Environmental facet entries.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environmental_filters: Option<Vec<EnvironmentalFilter>>,
    /// Geographic facet entries.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geographic_regions: Option<Vec<RegionFilter>>,
}

impl SearchQuery {
    /// The criterion categories activated by this query.
    ///
    /// Presence of the facet key decides activation, not whether the entry
    /// list is non-empty.
    pub fn active_criteria(&self) -> BTreeSet<Criterion> {
        let mut active = BTreeSet::new();
        if self.language_classifications.is_some() {
            active.insert(Criterion::Language);
        }
        if self.variable_codes.is_some() {
            active.insert(Criterion::Cultural);
        }
        if self.environmental_filters.is_some() {
            active.insert(Criterion::Environmental);
        }
        if self.geographic_regions.is_some() {
            active.insert(Criterion::Geographic);
        }
        active
    }
}
