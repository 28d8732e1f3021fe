//! Result wire types: the finalized society set, projected trees, and the
//! legend payloads for continuous variables.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::ids::{LanguageTreeId, VariableId};
use crate::records::{
    CodeDescription, CodedValue, EnvironmentalValue, EnvironmentalVariable, GeographicRegion,
    Language, Society, VariableDescription,
};

/// One cultural variable match held as evidence for a society.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct CulturalMatch {
    /// Variable the value belongs to.
    pub variable: VariableDescription,
    /// Codes the query selected for this variable (restricted set).
    pub codes: Vec<CodeDescription>,
    /// The matching coded value.
    pub value: CodedValue,
}

/// One environmental measurement match held as evidence for a society.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct EnvironmentalMatch {
    /// Variable the measurement belongs to.
    pub variable: EnvironmentalVariable,
    /// The matching measurement.
    pub value: EnvironmentalValue,
}

/// A surviving society together with all evidence recorded for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct SocietyResult {
    /// The society record.
    pub society: Society,
    /// Language matches (language classification facet).
    pub languages: Vec<Language>,
    /// Cultural variable matches.
    pub cultural_values: Vec<CulturalMatch>,
    /// Environmental matches.
    pub environmental_values: Vec<EnvironmentalMatch>,
    /// Region matches.
    pub regions: Vec<GeographicRegion>,
}

/// A language tree rewritten to the matched languages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct ProjectedTree {
    /// Tree identifier.
    pub id: LanguageTreeId,
    /// Tree name (scheme-encoding, unchanged).
    pub name: String,
    /// Pruned newick text.
    pub newick: String,
}

/// The full response to a faceted search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct SearchResults {
    /// Societies that matched every active criterion category.
    pub societies: Vec<SocietyResult>,
    /// Trees projected onto the matched languages.
    pub trees: Vec<ProjectedTree>,
}

impl SearchResults {
    /// Whether no society survived the query.
    pub fn is_empty(&self) -> bool {
        self.societies.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Legend payloads
// ---------------------------------------------------------------------------

/// The single legend entry collapsing all non-numeric coded values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct MissingDataEntry {
    /// The non-numeric code token as stored (e.g. `"NA"`).
    pub code: String,
    /// Description from the backing code record.
    pub description: String,
    /// Variable the entry belongs to.
    pub variable: VariableId,
}

/// One of the five equal-width legend bins for a continuous variable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct RangeBin {
    /// Bin id, 0 through 4 ascending.
    pub code: u8,
    /// Human-readable `"lower - upper"` description.
    pub description: String,
    /// Inclusive lower bound.
    pub min: f64,
    /// Exclusive upper bound (the last bin's upper equals the observed max).
    pub max: f64,
    /// Variable the bin belongs to.
    pub variable: VariableId,
}

/// Legend data for one continuous variable: an optional missing-data entry
/// followed by the bins in ascending order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct ContinuousLegend {
    /// Missing-data entry, present when any non-numeric value was seen.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub missing: Option<MissingDataEntry>,
    /// Equal-width bins, empty when the variable had no numeric values.
    pub bins: Vec<RangeBin>,
}

/// Observed value range of one environmental variable.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct ValueRange {
    /// Smallest tracked value (naive scan, seeded at zero).
    pub min: f64,
    /// Largest tracked value (naive scan, seeded at zero).
    pub max: f64,
}
