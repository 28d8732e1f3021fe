//! Domain records for the cross-cultural atlas.
//!
//! These mirror the records held by the external data store: societies and
//! their sources, languages with their classification and phylogenetic
//! trees, coded cultural variables, environmental measurements, and region
//! polygons. The search core only ever reads them.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::geo::{GeoPoint, GeoPolygon};
use crate::ids::{
    CodeId, CodedValueId, EnvironmentalValueId, EnvironmentalVariableId, LanguageFamilyId,
    LanguageId, LanguageTreeId, RegionId, SocietyId, SourceId, VariableId,
};

// ---------------------------------------------------------------------------
// Societies & sources
// ---------------------------------------------------------------------------

/// One culture/population record, the primary subject of every query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Society {
    /// Store identifier.
    pub id: SocietyId,
    /// Stable external id from the originating dataset (e.g. `"Aa1"`).
    pub ext_id: String,
    /// Cross-dataset id linking duplicate descriptions of one culture.
    pub xd_id: String,
    /// Preferred society name.
    pub name: String,
    /// Alternate names, comma-separated as loaded.
    pub alternate_names: String,
    /// Focal year of the ethnographic description, free-form text.
    pub focal_year: String,
    /// Language spoken by the society, when classified.
    pub language: Option<LanguageId>,
    /// Dataset source the record was loaded from.
    pub source: Option<SourceId>,
    /// Point location of the society.
    pub location: GeoPoint,
}

/// A bibliographic source for societies and variables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Source {
    /// Store identifier.
    pub id: SourceId,
    /// Short dataset name (e.g. `"Ethnographic Atlas"`).
    pub name: String,
    /// Author or editor line.
    pub author: String,
    /// Publication year, free-form text.
    pub year: String,
    /// Full citation.
    pub reference: String,
}

// ---------------------------------------------------------------------------
// Languages, families, trees
// ---------------------------------------------------------------------------

/// A language, identified by an ISO 639-3 code and/or a Glottolog code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Language {
    /// Store identifier.
    pub id: LanguageId,
    /// Language name.
    pub name: String,
    /// ISO 639-3 code, when assigned.
    pub iso_code: Option<String>,
    /// Glottolog code, when assigned.
    pub glotto_code: Option<String>,
    /// Classification family, when known.
    pub family: Option<LanguageFamilyId>,
}

impl Language {
    /// The identifier this language carries under the given leaf-label
    /// scheme, if any.
    pub fn code_for(&self, scheme: LabelScheme) -> Option<&str> {
        match scheme {
            LabelScheme::Iso => self.iso_code.as_deref(),
            LabelScheme::Glotto => self.glotto_code.as_deref(),
        }
    }
}

/// A language classification family.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct LanguageFamily {
    /// Store identifier.
    pub id: LanguageFamilyId,
    /// Classification scheme token (e.g. `"G"` for Glottolog).
    pub scheme: String,
    /// Family name.
    pub name: String,
}

/// Which identifier scheme a tree's leaf labels use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[serde(rename_all = "lowercase")]
pub enum LabelScheme {
    /// Leaves are ISO 639-3 codes.
    Iso,
    /// Leaves are Glottolog codes.
    Glotto,
}

impl LabelScheme {
    /// Derive the scheme from a tree's name. A name containing `"glotto"`
    /// marks a Glottolog-labelled tree; anything else is ISO-labelled.
    pub fn from_tree_name(name: &str) -> Self {
        if name.contains("glotto") {
            Self::Glotto
        } else {
            Self::Iso
        }
    }
}

/// A named phylogenetic tree in raw newick text form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct LanguageTree {
    /// Store identifier.
    pub id: LanguageTreeId,
    /// Tree name; encodes the leaf-label scheme (see [`LabelScheme`]).
    pub name: String,
    /// Raw newick text as loaded.
    pub newick: String,
    /// Languages associated with this tree (plain many-to-many id list).
    pub languages: Vec<LanguageId>,
}

impl LanguageTree {
    /// The leaf-label scheme encoded in this tree's name.
    pub fn label_scheme(&self) -> LabelScheme {
        LabelScheme::from_tree_name(&self.name)
    }
}

// ---------------------------------------------------------------------------
// Cultural variables
// ---------------------------------------------------------------------------

/// Whether a cultural variable takes discrete codes or numeric values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    /// Discrete coded values drawn from the variable's code list.
    Categorical,
    /// Numeric values stored as text, plus the `"NA"` sentinel.
    Continuous,
}

/// A cultural variable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct VariableDescription {
    /// Store identifier.
    pub id: VariableId,
    /// Short label (e.g. `"EA070"`).
    pub label: String,
    /// Human-readable variable name.
    pub name: String,
    /// Categorical or continuous.
    pub data_type: DataType,
    /// Dataset source, when known.
    pub source: Option<SourceId>,
}

impl VariableDescription {
    /// Whether the variable holds continuous numeric values.
    pub const fn is_continuous(&self) -> bool {
        matches!(self.data_type, DataType::Continuous)
    }
}

/// One code of a categorical variable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct CodeDescription {
    /// Store identifier.
    pub id: CodeId,
    /// Variable the code belongs to.
    pub variable: VariableId,
    /// Code token as it appears in coded values (e.g. `"3"`, `"NA"`).
    pub code: String,
    /// Human-readable meaning of the code.
    pub description: String,
}

/// One coded observation of a variable for one society.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct CodedValue {
    /// Store identifier.
    pub id: CodedValueId,
    /// Variable observed.
    pub variable: VariableId,
    /// Society observed.
    pub society: SocietyId,
    /// Code record backing this value, when one exists.
    pub code: Option<CodeId>,
    /// Raw value text: numeric text, a code token, or the sentinel `"NA"`.
    pub coded_value: String,
}

// ---------------------------------------------------------------------------
// Environmental measurements
// ---------------------------------------------------------------------------

/// A continuous environmental variable (temperature, rainfall, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct EnvironmentalVariable {
    /// Store identifier.
    pub id: EnvironmentalVariableId,
    /// Variable name.
    pub name: String,
    /// Measurement units (e.g. `"Celsius"`).
    pub units: String,
}

/// One numeric environmental measurement for one society.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct EnvironmentalValue {
    /// Store identifier.
    pub id: EnvironmentalValueId,
    /// Variable measured.
    pub variable: EnvironmentalVariableId,
    /// Society measured.
    pub society: SocietyId,
    /// Measured value.
    pub value: f64,
}

// ---------------------------------------------------------------------------
// Geographic regions
// ---------------------------------------------------------------------------

/// A named region polygon societies can fall inside.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct GeographicRegion {
    /// Store identifier.
    pub id: RegionId,
    /// Region name.
    pub name: String,
    /// Continent the region belongs to.
    pub continent: String,
    /// Region geometry.
    pub geometry: GeoPolygon,
}
