//! Seeded sample atlas.
//!
//! Loads a small but fully cross-linked dataset: 7 societies across
//! Polynesia, Melanesia, Africa, and South Asia, 6 languages in 2 families,
//! 3 phylogenetic trees (one Glottolog-labelled, two ISO-labelled), a
//! categorical and a continuous cultural variable, two environmental
//! variables, and 3 region polygons. The engine binary and the search test
//! suite both run against this data.

use ethnoatlas_types::{
    CodeDescription, CodeId, CodedValue, CodedValueId, DataType, EnvironmentalValue,
    EnvironmentalValueId, EnvironmentalVariable, EnvironmentalVariableId, GeoPoint, GeoPolygon,
    GeographicRegion, Language, LanguageFamily, LanguageFamilyId, LanguageId, LanguageTree,
    LanguageTreeId, RegionId, Society, SocietyId, Source, SourceId, VariableDescription,
    VariableId,
};

use crate::error::StoreError;
use crate::memory::MemoryAtlas;

/// Helper to register a [`Language`].
fn add_language(
    atlas: &mut MemoryAtlas,
    id: LanguageId,
    name: &str,
    iso: &str,
    glotto: &str,
    family: Option<LanguageFamilyId>,
) -> Result<(), StoreError> {
    atlas.insert_language(Language {
        id,
        name: name.to_owned(),
        iso_code: Some(iso.to_owned()),
        glotto_code: Some(glotto.to_owned()),
        family,
    })
}

/// Helper to register a [`Society`], returning its generated id.
/// `identity` is `(ext_id, xd_id, name)`.
fn add_society(
    atlas: &mut MemoryAtlas,
    identity: (&str, &str, &str),
    focal_year: &str,
    language: Option<LanguageId>,
    source: SourceId,
    location: GeoPoint,
) -> Result<SocietyId, StoreError> {
    let (ext_id, xd_id, name) = identity;
    let id = SocietyId::new();
    atlas.insert_society(Society {
        id,
        ext_id: ext_id.to_owned(),
        xd_id: xd_id.to_owned(),
        name: name.to_owned(),
        alternate_names: String::new(),
        focal_year: focal_year.to_owned(),
        language,
        source: Some(source),
        location,
    })?;
    Ok(id)
}

/// Helper to register a [`CodeDescription`].
fn add_code(
    atlas: &mut MemoryAtlas,
    id: CodeId,
    variable: VariableId,
    code: &str,
    description: &str,
) -> Result<(), StoreError> {
    atlas.insert_code(CodeDescription {
        id,
        variable,
        code: code.to_owned(),
        description: description.to_owned(),
    })
}

/// Helper to register a [`CodedValue`].
fn add_coded_value(
    atlas: &mut MemoryAtlas,
    variable: VariableId,
    society: SocietyId,
    code: Option<CodeId>,
    value: &str,
) -> Result<(), StoreError> {
    atlas.insert_coded_value(CodedValue {
        id: CodedValueId::new(),
        variable,
        society,
        code,
        coded_value: value.to_owned(),
    })
}

/// Helper to register an [`EnvironmentalValue`].
fn add_measurement(
    atlas: &mut MemoryAtlas,
    variable: EnvironmentalVariableId,
    society: SocietyId,
    value: f64,
) -> Result<(), StoreError> {
    atlas.insert_environmental_value(EnvironmentalValue {
        id: EnvironmentalValueId::new(),
        variable,
        society,
        value,
    })
}

/// Helper to build an axis-aligned rectangular [`GeoPolygon`].
fn rect(west: f64, south: f64, east: f64, north: f64) -> GeoPolygon {
    GeoPolygon::new(vec![
        GeoPoint::new(west, south),
        GeoPoint::new(east, south),
        GeoPoint::new(east, north),
        GeoPoint::new(west, north),
    ])
}

/// Identifiers for the sample records that queries reference, returned
/// alongside the loaded atlas so that callers can build searches against
/// specific languages, variables, codes, and regions.
#[derive(Debug, Clone)]
pub struct SampleAtlasIds {
    // --- Languages ---
    /// Hawaiian (ISO `haw`, Glottolog `hawa1245`).
    pub hawaiian: LanguageId,
    /// Maori (ISO `mri`, Glottolog `maor1246`).
    pub maori: LanguageId,
    /// Samoan (ISO `smo`, Glottolog `samo1305`).
    pub samoan: LanguageId,
    /// Fijian (ISO `fij`, Glottolog `fiji1243`).
    pub fijian: LanguageId,
    /// Ju|'hoan (ISO `ktz`, Glottolog `juho1239`).
    pub juhoan: LanguageId,
    /// Hadza (ISO `hts`, Glottolog `hadz1240`).
    pub hadza: LanguageId,

    // --- Phylogenies ---
    /// Glottolog-labelled Austronesian tree; Fijian appears as an internal
    /// node with two dialect leaves.
    pub austronesian_glotto_tree: LanguageTreeId,
    /// ISO-labelled Austronesian tree.
    pub austronesian_iso_tree: LanguageTreeId,
    /// ISO-labelled tree covering the two African forager languages.
    pub forager_tree: LanguageTreeId,

    // --- Cultural variables ---
    /// EA070 "Slavery: type", categorical.
    pub slavery: VariableId,
    /// B004 "Population density", continuous.
    pub population_density: VariableId,
    /// Slavery code 1: absence of slavery.
    pub slavery_absent: CodeId,
    /// Slavery code 2: incipient slavery.
    pub slavery_incipient: CodeId,
    /// Slavery code 3: slavery reported but type not identified.
    pub slavery_reported: CodeId,
    /// Slavery code 4: hereditary slavery.
    pub slavery_hereditary: CodeId,
    /// Slavery code NA: missing data.
    pub slavery_missing: CodeId,
    /// Population density code NA: missing data.
    pub population_density_missing: CodeId,

    // --- Environmental variables ---
    /// Annual mean temperature, Celsius.
    pub temperature: EnvironmentalVariableId,
    /// Annual precipitation, millimeters.
    pub precipitation: EnvironmentalVariableId,

    // --- Regions ---
    /// Rectangle around Samoa and the Lau islands.
    pub western_polynesia: RegionId,
    /// Rectangle around the Lake Eyasi basin.
    pub eastern_africa: RegionId,
    /// Rectangle around the Kalahari.
    pub southern_africa: RegionId,
}

/// Load the sample atlas.
///
/// Returns the populated [`MemoryAtlas`] and the [`SampleAtlasIds`] for
/// referencing specific records in queries.
///
/// # Errors
///
/// Returns [`StoreError`] if the dataset fails referential checks (should
/// not happen with valid hard-coded data).
#[allow(clippy::too_many_lines)]
pub fn sample_atlas() -> Result<(MemoryAtlas, SampleAtlasIds), StoreError> {
    let mut atlas = MemoryAtlas::new();

    // Generate all query-facing ids up front.
    let ids = SampleAtlasIds {
        hawaiian: LanguageId::new(),
        maori: LanguageId::new(),
        samoan: LanguageId::new(),
        fijian: LanguageId::new(),
        juhoan: LanguageId::new(),
        hadza: LanguageId::new(),
        austronesian_glotto_tree: LanguageTreeId::new(),
        austronesian_iso_tree: LanguageTreeId::new(),
        forager_tree: LanguageTreeId::new(),
        slavery: VariableId::new(),
        population_density: VariableId::new(),
        slavery_absent: CodeId::new(),
        slavery_incipient: CodeId::new(),
        slavery_reported: CodeId::new(),
        slavery_hereditary: CodeId::new(),
        slavery_missing: CodeId::new(),
        population_density_missing: CodeId::new(),
        temperature: EnvironmentalVariableId::new(),
        precipitation: EnvironmentalVariableId::new(),
        western_polynesia: RegionId::new(),
        eastern_africa: RegionId::new(),
        southern_africa: RegionId::new(),
    };

    // ---------------------------------------------------------------
    // Sources
    // ---------------------------------------------------------------

    let ethnographic_atlas = SourceId::new();
    atlas.insert_source(Source {
        id: ethnographic_atlas,
        name: "Ethnographic Atlas".to_owned(),
        author: "Murdock, G. P.".to_owned(),
        year: "1962-1971".to_owned(),
        reference: "Murdock, G. P. Ethnographic Atlas. Ethnology 1-10, 1962-1971.".to_owned(),
    })?;

    let binford = SourceId::new();
    atlas.insert_source(Source {
        id: binford,
        name: "Binford Hunter-Gatherer".to_owned(),
        author: "Binford, L. R.".to_owned(),
        year: "2001".to_owned(),
        reference: "Binford, L. R. Constructing Frames of Reference. University of California \
                    Press, 2001."
            .to_owned(),
    })?;

    // ---------------------------------------------------------------
    // Language families and languages
    // ---------------------------------------------------------------

    let austronesian = LanguageFamilyId::new();
    atlas.insert_language_family(LanguageFamily {
        id: austronesian,
        scheme: "G".to_owned(),
        name: "Austronesian".to_owned(),
    })?;

    let kxa = LanguageFamilyId::new();
    atlas.insert_language_family(LanguageFamily {
        id: kxa,
        scheme: "G".to_owned(),
        name: "Kxa".to_owned(),
    })?;

    add_language(&mut atlas, ids.hawaiian, "Hawaiian", "haw", "hawa1245", Some(austronesian))?;
    add_language(&mut atlas, ids.maori, "Maori", "mri", "maor1246", Some(austronesian))?;
    add_language(&mut atlas, ids.samoan, "Samoan", "smo", "samo1305", Some(austronesian))?;
    add_language(&mut atlas, ids.fijian, "Fijian", "fij", "fiji1243", Some(austronesian))?;
    add_language(&mut atlas, ids.juhoan, "Ju|'hoan", "ktz", "juho1239", Some(kxa))?;
    // Hadza is an isolate and carries no family link.
    add_language(&mut atlas, ids.hadza, "Hadza", "hts", "hadz1240", None)?;

    // ---------------------------------------------------------------
    // Societies
    // ---------------------------------------------------------------

    let hawaiians = add_society(
        &mut atlas,
        ("Ij3", "xd1164", "Hawaiians"),
        "1778",
        Some(ids.hawaiian),
        ethnographic_atlas,
        GeoPoint::new(-155.5, 19.6),
    )?;
    let maori = add_society(
        &mut atlas,
        ("Ij2", "xd1216", "Maori"),
        "1820",
        Some(ids.maori),
        ethnographic_atlas,
        GeoPoint::new(175.5, -39.0),
    )?;
    let samoans = add_society(
        &mut atlas,
        ("Ii1", "xd1235", "Samoans"),
        "1829",
        Some(ids.samoan),
        ethnographic_atlas,
        GeoPoint::new(-172.3, -13.8),
    )?;
    let lau_fijians = add_society(
        &mut atlas,
        ("Ih4", "xd1071", "Lau Fijians"),
        "1890",
        Some(ids.fijian),
        ethnographic_atlas,
        GeoPoint::new(-178.8, -17.7),
    )?;
    let kung = add_society(
        &mut atlas,
        ("Aa1", "xd1027", "!Kung"),
        "1950",
        Some(ids.juhoan),
        binford,
        GeoPoint::new(20.0, -19.9),
    )?;
    let hadza = add_society(
        &mut atlas,
        ("Aa9", "xd1037", "Hadza"),
        "1930",
        Some(ids.hadza),
        binford,
        GeoPoint::new(35.0, -3.8),
    )?;
    // The Vedda record has no language classification.
    let vedda = add_society(
        &mut atlas,
        ("Eh4", "xd1133", "Vedda"),
        "1860",
        None,
        ethnographic_atlas,
        GeoPoint::new(81.0, 7.9),
    )?;

    // ---------------------------------------------------------------
    // Phylogenies
    // ---------------------------------------------------------------

    atlas.insert_tree(LanguageTree {
        id: ids.austronesian_glotto_tree,
        name: "austronesian.glotto.trees".to_owned(),
        newick: "(((hawa1245:1,maor1246:1)east2449:1,samo1305:2)poly1242:1,\
                 (bauu1240:1,laua1243:1)fiji1243:2)aust1307;"
            .to_owned(),
        languages: vec![ids.hawaiian, ids.maori, ids.samoan, ids.fijian],
    })?;

    atlas.insert_tree(LanguageTree {
        id: ids.austronesian_iso_tree,
        name: "gray_et_al2009".to_owned(),
        newick: "((haw:1,mri:1)east:1,(smo:1,fij:1)west:2)anc;".to_owned(),
        languages: vec![ids.hawaiian, ids.maori, ids.samoan, ids.fijian],
    })?;

    atlas.insert_tree(LanguageTree {
        id: ids.forager_tree,
        name: "forager.trees".to_owned(),
        newick: "(ktz:5,hts:5);".to_owned(),
        languages: vec![ids.juhoan, ids.hadza],
    })?;

    // ---------------------------------------------------------------
    // Cultural variables
    // ---------------------------------------------------------------

    atlas.insert_variable(VariableDescription {
        id: ids.slavery,
        label: "EA070".to_owned(),
        name: "Slavery: type".to_owned(),
        data_type: DataType::Categorical,
        source: Some(ethnographic_atlas),
    })?;
    add_code(&mut atlas, ids.slavery_absent, ids.slavery, "1", "Absence of slavery")?;
    add_code(&mut atlas, ids.slavery_incipient, ids.slavery, "2", "Incipient slavery")?;
    add_code(
        &mut atlas,
        ids.slavery_reported,
        ids.slavery,
        "3",
        "Slavery reported but type not identified",
    )?;
    add_code(&mut atlas, ids.slavery_hereditary, ids.slavery, "4", "Hereditary slavery")?;
    add_code(&mut atlas, ids.slavery_missing, ids.slavery, "NA", "Missing data")?;

    add_coded_value(&mut atlas, ids.slavery, hawaiians, Some(ids.slavery_hereditary), "4")?;
    add_coded_value(&mut atlas, ids.slavery, maori, Some(ids.slavery_incipient), "2")?;
    add_coded_value(&mut atlas, ids.slavery, samoans, Some(ids.slavery_hereditary), "4")?;
    add_coded_value(&mut atlas, ids.slavery, lau_fijians, Some(ids.slavery_reported), "3")?;
    add_coded_value(&mut atlas, ids.slavery, kung, Some(ids.slavery_absent), "1")?;
    add_coded_value(&mut atlas, ids.slavery, hadza, Some(ids.slavery_absent), "1")?;
    add_coded_value(&mut atlas, ids.slavery, vedda, Some(ids.slavery_absent), "1")?;

    atlas.insert_variable(VariableDescription {
        id: ids.population_density,
        label: "B004".to_owned(),
        name: "Population density".to_owned(),
        data_type: DataType::Continuous,
        source: Some(binford),
    })?;
    add_code(
        &mut atlas,
        ids.population_density_missing,
        ids.population_density,
        "NA",
        "Missing data",
    )?;

    add_coded_value(&mut atlas, ids.population_density, hawaiians, None, "25.5")?;
    add_coded_value(&mut atlas, ids.population_density, maori, None, "11.4")?;
    add_coded_value(&mut atlas, ids.population_density, samoans, None, "34")?;
    add_coded_value(&mut atlas, ids.population_density, lau_fijians, None, "18.2")?;
    add_coded_value(&mut atlas, ids.population_density, kung, None, "0.3")?;
    add_coded_value(&mut atlas, ids.population_density, hadza, None, "0.24")?;
    add_coded_value(
        &mut atlas,
        ids.population_density,
        vedda,
        Some(ids.population_density_missing),
        "NA",
    )?;

    // ---------------------------------------------------------------
    // Environmental measurements
    // ---------------------------------------------------------------

    atlas.insert_environmental_variable(EnvironmentalVariable {
        id: ids.temperature,
        name: "Annual Mean Temperature".to_owned(),
        units: "Celsius".to_owned(),
    })?;
    add_measurement(&mut atlas, ids.temperature, hawaiians, 23.4)?;
    add_measurement(&mut atlas, ids.temperature, maori, 12.9)?;
    add_measurement(&mut atlas, ids.temperature, samoans, 26.7)?;
    add_measurement(&mut atlas, ids.temperature, lau_fijians, 25.1)?;
    add_measurement(&mut atlas, ids.temperature, kung, 21.5)?;
    add_measurement(&mut atlas, ids.temperature, hadza, 24.8)?;
    add_measurement(&mut atlas, ids.temperature, vedda, 27.3)?;

    atlas.insert_environmental_variable(EnvironmentalVariable {
        id: ids.precipitation,
        name: "Annual Precipitation".to_owned(),
        units: "mm".to_owned(),
    })?;
    add_measurement(&mut atlas, ids.precipitation, hawaiians, 1800.0)?;
    add_measurement(&mut atlas, ids.precipitation, maori, 1220.0)?;
    add_measurement(&mut atlas, ids.precipitation, samoans, 2880.0)?;
    add_measurement(&mut atlas, ids.precipitation, lau_fijians, 2100.0)?;
    add_measurement(&mut atlas, ids.precipitation, kung, 430.0)?;
    add_measurement(&mut atlas, ids.precipitation, hadza, 510.0)?;
    add_measurement(&mut atlas, ids.precipitation, vedda, 1650.0)?;

    // ---------------------------------------------------------------
    // Regions
    // ---------------------------------------------------------------

    atlas.insert_region(GeographicRegion {
        id: ids.western_polynesia,
        name: "Western Polynesia".to_owned(),
        continent: "OCEANIA".to_owned(),
        geometry: rect(-180.0, -20.0, -170.0, -10.0),
    })?;
    atlas.insert_region(GeographicRegion {
        id: ids.eastern_africa,
        name: "Eastern Africa".to_owned(),
        continent: "AFRICA".to_owned(),
        geometry: rect(28.0, -12.0, 42.0, 5.0),
    })?;
    atlas.insert_region(GeographicRegion {
        id: ids.southern_africa,
        name: "Southern Africa".to_owned(),
        continent: "AFRICA".to_owned(),
        geometry: rect(12.0, -35.0, 30.0, -15.0),
    })?;

    Ok((atlas, ids))
}
