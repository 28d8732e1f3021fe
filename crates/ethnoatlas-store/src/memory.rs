//! In-memory reference backend.
//!
//! Backs the engine binary and the test suite. Records live in `BTreeMap`s
//! keyed by id; query results are re-sorted on stable fields (external ids,
//! names, code labels) so output order never depends on id generation.

use std::collections::{BTreeMap, BTreeSet};

use async_trait::async_trait;
use ethnoatlas_types::{
    CodeDescription, CodeId, CodedValue, CodedValueId, EnvironmentalValue, EnvironmentalValueId,
    EnvironmentalVariable, EnvironmentalVariableId, GeoPolygon, GeographicRegion, Language,
    LanguageFamily, LanguageFamilyId, LanguageId, LanguageTree, LanguageTreeId, RegionId, Society,
    SocietyId, Source, SourceId, VariableDescription, VariableId,
};

use crate::error::StoreError;
use crate::traits::{AtlasStore, TreeStore};

/// Atlas dataset held entirely in memory.
#[derive(Debug, Default)]
pub struct MemoryAtlas {
    sources: BTreeMap<SourceId, Source>,
    families: BTreeMap<LanguageFamilyId, LanguageFamily>,
    languages: BTreeMap<LanguageId, Language>,
    societies: BTreeMap<SocietyId, Society>,
    trees: BTreeMap<LanguageTreeId, LanguageTree>,
    trees_by_language: BTreeMap<LanguageId, BTreeSet<LanguageTreeId>>,
    variables: BTreeMap<VariableId, VariableDescription>,
    codes: BTreeMap<CodeId, CodeDescription>,
    coded_values: BTreeMap<CodedValueId, CodedValue>,
    environmental_variables: BTreeMap<EnvironmentalVariableId, EnvironmentalVariable>,
    environmental_values: BTreeMap<EnvironmentalValueId, EnvironmentalValue>,
    regions: BTreeMap<RegionId, GeographicRegion>,
}

impl MemoryAtlas {
    /// Create an empty atlas.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a bibliographic source.
    pub fn insert_source(&mut self, source: Source) -> Result<(), StoreError> {
        if self.sources.contains_key(&source.id) {
            return Err(StoreError::Duplicate {
                kind: "source",
                id: source.id.into_inner(),
            });
        }
        self.sources.insert(source.id, source);
        Ok(())
    }

    /// Register a language family.
    pub fn insert_language_family(&mut self, family: LanguageFamily) -> Result<(), StoreError> {
        if self.families.contains_key(&family.id) {
            return Err(StoreError::Duplicate {
                kind: "language family",
                id: family.id.into_inner(),
            });
        }
        self.families.insert(family.id, family);
        Ok(())
    }

    /// Register a language. Its family, when set, must already be present.
    pub fn insert_language(&mut self, language: Language) -> Result<(), StoreError> {
        if self.languages.contains_key(&language.id) {
            return Err(StoreError::Duplicate {
                kind: "language",
                id: language.id.into_inner(),
            });
        }
        if let Some(family) = language.family {
            if !self.families.contains_key(&family) {
                return Err(StoreError::UnknownReference {
                    kind: "language",
                    id: language.id.into_inner(),
                    field: "family",
                });
            }
        }
        self.languages.insert(language.id, language);
        Ok(())
    }

    /// Register a society. Its language and source, when set, must already be
    /// present.
    pub fn insert_society(&mut self, society: Society) -> Result<(), StoreError> {
        if self.societies.contains_key(&society.id) {
            return Err(StoreError::Duplicate {
                kind: "society",
                id: society.id.into_inner(),
            });
        }
        if let Some(language) = society.language {
            if !self.languages.contains_key(&language) {
                return Err(StoreError::UnknownReference {
                    kind: "society",
                    id: society.id.into_inner(),
                    field: "language",
                });
            }
        }
        if let Some(source) = society.source {
            if !self.sources.contains_key(&source) {
                return Err(StoreError::UnknownReference {
                    kind: "society",
                    id: society.id.into_inner(),
                    field: "source",
                });
            }
        }
        self.societies.insert(society.id, society);
        Ok(())
    }

    /// Register a phylogenetic tree and index it under every language it
    /// covers. All covered languages must already be present.
    pub fn insert_tree(&mut self, tree: LanguageTree) -> Result<(), StoreError> {
        if self.trees.contains_key(&tree.id) {
            return Err(StoreError::Duplicate {
                kind: "language tree",
                id: tree.id.into_inner(),
            });
        }
        for language in &tree.languages {
            if !self.languages.contains_key(language) {
                return Err(StoreError::UnknownReference {
                    kind: "language tree",
                    id: tree.id.into_inner(),
                    field: "languages",
                });
            }
        }
        for language in &tree.languages {
            self.trees_by_language
                .entry(*language)
                .or_default()
                .insert(tree.id);
        }
        self.trees.insert(tree.id, tree);
        Ok(())
    }

    /// Register a cultural variable.
    pub fn insert_variable(&mut self, variable: VariableDescription) -> Result<(), StoreError> {
        if self.variables.contains_key(&variable.id) {
            return Err(StoreError::Duplicate {
                kind: "variable",
                id: variable.id.into_inner(),
            });
        }
        self.variables.insert(variable.id, variable);
        Ok(())
    }

    /// Register a code description. Its variable must already be present.
    pub fn insert_code(&mut self, code: CodeDescription) -> Result<(), StoreError> {
        if self.codes.contains_key(&code.id) {
            return Err(StoreError::Duplicate {
                kind: "code",
                id: code.id.into_inner(),
            });
        }
        if !self.variables.contains_key(&code.variable) {
            return Err(StoreError::UnknownReference {
                kind: "code",
                id: code.id.into_inner(),
                field: "variable",
            });
        }
        self.codes.insert(code.id, code);
        Ok(())
    }

    /// Register a coded observation. Its variable, society, and code (when
    /// set) must already be present.
    pub fn insert_coded_value(&mut self, value: CodedValue) -> Result<(), StoreError> {
        if self.coded_values.contains_key(&value.id) {
            return Err(StoreError::Duplicate {
                kind: "coded value",
                id: value.id.into_inner(),
            });
        }
        if !self.variables.contains_key(&value.variable) {
            return Err(StoreError::UnknownReference {
                kind: "coded value",
                id: value.id.into_inner(),
                field: "variable",
            });
        }
        if !self.societies.contains_key(&value.society) {
            return Err(StoreError::UnknownReference {
                kind: "coded value",
                id: value.id.into_inner(),
                field: "society",
            });
        }
        if let Some(code) = value.code {
            if !self.codes.contains_key(&code) {
                return Err(StoreError::UnknownReference {
                    kind: "coded value",
                    id: value.id.into_inner(),
                    field: "code",
                });
            }
        }
        self.coded_values.insert(value.id, value);
        Ok(())
    }

    /// Register an environmental variable.
    pub fn insert_environmental_variable(
        &mut self,
        variable: EnvironmentalVariable,
    ) -> Result<(), StoreError> {
        if self.environmental_variables.contains_key(&variable.id) {
            return Err(StoreError::Duplicate {
                kind: "environmental variable",
                id: variable.id.into_inner(),
            });
        }
        self.environmental_variables.insert(variable.id, variable);
        Ok(())
    }

    /// Register an environmental measurement. Its variable and society must
    /// already be present.
    pub fn insert_environmental_value(
        &mut self,
        value: EnvironmentalValue,
    ) -> Result<(), StoreError> {
        if self.environmental_values.contains_key(&value.id) {
            return Err(StoreError::Duplicate {
                kind: "environmental value",
                id: value.id.into_inner(),
            });
        }
        if !self.environmental_variables.contains_key(&value.variable) {
            return Err(StoreError::UnknownReference {
                kind: "environmental value",
                id: value.id.into_inner(),
                field: "variable",
            });
        }
        if !self.societies.contains_key(&value.society) {
            return Err(StoreError::UnknownReference {
                kind: "environmental value",
                id: value.id.into_inner(),
                field: "society",
            });
        }
        self.environmental_values.insert(value.id, value);
        Ok(())
    }

    /// Register a geographic region.
    pub fn insert_region(&mut self, region: GeographicRegion) -> Result<(), StoreError> {
        if self.regions.contains_key(&region.id) {
            return Err(StoreError::Duplicate {
                kind: "region",
                id: region.id.into_inner(),
            });
        }
        self.regions.insert(region.id, region);
        Ok(())
    }

    /// Number of societies loaded.
    #[must_use]
    pub fn society_count(&self) -> usize {
        self.societies.len()
    }

    /// Number of languages loaded.
    #[must_use]
    pub fn language_count(&self) -> usize {
        self.languages.len()
    }

    /// Number of phylogenetic trees loaded.
    #[must_use]
    pub fn tree_count(&self) -> usize {
        self.trees.len()
    }

    /// Number of cultural variables loaded.
    #[must_use]
    pub fn variable_count(&self) -> usize {
        self.variables.len()
    }

    /// Number of coded observations loaded.
    #[must_use]
    pub fn coded_value_count(&self) -> usize {
        self.coded_values.len()
    }

    /// Number of environmental variables loaded.
    #[must_use]
    pub fn environmental_variable_count(&self) -> usize {
        self.environmental_variables.len()
    }

    /// Number of environmental measurements loaded.
    #[must_use]
    pub fn environmental_value_count(&self) -> usize {
        self.environmental_values.len()
    }

    /// Number of geographic regions loaded.
    #[must_use]
    pub fn region_count(&self) -> usize {
        self.regions.len()
    }

    fn sorted_societies(&self, mut societies: Vec<Society>) -> Vec<Society> {
        societies.sort_by(|a, b| a.ext_id.cmp(&b.ext_id));
        societies
    }
}

// ---------------------------------------------------------------------------
// Trait implementations
// ---------------------------------------------------------------------------

#[async_trait]
impl AtlasStore for MemoryAtlas {
    async fn language(&self, id: LanguageId) -> Result<Option<Language>, StoreError> {
        Ok(self.languages.get(&id).cloned())
    }

    async fn languages_by_ids(&self, ids: &[LanguageId]) -> Result<Vec<Language>, StoreError> {
        let mut found: Vec<Language> = ids
            .iter()
            .filter_map(|id| self.languages.get(id).cloned())
            .collect();
        found.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(found)
    }

    async fn societies_for_languages(
        &self,
        ids: &[LanguageId],
    ) -> Result<Vec<Society>, StoreError> {
        let wanted: BTreeSet<LanguageId> = ids.iter().copied().collect();
        let matched = self
            .societies
            .values()
            .filter(|society| society.language.is_some_and(|l| wanted.contains(&l)))
            .cloned()
            .collect();
        Ok(self.sorted_societies(matched))
    }

    async fn societies_by_ids(&self, ids: &[SocietyId]) -> Result<Vec<Society>, StoreError> {
        let found = ids
            .iter()
            .filter_map(|id| self.societies.get(id).cloned())
            .collect();
        Ok(self.sorted_societies(found))
    }

    async fn variable(&self, id: VariableId) -> Result<Option<VariableDescription>, StoreError> {
        Ok(self.variables.get(&id).cloned())
    }

    async fn codes_for_variable(
        &self,
        id: VariableId,
    ) -> Result<Vec<CodeDescription>, StoreError> {
        let mut found: Vec<CodeDescription> = self
            .codes
            .values()
            .filter(|code| code.variable == id)
            .cloned()
            .collect();
        found.sort_by(|a, b| a.code.cmp(&b.code));
        Ok(found)
    }

    async fn coded_values_for_variable(
        &self,
        id: VariableId,
    ) -> Result<Vec<CodedValue>, StoreError> {
        Ok(self
            .coded_values
            .values()
            .filter(|value| value.variable == id)
            .cloned()
            .collect())
    }

    async fn coded_values_for_codes(
        &self,
        variable: VariableId,
        codes: &[CodeId],
    ) -> Result<Vec<CodedValue>, StoreError> {
        let wanted: BTreeSet<CodeId> = codes.iter().copied().collect();
        Ok(self
            .coded_values
            .values()
            .filter(|value| value.variable == variable)
            .filter(|value| value.code.is_some_and(|c| wanted.contains(&c)))
            .cloned()
            .collect())
    }

    async fn environmental_variable(
        &self,
        id: EnvironmentalVariableId,
    ) -> Result<Option<EnvironmentalVariable>, StoreError> {
        Ok(self.environmental_variables.get(&id).cloned())
    }

    async fn environmental_values_for_variable(
        &self,
        id: EnvironmentalVariableId,
    ) -> Result<Vec<EnvironmentalValue>, StoreError> {
        Ok(self
            .environmental_values
            .values()
            .filter(|value| value.variable == id)
            .cloned()
            .collect())
    }

    async fn region(&self, id: RegionId) -> Result<Option<GeographicRegion>, StoreError> {
        Ok(self.regions.get(&id).cloned())
    }

    async fn societies_in_polygon(
        &self,
        polygon: &GeoPolygon,
    ) -> Result<Vec<Society>, StoreError> {
        let matched = self
            .societies
            .values()
            .filter(|society| polygon.contains(society.location))
            .cloned()
            .collect();
        Ok(self.sorted_societies(matched))
    }
}

#[async_trait]
impl TreeStore for MemoryAtlas {
    async fn trees_for_languages(
        &self,
        ids: &[LanguageId],
    ) -> Result<Vec<LanguageTree>, StoreError> {
        let mut tree_ids: BTreeSet<LanguageTreeId> = BTreeSet::new();
        for language in ids {
            if let Some(covering) = self.trees_by_language.get(language) {
                tree_ids.extend(covering.iter().copied());
            }
        }
        let mut found: Vec<LanguageTree> = tree_ids
            .iter()
            .filter_map(|id| self.trees.get(id).cloned())
            .collect();
        found.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(found)
    }

    async fn tree(&self, id: LanguageTreeId) -> Result<Option<LanguageTree>, StoreError> {
        Ok(self.trees.get(&id).cloned())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use ethnoatlas_types::{GeoPoint, SocietyId};

    use super::*;

    fn make_language(name: &str) -> Language {
        Language {
            id: LanguageId::new(),
            name: name.to_owned(),
            glotto_code: Some(format!("{}1234", name.to_lowercase())),
            iso_code: None,
            family: None,
        }
    }

    fn make_society(ext_id: &str, language: Option<LanguageId>, lon: f64, lat: f64) -> Society {
        Society {
            id: SocietyId::new(),
            ext_id: ext_id.to_owned(),
            xd_id: format!("xd-{ext_id}"),
            name: format!("Society {ext_id}"),
            alternate_names: String::new(),
            focal_year: "1900".to_owned(),
            language,
            source: None,
            location: GeoPoint::new(lon, lat),
        }
    }

    #[test]
    fn duplicate_language_is_rejected() {
        let mut atlas = MemoryAtlas::new();
        let language = make_language("Hawaiian");
        atlas.insert_language(language.clone()).unwrap();
        let err = atlas.insert_language(language).unwrap_err();
        assert!(matches!(err, StoreError::Duplicate { kind: "language", .. }));
    }

    #[test]
    fn society_with_unknown_language_is_rejected() {
        let mut atlas = MemoryAtlas::new();
        let society = make_society("Aa1", Some(LanguageId::new()), 20.0, -19.9);
        let err = atlas.insert_society(society).unwrap_err();
        assert!(matches!(
            err,
            StoreError::UnknownReference { field: "language", .. }
        ));
    }

    #[tokio::test]
    async fn societies_for_languages_filters_and_sorts_by_ext_id() {
        let mut atlas = MemoryAtlas::new();
        let hawaiian = make_language("Hawaiian");
        let maori = make_language("Maori");
        let hawaiian_id = hawaiian.id;
        let maori_id = maori.id;
        atlas.insert_language(hawaiian).unwrap();
        atlas.insert_language(maori).unwrap();
        atlas
            .insert_society(make_society("Ij3", Some(hawaiian_id), -155.5, 19.6))
            .unwrap();
        atlas
            .insert_society(make_society("Ij2", Some(maori_id), 175.5, -39.0))
            .unwrap();
        atlas
            .insert_society(make_society("Aa1", None, 20.0, -19.9))
            .unwrap();

        let both = atlas
            .societies_for_languages(&[hawaiian_id, maori_id])
            .await
            .unwrap();
        let ext_ids: Vec<&str> = both.iter().map(|s| s.ext_id.as_str()).collect();
        assert_eq!(ext_ids, vec!["Ij2", "Ij3"]);
    }

    #[tokio::test]
    async fn polygon_query_includes_boundary_points() {
        let mut atlas = MemoryAtlas::new();
        atlas
            .insert_society(make_society("In", None, 5.0, 5.0))
            .unwrap();
        atlas
            .insert_society(make_society("Edge", None, 10.0, 5.0))
            .unwrap();
        atlas
            .insert_society(make_society("Out", None, 15.0, 5.0))
            .unwrap();

        let square = GeoPolygon::new(vec![
            GeoPoint::new(0.0, 0.0),
            GeoPoint::new(10.0, 0.0),
            GeoPoint::new(10.0, 10.0),
            GeoPoint::new(0.0, 10.0),
        ]);
        let inside = atlas.societies_in_polygon(&square).await.unwrap();
        let ext_ids: Vec<&str> = inside.iter().map(|s| s.ext_id.as_str()).collect();
        assert_eq!(ext_ids, vec!["Edge", "In"]);
    }

    #[tokio::test]
    async fn trees_for_languages_reports_each_tree_once() {
        let mut atlas = MemoryAtlas::new();
        let hawaiian = make_language("Hawaiian");
        let maori = make_language("Maori");
        let hawaiian_id = hawaiian.id;
        let maori_id = maori.id;
        atlas.insert_language(hawaiian).unwrap();
        atlas.insert_language(maori).unwrap();
        atlas
            .insert_tree(LanguageTree {
                id: LanguageTreeId::new(),
                name: "polynesian.glotto.trees".to_owned(),
                newick: "(hawaiian1234:1,maori1234:1);".to_owned(),
                languages: vec![hawaiian_id, maori_id],
            })
            .unwrap();

        let trees = atlas
            .trees_for_languages(&[hawaiian_id, maori_id])
            .await
            .unwrap();
        assert_eq!(trees.len(), 1);
        assert_eq!(trees.first().unwrap().name, "polynesian.glotto.trees");
    }
}
