//! Result aggregation: per-category evidence partitions and the final
//! AND-of-ORs intersection.
//!
//! The aggregator is a two-state machine. While *accumulating*, evaluators
//! register (society, evidence) matches into the partition of their
//! criterion category; every piece of evidence is kept. `finalize` moves to
//! the terminal *finalized* state and keeps exactly the societies present in
//! every active category's partition. Which categories are active comes from
//! the request (key presence), not from whether matches were found, so an
//! active category with zero matches empties the result.

use std::collections::{BTreeMap, BTreeSet};

use ethnoatlas_types::{
    Criterion, CulturalMatch, EnvironmentalMatch, GeographicRegion, Language, LanguageId,
    ProjectedTree, SearchResults, Society, SocietyId, SocietyResult,
};

use crate::error::SearchError;

/// Lifecycle of a [`ResultAggregator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AggregatorState {
    /// Accepting evidence from the evaluators.
    Accumulating,
    /// Intersected; only projected trees may still be attached.
    Finalized,
}

/// Accumulates per-society evidence and intersects it across the active
/// criterion categories.
#[derive(Debug)]
pub struct ResultAggregator {
    state: AggregatorState,
    societies: BTreeMap<SocietyId, SocietyResult>,
    partitions: BTreeMap<Criterion, BTreeSet<SocietyId>>,
    trees: Vec<ProjectedTree>,
}

impl Default for ResultAggregator {
    fn default() -> Self {
        Self::new()
    }
}

impl ResultAggregator {
    /// Create an empty, accumulating aggregator.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: AggregatorState::Accumulating,
            societies: BTreeMap::new(),
            partitions: BTreeMap::new(),
            trees: Vec::new(),
        }
    }

    /// Register `society` in `criterion`'s partition and hand back its
    /// evidence record.
    fn record(
        &mut self,
        criterion: Criterion,
        society: Society,
    ) -> Result<&mut SocietyResult, SearchError> {
        if self.state == AggregatorState::Finalized {
            return Err(SearchError::AlreadyFinalized);
        }
        let id = society.id;
        self.partitions.entry(criterion).or_default().insert(id);
        Ok(self.societies.entry(id).or_insert_with(|| SocietyResult {
            society,
            languages: Vec::new(),
            cultural_values: Vec::new(),
            environmental_values: Vec::new(),
            regions: Vec::new(),
        }))
    }

    /// Record a language classification match.
    pub fn add_language_match(
        &mut self,
        society: Society,
        language: Language,
    ) -> Result<(), SearchError> {
        self.record(Criterion::Language, society)?.languages.push(language);
        Ok(())
    }

    /// Record a cultural variable match.
    pub fn add_cultural_match(
        &mut self,
        society: Society,
        evidence: CulturalMatch,
    ) -> Result<(), SearchError> {
        self.record(Criterion::Cultural, society)?
            .cultural_values
            .push(evidence);
        Ok(())
    }

    /// Record an environmental measurement match.
    pub fn add_environmental_match(
        &mut self,
        society: Society,
        evidence: EnvironmentalMatch,
    ) -> Result<(), SearchError> {
        self.record(Criterion::Environmental, society)?
            .environmental_values
            .push(evidence);
        Ok(())
    }

    /// Record a region match.
    pub fn add_region_match(
        &mut self,
        society: Society,
        region: GeographicRegion,
    ) -> Result<(), SearchError> {
        self.record(Criterion::Geographic, society)?.regions.push(region);
        Ok(())
    }

    /// Intersect the partitions: keep societies present in every active
    /// category, drop the rest. No active categories keeps nothing.
    pub fn finalize(&mut self, active: &BTreeSet<Criterion>) -> Result<(), SearchError> {
        if self.state == AggregatorState::Finalized {
            return Err(SearchError::AlreadyFinalized);
        }
        self.state = AggregatorState::Finalized;

        if active.is_empty() {
            self.societies.clear();
            return Ok(());
        }
        let survivors: BTreeSet<SocietyId> = self
            .societies
            .keys()
            .filter(|id| {
                active.iter().all(|criterion| {
                    self.partitions
                        .get(criterion)
                        .is_some_and(|partition| partition.contains(id))
                })
            })
            .copied()
            .collect();
        self.societies.retain(|id, _| survivors.contains(id));
        Ok(())
    }

    /// Number of societies currently held (survivors, once finalized).
    pub fn society_count(&self) -> usize {
        self.societies.len()
    }

    /// Distinct language ids across the surviving societies.
    pub fn survivor_languages(&self) -> BTreeSet<LanguageId> {
        self.societies
            .values()
            .filter_map(|result| result.society.language)
            .collect()
    }

    /// Attach a projected tree. Only valid once finalized.
    pub fn add_projected_tree(&mut self, tree: ProjectedTree) -> Result<(), SearchError> {
        if self.state != AggregatorState::Finalized {
            return Err(SearchError::NotFinalized);
        }
        self.trees.push(tree);
        Ok(())
    }

    /// Consume the aggregator into the response payload, societies ordered
    /// by external id.
    pub fn into_results(self) -> Result<SearchResults, SearchError> {
        if self.state != AggregatorState::Finalized {
            return Err(SearchError::NotFinalized);
        }
        let mut societies: Vec<SocietyResult> = self.societies.into_values().collect();
        societies.sort_by(|a, b| a.society.ext_id.cmp(&b.society.ext_id));
        Ok(SearchResults {
            societies,
            trees: self.trees,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use ethnoatlas_types::{GeoPoint, LanguageTreeId};

    use super::*;

    fn make_society(ext_id: &str) -> Society {
        Society {
            id: SocietyId::new(),
            ext_id: ext_id.to_owned(),
            xd_id: format!("xd-{ext_id}"),
            name: format!("Society {ext_id}"),
            alternate_names: String::new(),
            focal_year: "1900".to_owned(),
            language: Some(LanguageId::new()),
            source: None,
            location: GeoPoint::new(0.0, 0.0),
        }
    }

    fn make_language(name: &str) -> Language {
        Language {
            id: LanguageId::new(),
            name: name.to_owned(),
            iso_code: None,
            glotto_code: None,
            family: None,
        }
    }

    fn make_region(name: &str) -> GeographicRegion {
        GeographicRegion {
            id: ethnoatlas_types::RegionId::new(),
            name: name.to_owned(),
            continent: "OCEANIA".to_owned(),
            geometry: ethnoatlas_types::GeoPolygon::new(Vec::new()),
        }
    }

    #[test]
    fn intersection_keeps_only_societies_in_all_active_categories() {
        let in_both = make_society("Aa1");
        let language_only = make_society("Aa2");

        let mut aggregator = ResultAggregator::new();
        aggregator
            .add_language_match(in_both.clone(), make_language("Hawaiian"))
            .unwrap();
        aggregator
            .add_language_match(language_only, make_language("Maori"))
            .unwrap();
        aggregator
            .add_region_match(in_both.clone(), make_region("Polynesia"))
            .unwrap();

        let active: BTreeSet<Criterion> =
            [Criterion::Language, Criterion::Geographic].into_iter().collect();
        aggregator.finalize(&active).unwrap();

        let results = aggregator.into_results().unwrap();
        assert_eq!(results.societies.len(), 1);
        let survivor = results.societies.first().unwrap();
        assert_eq!(survivor.society.id, in_both.id);
        assert_eq!(survivor.languages.len(), 1);
        assert_eq!(survivor.regions.len(), 1);
    }

    #[test]
    fn active_category_without_matches_empties_the_result() {
        let mut aggregator = ResultAggregator::new();
        aggregator
            .add_language_match(make_society("Aa1"), make_language("Hadza"))
            .unwrap();

        // Geographic is active but recorded nothing.
        let active: BTreeSet<Criterion> =
            [Criterion::Language, Criterion::Geographic].into_iter().collect();
        aggregator.finalize(&active).unwrap();

        assert_eq!(aggregator.society_count(), 0);
    }

    #[test]
    fn no_active_categories_keeps_nothing() {
        let mut aggregator = ResultAggregator::new();
        aggregator
            .add_language_match(make_society("Aa1"), make_language("Hadza"))
            .unwrap();

        aggregator.finalize(&BTreeSet::new()).unwrap();
        let results = aggregator.into_results().unwrap();
        assert!(results.is_empty());
    }

    #[test]
    fn evidence_accumulates_per_society() {
        let society = make_society("Ij3");
        let mut aggregator = ResultAggregator::new();
        aggregator
            .add_region_match(society.clone(), make_region("Polynesia"))
            .unwrap();
        aggregator
            .add_region_match(society, make_region("Oceania"))
            .unwrap();

        let active: BTreeSet<Criterion> = [Criterion::Geographic].into_iter().collect();
        aggregator.finalize(&active).unwrap();

        let results = aggregator.into_results().unwrap();
        assert_eq!(results.societies.first().unwrap().regions.len(), 2);
    }

    #[test]
    fn add_after_finalize_is_rejected() {
        let mut aggregator = ResultAggregator::new();
        aggregator.finalize(&BTreeSet::new()).unwrap();

        let err = aggregator
            .add_language_match(make_society("Aa1"), make_language("Hadza"))
            .unwrap_err();
        assert!(matches!(err, SearchError::AlreadyFinalized));
    }

    #[test]
    fn double_finalize_is_rejected() {
        let mut aggregator = ResultAggregator::new();
        aggregator.finalize(&BTreeSet::new()).unwrap();
        let err = aggregator.finalize(&BTreeSet::new()).unwrap_err();
        assert!(matches!(err, SearchError::AlreadyFinalized));
    }

    #[test]
    fn results_require_finalize() {
        let aggregator = ResultAggregator::new();
        assert!(matches!(
            aggregator.into_results(),
            Err(SearchError::NotFinalized)
        ));
    }

    #[test]
    fn trees_attach_only_after_finalize() {
        let tree = ProjectedTree {
            id: LanguageTreeId::new(),
            name: "gray_et_al2009".to_owned(),
            newick: "(haw:1);".to_owned(),
        };

        let mut aggregator = ResultAggregator::new();
        let err = aggregator.add_projected_tree(tree.clone()).unwrap_err();
        assert!(matches!(err, SearchError::NotFinalized));

        aggregator.finalize(&BTreeSet::new()).unwrap();
        aggregator.add_projected_tree(tree).unwrap();
        assert_eq!(aggregator.into_results().unwrap().trees.len(), 1);
    }

    #[test]
    fn societies_are_ordered_by_external_id() {
        let mut aggregator = ResultAggregator::new();
        for ext_id in ["Ij3", "Aa1", "Eh4"] {
            aggregator
                .add_language_match(make_society(ext_id), make_language("x"))
                .unwrap();
        }
        let active: BTreeSet<Criterion> = [Criterion::Language].into_iter().collect();
        aggregator.finalize(&active).unwrap();

        let results = aggregator.into_results().unwrap();
        let order: Vec<&str> = results
            .societies
            .iter()
            .map(|r| r.society.ext_id.as_str())
            .collect();
        assert_eq!(order, vec!["Aa1", "Eh4", "Ij3"]);
    }
}
