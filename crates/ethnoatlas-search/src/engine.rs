//! The search engine facade.
//!
//! One engine wraps one store and exposes the three operations the caller
//! consumes: `search`, `bin`, and `min_max`. All state is request-scoped;
//! the engine itself holds nothing mutable between calls. The four facet
//! evaluators run concurrently, their hits are folded into a fresh
//! aggregator, and trees are projected from the survivors' languages.

use ethnoatlas_store::{AtlasStore, TreeStore};
use ethnoatlas_types::{
    ContinuousLegend, Criterion, EnvironmentalVariableId, SearchQuery, SearchResults, ValueRange,
    VariableId,
};
use tracing::info;

use crate::aggregate::ResultAggregator;
use crate::criteria::{
    Evaluation, evaluate_cultural, evaluate_environmental, evaluate_geographic, evaluate_language,
};
use crate::error::SearchError;
use crate::{legend, trees};

/// The faceted search engine over one atlas store.
#[derive(Debug)]
pub struct SearchEngine<S> {
    store: S,
}

impl<S> SearchEngine<S>
where
    S: AtlasStore + TreeStore,
{
    /// Wrap a store.
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    /// Run a faceted search: evaluate every present facet, intersect
    /// across the active categories, and project the applicable trees.
    pub async fn search(&self, query: &SearchQuery) -> Result<SearchResults, SearchError> {
        let active = query.active_criteria();

        // One future per facet; absent facets resolve to an empty
        // evaluation immediately.
        let (language, cultural, environmental, geographic) = tokio::join!(
            async {
                match &query.language_classifications {
                    Some(filters) => evaluate_language(&self.store, filters).await,
                    None => Ok(Evaluation::empty()),
                }
            },
            async {
                match &query.variable_codes {
                    Some(selections) => evaluate_cultural(&self.store, selections).await,
                    None => Ok(Evaluation::empty()),
                }
            },
            async {
                match &query.environmental_filters {
                    Some(filters) => evaluate_environmental(&self.store, filters).await,
                    None => Ok(Evaluation::empty()),
                }
            },
            async {
                match &query.geographic_regions {
                    Some(filters) => evaluate_geographic(&self.store, filters).await,
                    None => Ok(Evaluation::empty()),
                }
            },
        );
        let (language, cultural, environmental, geographic) =
            (language?, cultural?, environmental?, geographic?);

        if let Some(category) = sole_unresolved_criterion(
            query,
            &active,
            language.resolved,
            cultural.resolved,
            environmental.resolved,
            geographic.resolved,
        ) {
            return Err(SearchError::CriterionNotFound { category });
        }

        let mut aggregator = ResultAggregator::new();
        for (society, evidence) in language.hits {
            aggregator.add_language_match(society, evidence)?;
        }
        for (society, evidence) in cultural.hits {
            aggregator.add_cultural_match(society, evidence)?;
        }
        for (society, evidence) in environmental.hits {
            aggregator.add_environmental_match(society, evidence)?;
        }
        for (society, evidence) in geographic.hits {
            aggregator.add_region_match(society, evidence)?;
        }
        aggregator.finalize(&active)?;

        let languages = aggregator.survivor_languages();
        for tree in trees::project_trees(&self.store, &languages).await? {
            aggregator.add_projected_tree(tree)?;
        }

        let results = aggregator.into_results()?;
        info!(
            active_categories = active.len(),
            societies = results.societies.len(),
            trees = results.trees.len(),
            "search complete"
        );
        Ok(results)
    }

    /// Legend for one continuous cultural variable.
    pub async fn bin(&self, variable: VariableId) -> Result<ContinuousLegend, SearchError> {
        legend::bin(&self.store, variable).await
    }

    /// Observed value range of one environmental variable.
    pub async fn min_max(
        &self,
        variable: EnvironmentalVariableId,
    ) -> Result<ValueRange, SearchError> {
        legend::min_max(&self.store, variable).await
    }
}

/// The single active category whose entries all failed to resolve, if the
/// query has exactly one active category with at least one entry.
///
/// A query whose sole criterion references only unknown records has no
/// other facet to fall back on, so it aborts rather than silently
/// returning an empty result.
fn sole_unresolved_criterion(
    query: &SearchQuery,
    active: &std::collections::BTreeSet<Criterion>,
    language_resolved: usize,
    cultural_resolved: usize,
    environmental_resolved: usize,
    geographic_resolved: usize,
) -> Option<Criterion> {
    if active.len() != 1 {
        return None;
    }
    let category = *active.iter().next()?;
    let (entries, resolved) = match category {
        Criterion::Language => (
            query.language_classifications.as_ref().map_or(0, Vec::len),
            language_resolved,
        ),
        Criterion::Cultural => (
            query.variable_codes.as_ref().map_or(0, Vec::len),
            cultural_resolved,
        ),
        Criterion::Environmental => (
            query.environmental_filters.as_ref().map_or(0, Vec::len),
            environmental_resolved,
        ),
        Criterion::Geographic => (
            query.geographic_regions.as_ref().map_or(0, Vec::len),
            geographic_resolved,
        ),
    };
    (entries > 0 && resolved == 0).then_some(category)
}
