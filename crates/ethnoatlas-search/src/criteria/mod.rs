//! The four criterion evaluators.
//!
//! Each evaluator turns one facet of a query into (society, evidence) hits
//! using only the store traits, and reports how many of its filter entries
//! it actually evaluated. Unknown ids and malformed entries are skipped and
//! warn-logged; deciding whether skipped entries abort the whole query is
//! the engine's call (it depends on which categories are active).

pub mod cultural;
pub mod environmental;
pub mod geographic;
pub mod language;

use std::collections::{BTreeMap, BTreeSet};

use ethnoatlas_store::AtlasStore;
use ethnoatlas_types::{Society, SocietyId};

use crate::error::SearchError;

pub use cultural::evaluate_cultural;
pub use environmental::evaluate_environmental;
pub use geographic::evaluate_geographic;
pub use language::evaluate_language;

/// What one evaluator produced for its facet.
#[derive(Debug)]
pub struct Evaluation<T> {
    /// The (society, evidence) matches, in store order.
    pub hits: Vec<T>,
    /// How many filter entries were fully evaluated (not skipped).
    pub resolved: usize,
}

impl<T> Evaluation<T> {
    /// An evaluation with no hits and no evaluated entries.
    pub const fn empty() -> Self {
        Self {
            hits: Vec::new(),
            resolved: 0,
        }
    }
}

/// Resolve the society record for each (society id, evidence) pair, dropping
/// pairs whose society is unknown to the store.
pub(crate) async fn attach_societies<S, T>(
    store: &S,
    pairs: Vec<(SocietyId, T)>,
) -> Result<Vec<(Society, T)>, SearchError>
where
    S: AtlasStore + ?Sized,
{
    let ids: Vec<SocietyId> = pairs
        .iter()
        .map(|(id, _)| *id)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    let societies: BTreeMap<SocietyId, Society> = store
        .societies_by_ids(&ids)
        .await?
        .into_iter()
        .map(|society| (society.id, society))
        .collect();
    Ok(pairs
        .into_iter()
        .filter_map(|(id, evidence)| {
            societies
                .get(&id)
                .map(|society| (society.clone(), evidence))
        })
        .collect())
}
