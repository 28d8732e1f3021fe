//! Geographic region evaluator.

use ethnoatlas_store::AtlasStore;
use ethnoatlas_types::{GeographicRegion, RegionFilter, Society};
use tracing::warn;

use crate::criteria::Evaluation;
use crate::error::SearchError;

/// Evaluate the geographic facet: one hit per society whose location
/// intersects a selected region's polygon, with the region as evidence.
/// Boundary-touching points count as intersecting.
pub async fn evaluate_geographic<S>(
    store: &S,
    filters: &[RegionFilter],
) -> Result<Evaluation<(Society, GeographicRegion)>, SearchError>
where
    S: AtlasStore + ?Sized,
{
    let mut evaluation = Evaluation::empty();
    for filter in filters {
        let Some(region) = store.region(filter.id).await? else {
            warn!(region_id = %filter.id, "unknown geographic region, entry skipped");
            continue;
        };
        evaluation.resolved = evaluation.resolved.saturating_add(1);
        for society in store.societies_in_polygon(&region.geometry).await? {
            evaluation.hits.push((society, region.clone()));
        }
    }
    Ok(evaluation)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use ethnoatlas_store::sample_atlas;
    use ethnoatlas_types::RegionId;

    use super::*;

    fn ext_ids(evaluation: &Evaluation<(Society, GeographicRegion)>) -> Vec<&str> {
        let mut out: Vec<&str> = evaluation
            .hits
            .iter()
            .map(|(society, _)| society.ext_id.as_str())
            .collect();
        out.sort_unstable();
        out
    }

    #[tokio::test]
    async fn regions_hit_contained_societies() {
        let (atlas, ids) = sample_atlas().unwrap();
        let filters = [
            RegionFilter { id: ids.western_polynesia },
            RegionFilter { id: ids.eastern_africa },
        ];

        let evaluation = evaluate_geographic(&atlas, &filters).await.unwrap();
        assert_eq!(evaluation.resolved, 2);
        assert_eq!(ext_ids(&evaluation), vec!["Aa9", "Ih4", "Ii1"]);
    }

    #[tokio::test]
    async fn evidence_is_the_region_record() {
        let (atlas, ids) = sample_atlas().unwrap();
        let filters = [RegionFilter { id: ids.southern_africa }];

        let evaluation = evaluate_geographic(&atlas, &filters).await.unwrap();
        assert_eq!(evaluation.hits.len(), 1);
        let (society, region) = evaluation.hits.first().unwrap();
        assert_eq!(society.ext_id, "Aa1");
        assert_eq!(region.name, "Southern Africa");
    }

    #[tokio::test]
    async fn unknown_region_is_skipped() {
        let (atlas, ids) = sample_atlas().unwrap();
        let filters = [
            RegionFilter { id: RegionId::new() },
            RegionFilter { id: ids.western_polynesia },
        ];

        let evaluation = evaluate_geographic(&atlas, &filters).await.unwrap();
        assert_eq!(evaluation.resolved, 1);
        assert_eq!(ext_ids(&evaluation), vec!["Ih4", "Ii1"]);
    }
}
