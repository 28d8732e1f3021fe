//! Environmental measurement evaluator.

use ethnoatlas_store::AtlasStore;
use ethnoatlas_types::{
    EnvOperator, EnvironmentalFilter, EnvironmentalMatch, Society, SocietyId,
};
use tracing::warn;

use crate::criteria::{Evaluation, attach_societies};
use crate::error::SearchError;

/// A validated numeric predicate built from one filter entry.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Predicate {
    /// `low < v < high`.
    InRange(f64, f64),
    /// `v > high AND v < low`. Kept exactly as the data service applies it;
    /// only satisfiable when the parameters arrive inverted.
    OutRange(f64, f64),
    /// `v > threshold`.
    Gt(f64),
    /// `v < threshold`.
    Lt(f64),
}

impl Predicate {
    /// Build the predicate, or `None` when `params` is too short for the
    /// operator.
    fn from_filter(operator: EnvOperator, params: &[f64]) -> Option<Self> {
        match operator {
            EnvOperator::InRange => match (params.first(), params.get(1)) {
                (Some(&low), Some(&high)) => Some(Self::InRange(low, high)),
                _ => None,
            },
            EnvOperator::OutRange => match (params.first(), params.get(1)) {
                (Some(&low), Some(&high)) => Some(Self::OutRange(low, high)),
                _ => None,
            },
            EnvOperator::Gt => params.first().map(|&threshold| Self::Gt(threshold)),
            EnvOperator::Lt => params.first().map(|&threshold| Self::Lt(threshold)),
        }
    }

    /// Whether `v` satisfies the predicate.
    const fn matches(self, v: f64) -> bool {
        match self {
            Self::InRange(low, high) => low < v && v < high,
            Self::OutRange(low, high) => v > high && v < low,
            Self::Gt(threshold) => v > threshold,
            Self::Lt(threshold) => v < threshold,
        }
    }
}

/// Evaluate the environmental facet: one hit per measurement satisfying an
/// entry's predicate, with the variable and measurement as evidence.
pub async fn evaluate_environmental<S>(
    store: &S,
    filters: &[EnvironmentalFilter],
) -> Result<Evaluation<(Society, EnvironmentalMatch)>, SearchError>
where
    S: AtlasStore + ?Sized,
{
    let mut pairs: Vec<(SocietyId, EnvironmentalMatch)> = Vec::new();
    let mut resolved = 0usize;
    for filter in filters {
        let Some(variable) = store.environmental_variable(filter.id).await? else {
            warn!(variable = %filter.id, "unknown environmental variable, entry skipped");
            continue;
        };
        let Some(predicate) = Predicate::from_filter(filter.operator, &filter.params) else {
            warn!(
                variable = %filter.id,
                operator = ?filter.operator,
                params = filter.params.len(),
                "environmental filter is missing parameters, entry skipped"
            );
            continue;
        };
        resolved = resolved.saturating_add(1);
        for value in store.environmental_values_for_variable(filter.id).await? {
            if predicate.matches(value.value) {
                pairs.push((
                    value.society,
                    EnvironmentalMatch {
                        variable: variable.clone(),
                        value,
                    },
                ));
            }
        }
    }

    Ok(Evaluation {
        hits: attach_societies(store, pairs).await?,
        resolved,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use ethnoatlas_store::sample_atlas;

    use super::*;

    fn ext_ids(evaluation: &Evaluation<(Society, EnvironmentalMatch)>) -> Vec<&str> {
        let mut out: Vec<&str> = evaluation
            .hits
            .iter()
            .map(|(society, _)| society.ext_id.as_str())
            .collect();
        out.sort_unstable();
        out
    }

    #[test]
    fn predicates_apply_their_operators() {
        assert!(Predicate::InRange(10.0, 20.0).matches(12.0));
        assert!(!Predicate::InRange(10.0, 20.0).matches(10.0));
        assert!(Predicate::Gt(10.0).matches(12.0));
        assert!(!Predicate::Gt(10.0).matches(9.0));
        assert!(Predicate::Lt(10.0).matches(9.0));
        assert!(!Predicate::Lt(10.0).matches(10.0));
    }

    #[test]
    fn outrange_requires_inverted_parameters() {
        // As specified in order, the conjunction is unsatisfiable.
        assert!(!Predicate::OutRange(15.0, 20.0).matches(25.0));
        assert!(!Predicate::OutRange(15.0, 20.0).matches(10.0));
        // Inverted parameters turn it into a band.
        assert!(Predicate::OutRange(20.0, 15.0).matches(17.0));
        assert!(!Predicate::OutRange(20.0, 15.0).matches(25.0));
    }

    #[tokio::test]
    async fn inrange_filters_temperatures() {
        let (atlas, ids) = sample_atlas().unwrap();
        let filters = [EnvironmentalFilter {
            id: ids.temperature,
            operator: EnvOperator::InRange,
            params: vec![20.0, 30.0],
        }];

        // Every sample society except the Maori (12.9) sits in (20, 30).
        let evaluation = evaluate_environmental(&atlas, &filters).await.unwrap();
        assert_eq!(evaluation.resolved, 1);
        assert_eq!(
            ext_ids(&evaluation),
            vec!["Aa1", "Aa9", "Eh4", "Ih4", "Ii1", "Ij3"]
        );
    }

    #[tokio::test]
    async fn gt_filters_strictly() {
        let (atlas, ids) = sample_atlas().unwrap();
        let filters = [EnvironmentalFilter {
            id: ids.temperature,
            operator: EnvOperator::Gt,
            params: vec![25.0],
        }];

        let evaluation = evaluate_environmental(&atlas, &filters).await.unwrap();
        assert_eq!(ext_ids(&evaluation), vec!["Eh4", "Ih4", "Ii1"]);
    }

    #[tokio::test]
    async fn missing_params_skip_the_entry() {
        let (atlas, ids) = sample_atlas().unwrap();
        let filters = [EnvironmentalFilter {
            id: ids.temperature,
            operator: EnvOperator::InRange,
            params: vec![20.0],
        }];

        let evaluation = evaluate_environmental(&atlas, &filters).await.unwrap();
        assert_eq!(evaluation.resolved, 0);
        assert!(evaluation.hits.is_empty());
    }
}
