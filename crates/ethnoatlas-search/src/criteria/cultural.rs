//! Cultural variable evaluator.
//!
//! Selection entries share one pool of supplied code ids: every entry's
//! variable is resolved with its codes restricted to that pool, and the
//! restricted set must round-trip exactly (a mismatch means the caller
//! assembled the query wrong and the whole search fails). Categorical
//! entries then match coded values by code membership; continuous entries
//! match by an exclusive numeric range or, for the missing-data option, by
//! sentinel-token equality.

use std::collections::BTreeSet;

use ethnoatlas_store::AtlasStore;
use ethnoatlas_types::{
    CodeDescription, CodeId, CodedValue, CulturalMatch, Society, SocietyId, VariableSelection,
};
use tracing::warn;

use crate::criteria::{Evaluation, attach_societies};
use crate::error::SearchError;

/// Coded values matching one continuous selection entry, or `None` when the
/// entry carries neither bounds nor a sentinel and must be skipped.
fn continuous_matches(
    selection: &VariableSelection,
    values: Vec<CodedValue>,
) -> Option<Vec<CodedValue>> {
    if let (Some(min), Some(max)) = (selection.min, selection.max) {
        return Some(
            values
                .into_iter()
                .filter(|value| value.coded_value != "NA")
                .filter(|value| {
                    value
                        .coded_value
                        .parse::<f64>()
                        .is_ok_and(|v| v > min && v < max)
                })
                .collect(),
        );
    }
    if let Some(sentinel) = &selection.code {
        return Some(
            values
                .into_iter()
                .filter(|value| value.coded_value == *sentinel)
                .collect(),
        );
    }
    warn!(
        variable = %selection.variable,
        "continuous selection carries neither min/max nor a code, entry skipped"
    );
    None
}

/// Evaluate the cultural variable facet: one hit per matching coded value,
/// with the variable, the restricted code set, and the value as evidence.
pub async fn evaluate_cultural<S>(
    store: &S,
    selections: &[VariableSelection],
) -> Result<Evaluation<(Society, CulturalMatch)>, SearchError>
where
    S: AtlasStore + ?Sized,
{
    let supplied: BTreeSet<CodeId> = selections.iter().filter_map(|s| s.id).collect();

    let mut pairs: Vec<(SocietyId, CulturalMatch)> = Vec::new();
    let mut resolved = 0usize;
    for selection in selections {
        let Some(variable) = store.variable(selection.variable).await? else {
            warn!(variable = %selection.variable, "unknown variable, entry skipped");
            continue;
        };
        let restricted: Vec<CodeDescription> = store
            .codes_for_variable(variable.id)
            .await?
            .into_iter()
            .filter(|code| supplied.contains(&code.id))
            .collect();

        // The supplied pool must consist of exactly this variable's codes.
        let restricted_ids: BTreeSet<CodeId> = restricted.iter().map(|code| code.id).collect();
        if supplied != restricted_ids {
            return Err(SearchError::CodeSetMismatch {
                variable: variable.id,
            });
        }

        let matched = if variable.is_continuous() {
            let values = store.coded_values_for_variable(variable.id).await?;
            let Some(matched) = continuous_matches(selection, values) else {
                continue;
            };
            matched
        } else {
            let code_ids: Vec<CodeId> = restricted.iter().map(|code| code.id).collect();
            store.coded_values_for_codes(variable.id, &code_ids).await?
        };
        resolved = resolved.saturating_add(1);
        for value in matched {
            pairs.push((
                value.society,
                CulturalMatch {
                    variable: variable.clone(),
                    codes: restricted.clone(),
                    value,
                },
            ));
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

    fn ext_ids(evaluation: &Evaluation<(Society, CulturalMatch)>) -> Vec<&str> {
        let mut out: Vec<&str> = evaluation
            .hits
            .iter()
            .map(|(society, _)| society.ext_id.as_str())
            .collect();
        out.sort_unstable();
        out
    }

    #[tokio::test]
    async fn categorical_selection_matches_by_code() {
        let (atlas, ids) = sample_atlas().unwrap();
        let selections = [VariableSelection {
            variable: ids.slavery,
            id: Some(ids.slavery_hereditary),
            min: None,
            max: None,
            code: None,
        }];

        let evaluation = evaluate_cultural(&atlas, &selections).await.unwrap();
        assert_eq!(evaluation.resolved, 1);
        assert_eq!(ext_ids(&evaluation), vec!["Ii1", "Ij3"]);

        let (_, evidence) = evaluation.hits.first().unwrap();
        assert_eq!(evidence.variable.label, "EA070");
        assert_eq!(evidence.codes.len(), 1);
        assert_eq!(evidence.value.coded_value, "4");
    }

    #[tokio::test]
    async fn multiple_codes_of_one_variable_union() {
        let (atlas, ids) = sample_atlas().unwrap();
        let selections = [
            VariableSelection {
                variable: ids.slavery,
                id: Some(ids.slavery_incipient),
                min: None,
                max: None,
                code: None,
            },
            VariableSelection {
                variable: ids.slavery,
                id: Some(ids.slavery_reported),
                min: None,
                max: None,
                code: None,
            },
        ];

        let evaluation = evaluate_cultural(&atlas, &selections).await.unwrap();
        // Both entries match the union of the two codes, so each society
        // shows up once per entry.
        assert_eq!(ext_ids(&evaluation), vec!["Ih4", "Ih4", "Ij2", "Ij2"]);
    }

    #[tokio::test]
    async fn continuous_range_is_exclusive_and_numeric() {
        let (atlas, ids) = sample_atlas().unwrap();
        let selections = [VariableSelection {
            variable: ids.population_density,
            id: None,
            min: Some(10.0),
            max: Some(30.0),
            code: None,
        }];

        // 11.4, 18.2, 25.5 fall strictly inside; 0.24, 0.3, 34, NA do not.
        let evaluation = evaluate_cultural(&atlas, &selections).await.unwrap();
        assert_eq!(ext_ids(&evaluation), vec!["Ih4", "Ij2", "Ij3"]);
    }

    #[tokio::test]
    async fn continuous_boundaries_are_excluded() {
        let (atlas, ids) = sample_atlas().unwrap();
        let selections = [VariableSelection {
            variable: ids.population_density,
            id: None,
            min: Some(11.4),
            max: Some(34.0),
            code: None,
        }];

        let evaluation = evaluate_cultural(&atlas, &selections).await.unwrap();
        assert_eq!(ext_ids(&evaluation), vec!["Ih4", "Ij3"]);
    }

    #[tokio::test]
    async fn missing_data_selection_matches_the_sentinel() {
        let (atlas, ids) = sample_atlas().unwrap();
        let selections = [VariableSelection {
            variable: ids.population_density,
            id: None,
            min: None,
            max: None,
            code: Some("NA".to_owned()),
        }];

        let evaluation = evaluate_cultural(&atlas, &selections).await.unwrap();
        assert_eq!(ext_ids(&evaluation), vec!["Eh4"]);
    }

    #[tokio::test]
    async fn foreign_code_id_fails_the_contract_check() {
        let (atlas, ids) = sample_atlas().unwrap();
        // population_density_missing belongs to the other variable, so the
        // supplied pool can never equal the slavery code set.
        let selections = [
            VariableSelection {
                variable: ids.slavery,
                id: Some(ids.slavery_absent),
                min: None,
                max: None,
                code: None,
            },
            VariableSelection {
                variable: ids.slavery,
                id: Some(ids.population_density_missing),
                min: None,
                max: None,
                code: None,
            },
        ];

        let err = evaluate_cultural(&atlas, &selections).await.unwrap_err();
        assert!(matches!(err, SearchError::CodeSetMismatch { .. }));
    }

    #[tokio::test]
    async fn malformed_continuous_entry_is_skipped() {
        let (atlas, ids) = sample_atlas().unwrap();
        let selections = [VariableSelection {
            variable: ids.population_density,
            id: None,
            min: None,
            max: None,
            code: None,
        }];

        let evaluation = evaluate_cultural(&atlas, &selections).await.unwrap();
        assert_eq!(evaluation.resolved, 0);
        assert!(evaluation.hits.is_empty());
    }
}
