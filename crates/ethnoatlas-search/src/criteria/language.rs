//! Language classification evaluator.

use ethnoatlas_store::AtlasStore;
use ethnoatlas_types::{ClassificationFilter, Language, Society};
use tracing::warn;

use crate::criteria::Evaluation;
use crate::error::SearchError;

/// Evaluate the language facet: one hit per society speaking a selected
/// language, with the language as evidence.
pub async fn evaluate_language<S>(
    store: &S,
    filters: &[ClassificationFilter],
) -> Result<Evaluation<(Society, Language)>, SearchError>
where
    S: AtlasStore + ?Sized,
{
    let mut evaluation = Evaluation::empty();
    for filter in filters {
        let Some(language) = store.language(filter.id).await? else {
            warn!(language_id = %filter.id, "unknown language classification, entry skipped");
            continue;
        };
        evaluation.resolved = evaluation.resolved.saturating_add(1);
        for society in store.societies_for_languages(&[filter.id]).await? {
            evaluation.hits.push((society, language.clone()));
        }
    }
    Ok(evaluation)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use ethnoatlas_store::sample_atlas;
    use ethnoatlas_types::LanguageId;

    use super::*;

    #[tokio::test]
    async fn selected_languages_hit_their_societies() {
        let (atlas, ids) = sample_atlas().unwrap();
        let filters = [
            ClassificationFilter { id: ids.hawaiian },
            ClassificationFilter { id: ids.maori },
        ];

        let evaluation = evaluate_language(&atlas, &filters).await.unwrap();
        assert_eq!(evaluation.resolved, 2);

        let mut hits: Vec<(&str, &str)> = evaluation
            .hits
            .iter()
            .map(|(society, language)| (society.ext_id.as_str(), language.name.as_str()))
            .collect();
        hits.sort_unstable();
        assert_eq!(hits, vec![("Ij2", "Maori"), ("Ij3", "Hawaiian")]);
    }

    #[tokio::test]
    async fn unknown_language_is_skipped() {
        let (atlas, ids) = sample_atlas().unwrap();
        let filters = [
            ClassificationFilter { id: LanguageId::new() },
            ClassificationFilter { id: ids.hadza },
        ];

        let evaluation = evaluate_language(&atlas, &filters).await.unwrap();
        assert_eq!(evaluation.resolved, 1);
        assert_eq!(evaluation.hits.len(), 1);
        let (society, _) = evaluation.hits.first().unwrap();
        assert_eq!(society.ext_id, "Aa9");
    }
}
