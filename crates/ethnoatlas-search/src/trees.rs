//! Tree projection: rewrite phylogenies onto the matched language set.
//!
//! After a query finalizes, the distinct languages of the surviving
//! societies select every tree covering at least one of them. Each tree is
//! pruned down to the labels those languages carry under the tree's own
//! leaf-label scheme. A failure while rewriting one tree skips that tree
//! only; the rest of the response is unaffected.

use std::collections::{BTreeMap, BTreeSet};

use ethnoatlas_phylo::{NewickError, NewickTree};
use ethnoatlas_store::{AtlasStore, TreeStore};
use ethnoatlas_types::{LabelScheme, Language, LanguageId, LanguageTree, ProjectedTree};
use tracing::{debug, warn};

use crate::error::SearchError;

/// Project every applicable tree onto the given language set.
///
/// An empty language set produces zero trees. Trees whose newick text
/// fails to parse or prune are omitted with a warning.
pub async fn project_trees<S>(
    store: &S,
    languages: &BTreeSet<LanguageId>,
) -> Result<Vec<ProjectedTree>, SearchError>
where
    S: AtlasStore + TreeStore + ?Sized,
{
    if languages.is_empty() {
        return Ok(Vec::new());
    }
    let ids: Vec<LanguageId> = languages.iter().copied().collect();
    let selected: BTreeMap<LanguageId, Language> = store
        .languages_by_ids(&ids)
        .await?
        .into_iter()
        .map(|language| (language.id, language))
        .collect();

    let mut projected = Vec::new();
    for tree in store.trees_for_languages(&ids).await? {
        let scheme = tree.label_scheme();
        let targets: BTreeSet<String> = tree
            .languages
            .iter()
            .filter_map(|id| selected.get(id))
            .filter_map(|language| language.code_for(scheme))
            .map(str::to_owned)
            .collect();
        if targets.is_empty() {
            debug!(tree = %tree.name, "no selected language carries a label for this tree");
            continue;
        }
        match rewrite(&tree, scheme, &targets) {
            Ok(newick) => projected.push(ProjectedTree {
                id: tree.id,
                name: tree.name,
                newick,
            }),
            Err(error) => {
                warn!(tree = %tree.name, %error, "tree skipped during projection");
            }
        }
    }
    Ok(projected)
}

/// Rewrite one tree's newick text down to `targets`.
///
/// Glottolog-labelled trees get special handling for a single target label
/// `L`: when `L` names an ancestral grouping (more than one descendant
/// leaf), or resolves to a lone leaf whose own name is not `L`, the
/// rewritten tree is the synthetic `"(L:1);"` rather than a prune, which
/// would collapse ambiguously.
fn rewrite(
    tree: &LanguageTree,
    scheme: LabelScheme,
    targets: &BTreeSet<String>,
) -> Result<String, NewickError> {
    let mut parsed = NewickTree::parse(&tree.newick)?;
    if scheme == LabelScheme::Glotto {
        if let Some(label) = lone_target(targets) {
            if let Some(node) = parsed.find(label) {
                let leaves = node.leaves();
                let degenerate = leaves.len() > 1
                    || leaves
                        .first()
                        .is_some_and(|leaf| leaf.name.as_deref() != Some(label));
                if degenerate {
                    return Ok(format!("({label}:1);"));
                }
            }
        }
    }
    parsed.prune(targets)?;
    Ok(parsed.to_newick())
}

/// The single target label, when there is exactly one.
fn lone_target(targets: &BTreeSet<String>) -> Option<&str> {
    if targets.len() == 1 {
        targets.iter().next().map(String::as_str)
    } else {
        None
    }
}
