//! Prune a tree to a chosen label set, preserving branch lengths.
//!
//! The retained topology is the minimal one connecting the targets: target
//! nodes, every branching point between two or more of them, and the root.
//! Unretained unary chains collapse with their branch lengths accumulating
//! onto the surviving child, so root-to-leaf distances among retained
//! nodes are unchanged.

use std::collections::BTreeSet;

use crate::error::NewickError;
use crate::tree::{NewickNode, NewickTree};

impl NewickTree {
    /// Prune the tree so that its leaves are exactly the nodes named in
    /// `keep` (a target naming an internal node keeps that node, truncated
    /// to its retained descendants).
    ///
    /// Every label in `keep` must name at least one node; otherwise the
    /// tree is left unmodified and [`NewickError::LabelNotFound`] is
    /// returned. The root is always retained.
    pub fn prune(&mut self, keep: &BTreeSet<String>) -> Result<(), NewickError> {
        if let Some(missing) = first_missing_label(&self.root, keep) {
            return Err(NewickError::LabelNotFound(missing));
        }
        let children = core::mem::take(&mut self.root.children);
        self.root.children = children
            .into_iter()
            .filter_map(|child| retain(child, keep))
            .collect();
        Ok(())
    }
}

/// The first target label that matches no node name, if any.
fn first_missing_label(root: &NewickNode, keep: &BTreeSet<String>) -> Option<String> {
    let mut present = BTreeSet::new();
    collect_names(root, &mut present);
    keep.iter()
        .find(|label| !present.contains(label.as_str()))
        .cloned()
}

fn collect_names<'a>(node: &'a NewickNode, out: &mut BTreeSet<&'a str>) {
    if let Some(name) = node.name.as_deref() {
        out.insert(name);
    }
    for child in &node.children {
        collect_names(child, out);
    }
}

/// Rebuild `node` keeping only target-bearing lineages.
///
/// Returns `None` when nothing below (or at) the node is a target. A
/// matched node survives with its retained children; an unmatched node
/// survives only as a branching point, and an unmatched unary node is
/// replaced by its child with the two branch lengths summed.
fn retain(mut node: NewickNode, keep: &BTreeSet<String>) -> Option<NewickNode> {
    let children = core::mem::take(&mut node.children);
    let mut kept: Vec<NewickNode> = children
        .into_iter()
        .filter_map(|child| retain(child, keep))
        .collect();

    let matched = node
        .name
        .as_deref()
        .is_some_and(|name| keep.contains(name));
    if matched {
        node.children = kept;
        return Some(node);
    }
    match kept.len() {
        0 => None,
        1 => {
            let mut child = kept.pop()?;
            child.length = merge_lengths(child.length, node.length);
            Some(child)
        }
        _ => {
            node.children = kept;
            Some(node)
        }
    }
}

/// Sum two optional branch lengths, treating a missing length as zero when
/// the other side has one.
fn merge_lengths(child: Option<f64>, parent: Option<f64>) -> Option<f64> {
    match (child, parent) {
        (None, None) => None,
        (child, parent) => Some(child.unwrap_or(0.0) + parent.unwrap_or(0.0)),
    }
}
