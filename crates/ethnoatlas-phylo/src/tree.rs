//! In-memory tree structure and newick serialization.
//!
//! A [`NewickTree`] owns its nodes as a plain recursive structure. Node
//! names and branch lengths are both optional, as in the wire format.
//! Serialization follows the common convention for rooted trees: internal
//! node names are written, the root's own name and length are omitted.

use core::fmt;

/// One node of a parsed newick tree.
#[derive(Debug, Clone, PartialEq)]
pub struct NewickNode {
    /// Node label, when the source text carried one.
    pub name: Option<String>,
    /// Branch length from the parent, when given.
    pub length: Option<f64>,
    /// Child nodes; empty for leaves.
    pub children: Vec<NewickNode>,
}

impl NewickNode {
    /// Build a node.
    pub const fn new(
        name: Option<String>,
        length: Option<f64>,
        children: Vec<Self>,
    ) -> Self {
        Self {
            name,
            length,
            children,
        }
    }

    /// Whether this node has no children.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// First node (preorder) whose name equals `name`, including self.
    pub fn find(&self, name: &str) -> Option<&Self> {
        if self.name.as_deref() == Some(name) {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(name))
    }

    /// All descendant leaves in left-to-right order. A leaf node yields
    /// itself.
    pub fn leaves(&self) -> Vec<&Self> {
        let mut out = Vec::new();
        self.collect_leaves(&mut out);
        out
    }

    /// Number of descendant leaves (1 for a leaf node).
    pub fn leaf_count(&self) -> usize {
        if self.is_leaf() {
            1
        } else {
            self.children
                .iter()
                .map(Self::leaf_count)
                .fold(0usize, usize::saturating_add)
        }
    }

    fn collect_leaves<'a>(&'a self, out: &mut Vec<&'a Self>) {
        if self.is_leaf() {
            out.push(self);
        } else {
            for child in &self.children {
                child.collect_leaves(out);
            }
        }
    }
}

/// A rooted tree parsed from newick text.
#[derive(Debug, Clone, PartialEq)]
pub struct NewickTree {
    /// The root node. Its own name and length are not serialized.
    pub root: NewickNode,
}

impl NewickTree {
    /// First node (preorder) whose name equals `name`.
    pub fn find(&self, name: &str) -> Option<&NewickNode> {
        self.root.find(name)
    }

    /// Names of all leaves, left to right, unnamed leaves skipped.
    pub fn leaf_names(&self) -> Vec<&str> {
        self.root
            .leaves()
            .into_iter()
            .filter_map(|leaf| leaf.name.as_deref())
            .collect()
    }

    /// Serialize back to newick text.
    pub fn to_newick(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for NewickTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.root.is_leaf() {
            write_label(f, self.root.name.as_deref())?;
        } else {
            write_children(f, &self.root.children)?;
        }
        write!(f, ";")
    }
}

fn write_children(f: &mut fmt::Formatter<'_>, children: &[NewickNode]) -> fmt::Result {
    write!(f, "(")?;
    for (index, child) in children.iter().enumerate() {
        if index > 0 {
            write!(f, ",")?;
        }
        write_node(f, child)?;
    }
    write!(f, ")")
}

fn write_node(f: &mut fmt::Formatter<'_>, node: &NewickNode) -> fmt::Result {
    if !node.is_leaf() {
        write_children(f, &node.children)?;
    }
    write_label(f, node.name.as_deref())?;
    if let Some(length) = node.length {
        write!(f, ":{length}")?;
    }
    Ok(())
}

fn write_label(f: &mut fmt::Formatter<'_>, name: Option<&str>) -> fmt::Result {
    let Some(name) = name else {
        return Ok(());
    };
    if needs_quoting(name) {
        write!(f, "'")?;
        for c in name.chars() {
            if c == '\'' {
                write!(f, "''")?;
            } else {
                write!(f, "{c}")?;
            }
        }
        write!(f, "'")
    } else {
        write!(f, "{name}")
    }
}

/// Labels containing structural characters or whitespace must be quoted.
fn needs_quoting(name: &str) -> bool {
    name.chars()
        .any(|c| c.is_whitespace() || matches!(c, '(' | ')' | ',' | ':' | ';' | '\'' | '[' | ']'))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(name: &str, length: f64) -> NewickNode {
        NewickNode::new(Some(String::from(name)), Some(length), Vec::new())
    }

    #[test]
    fn display_omits_root_name_and_length() {
        let tree = NewickTree {
            root: NewickNode::new(
                Some(String::from("root")),
                Some(9.0),
                vec![leaf("A", 1.0), leaf("B", 2.5)],
            ),
        };
        assert_eq!(tree.to_newick(), "(A:1,B:2.5);");
    }

    #[test]
    fn display_keeps_internal_names() {
        let inner = NewickNode::new(
            Some(String::from("clade")),
            Some(3.0),
            vec![leaf("A", 1.0), leaf("B", 1.0)],
        );
        let tree = NewickTree {
            root: NewickNode::new(None, None, vec![inner, leaf("C", 4.0)]),
        };
        assert_eq!(tree.to_newick(), "((A:1,B:1)clade:3,C:4);");
    }

    #[test]
    fn display_quotes_awkward_labels() {
        let tree = NewickTree {
            root: NewickNode::new(None, None, vec![leaf("St'at'imcets", 1.0)]),
        };
        assert_eq!(tree.to_newick(), "('St''at''imcets':1);");
    }

    #[test]
    fn find_prefers_preorder_first_match() {
        let left = NewickNode::new(
            Some(String::from("X")),
            None,
            vec![leaf("A", 1.0), leaf("B", 1.0)],
        );
        let tree = NewickTree {
            root: NewickNode::new(None, None, vec![left, leaf("X", 2.0)]),
        };
        let found = tree.find("X").map(NewickNode::leaf_count);
        assert_eq!(found, Some(2));
    }

    #[test]
    fn leaf_helpers_count_and_name() {
        let inner = NewickNode::new(None, None, vec![leaf("A", 1.0), leaf("B", 1.0)]);
        let tree = NewickTree {
            root: NewickNode::new(None, None, vec![inner, leaf("C", 1.0)]),
        };
        assert_eq!(tree.root.leaf_count(), 3);
        assert_eq!(tree.leaf_names(), vec!["A", "B", "C"]);
    }
}
