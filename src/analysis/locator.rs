//! Locating taxa in a tree by label.

use crate::model::TreeModel;
use log::warn;

/// Outcome of looking up a taxon label in a tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Located<N> {
    /// The taxon was found; for duplicated labels, the first occurrence in pre-order.
    Found(N),
    /// The taxon does not occur in the tree (or the lookup failed).
    Absent,
}

impl<N> Located<N> {
    /// Returns the located node, if any.
    pub fn node(self) -> Option<N> {
        match self {
            Located::Found(node) => Some(node),
            Located::Absent => None,
        }
    }
}

/// Returns the vertex of `tree` labeled `label`.
///
/// * No match: [`Located::Absent`], silently, since missing taxa are routine
///   in gene trees.
/// * One match: that vertex.
/// * Several matches: the first in pre-order, with a warning.
///
/// Never fails; a failing lookup is logged and reported as absent.
pub fn locate<T: TreeModel>(tree: &T, label: &str) -> Located<T::Node> {
    let tree_name = tree.name().unwrap_or("<unnamed>");
    match tree.find_by_label(label) {
        Ok(nodes) => match nodes.as_slice() {
            [] => Located::Absent,
            [node] => Located::Found(*node),
            [first, ..] => {
                warn!(
                    "Taxon '{label}' occurs {} times in tree '{tree_name}'; using the first occurrence",
                    nodes.len()
                );
                Located::Found(*first)
            }
        },
        Err(e) => {
            warn!("Looking up taxon '{label}' in tree '{tree_name}' failed: {e}");
            Located::Absent
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::newick::parse_named_str;

    #[test]
    fn test_locate_unique_and_absent() {
        let tree = parse_named_str("t1", "((A,B)90,C);").unwrap();
        let b = locate(&tree, "B").node().unwrap();
        assert_eq!(tree.vertex(b).label(), Some("B"));
        assert_eq!(locate(&tree, "D"), Located::Absent);
    }

    #[test]
    fn test_locate_duplicate_uses_first_in_pre_order() {
        let tree = parse_named_str("t1", "((A,B)90,(C,A)80);").unwrap();
        let first = tree.leaves_with_label("A")[0];
        assert_eq!(locate(&tree, "A"), Located::Found(first));

        // the first occurrence sits in the left clade
        let left_clade = tree.root().children()[0];
        assert_eq!(tree.vertex(first).parent(), Some(left_clade));
    }

    #[test]
    fn test_internal_support_is_not_a_label() {
        let tree = parse_named_str("t1", "((A,B)90,C);").unwrap();
        assert_eq!(locate(&tree, "90"), Located::Absent);
    }
}
