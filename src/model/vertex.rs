//! Vertex module for phylogenetic tree representation.

use crate::model::tree::VertexIndex;

/// During construction, Internal and Leaf vertex might not have parent set yet.
const NO_PARENT_SET: VertexIndex = usize::MAX;

// =#========================================================================#=
// VERTEX
// =#========================================================================#=
/// Represents a vertex (node) in a phylogenetic tree.
///
/// A vertex can be either:
/// - **Root**: Has children, no parent, optionally a support value
/// - **Internal**: Has parent and children, optionally a support value
///   and a branch length
/// - **Leaf**: Has no children, optionally a label and a branch length
///
/// Unlike strictly binary models, an internal vertex may have any positive
/// number of children, since gene trees from tools like RAxML often carry a
/// trifurcating root, and a pair of outer parentheses around a single clade
/// yields a root with one child.
///
/// # Invariants
/// - `index` is index in arena
/// - `parent` is [VertexIndex] of parent in arena; `NO_PARENT_SET` only during construction
/// - `support` is the numeric label written right after the closing parenthesis
#[derive(PartialEq, Debug, Clone)]
pub enum Vertex {
    /// Root vertex of the tree (has no parent)
    Root {
        /// Index of this vertex in the tree arena
        index: VertexIndex,
        /// Indices of the child vertices
        children: Vec<VertexIndex>,
        /// Support value of the clade, if annotated
        support: Option<f64>,
    },
    /// Internal vertex (has parent and children)
    Internal {
        /// Index of this vertex in the tree arena
        index: VertexIndex,
        /// Index of the parent vertex
        parent: VertexIndex,
        /// Indices of the child vertices
        children: Vec<VertexIndex>,
        /// Support value of the clade, if annotated
        support: Option<f64>,
        /// Distance to parent node
        branch_length: Option<f64>,
    },
    /// Leaf vertex (has parent, no children)
    Leaf {
        /// Index of this vertex in the tree arena
        index: VertexIndex,
        /// Index of the parent vertex
        parent: VertexIndex,
        /// Taxon label
        label: Option<String>,
        /// Distance to parent node
        branch_length: Option<f64>,
    },
}

impl Vertex {
    /// Creates a new root vertex.
    pub fn new_root(index: VertexIndex, children: Vec<VertexIndex>, support: Option<f64>) -> Self {
        Vertex::Root {
            index,
            children,
            support,
        }
    }

    /// Creates a new internal (non-leaf, non-root) vertex.
    pub fn new_internal(
        index: VertexIndex,
        children: Vec<VertexIndex>,
        support: Option<f64>,
        branch_length: Option<f64>,
    ) -> Self {
        Vertex::Internal {
            index,
            parent: NO_PARENT_SET,
            children,
            support,
            branch_length,
        }
    }

    /// Creates a new leaf vertex.
    pub fn new_leaf(index: VertexIndex, label: Option<String>, branch_length: Option<f64>) -> Self {
        Vertex::Leaf {
            index,
            parent: NO_PARENT_SET,
            label,
            branch_length,
        }
    }

    /// Returns the index of this vertex.
    pub fn index(&self) -> VertexIndex {
        match self {
            Vertex::Root { index, .. } => *index,
            Vertex::Internal { index, .. } => *index,
            Vertex::Leaf { index, .. } => *index,
        }
    }

    /// Returns the index of the parent, or `None` for the root
    /// (and for vertices whose parent has not been set yet).
    pub fn parent(&self) -> Option<VertexIndex> {
        match self {
            Vertex::Root { .. } => None,
            Vertex::Internal { parent, .. } | Vertex::Leaf { parent, .. } => {
                (*parent != NO_PARENT_SET).then_some(*parent)
            }
        }
    }

    /// Returns the child indices; empty for a leaf.
    pub fn children(&self) -> &[VertexIndex] {
        match self {
            Vertex::Root { children, .. } | Vertex::Internal { children, .. } => children,
            Vertex::Leaf { .. } => &[],
        }
    }

    /// Returns the label of a leaf, `None` for unlabeled leaves and all other vertices.
    pub fn label(&self) -> Option<&str> {
        match self {
            Vertex::Leaf { label, .. } => label.as_deref(),
            _ => None,
        }
    }

    /// Returns the support value annotated on a root or internal vertex.
    pub fn support(&self) -> Option<f64> {
        match self {
            Vertex::Root { support, .. } | Vertex::Internal { support, .. } => *support,
            Vertex::Leaf { .. } => None,
        }
    }

    /// Returns the length of the incoming branch, if any.
    pub fn branch_length(&self) -> Option<f64> {
        match self {
            Vertex::Root { .. } => None,
            Vertex::Internal { branch_length, .. } | Vertex::Leaf { branch_length, .. } => {
                *branch_length
            }
        }
    }

    /// Returns whether this vertex is the root.
    pub fn is_root(&self) -> bool {
        matches!(self, Vertex::Root { .. })
    }

    /// Returns whether this vertex is an internal, non-root vertex.
    pub fn is_internal(&self) -> bool {
        matches!(self, Vertex::Internal { .. })
    }

    /// Returns whether this vertex is a leaf.
    pub fn is_leaf(&self) -> bool {
        matches!(self, Vertex::Leaf { .. })
    }

    /// Sets the parent index of an internal vertex or leaf; no-op on the root.
    pub(crate) fn set_parent(&mut self, parent_index: VertexIndex) {
        match self {
            Vertex::Root { .. } => {}
            Vertex::Internal { parent, .. } | Vertex::Leaf { parent, .. } => {
                *parent = parent_index;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leaf_accessors() {
        let mut leaf = Vertex::new_leaf(0, Some("Anarhynchus_frontalis".to_string()), Some(0.5));
        assert!(leaf.is_leaf());
        assert_eq!(leaf.parent(), None);
        leaf.set_parent(3);
        assert_eq!(leaf.parent(), Some(3));
        assert_eq!(leaf.label(), Some("Anarhynchus_frontalis"));
        assert_eq!(leaf.support(), None);
        assert!(leaf.children().is_empty());
    }

    #[test]
    fn test_root_has_no_parent() {
        let mut root = Vertex::new_root(4, vec![0, 1, 2], Some(100.0));
        root.set_parent(7);
        assert_eq!(root.parent(), None);
        assert_eq!(root.children(), &[0, 1, 2]);
        assert_eq!(root.support(), Some(100.0));
        assert_eq!(root.branch_length(), None);
    }
}
