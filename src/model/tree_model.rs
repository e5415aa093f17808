//! Traits describing what the analysis needs from a tree.
//!
//! The [TreeModel] trait decouples the relationship analysis from a concrete
//! tree representation. The analysis only ever:
//! 1. searches leaves by label ([`find_by_label`](TreeModel::find_by_label)),
//! 2. computes MRCAs ([`mrca`](TreeModel::mrca)),
//! 3. asks whether one vertex is below another
//!    ([`is_descendant`](TreeModel::is_descendant)),
//! 4. reads support values ([`support`](TreeModel::support)).
//!
//! [PhyloTree] implements both [TreeModel] and [ParseNewick]; tests use
//! small hand-built doubles implementing [TreeModel] only.

use crate::model::tree::{PhyloTree, VertexIndex};
use crate::newick;
use crate::parser::ParsingError;
use std::fmt::Debug;

/// Support reported for vertices without an annotated value.
///
/// Matches the convention of common tree libraries, which assign a support
/// of `1.0` to unannotated nodes (and to leaves).
pub const DEFAULT_SUPPORT: f64 = 1.0;

// =#========================================================================#=
// TREE ERROR
// =#========================================================================#=
/// Failure of a [TreeModel] query.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum TreeError {
    #[error("vertex {0} does not belong to this tree")]
    UnknownVertex(String),
    #[error("vertices {0} and {1} have no common ancestor")]
    NoCommonAncestor(String, String),
    #[error("support value of vertex {0} is not a number")]
    MalformedSupport(String),
}

// =#========================================================================#=
// TREE MODEL (trait)
// =#========================================================================#=
/// Queries on a rooted tree required by the relationship analysis.
pub trait TreeModel {
    /// Handle of a vertex within this tree.
    type Node: Copy + Eq + Debug;

    /// Name of the tree, e.g. the file it was read from.
    fn name(&self) -> Option<&str>;

    /// Returns all vertices labeled `label`, in pre-order.
    fn find_by_label(&self, label: &str) -> Result<Vec<Self::Node>, TreeError>;

    /// Returns the label of `node`, if it has one.
    fn label(&self, node: Self::Node) -> Option<&str>;

    /// Returns the most recent common ancestor of `a` and `b`.
    ///
    /// Must satisfy `mrca(x, x) == x` and `mrca(x, y) == mrca(y, x)`.
    fn mrca(&self, a: Self::Node, b: Self::Node) -> Result<Self::Node, TreeError>;

    /// Returns whether `node` lies in the subtree of `ancestor`,
    /// excluding `ancestor` itself.
    fn is_descendant(&self, node: Self::Node, ancestor: Self::Node) -> Result<bool, TreeError>;

    /// Returns the support value of `node`.
    fn support(&self, node: Self::Node) -> Result<f64, TreeError>;
}

/// Construction of a tree from Newick text.
pub trait ParseNewick: Sized {
    /// Parses a single Newick tree whose internal labels are support values.
    fn from_newick(newick: &str) -> Result<Self, ParsingError>;

    /// Same as [from_newick](Self::from_newick), naming the tree `name`.
    fn from_named_newick(name: &str, newick: &str) -> Result<Self, ParsingError>;
}

// ============================================================================
// PhyloTree implementation
// ============================================================================
impl PhyloTree {
    fn check_vertex(&self, index: VertexIndex) -> Result<VertexIndex, TreeError> {
        match self.get(index) {
            Some(_) => Ok(index),
            None => Err(TreeError::UnknownVertex(index.to_string())),
        }
    }
}

impl TreeModel for PhyloTree {
    type Node = VertexIndex;

    fn name(&self) -> Option<&str> {
        PhyloTree::name(self)
    }

    fn find_by_label(&self, label: &str) -> Result<Vec<VertexIndex>, TreeError> {
        Ok(self.leaves_with_label(label))
    }

    fn label(&self, node: VertexIndex) -> Option<&str> {
        self.get(node).and_then(|v| v.label())
    }

    fn mrca(&self, a: VertexIndex, b: VertexIndex) -> Result<VertexIndex, TreeError> {
        let a = self.check_vertex(a)?;
        let b = self.check_vertex(b)?;
        PhyloTree::mrca(self, a, b)
            .ok_or_else(|| TreeError::NoCommonAncestor(a.to_string(), b.to_string()))
    }

    fn is_descendant(&self, node: VertexIndex, ancestor: VertexIndex) -> Result<bool, TreeError> {
        let node = self.check_vertex(node)?;
        let ancestor = self.check_vertex(ancestor)?;
        Ok(self.is_strict_descendant(node, ancestor))
    }

    fn support(&self, node: VertexIndex) -> Result<f64, TreeError> {
        let node = self.check_vertex(node)?;
        let support = self[node].support().unwrap_or(DEFAULT_SUPPORT);
        if support.is_nan() {
            return Err(TreeError::MalformedSupport(node.to_string()));
        }
        Ok(support)
    }
}

impl ParseNewick for PhyloTree {
    fn from_newick(newick: &str) -> Result<Self, ParsingError> {
        newick::parse_str(newick)
    }

    fn from_named_newick(name: &str, newick: &str) -> Result<Self, ParsingError> {
        newick::parse_named_str(name, newick)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_vertex_is_an_error() {
        let tree = PhyloTree::from_newick("(A,B)90;").unwrap();
        assert!(matches!(
            TreeModel::mrca(&tree, 0, 42),
            Err(TreeError::UnknownVertex(_))
        ));
        assert!(tree.support(42).is_err());
        assert!(tree.is_descendant(42, 0).is_err());
    }

    #[test]
    fn test_support_defaults_and_nan() {
        let tree = PhyloTree::from_newick("((A,B)NaN,(C,D))95;").unwrap();
        let a = tree.find_by_label("A").unwrap()[0];
        let c = tree.find_by_label("C").unwrap()[0];
        let ab = TreeModel::mrca(&tree, a, tree.find_by_label("B").unwrap()[0]).unwrap();
        let cd = TreeModel::mrca(&tree, c, tree.find_by_label("D").unwrap()[0]).unwrap();

        assert!(matches!(tree.support(ab), Err(TreeError::MalformedSupport(_))));
        assert_eq!(tree.support(cd), Ok(DEFAULT_SUPPORT));
        assert_eq!(tree.support(a), Ok(DEFAULT_SUPPORT));
        assert_eq!(tree.support(tree.root_index()), Ok(95.0));
    }
}
