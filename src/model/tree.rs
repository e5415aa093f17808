//! Provides the rooted tree representation.
//!
//! Provides core data structures for representing phylogenetic trees:
//! * [PhyloTree] - Main tree structure using the arena pattern
//! * [VertexIndex] as type used to index vertices in tree
//! * [PreOrderIter] and [AncestorIter] for traversal

use crate::model::vertex::Vertex;

/// Index of a vertex in a tree (arena).
pub type VertexIndex = usize;

/// *During construction only*, index for unset root.
const NO_ROOT_SET_INDEX: VertexIndex = usize::MAX;

// =$========================================================================$=
// TREE
// =$========================================================================$=
/// A rooted phylogenetic tree represented using the arena pattern on [Vertex].
///
/// Vertices are stored in a contiguous vector and referenced by
/// [VertexIndex], which avoids referencing troubles between parent and
/// child vertices and keeps traversals cache friendly.
///
/// # Structure
/// - All vertices (root, internal, and leaves) are stored in the arena.
/// - Index of root is maintained.
/// - No assumption on order of indices is maintained.
/// - Vertices may have any positive number of children.
///
/// # Construction
/// Add vertices bottom-up: leaves first, then internal vertices referring to
/// their children, and finally the root. Test validity with
/// [`PhyloTree::is_valid()`].
#[derive(Debug, Clone)]
pub struct PhyloTree {
    /// Vertices of this tree (arena pattern)
    vertices: Vec<Vertex>,

    /// Index of the root of this tree
    root_index: VertexIndex,

    /// Name of tree; typically the file name it was read from
    name: Option<String>,
}

// ============================================================================
// New, Getters / Accessors, etc. (pub)
// ============================================================================
impl PhyloTree {
    /// Creates a new empty tree.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates a new empty tree with room for `num_vertices` vertices.
    pub fn with_capacity(num_vertices: usize) -> Self {
        PhyloTree {
            vertices: Vec::with_capacity(num_vertices),
            root_index: NO_ROOT_SET_INDEX,
            name: None,
        }
    }

    /// Attaches a name to this tree.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set a name for this tree.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = Some(name.into());
    }

    /// Returns name of this tree, or `None` if not set.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Adds a leaf to the tree, assigning a unique index, which gets returned.
    pub fn add_leaf(&mut self, label: Option<String>, branch_length: Option<f64>) -> VertexIndex {
        let index = self.vertices.len();
        self.vertices
            .push(Vertex::new_leaf(index, label, branch_length));
        index
    }

    /// Adds an internal vertex to the tree, assigning a unique index, which gets returned.
    ///
    /// # Panics
    /// Panics if a child index is out of bounds.
    pub fn add_internal_vertex(
        &mut self,
        children: Vec<VertexIndex>,
        support: Option<f64>,
        branch_length: Option<f64>,
    ) -> VertexIndex {
        let index = self.vertices.len();
        for &child in &children {
            self.vertices[child].set_parent(index);
        }
        self.vertices
            .push(Vertex::new_internal(index, children, support, branch_length));
        index
    }

    /// Adds the root to the tree, assigning a unique index, which gets returned.
    ///
    /// # Panics
    /// Panics if a child index is out of bounds.
    pub fn add_root(&mut self, children: Vec<VertexIndex>, support: Option<f64>) -> VertexIndex {
        let index = self.vertices.len();
        for &child in &children {
            self.vertices[child].set_parent(index);
        }
        self.vertices.push(Vertex::new_root(index, children, support));
        self.root_index = index;
        index
    }

    /// Returns whether root of tree has been set.
    pub fn is_root_set(&self) -> bool {
        self.root_index != NO_ROOT_SET_INDEX
    }

    /// Returns a reference to the root vertex.
    ///
    /// # Panics
    /// Panics if the root hasn't been set and thus tree hasn't been fully constructed yet.
    pub fn root(&self) -> &Vertex {
        &self[self.root_index]
    }

    /// Returns the index of the root.
    pub fn root_index(&self) -> VertexIndex {
        self.root_index
    }

    /// Returns a reference to the vertex at the given index.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    pub fn vertex(&self, index: VertexIndex) -> &Vertex {
        &self[index]
    }

    /// Returns the vertex at the given index, or `None` if out of bounds.
    pub fn get(&self, index: VertexIndex) -> Option<&Vertex> {
        self.vertices.get(index)
    }

    /// Returns the number of leaves in this tree.
    pub fn num_leaves(&self) -> usize {
        self.vertices.iter().filter(|&v| v.is_leaf()).count()
    }

    /// Returns the number of internal (non-root) vertices in this tree.
    pub fn num_internal(&self) -> usize {
        self.vertices.iter().filter(|&v| v.is_internal()).count()
    }

    /// Returns the number of vertices in this tree.
    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// Returns all leaves carrying `label`, in pre-order.
    pub fn leaves_with_label(&self, label: &str) -> Vec<VertexIndex> {
        self.pre_order_iter()
            .filter(|v| v.label() == Some(label))
            .map(|v| v.index())
            .collect()
    }

    /// Returns the number of edges between `index` and the root.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    pub fn depth(&self, index: VertexIndex) -> usize {
        self.ancestors_iter(index).count()
    }

    /// Returns the most recent common ancestor of two vertices,
    /// or `None` if either index is out of bounds or the two vertices are
    /// not connected through a common root.
    ///
    /// A vertex is its own ancestor here, so `mrca(x, x) == x` and
    /// `mrca(leaf, parent_of_leaf) == parent_of_leaf`.
    pub fn mrca(&self, a: VertexIndex, b: VertexIndex) -> Option<VertexIndex> {
        if a >= self.vertices.len() || b >= self.vertices.len() {
            return None;
        }

        // Lift the deeper vertex until both are at the same depth,
        // then lift both in lockstep until they meet
        let (mut a, mut b) = (a, b);
        let (mut depth_a, mut depth_b) = (self.depth(a), self.depth(b));
        while depth_a > depth_b {
            a = self[a].parent()?;
            depth_a -= 1;
        }
        while depth_b > depth_a {
            b = self[b].parent()?;
            depth_b -= 1;
        }
        while a != b {
            a = self[a].parent()?;
            b = self[b].parent()?;
        }

        Some(a)
    }

    /// Returns whether `index` lies in the subtree rooted at `ancestor`,
    /// excluding `ancestor` itself.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    pub fn is_strict_descendant(&self, index: VertexIndex, ancestor: VertexIndex) -> bool {
        self.ancestors_iter(index).any(|v| v.index() == ancestor)
    }

    /// Returns the labels of all labeled leaves, in pre-order.
    pub fn leaf_labels(&self) -> impl Iterator<Item = &str> {
        self.pre_order_iter().filter_map(|v| v.label())
    }
}

impl Default for PhyloTree {
    fn default() -> Self {
        Self::new()
    }
}

impl PhyloTree {
    /// Validates the tree structure and all index references.
    ///
    /// Checks:
    /// - Root index is valid and points to the only Root vertex
    /// - All vertex indices match their position in the arena
    /// - All child indices are valid and point back to correct parent
    /// - All non-root vertices have a parent listing them as child
    /// - Every vertex is reachable from the root
    pub fn is_valid(&self) -> bool {
        if self.root_index >= self.vertices.len() || !self.vertices[self.root_index].is_root() {
            return false;
        }

        for (index, vertex) in self.vertices.iter().enumerate() {
            if vertex.index() != index {
                return false;
            }

            if vertex.is_root() && index != self.root_index {
                return false;
            }

            if !vertex.is_leaf() && vertex.children().is_empty() {
                return false;
            }

            for &child in vertex.children() {
                if child >= self.vertices.len() || self.vertices[child].parent() != Some(index) {
                    return false;
                }
            }

            if !vertex.is_root() {
                match vertex.parent() {
                    None => return false,
                    Some(parent) => {
                        if parent >= self.vertices.len()
                            || !self.vertices[parent].children().contains(&index)
                        {
                            return false;
                        }
                    }
                }
            }
        }

        self.pre_order_iter().count() == self.vertices.len()
    }
}

impl std::ops::Index<VertexIndex> for PhyloTree {
    type Output = Vertex;

    fn index(&self, index: VertexIndex) -> &Self::Output {
        &self.vertices[index]
    }
}

// =$========================================================================$=
// ITERATORS
// =$========================================================================$=
impl PhyloTree {
    /// Returns an iterator over the tree in pre-order (parents before
    /// children, children left to right).
    ///
    /// This is the traversal order in which duplicate labels are resolved.
    ///
    /// # Example
    /// ```
    /// use cladetally::model::PhyloTree;
    ///
    /// let mut tree = PhyloTree::new();
    /// let a = tree.add_leaf(Some("A".to_string()), Some(1.0));
    /// let b = tree.add_leaf(Some("B".to_string()), Some(1.0));
    /// let root = tree.add_root(vec![a, b], None);
    ///
    /// let indices: Vec<_> = tree.pre_order_iter().map(|v| v.index()).collect();
    /// assert_eq!(indices, vec![root, a, b]);
    /// ```
    pub fn pre_order_iter(&self) -> PreOrderIter<'_> {
        PreOrderIter::new(self)
    }

    /// Returns an iterator over the proper ancestors of `index`,
    /// starting with its parent and ending with the root.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    pub fn ancestors_iter(&self, index: VertexIndex) -> AncestorIter<'_> {
        AncestorIter {
            tree: self,
            next: self[index].parent(),
        }
    }
}

/// Iterator for pre-order traversal (parents before children).
///
/// This iterator uses a stack-based approach to traverse the tree without recursion.
pub struct PreOrderIter<'a> {
    tree: &'a PhyloTree,
    stack: Vec<VertexIndex>,
}

impl<'a> PreOrderIter<'a> {
    fn new(tree: &'a PhyloTree) -> Self {
        let mut stack = Vec::new();
        if tree.is_root_set() {
            stack.push(tree.root_index);
        }
        PreOrderIter { tree, stack }
    }
}

impl<'a> Iterator for PreOrderIter<'a> {
    type Item = &'a Vertex;

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.stack.pop()?;
        let vertex = &self.tree[index];

        // Push children in reverse, so the leftmost is processed first
        self.stack.extend(vertex.children().iter().rev());

        Some(vertex)
    }
}

/// Iterator walking from a vertex up to the root (exclusive of the start vertex).
pub struct AncestorIter<'a> {
    tree: &'a PhyloTree,
    next: Option<VertexIndex>,
}

impl<'a> Iterator for AncestorIter<'a> {
    type Item = &'a Vertex;

    fn next(&mut self) -> Option<Self::Item> {
        let vertex = self.tree.get(self.next?)?;
        self.next = vertex.parent();
        Some(vertex)
    }
}
