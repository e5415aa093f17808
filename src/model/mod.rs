//! Data model for rooted phylogenetic trees.
//!
//! # Tree representation
//! Trees are represented by [PhyloTree], which uses the arena pattern to store
//! [Vertex] nodes. Each vertex is either a `Root`, `Internal`, or `Leaf`,
//! referenced by [VertexIndex]. Vertices may have any number of children.
//! Root and internal vertices carry an optional support value, the numeric
//! label written after their closing parenthesis in Newick.
//!
//! # Queries
//! The relationship analysis does not use [PhyloTree] directly, but goes
//! through the [TreeModel] trait (label search, MRCA, descendant check,
//! support). Any type implementing it can be analyzed.

pub mod tree;
pub mod tree_model;
pub mod vertex;

pub use tree::PhyloTree;
pub use tree::VertexIndex;
pub use tree_model::{DEFAULT_SUPPORT, ParseNewick, TreeError, TreeModel};
pub use vertex::Vertex;
