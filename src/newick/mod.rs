//! Newick format parser and repair for gene trees with support values.
//!
//! This module provides [NewickParser] to parse a Newick string into a
//! [PhyloTree], and [repair_newick] to patch the common omission of support
//! labels before parsing.
//!
//! # Quick API
//! * [`parse_str`] - parses a single string, returns a [PhyloTree]
//! * [`parse_named_str`] - same, but names the tree (e.g. after its file)
//!
//! # Format
//! Support values are read from the labels of internal vertices, the
//! convention of RAxML and IQ-TREE bipartition output:
//! * `((A:0.1,B:0.2)95:0.3,C:0.4);` - clade `(A,B)` has support `95`
//!
//! For a leaf:
//! * label \[branch_length\]
//!
//! For an internal vertex and the root:
//! * (children) \[support\] \[branch_length\]
//!
//! Vertices may have any number of children. Square-bracket comments
//! (including `[&...]` annotations) are skipped.

mod defs;
pub mod parser;
pub mod repair;

pub use parser::NewickParser;
pub use repair::{MISSING_SUPPORT_PLACEHOLDER, repair_newick};

use crate::model::PhyloTree;
use crate::parser::ParsingError;
use crate::parser::byte_parser::ByteParser;

// ============================================================================
// QUICK PARSING API (pub)
// ============================================================================
/// Parses a single Newick string to obtain a [PhyloTree].
///
/// # Returns
/// * [PhyloTree] - Tree parsed from the string
/// * [ParsingError] - If the string is not valid Newick format
///
/// # Example
/// ```
/// use cladetally::newick::parse_str;
///
/// let tree = parse_str("(Fratercula_cirrhata,(Fratercula_arctica,Fratercula_corniculata)88);")?;
/// assert_eq!(tree.num_leaves(), 3);
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn parse_str<S: AsRef<str>>(newick: S) -> Result<PhyloTree, ParsingError> {
    let mut byte_parser = ByteParser::for_str(newick.as_ref());
    NewickParser::new().parse_str(&mut byte_parser)
}

/// Parses a single Newick string to obtain a [PhyloTree] named `name`.
pub fn parse_named_str<S: AsRef<str>>(name: &str, newick: S) -> Result<PhyloTree, ParsingError> {
    let mut byte_parser = ByteParser::for_str(newick.as_ref());
    NewickParser::new()
        .with_tree_name(name)
        .parse_str(&mut byte_parser)
}
