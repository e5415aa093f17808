//! Structs and logic to parse Newick strings with support values.
//!
//! This module provides the [NewickParser] struct, which parses a single
//! Newick tree into a [PhyloTree]. Labels written after a closing
//! parenthesis are read as support values of the corresponding clade.

use crate::model::{PhyloTree, VertexIndex};
use crate::newick::defs::{DEFAULT_NUM_LEAVES_GUESS, NEWICK_LABEL_DELIMITERS};
use crate::parser::byte_parser::ByteParser;
use crate::parser::byte_source::ByteSource;
use crate::parser::parsing_error::ParsingError;

// =#========================================================================#=
// NEWICK PARSER
// =#========================================================================#=
/// Parser for single Newick format phylogenetic trees
/// whose internal labels are support values.
///
/// # Grammar
/// * `tree ::= internal_vertex ';'`
/// * `vertex ::= leaf | internal_vertex`
/// * `internal_vertex ::= '(' vertex (',' vertex)* ')' [support] [':' number]`
/// * `leaf ::= [label] [':' number]`
///
/// Whitespace and `[...]` comments may occur between elements. An internal
/// vertex without support label keeps `None`; a support label that is not
/// a number is an error.
///
/// # Example
/// ```
/// use cladetally::newick::NewickParser;
/// use cladetally::parser::ByteParser;
///
/// let mut byte_parser = ByteParser::for_str("((A:1,SOI:1)95:1,B:1)90;");
/// let tree = NewickParser::new().parse_str(&mut byte_parser).unwrap();
/// assert_eq!(tree.num_leaves(), 3);
/// assert_eq!(tree.root().support(), Some(90.0));
/// ```
pub struct NewickParser {
    num_leaves_guess: usize,
    tree_name: Option<String>,
}

// ============================================================================
// Construction & Configuration (pub)
// ============================================================================
impl NewickParser {
    /// Creates a new [NewickParser] with default settings.
    pub fn new() -> Self {
        Self {
            num_leaves_guess: DEFAULT_NUM_LEAVES_GUESS,
            tree_name: None,
        }
    }

    /// Sets the expected number of leaves, used to pre-allocate the arena.
    pub fn with_num_leaves(mut self, num_leaves: usize) -> Self {
        self.num_leaves_guess = num_leaves.max(1);
        self
    }

    /// Names the parsed tree, e.g. after the file it was read from.
    pub fn with_tree_name(mut self, name: impl Into<String>) -> Self {
        self.tree_name = Some(name.into());
        self
    }
}

impl Default for NewickParser {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// API Parsing (pub)
// ============================================================================
impl NewickParser {
    /// Parses a single Newick tree from the given [ByteParser].
    ///
    /// Only whitespace and comments may follow the terminating `;`.
    ///
    /// # Returns
    /// * `Ok(PhyloTree)` - The parsed phylogenetic tree
    /// * `Err(ParsingError)` - If the Newick format is invalid
    pub fn parse_str<B: ByteSource>(
        &self,
        parser: &mut ByteParser<B>,
    ) -> Result<PhyloTree, ParsingError> {
        let mut tree = PhyloTree::with_capacity(2 * self.num_leaves_guess - 1);
        if let Some(name) = &self.tree_name {
            tree.set_name(name.clone());
        }

        self.parse_root(parser, &mut tree)?;

        parser.skip_comment_and_whitespace()?;
        if !parser.is_eof() {
            return Err(ParsingError::invalid_newick_string(
                parser,
                "Unexpected characters after end of tree".to_string(),
            ));
        }

        debug_assert!(tree.is_valid());
        Ok(tree)
    }
}

// ============================================================================
// Parsing
// ============================================================================
impl NewickParser {
    /// Parses root of tree and adds it to tree:
    /// - `(children)[support][:branch_length];`
    /// - A root branch length is accepted but dropped
    fn parse_root<B: ByteSource>(
        &self,
        parser: &mut ByteParser<B>,
        tree: &mut PhyloTree,
    ) -> Result<(), ParsingError> {
        parser.skip_comment_and_whitespace()?;
        if !parser.peek_is(b'(') {
            let next_char = parser.peek().map(char::from);
            return Err(ParsingError::invalid_newick_string(
                parser,
                format!("Expected '(' at start of tree but found {:?}", next_char),
            ));
        }

        let children = self.parse_children(parser, tree)?;
        let support = self.parse_support(parser)?;
        self.parse_branch_length(parser)?;

        // Consume the terminating semicolon
        parser.skip_comment_and_whitespace()?;
        if !parser.consume_if(b';') {
            let next_char = parser.peek().map(char::from);
            return Err(ParsingError::invalid_newick_string(
                parser,
                format!("Expected ';' at end of tree but found {:?}", next_char),
            ));
        }

        tree.add_root(children, support);
        Ok(())
    }

    /// Parses a vertex (either internal vertex or leaf) and returns its index.
    fn parse_vertex<B: ByteSource>(
        &self,
        parser: &mut ByteParser<B>,
        tree: &mut PhyloTree,
    ) -> Result<VertexIndex, ParsingError> {
        parser.skip_comment_and_whitespace()?;
        if parser.peek_is(b'(') {
            self.parse_internal_vertex(parser, tree)
        } else {
            self.parse_leaf(parser, tree)
        }
    }

    /// Parses internal vertex `(children)[support][:branch_length]`,
    /// adds it to tree, and returns its index.
    fn parse_internal_vertex<B: ByteSource>(
        &self,
        parser: &mut ByteParser<B>,
        tree: &mut PhyloTree,
    ) -> Result<VertexIndex, ParsingError> {
        let children = self.parse_children(parser, tree)?;
        let support = self.parse_support(parser)?;
        let branch_length = self.parse_branch_length(parser)?;
        Ok(tree.add_internal_vertex(children, support, branch_length))
    }

    /// Parses the children list `(vertex, vertex, ...)` and returns their indices.
    /// Expects parser at opening `(`.
    fn parse_children<B: ByteSource>(
        &self,
        parser: &mut ByteParser<B>,
        tree: &mut PhyloTree,
    ) -> Result<Vec<VertexIndex>, ParsingError> {
        parser.consume_if(b'(');

        let mut children = vec![self.parse_vertex(parser, tree)?];
        loop {
            parser.skip_comment_and_whitespace()?;
            match parser.next_byte() {
                Some(b',') => children.push(self.parse_vertex(parser, tree)?),
                Some(b')') => return Ok(children),
                Some(b) => {
                    return Err(ParsingError::invalid_newick_string(
                        parser,
                        format!("Expected ',' or ')' between children but found {:?}", char::from(b)),
                    ));
                }
                None => return Err(ParsingError::unexpected_eof(parser)),
            }
        }
    }

    /// Parses leaf vertex `[label][:branch_length]` and adds it to tree.
    fn parse_leaf<B: ByteSource>(
        &self,
        parser: &mut ByteParser<B>,
        tree: &mut PhyloTree,
    ) -> Result<VertexIndex, ParsingError> {
        if parser.is_eof() {
            return Err(ParsingError::unexpected_eof(parser));
        }

        let label = parser.parse_label(NEWICK_LABEL_DELIMITERS)?;
        let label = (!label.is_empty()).then_some(label);
        let branch_length = self.parse_branch_length(parser)?;

        Ok(tree.add_leaf(label, branch_length))
    }

    /// Parses the optional support label following a closing parenthesis.
    ///
    /// # Returns
    /// - `Ok(Some(support))` if a numeric label was found
    /// - `Ok(None)` if no label was found
    /// - [ParsingError] if the label is not a number
    fn parse_support<B: ByteSource>(
        &self,
        parser: &mut ByteParser<B>,
    ) -> Result<Option<f64>, ParsingError> {
        let label = parser.parse_label(NEWICK_LABEL_DELIMITERS)?;
        if label.is_empty() {
            return Ok(None);
        }

        label
            .trim()
            .parse::<f64>()
            .map(Some)
            .map_err(|_| ParsingError::invalid_support_value(parser, label))
    }

    /// Parses optional branch length `[:number]`:
    /// - Skips comments/whitespace before and after `:`
    /// - Supports scientific notation (e.g. `1.5e-10`)
    fn parse_branch_length<B: ByteSource>(
        &self,
        parser: &mut ByteParser<B>,
    ) -> Result<Option<f64>, ParsingError> {
        parser.skip_comment_and_whitespace()?;
        if !parser.consume_if(b':') {
            return Ok(None);
        }
        parser.skip_comment_and_whitespace()?;

        let mut branch_length_str = String::new();
        while let Some(b) = parser.peek() {
            // Valid characters for a float: digits, '.', '-', '+', 'e', 'E'
            if b.is_ascii_digit() || b == b'.' || b == b'-' || b == b'+' || b == b'e' || b == b'E' {
                branch_length_str.push(b as char);
                parser.next_byte();
            } else {
                break;
            }
        }

        let value: f64 = branch_length_str
            .parse()
            .map_err(|_| ParsingError::invalid_branch_length(parser, branch_length_str.clone()))?;
        Ok(Some(value))
    }
}
