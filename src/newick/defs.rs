//! Constants for the Newick parser.

/// Newick label delimiters: parentheses, brackets, comma, colon, semicolon, whitespace
pub(crate) const NEWICK_LABEL_DELIMITERS: &[u8] = b"()[],:; \n\t\r";

/// Default guess for number of leaves, used to pre-allocate the vertex arena
pub(crate) const DEFAULT_NUM_LEAVES_GUESS: usize = 32;
