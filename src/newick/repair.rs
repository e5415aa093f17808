//! Repair of Newick strings lacking support values.
//!
//! Tree inference tools frequently omit the support label of some clades,
//! e.g. `((A,B):0.1,C);`. The [NewickParser](crate::newick::NewickParser)
//! itself tolerates this, but downstream dialects that require an explicit
//! support value on every internal vertex do not, and the repaired text is
//! what gets written to the repaired-tree directory.

/// Support value inserted where a clade lacks one.
pub const MISSING_SUPPORT_PLACEHOLDER: char = '0';

/// Inserts [`MISSING_SUPPORT_PLACEHOLDER`] after every `)` that is directly
/// followed by `:`, `,` or another `)`.
///
/// A `)` followed by anything else (a digit, a label, `;`, whitespace, the
/// end of input) is left untouched. This is a single linear pass which does
/// not check well-formedness; quoted labels are not treated specially.
///
/// Applying the repair twice gives the same result as applying it once.
///
/// # Example
/// ```
/// use cladetally::newick::repair_newick;
///
/// assert_eq!(repair_newick("((A:1,B:1):1,C:1);"), "((A:1,B:1)0:1,C:1);");
/// assert_eq!(repair_newick("((A,B)95,C);"), "((A,B)95,C);");
/// ```
pub fn repair_newick(newick: &str) -> String {
    let mut repaired = String::with_capacity(newick.len() + newick.len() / 8);
    let mut chars = newick.chars().peekable();

    while let Some(c) = chars.next() {
        repaired.push(c);
        if c == ')' && matches!(chars.peek(), Some(':' | ',' | ')')) {
            repaired.push(MISSING_SUPPORT_PLACEHOLDER);
        }
    }

    repaired
}
