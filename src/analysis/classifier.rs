//! Classification of a species of interest relative to two reference taxa.
//!
//! Given the leaves of a species of interest (SOI) and of two reference taxa
//! A and B, the classifier compares `MRCA(SOI, A)` with `MRCA(SOI, B)`:
//!
//! | Topology | Verdict |
//! |----------|---------|
//! | both MRCAs coincide | [`Verdict::Undetermined`] |
//! | `MRCA(SOI, B)` strictly below `MRCA(SOI, A)` | [`Verdict::CloserToB`] if its support `> threshold` |
//! | `MRCA(SOI, A)` strictly below `MRCA(SOI, B)` | [`Verdict::CloserToA`] if its support `> threshold` |
//! | neither below the other | [`Verdict::Undetermined`], logged as unexpected |
//!
//! A directional candidate whose deciding clade has support equal to or
//! below the threshold is reported as undetermined. Query failures on the
//! tree yield [`Verdict::Error`].

use crate::model::{TreeError, TreeModel};
use log::{error, warn};
use serde::Serialize;
use std::fmt;

// =#========================================================================#=
// VERDICT
// =#========================================================================#=
/// Relationship of a species of interest to the reference taxa A and B in one tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Verdict {
    /// SOI groups with A in a clade excluding B, with sufficient support
    #[serde(rename = "closer_to_A")]
    CloserToA,
    /// SOI groups with B in a clade excluding A, with sufficient support
    #[serde(rename = "closer_to_B")]
    CloserToB,
    /// Equidistant, weakly supported, or unexpected topology
    #[serde(rename = "undetermined")]
    Undetermined,
    /// The tree could not answer the MRCA, descendant or support queries
    #[serde(rename = "error")]
    Error,
}

impl Verdict {
    /// Returns the canonical name used in logs and result files.
    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::CloserToA => "closer_to_A",
            Verdict::CloserToB => "closer_to_B",
            Verdict::Undetermined => "undetermined",
            Verdict::Error => "error",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =#========================================================================#=
// CLASSIFICATION
// =#========================================================================#=
/// Classifies the relationship of `soi` to `a` and `b` in `tree`.
///
/// Never fails: query errors are logged and turned into [`Verdict::Error`].
/// See the [module documentation](self) for the decision rule.
pub fn classify<T: TreeModel>(
    tree: &T,
    soi: T::Node,
    a: T::Node,
    b: T::Node,
    support_threshold: f64,
) -> Verdict {
    match try_classify(tree, soi, a, b, support_threshold) {
        Ok(verdict) => verdict,
        Err(e) => {
            error!(
                "Finding MRCA for SOI '{}' with A '{}' and B '{}' in tree '{}' failed: {e}",
                display_label(tree, soi),
                display_label(tree, a),
                display_label(tree, b),
                tree.name().unwrap_or("<unnamed>"),
            );
            Verdict::Error
        }
    }
}

/// Classifies like [classify], but hands query errors to the caller.
///
/// Never returns `Ok(Verdict::Error)`.
pub fn try_classify<T: TreeModel>(
    tree: &T,
    soi: T::Node,
    a: T::Node,
    b: T::Node,
    support_threshold: f64,
) -> Result<Verdict, TreeError> {
    let mrca_sa = tree.mrca(soi, a)?;
    let mrca_sb = tree.mrca(soi, b)?;

    if mrca_sa == mrca_sb {
        return Ok(Verdict::Undetermined);
    }

    if tree.is_descendant(mrca_sb, mrca_sa)? {
        let support = tree.support(mrca_sb)?;
        return Ok(gate_by_support(Verdict::CloserToB, support, support_threshold));
    }

    if tree.is_descendant(mrca_sa, mrca_sb)? {
        let support = tree.support(mrca_sa)?;
        return Ok(gate_by_support(Verdict::CloserToA, support, support_threshold));
    }

    // Both MRCAs lie on the path from SOI to the root, so one should always
    // be an ancestor of the other. Reaching this means the tree model
    // disagrees with itself, e.g. through inconsistent rooting.
    warn!(
        "Unexpected topology for SOI '{}' with A '{}' and B '{}' in tree '{}'",
        display_label(tree, soi),
        display_label(tree, a),
        display_label(tree, b),
        tree.name().unwrap_or("<unnamed>"),
    );
    Ok(Verdict::Undetermined)
}

/// Keeps a directional verdict only if the deciding support strictly exceeds the threshold.
fn gate_by_support(candidate: Verdict, support: f64, support_threshold: f64) -> Verdict {
    if support > support_threshold {
        candidate
    } else {
        Verdict::Undetermined
    }
}

fn display_label<T: TreeModel>(tree: &T, node: T::Node) -> String {
    match tree.label(node) {
        Some(label) => label.to_string(),
        None => format!("{node:?}"),
    }
}
