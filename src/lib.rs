//! Cladetally tallies, across many gene trees, whether a species of interest
//! (SOI) groups more closely with one reference taxon (A) or another (B).
//!
//! Core functionality provided:
//! - Newick: Parse Newick strings with support values on internal vertices,
//!   and repair the common omission of those values. See [crate::newick].
//! - Tree model: [PhyloTree](crate::model::PhyloTree), an arena of
//!   multifurcating vertices, accessed by the analysis through the
//!   [TreeModel](crate::model::TreeModel) trait (label search, MRCA,
//!   descendant check, support).
//! - Analysis: For every (SOI, A, B) combination present in a tree, the
//!   deeper of `MRCA(SOI, A)` and `MRCA(SOI, B)` decides the relationship,
//!   provided its support exceeds a threshold. Verdicts are accumulated into
//!   a [Tally](crate::analysis::Tally). See [crate::analysis].
//! - Output: Tally and verdict CSV files, console summaries. See [crate::report].
//!
//! # Usage patterns
//! 1. Analyze a directory of tree files with [analyze], configured through an
//!    [AnalysisConfig](crate::config::AnalysisConfig).
//! 2. Drive a [BatchAnalyzer](crate::analysis::BatchAnalyzer) yourself, or
//!    call [classify](crate::analysis::classify) on single trees.
//!
//! ## Example
//! ```
//! use cladetally::analysis::{Verdict, classify, locate};
//! use cladetally::newick::parse_str;
//!
//! let tree = parse_str("(((A:1,SOI:1)95:1,B:1)90:1);")?;
//! let soi = locate(&tree, "SOI").node().unwrap();
//! let a = locate(&tree, "A").node().unwrap();
//! let b = locate(&tree, "B").node().unwrap();
//! assert_eq!(classify(&tree, soi, a, b, 70.0), Verdict::CloserToA);
//! # Ok::<(), cladetally::parser::ParsingError>(())
//! ```

pub mod analysis;
pub mod config;
pub mod model;
pub mod newick;
pub mod parser;
pub mod report;

use crate::analysis::{AnalysisError, BatchAnalyzer, BatchReport};
use crate::config::AnalysisConfig;

// ============================================================================
// QUICK API (pub)
// ============================================================================
/// Analyzes all tree files described by `config`.
///
/// Repaired trees are written to the configured directory. The CSV outputs
/// are not written; see [report].
///
/// # Returns
/// * [BatchReport] - Tally, verdicts and file counts
/// * [AnalysisError] - If the tree directory is missing or unreadable, or
///   the repaired-tree directory cannot be created
///
/// # Example
/// ```no_run
/// use cladetally::analyze;
/// use cladetally::config::AnalysisConfig;
///
/// let config = AnalysisConfig {
///     species_a: vec!["Clematis_repens".into()],
///     species_b: vec!["Clematis_songorica".into()],
///     species_of_interest: vec!["Clematis_tangutica".into()],
///     ..Default::default()
/// };
/// let report = analyze(&config)?;
/// println!("{} trees analyzed", report.trees_analyzed);
/// # Ok::<(), cladetally::analysis::AnalysisError>(())
/// ```
pub fn analyze(config: &AnalysisConfig) -> Result<BatchReport, AnalysisError> {
    BatchAnalyzer::new(config).run()
}
