//! Relationship analysis of a species of interest across gene trees.
//!
//! The pipeline per tree is [locate](locator::locate) the three taxa,
//! [classify](classifier::classify) their relationship, and record the
//! [Verdict] in a [Tally] keyed by (SOI, A, B). [BatchAnalyzer] drives it
//! over a directory of tree files.
//!
//! All stages work on any [TreeModel](crate::model::TreeModel), so a
//! hand-built tree can stand in for a parsed one.

pub mod batch;
pub mod classifier;
pub mod locator;
pub mod tally;

pub use batch::{AnalysisError, BatchAnalyzer, BatchReport, TreeOutcome, VerdictRecord};
pub use classifier::{Verdict, classify, try_classify};
pub use locator::{Located, locate};
pub use tally::{Counts, Tally, TallyEntry, TripleKey};
