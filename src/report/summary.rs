//! Human-readable console summaries of a batch run.

use crate::analysis::{BatchReport, Tally};
use crate::config::AnalysisConfig;
use std::fmt;
use std::path;

const MAJOR_RULE: &str = "==============================";
const MINOR_RULE: &str = "------------------------------";
const ENTRY_RULE: &str = "--------------------";

/// Configuration overview printed before a run.
pub struct RunBanner<'a>(pub &'a AnalysisConfig);

impl fmt::Display for RunBanner<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let config = self.0;
        let repaired_dir = path::absolute(&config.repaired_tree_dir)
            .unwrap_or_else(|_| config.repaired_tree_dir.clone());

        writeln!(
            f,
            "Analyzing tree files ending with '{}' in '{}'",
            config.tree_suffix,
            config.tree_dir.display()
        )?;
        writeln!(f, "Support threshold: > {}", config.support_threshold)?;
        writeln!(f, "Species A: {}", config.species_a.join(", "))?;
        writeln!(f, "Species B: {}", config.species_b.join(", "))?;
        writeln!(f, "Species of interest (SOI): {}", config.species_of_interest.join(", "))?;
        writeln!(f, "Combinations per tree: {}", config.num_combinations())?;
        writeln!(f, "Repaired trees are saved to: '{}'", repaired_dir.display())?;
        write!(f, "{MINOR_RULE}")
    }
}

/// File and tree counts of a finished run.
pub struct RunOverview<'a>(pub &'a BatchReport);

impl fmt::Display for RunOverview<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{MAJOR_RULE}")?;
        writeln!(f, "Analysis complete. Summary:")?;
        writeln!(f, "Files matching the suffix: {}", self.0.files_scanned)?;
        writeln!(f, "Trees loaded and analyzed: {}", self.0.trees_analyzed)?;
        write!(f, "{MINOR_RULE}")
    }
}

/// Per-key counts of a tally, one block per (SOI, A, B).
pub struct TallySummary<'a> {
    pub tally: &'a Tally,
    pub support_threshold: f64,
}

impl fmt::Display for TallySummary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let threshold = self.support_threshold;
        for entry in self.tally.entries() {
            let (key, counts) = (&entry.key, &entry.counts);
            writeln!(f, "SOI: {}, A: {}, B: {}", key.soi, key.a, key.b)?;
            writeln!(f, "  Trees analyzed with A, B and SOI present: {}", counts.trees_processed)?;
            writeln!(f, "  -> closer to A '{}' (support > {threshold}): {}", key.a, counts.closer_to_a)?;
            writeln!(f, "  -> closer to B '{}' (support > {threshold}): {}", key.b, counts.closer_to_b)?;
            writeln!(f, "  -> undetermined/equidistant/low support: {}", counts.undetermined)?;
            writeln!(f, "  Errors during processing: {}", counts.errors)?;
            writeln!(f, "{ENTRY_RULE}")?;
        }
        Ok(())
    }
}
