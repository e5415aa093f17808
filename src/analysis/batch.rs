//! Batch orchestration over a directory of tree files.
//!
//! For each tree file, in filename order:
//! 1. read and trim the text (empty files are skipped),
//! 2. [repair](crate::newick::repair_newick) it and persist the repaired
//!    text to the repaired-tree directory,
//! 3. parse it (unparseable files are skipped),
//! 4. classify every (SOI, A, B) combination whose three taxa are present.
//!
//! Per-file and per-combination failures are logged and never abort the
//! run. Only directory-level setup failures are fatal, see [AnalysisError].

use crate::analysis::classifier::{Verdict, classify};
use crate::analysis::locator::{Located, locate};
use crate::analysis::tally::{Tally, TripleKey};
use crate::config::AnalysisConfig;
use crate::model::{ParseNewick, PhyloTree, TreeModel};
use crate::newick::repair_newick;
use log::{error, info, warn};
use serde::Serialize;
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

// =#========================================================================#=
// ERRORS & OUTCOMES
// =#========================================================================#=
/// Failures that abort a batch before any tree is processed.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("tree directory '{0}' does not exist or is not a directory")]
    TreeDirMissing(PathBuf),
    #[error("failed to list tree directory '{path}': {source}")]
    TreeDirUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to create output directory '{path}': {source}")]
    OutputDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// What became of a single tree file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeOutcome {
    /// Parsed and classified, producing this many verdicts
    Analyzed(usize),
    /// File was empty or whitespace only
    Empty,
    /// Text could not be parsed even after repair
    Unparseable,
    /// File could not be read
    Unreadable,
}

/// One verdict of one (SOI, A, B) combination in one tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerdictRecord {
    pub tree: String,
    #[serde(flatten)]
    pub key: TripleKey,
    pub relationship: Verdict,
}

/// Result of a completed batch.
#[derive(Debug, Clone)]
pub struct BatchReport {
    /// Files whose name matched the suffix
    pub files_scanned: usize,
    /// Files that were parsed and classified
    pub trees_analyzed: usize,
    pub tally: Tally,
    /// Every verdict, in processing order
    pub verdicts: Vec<VerdictRecord>,
}

// =#========================================================================#=
// BATCH ANALYZER
// =#========================================================================#=
/// Runs the classification over all tree files of a configuration.
///
/// # Example
/// ```no_run
/// use cladetally::analysis::BatchAnalyzer;
/// use cladetally::config::AnalysisConfig;
///
/// let config = AnalysisConfig::from_json_file("analysis.json")?;
/// let report = BatchAnalyzer::new(&config).run()?;
/// println!("{} trees analyzed", report.trees_analyzed);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug)]
pub struct BatchAnalyzer<'a> {
    config: &'a AnalysisConfig,
    tally: Tally,
    verdicts: Vec<VerdictRecord>,
    files_scanned: usize,
    trees_analyzed: usize,
}

// ============================================================================
// API (pub)
// ============================================================================
impl<'a> BatchAnalyzer<'a> {
    /// Creates an analyzer with a zeroed tally over the configured cross product.
    pub fn new(config: &'a AnalysisConfig) -> Self {
        BatchAnalyzer {
            config,
            tally: Tally::from_lists(
                &config.species_of_interest,
                &config.species_a,
                &config.species_b,
            ),
            verdicts: Vec::new(),
            files_scanned: 0,
            trees_analyzed: 0,
        }
    }

    /// Processes every matching file of the tree directory.
    ///
    /// # Errors
    /// [AnalysisError] if the tree directory is missing or cannot be listed,
    /// or if the repaired-tree directory cannot be created. Nothing is
    /// processed in that case.
    pub fn run(mut self) -> Result<BatchReport, AnalysisError> {
        let tree_dir = &self.config.tree_dir;
        if !tree_dir.is_dir() {
            return Err(AnalysisError::TreeDirMissing(tree_dir.clone()));
        }

        let repaired_dir = &self.config.repaired_tree_dir;
        fs::create_dir_all(repaired_dir).map_err(|source| AnalysisError::OutputDir {
            path: repaired_dir.clone(),
            source,
        })?;

        let files = list_tree_files(tree_dir, &self.config.tree_suffix)?;
        info!(
            "Found {} file(s) ending with '{}' in '{}'",
            files.len(),
            self.config.tree_suffix,
            tree_dir.display()
        );

        for path in &files {
            self.process_file(path);
        }

        Ok(self.finish())
    }

    /// Processes a single tree file and counts it as scanned.
    pub fn process_file(&mut self, path: &Path) -> TreeOutcome {
        self.files_scanned += 1;
        let file_name = file_name_of(path);
        info!("Processing file: {file_name}");

        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                error!("Reading tree file '{}' failed: {e}", path.display());
                return TreeOutcome::Unreadable;
            }
        };

        let newick = content.trim();
        if newick.is_empty() {
            warn!("File '{file_name}' is empty, skipped");
            return TreeOutcome::Empty;
        }

        let repaired = repair_newick(newick);
        self.persist_repaired(&file_name, &repaired);
        self.process_newick(&file_name, &repaired)
    }

    /// Parses `newick` as the [PhyloTree] `tree_name` and classifies all combinations.
    ///
    /// The text is taken as is, without repair.
    pub fn process_newick(&mut self, tree_name: &str, newick: &str) -> TreeOutcome {
        self.process_newick_as::<PhyloTree>(tree_name, newick)
    }

    /// Like [process_newick](Self::process_newick), but parses into any tree model `T`.
    pub fn process_newick_as<T>(&mut self, tree_name: &str, newick: &str) -> TreeOutcome
    where
        T: TreeModel + ParseNewick,
    {
        match T::from_named_newick(tree_name, newick) {
            Ok(tree) => {
                let num_verdicts = self.analyze_tree(tree_name, &tree);
                TreeOutcome::Analyzed(num_verdicts)
            }
            Err(e) => {
                error!("Parsing tree '{tree_name}' failed, skipped: {e}");
                TreeOutcome::Unparseable
            }
        }
    }

    /// Classifies every combination of the tally whose three taxa occur in
    /// `tree`, and counts the tree as analyzed.
    ///
    /// Combinations with an absent taxon are skipped and leave no trace.
    ///
    /// # Returns
    /// The number of verdicts produced
    pub fn analyze_tree<T: TreeModel>(&mut self, tree_name: &str, tree: &T) -> usize {
        self.trees_analyzed += 1;
        let threshold = self.config.support_threshold;

        let results: Vec<(TripleKey, Verdict)> = {
            let mut located = HashMap::new();
            let mut results = Vec::new();
            for key in self.tally.keys() {
                let soi = locate_cached(tree, &mut located, &key.soi).node();
                let a = locate_cached(tree, &mut located, &key.a).node();
                let b = locate_cached(tree, &mut located, &key.b).node();
                let (Some(soi), Some(a), Some(b)) = (soi, a, b) else {
                    continue;
                };
                results.push((key.clone(), classify(tree, soi, a, b, threshold)));
            }
            results
        };

        let num_verdicts = results.len();
        for (key, verdict) in results {
            self.tally.record(&key, verdict);
            self.verdicts.push(VerdictRecord {
                tree: tree_name.to_string(),
                key,
                relationship: verdict,
            });
        }
        num_verdicts
    }

    /// Consumes the analyzer and returns what was accumulated so far.
    pub fn finish(self) -> BatchReport {
        BatchReport {
            files_scanned: self.files_scanned,
            trees_analyzed: self.trees_analyzed,
            tally: self.tally,
            verdicts: self.verdicts,
        }
    }
}

// ============================================================================
// Helpers (private)
// ============================================================================
impl BatchAnalyzer<'_> {
    /// Writes the repaired text under the repaired-tree directory; failures are only warned about.
    fn persist_repaired(&self, file_name: &str, repaired: &str) {
        let out_path = self.config.repaired_tree_dir.join(file_name);
        if let Err(e) = fs::write(&out_path, repaired) {
            warn!(
                "Could not save repaired tree to '{}': {e}",
                out_path.display()
            );
        }
    }
}

/// Looks up `label` once per tree, reusing earlier results.
fn locate_cached<'k, T: TreeModel>(
    tree: &T,
    cache: &mut HashMap<&'k str, Located<T::Node>>,
    label: &'k str,
) -> Located<T::Node> {
    *cache.entry(label).or_insert_with(|| locate(tree, label))
}

/// Returns the regular files directly in `dir` whose name ends with `suffix`, sorted by name.
fn list_tree_files(dir: &Path, suffix: &str) -> Result<Vec<PathBuf>, AnalysisError> {
    let unreadable = |source| AnalysisError::TreeDirUnreadable {
        path: dir.to_path_buf(),
        source,
    };

    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(unreadable)? {
        let path = entry.map_err(unreadable)?.path();
        if path.is_file() && file_name_of(&path).ends_with(suffix) {
            files.push(path);
        }
    }
    files.sort_by_key(|path| file_name_of(path));
    Ok(files)
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(soi: &[&str], a: &[&str], b: &[&str]) -> AnalysisConfig {
        let to_vec = |list: &[&str]| list.iter().map(|s| s.to_string()).collect();
        AnalysisConfig {
            species_of_interest: to_vec(soi),
            species_a: to_vec(a),
            species_b: to_vec(b),
            ..Default::default()
        }
    }

    #[test]
    fn test_absent_taxon_is_skipped_silently() {
        let config = config(&["SOI"], &["A"], &["B", "Missing"]);
        let mut analyzer = BatchAnalyzer::new(&config);
        let outcome = analyzer.process_newick("t1", "(((A,SOI)95,B)90);");
        assert_eq!(outcome, TreeOutcome::Analyzed(1));

        let report = analyzer.finish();
        let missing = TripleKey::new("SOI", "A", "Missing");
        assert_eq!(report.tally.get(&missing).unwrap().trees_processed, 0);
        let present = TripleKey::new("SOI", "A", "B");
        assert_eq!(report.tally.get(&present).unwrap().closer_to_a, 1);
    }

    #[test]
    fn test_undetermined_counts_as_processed() {
        let config = config(&["SOI"], &["A"], &["B"]);
        let mut analyzer = BatchAnalyzer::new(&config);
        analyzer.process_newick("t2", "((A:1,B:1)60:1,SOI:1);");

        let report = analyzer.finish();
        let counts = report.tally.get(&TripleKey::new("SOI", "A", "B")).unwrap();
        assert_eq!(counts.trees_processed, 1);
        assert_eq!(counts.undetermined, 1);
        assert_eq!(report.verdicts[0].relationship, Verdict::Undetermined);
        assert_eq!(report.verdicts[0].tree, "t2");
    }

    #[test]
    fn test_unparseable_tree_counts_nothing() {
        let config = config(&["SOI"], &["A"], &["B"]);
        let mut analyzer = BatchAnalyzer::new(&config);
        assert_eq!(
            analyzer.process_newick("bad", "((A,SOI)high,B);"),
            TreeOutcome::Unparseable
        );

        let report = analyzer.finish();
        assert_eq!(report.trees_analyzed, 0);
        assert!(report.verdicts.is_empty());
    }

    #[test]
    fn test_verdicts_follow_tally_order() {
        let config = config(&["S1", "S2"], &["A"], &["B"]);
        let mut analyzer = BatchAnalyzer::new(&config);
        analyzer.process_newick("t", "(((A,S1)95,B)90,S2);");

        let report = analyzer.finish();
        let sois: Vec<_> = report.verdicts.iter().map(|v| v.key.soi.as_str()).collect();
        assert_eq!(sois, ["S1", "S2"]);
    }

    #[test]
    fn test_file_listing_is_sorted_and_filtered() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b_cds", "a_cds", "c_cds.bak", "notes.txt"] {
            fs::write(dir.path().join(name), "(A,B);").unwrap();
        }
        fs::create_dir(dir.path().join("nested_cds")).unwrap();

        let files = list_tree_files(dir.path(), "_cds").unwrap();
        let names: Vec<_> = files.iter().map(|p| file_name_of(p)).collect();
        assert_eq!(names, ["a_cds", "b_cds"]);
    }
}
