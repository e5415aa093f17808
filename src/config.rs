//! Run configuration of a batch analysis.
//!
//! An [AnalysisConfig] is built once at startup, either from defaults, from a
//! JSON file, or both, and then handed by reference to the
//! [BatchAnalyzer](crate::analysis::BatchAnalyzer). Missing fields in a JSON
//! file fall back to their defaults:
//!
//! ```json
//! {
//!   "tree_dir": "gene_trees/",
//!   "tree_suffix": ".treefile",
//!   "species_a": ["Clematis_repens", "Clematis_otophora"],
//!   "species_b": ["Clematis_songorica"],
//!   "species_of_interest": ["Clematis_tangutica", "Clematis_glauca"],
//!   "support_threshold": 70
//! }
//! ```

use log::warn;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default directory scanned for tree files.
pub const DEFAULT_TREE_DIR: &str = "./";
/// Default filename suffix of tree files.
pub const DEFAULT_TREE_SUFFIX: &str = "_cds";
/// Default support threshold a deciding clade must exceed.
pub const DEFAULT_SUPPORT_THRESHOLD: f64 = 70.0;
/// Default path of the tally CSV.
pub const DEFAULT_OUTPUT_CSV: &str = "relationship_results_with_support.csv";
/// Default directory receiving the repaired tree files.
pub const DEFAULT_REPAIRED_TREE_DIR: &str = "./fixed_trees/";

// =#========================================================================#=
// CONFIG ERROR
// =#========================================================================#=
/// Errors raised while loading or validating an [AnalysisConfig].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("support threshold must be a finite number, got {0}")]
    NonFiniteThreshold(f64),
}

// =#========================================================================#=
// ANALYSIS CONFIG
// =#========================================================================#=
/// All options of a batch analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalysisConfig {
    /// Directory containing the tree files (not searched recursively)
    pub tree_dir: PathBuf,
    /// Only files whose name ends with this suffix are analyzed
    pub tree_suffix: String,
    /// Reference taxa A
    pub species_a: Vec<String>,
    /// Reference taxa B
    pub species_b: Vec<String>,
    /// Species of interest
    pub species_of_interest: Vec<String>,
    /// A directional verdict needs its deciding support to exceed this value
    pub support_threshold: f64,
    /// Path of the tally CSV
    pub output_csv: PathBuf,
    /// Directory receiving the repaired tree files
    pub repaired_tree_dir: PathBuf,
    /// Optional path of a CSV listing every single verdict
    pub verdict_log: Option<PathBuf>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        AnalysisConfig {
            tree_dir: PathBuf::from(DEFAULT_TREE_DIR),
            tree_suffix: DEFAULT_TREE_SUFFIX.to_string(),
            species_a: Vec::new(),
            species_b: Vec::new(),
            species_of_interest: Vec::new(),
            support_threshold: DEFAULT_SUPPORT_THRESHOLD,
            output_csv: PathBuf::from(DEFAULT_OUTPUT_CSV),
            repaired_tree_dir: PathBuf::from(DEFAULT_REPAIRED_TREE_DIR),
            verdict_log: None,
        }
    }
}

impl AnalysisConfig {
    /// Loads a config from a JSON file; absent fields take their defaults.
    ///
    /// The result is not validated yet, so that command line overrides can
    /// be applied first. Call [validate](Self::validate) afterwards.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&content)
    }

    /// Loads a config from a JSON string; absent fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Checks the config for values an analysis cannot run with.
    ///
    /// Empty species lists are legal (the tally is then empty) but warned about.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.support_threshold.is_finite() {
            return Err(ConfigError::NonFiniteThreshold(self.support_threshold));
        }
        for (name, list) in [
            ("species A", &self.species_a),
            ("species B", &self.species_b),
            ("species of interest", &self.species_of_interest),
        ] {
            if list.is_empty() {
                warn!("The {name} list is empty; no relationships will be tallied");
            }
        }
        Ok(())
    }

    /// Number of (SOI, A, B) combinations, counting repeated names once.
    pub fn num_combinations(&self) -> usize {
        distinct(&self.species_of_interest) * distinct(&self.species_a) * distinct(&self.species_b)
    }
}

fn distinct(list: &[String]) -> usize {
    let mut seen: Vec<&str> = list.iter().map(String::as_str).collect();
    seen.sort_unstable();
    seen.dedup();
    seen.len()
}
