use anyhow::Context;
use cladetally::analysis::TallyEntry;
use cladetally::config::AnalysisConfig;
use cladetally::report::{RunBanner, RunOverview, TallySummary, write_tally_csv, write_verdict_log};
use clap::Parser;
use env_logger::Env;
use log::{error, info};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "cladetally",
    version,
    about = "Tally whether a species of interest groups with reference taxon A or B across gene trees"
)]
struct Cli {
    #[arg(long, help = "JSON config file; options given here override its values")]
    config: Option<PathBuf>,
    #[arg(long, help = "Directory containing the tree files [default: ./]")]
    tree_dir: Option<PathBuf>,
    #[arg(long, help = "Analyze files whose name ends with this suffix [default: _cds]")]
    suffix: Option<String>,
    #[arg(
        short = 'a',
        long = "species-a",
        value_delimiter = ',',
        help = "Reference taxa A (repeatable, comma-separated)"
    )]
    species_a: Vec<String>,
    #[arg(
        short = 'b',
        long = "species-b",
        value_delimiter = ',',
        help = "Reference taxa B (repeatable, comma-separated)"
    )]
    species_b: Vec<String>,
    #[arg(
        short = 's',
        long = "soi",
        value_delimiter = ',',
        help = "Species of interest (repeatable, comma-separated)"
    )]
    species_of_interest: Vec<String>,
    #[arg(
        short = 't',
        long,
        allow_negative_numbers = true,
        help = "Deciding clade support must exceed this value [default: 70]"
    )]
    threshold: Option<f64>,
    #[arg(short = 'o', long, help = "Tally CSV path [default: relationship_results_with_support.csv]")]
    output: Option<PathBuf>,
    #[arg(long, help = "Directory for repaired trees [default: ./fixed_trees/]")]
    repaired_dir: Option<PathBuf>,
    #[arg(long, help = "Also write every single verdict to this CSV file")]
    verdict_log: Option<PathBuf>,
    #[arg(long, help = "Print the result as machine-readable JSON")]
    json: bool,
}

impl Cli {
    /// Builds the run configuration: defaults, then the config file, then the command line.
    fn to_config(&self) -> anyhow::Result<AnalysisConfig> {
        let mut config = match &self.config {
            Some(path) => AnalysisConfig::from_json_file(path)?,
            None => AnalysisConfig::default(),
        };

        if let Some(dir) = &self.tree_dir {
            config.tree_dir = dir.clone();
        }
        if let Some(suffix) = &self.suffix {
            config.tree_suffix = suffix.clone();
        }
        if !self.species_a.is_empty() {
            config.species_a = self.species_a.clone();
        }
        if !self.species_b.is_empty() {
            config.species_b = self.species_b.clone();
        }
        if !self.species_of_interest.is_empty() {
            config.species_of_interest = self.species_of_interest.clone();
        }
        if let Some(threshold) = self.threshold {
            config.support_threshold = threshold;
        }
        if let Some(output) = &self.output {
            config.output_csv = output.clone();
        }
        if let Some(dir) = &self.repaired_dir {
            config.repaired_tree_dir = dir.clone();
        }
        if let Some(path) = &self.verdict_log {
            config.verdict_log = Some(path.clone());
        }

        config.validate()?;
        Ok(config)
    }
}

#[derive(Serialize)]
struct JsonOut<'a> {
    files_scanned: usize,
    trees_analyzed: usize,
    support_threshold: f64,
    tally: &'a [TallyEntry],
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = cli.to_config()?;

    if !cli.json {
        println!("{}", RunBanner(&config));
    }

    let report = cladetally::analyze(&config).context("analysis aborted")?;

    if cli.json {
        let out = JsonOut {
            files_scanned: report.files_scanned,
            trees_analyzed: report.trees_analyzed,
            support_threshold: config.support_threshold,
            tally: report.tally.entries(),
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        println!("{}", RunOverview(&report));
        print!(
            "{}",
            TallySummary {
                tally: &report.tally,
                support_threshold: config.support_threshold,
            }
        );
    }

    // Write failures are reported, the in-memory results stay valid.
    info!("Writing results to CSV file: {}", config.output_csv.display());
    match write_tally_csv(&config.output_csv, &report.tally, config.support_threshold) {
        Ok(()) => info!("Results saved to {}", config.output_csv.display()),
        Err(e) => error!("Could not write CSV file '{}': {e}", config.output_csv.display()),
    }

    if let Some(path) = &config.verdict_log {
        match write_verdict_log(path, &report.verdicts) {
            Ok(()) => info!("{} verdicts saved to {}", report.verdicts.len(), path.display()),
            Err(e) => error!("Could not write verdict log '{}': {e}", path.display()),
        }
    }

    if !cli.json {
        println!("Done.");
    }
    Ok(())
}
