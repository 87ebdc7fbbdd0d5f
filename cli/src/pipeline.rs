//! Pipelines -- curate a batch of FASTA files.
//!
//! Both subcommands end up here: `trim` builds a [PipelineConfig] from its arguments,
//! `pipeline` reads one from a TOML profile. Every file is curated on its own, so one
//! broken file never stops the others.
use anyhow::Context;
use curator::CurationConfig;
use definitions::Summary;
use log::*;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

/// The configuration of a batch.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct PipelineConfig {
    /// FASTA files to curate, as given.
    #[serde(default)]
    pub inputs: Vec<PathBuf>,
    /// A folder whose FASTA files are curated too.
    pub input_dir: Option<PathBuf>,
    #[serde(default)]
    pub verbose: u8,
    #[serde(default = "default_threads")]
    pub threads: usize,
    /// Where to write the JSON report.
    pub report: Option<PathBuf>,
    #[serde(default)]
    pub curation: CurationConfig,
}

fn default_threads() -> usize {
    1
}

impl PipelineConfig {
    pub fn from_toml(path: &Path) -> anyhow::Result<Self> {
        let file = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read profile {}", path.display()))?;
        let config: Self = toml::from_str(&file)
            .with_context(|| format!("failed to parse profile {}", path.display()))?;
        Ok(config)
    }
    pub fn from_matches(matches: &clap::ArgMatches) -> Self {
        let inputs: Vec<PathBuf> = matches
            .get_many::<PathBuf>("files")
            .map(|files| files.cloned().collect())
            .unwrap_or_default();
        let input_dir = matches.get_one::<PathBuf>("dir").cloned();
        let report = matches.get_one::<PathBuf>("report").cloned();
        let threads = matches.get_one::<usize>("threads").copied().unwrap_or(1);
        let mut curation = CurationConfig::default();
        if let Some(&retain) = matches.get_one::<usize>("retain") {
            curation.retain = retain;
        }
        if let Some(tokens) = matches.get_many::<String>("exclude") {
            curation.excluded_tokens.extend(tokens.cloned());
        }
        Self {
            inputs,
            input_dir,
            verbose: matches.get_count("verbose"),
            threads,
            report,
            curation,
        }
    }
    /// Explicit inputs first, then the folder listing.
    pub fn files(&self) -> anyhow::Result<Vec<PathBuf>> {
        let mut files = self.inputs.clone();
        if let Some(dir) = self.input_dir.as_ref() {
            let found = crate::discover::fasta_files(dir)
                .with_context(|| format!("failed to list {}", dir.display()))?;
            files.extend(found);
        }
        Ok(files)
    }
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct BatchReport {
    pub succeeded: Vec<Summary>,
    pub failed: Vec<Failure>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Failure {
    pub input_file: PathBuf,
    pub error: String,
}

pub fn run_pipeline(config: &PipelineConfig) -> anyhow::Result<BatchReport> {
    let files = config.files()?;
    if files.is_empty() {
        warn!("No FASTA file to process.");
    }
    debug!("Set Threads\t{}", config.threads);
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.threads)
        .build()
        .context("failed to build the thread pool")?;
    let outcomes: Vec<_> = pool.install(|| {
        files
            .par_iter()
            .map(|file| {
                info!("Processing {}", file.display());
                (file, curator::curate_file(file, &config.curation))
            })
            .collect()
    });
    let mut report = BatchReport::default();
    for (file, outcome) in outcomes {
        match outcome {
            Ok(summary) => {
                debug!(
                    "DONE\t{}\t{}\t{}\t{}",
                    summary.input_file, summary.kept, summary.excluded, summary.trimmed
                );
                report.succeeded.push(summary);
            }
            Err(why) => {
                let error = format!("{:#}", anyhow::Error::new(why));
                error!("{error}");
                report.failed.push(Failure {
                    input_file: file.clone(),
                    error,
                });
            }
        }
    }
    if let Some(path) = config.report.as_ref() {
        write_report(&report, path)?;
    }
    Ok(report)
}

fn write_report(report: &BatchReport, path: &Path) -> anyhow::Result<()> {
    let wtr = std::fs::File::create(path)
        .map(BufWriter::new)
        .with_context(|| format!("failed to create report {}", path.display()))?;
    serde_json::ser::to_writer_pretty(wtr, report)
        .with_context(|| format!("failed to write report {}", path.display()))?;
    debug!("REPORT\t{}", path.display());
    Ok(())
}
