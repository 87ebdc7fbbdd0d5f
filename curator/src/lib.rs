//! Curator -- clean up FASTA files exported from a nucleotide database.
//!
//! Each record gets a short canonical label, records naming an unresolved taxon
//! (`sp.`, `cf.`), an organelle genome, or only a family are set aside, and every
//! species keeps at most its three longest records. The result is written as two
//! sibling files, `<stem>_trimmed.fasta` and `<stem>_removed.fasta`.
pub mod aggregate;
pub mod classify;
pub mod entry;
pub mod error;
pub mod flush;
pub mod select;
pub mod stats;
#[macro_use]
extern crate log;
pub use aggregate::Aggregate;
pub use classify::{Classify, ClassifyConfig, HeaderGrammar};
pub use entry::Entry;
pub use error::{CurationError, Result};
pub use flush::{is_fasta, output_paths, Flush, OutputPaths};
pub use select::{SelectConfig, SelectTopK};
pub use stats::Stats;

use definitions::{CurationSet, Summary};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Everything a user can tune about the curation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CurationConfig {
    /// Records kept per species.
    pub retain: usize,
    /// Header tokens that reject a record, compared case-insensitively.
    pub excluded_tokens: Vec<String>,
    /// Suffix of a family name in the second header token.
    pub family_suffix: String,
}

impl std::default::Default for CurationConfig {
    fn default() -> Self {
        Self {
            retain: select::RETAIN,
            excluded_tokens: classify::EXCLUDED_TOKENS
                .iter()
                .map(|token| token.to_string())
                .collect(),
            family_suffix: classify::FAMILY_SUFFIX.to_string(),
        }
    }
}

impl CurationConfig {
    pub fn classify_config(&self) -> ClassifyConfig {
        ClassifyConfig::new(&self.excluded_tokens, &self.family_suffix)
    }
    pub fn select_config(&self) -> SelectConfig {
        SelectConfig::new(self.retain)
    }
}

/// Run the whole curation on the contents of one file. Nothing touches the disk.
pub fn curate(input_file: &Path, raw: &str, config: &CurationConfig) -> Result<CurationSet> {
    let mut ds = CurationSet::entry(input_file, raw);
    ds.classify(&config.classify_config())?;
    ds.select_top_k(&config.select_config());
    debug_assert!(ds.is_consistent());
    Ok(ds)
}

/// Read, curate, and write the two output files of one FASTA file.
pub fn curate_file<P: AsRef<Path>>(input_file: P, config: &CurationConfig) -> Result<Summary> {
    let input_file = input_file.as_ref();
    debug!("Opening {:?}", input_file);
    let raw = std::fs::read_to_string(input_file).map_err(|source| CurationError::Read {
        path: input_file.to_path_buf(),
        source,
    })?;
    let ds = curate(input_file, &raw, config)?;
    let paths = output_paths(input_file);
    ds.flush(&paths)?;
    info!(
        "Creation of {} and {}",
        paths.trimmed.display(),
        paths.removed.display()
    );
    Ok(ds.summary(&paths))
}

#[cfg(test)]
mod tests {
    use super::*;
    use definitions::GroupKey;
    use std::collections::HashMap;

    const LUMBRINERIS: &str = "\
>HQ932670.1 Lumbrineris japonica voucher BIOUG<CAN_:BP2010-346 cytochrome oxidase subunit 1 (COI) gene, partial cds; mitochondrial
ACGTACGTAC
ACGTAC

>AB123456.1 Nephtys sp.
TTTTTTTT
>KX000001.1 Lumbrineris japonica isolate A1 cytochrome oxidase
ACGTACGTACGTACGTACGT


>KX000002.1 Lumbrineris japonica isolate A2 cytochrome oxidase
ACG
>KX000003.1 Lumbrineris japonica isolate A3 cytochrome oxidase
ACGTACGTACGTACGTACGTACGTACGTAC
>KX000004.1 Nereididae gen. sp. cytochrome oxidase
GGGG
>KX000005.1 Glycera alba isolate B1 cytochrome oxidase
CCCCCC
>NC000006.1 Lumbrineris japonica mitochondrion, complete genome
ACGTACGTACGTACGTACGTACGTACGTACGTACGTACGTACGT
";

    fn init_logger() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn non_header_lines(lines: &[&str]) -> HashMap<String, usize> {
        let mut counts = HashMap::new();
        for line in lines.iter().filter(|l| !l.starts_with('>')) {
            *counts.entry(line.to_string()).or_insert(0) += 1;
        }
        counts
    }

    #[test]
    fn curate_in_memory() {
        init_logger();
        let config = CurationConfig::default();
        let ds = curate(Path::new("lumbrineris.fasta"), LUMBRINERIS, &config).unwrap();
        assert_eq!(ds.records.len(), 8);
        let kept: Vec<_> = ds.kept().map(|r| r.label.as_str()).collect();
        assert_eq!(
            kept,
            vec![
                ">HQ932670_Lumbrineris_japonica_voucher",
                ">KX000001_Lumbrineris_japonica_isolate",
                ">KX000003_Lumbrineris_japonica_isolate",
                ">KX000005_Glycera_alba_isolate",
            ]
        );
        let excluded: Vec<_> = ds.excluded().map(|r| r.label.as_str()).collect();
        assert_eq!(
            excluded,
            vec![
                ">AB123456.1_Nephtys_sp.",
                ">KX000004_Nereididae_gen._sp.",
                ">NC000006_Lumbrineris_japonica_mitochondrion,",
            ]
        );
        let trimmed: Vec<_> = ds.trimmed().map(|r| r.label.as_str()).collect();
        assert_eq!(trimmed, vec![">KX000002_Lumbrineris_japonica_isolate"]);
        // Nothing is lost, and the bodies add up.
        let kept_lines = ds.kept_lines();
        let removed_lines = ds.removed_lines();
        let headers = kept_lines
            .iter()
            .chain(removed_lines.iter())
            .filter(|l| l.starts_with('>'))
            .count();
        assert_eq!(headers, ds.records.len());
        let normalized = entry::normalize_lines(LUMBRINERIS);
        let normalized: Vec<&str> = normalized.iter().map(|l| l.as_str()).collect();
        let mut both = kept_lines.clone();
        both.extend(removed_lines.iter());
        assert_eq!(non_header_lines(&both), non_header_lines(&normalized));
    }

    #[test]
    fn curate_file_writes_both_streams() {
        init_logger();
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("lumbrineris_coi.fasta");
        std::fs::write(&input, LUMBRINERIS).unwrap();
        let summary = curate_file(&input, &CurationConfig::default()).unwrap();
        assert_eq!(summary.records, 8);
        assert_eq!(summary.kept, 4);
        assert_eq!(summary.excluded, 3);
        assert_eq!(summary.trimmed, 1);
        assert_eq!(
            summary.groups[&GroupKey::new("Lumbrineris", "japonica")],
            3
        );
        assert_eq!(summary.groups[&GroupKey::new("Glycera", "alba")], 1);
        let trimmed = std::fs::read_to_string(dir.path().join("lumbrineris_coi_trimmed.fasta"))
            .unwrap();
        assert!(trimmed.starts_with(">HQ932670_Lumbrineris_japonica_voucher\nACGTACGTAC\nACGTAC\n\n>KX000001"));
        assert!(trimmed.ends_with(">KX000005_Glycera_alba_isolate\nCCCCCC\n\n"));
        let removed = std::fs::read_to_string(dir.path().join("lumbrineris_coi_removed.fasta"))
            .unwrap();
        assert!(removed.starts_with(">AB123456.1_Nephtys_sp.\nTTTTTTTT\n\n"));
        assert!(removed.ends_with(">KX000002_Lumbrineris_japonica_isolate\nACG\n\n"));
        let json = serde_json::to_string(&summary).unwrap();
        assert!(json.contains("\"Lumbrineris_japonica\":3"));
    }

    #[test]
    fn rerun_on_trimmed_output_changes_nothing() {
        init_logger();
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("lumbrineris.fasta");
        std::fs::write(&input, LUMBRINERIS).unwrap();
        let config = CurationConfig::default();
        let first = curate_file(&input, &config).unwrap();
        let trimmed_path = dir.path().join("lumbrineris_trimmed.fasta");
        let trimmed = std::fs::read_to_string(&trimmed_path).unwrap();
        let second = curate_file(&trimmed_path, &config).unwrap();
        assert_eq!(second.records, first.kept);
        assert_eq!(second.kept, first.kept);
        assert_eq!(second.excluded, 0);
        assert_eq!(second.trimmed, 0);
        assert_eq!(second.groups, first.groups);
        let again =
            std::fs::read_to_string(dir.path().join("lumbrineris_trimmed_trimmed.fasta")).unwrap();
        assert_eq!(again, trimmed);
        let removed =
            std::fs::read_to_string(dir.path().join("lumbrineris_trimmed_removed.fasta")).unwrap();
        assert!(removed.is_empty());
    }

    #[test]
    fn rerun_keeps_vouchers_with_underscores() {
        init_logger();
        let raw = "\
>A1.1 Glycera alba X_1
ACGTACGT
>A2.1 Glycera alba Y_2
ACGTACG
>A3.1 Glycera alba sp_3
ACGTAC
>A4.1 Glycera alba Z_4
ACGTA
";
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("glycera.fasta");
        std::fs::write(&input, raw).unwrap();
        let config = CurationConfig::default();
        let first = curate_file(&input, &config).unwrap();
        assert_eq!(first.kept, 3);
        assert_eq!(first.trimmed, 1);
        let trimmed_path = dir.path().join("glycera_trimmed.fasta");
        let trimmed = std::fs::read_to_string(&trimmed_path).unwrap();
        assert!(trimmed.starts_with(">A1_Glycera_alba_X-1\nACGTACGT\n\n"));
        let second = curate(&trimmed_path, &trimmed, &config).unwrap();
        let key = GroupKey::new("Glycera", "alba");
        let statuses: Vec<_> = second.records.iter().map(|r| r.status.clone()).collect();
        assert_eq!(statuses, vec![definitions::Status::Kept(key); 3]);
        let labels: Vec<_> = second.kept().map(|r| r.label.as_str()).collect();
        assert_eq!(
            labels,
            vec![
                ">A1_Glycera_alba_X-1",
                ">A2_Glycera_alba_Y-2",
                ">A3_Glycera_alba_sp-3"
            ]
        );
    }

    #[test]
    fn two_token_label_is_kept() {
        let raw = ">AB1_Glycera\nACGT\n>AB2_Glycera\nAC\n";
        let ds = curate(Path::new("short.fasta"), raw, &CurationConfig::default()).unwrap();
        assert_eq!(ds.kept().count(), 2);
        let keys: Vec<_> = ds
            .kept()
            .filter_map(|r| r.group())
            .map(|key| key.to_string())
            .collect();
        assert_eq!(keys, vec![">AB1", ">AB2"]);
    }

    #[test]
    fn final_line_without_terminator_counts_one() {
        let with_newline = ">A1.1 Glycera alba x\nACGT\n";
        let without = ">A1.1 Glycera alba x\nACGT";
        let config = CurationConfig::default();
        for raw in [with_newline, without] {
            let ds = curate(Path::new("x.fasta"), raw, &config).unwrap();
            assert_eq!(ds.records[0].seq_length(), 5);
        }
    }

    #[test]
    fn top_three_per_group() {
        let lengths = [600, 650, 580, 700, 690];
        let mut raw = String::new();
        for (i, len) in lengths.iter().enumerate() {
            raw.push_str(&format!(">MK00000{i}.1 Lumbrineris latreilli isolate x\n"));
            // Terminator counts as one character.
            raw.push_str(&"A".repeat(len - 1));
            raw.push('\n');
        }
        let ds = curate(Path::new("x.fasta"), &raw, &CurationConfig::default()).unwrap();
        let kept: Vec<_> = ds.kept().map(|r| r.seq_length()).collect();
        assert_eq!(kept, vec![650, 700, 690]);
        let trimmed: Vec<_> = ds.trimmed().map(|r| r.seq_length()).collect();
        assert_eq!(trimmed, vec![580, 600]);
    }

    #[test]
    fn empty_input_gives_empty_outputs() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("empty.fasta");
        std::fs::write(&input, "").unwrap();
        let summary = curate_file(&input, &CurationConfig::default()).unwrap();
        assert_eq!(summary.records, 0);
        let trimmed = std::fs::read_to_string(dir.path().join("empty_trimmed.fasta")).unwrap();
        let removed = std::fs::read_to_string(dir.path().join("empty_removed.fasta")).unwrap();
        assert!(trimmed.is_empty());
        assert!(removed.is_empty());
    }

    #[test]
    fn malformed_header_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("broken.fasta");
        std::fs::write(&input, ">A1.1 Glycera alba\nACGT\n>\nACGT\n").unwrap();
        let err = curate_file(&input, &CurationConfig::default()).unwrap_err();
        match err {
            CurationError::MalformedHeader { record, found, .. } => {
                assert_eq!(record, 1);
                assert_eq!(found, 1);
            }
            x => panic!("{:?}", x),
        }
        assert!(!dir.path().join("broken_trimmed.fasta").exists());
        assert!(!dir.path().join("broken_removed.fasta").exists());
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("absent.fasta");
        let err = curate_file(&input, &CurationConfig::default()).unwrap_err();
        assert!(matches!(err, CurationError::Read { .. }));
        assert!(err.to_string().contains("absent.fasta"));
    }

    #[test]
    fn config_from_partial_json() {
        let config: CurationConfig = serde_json::from_str(r#"{"retain": 5}"#).unwrap();
        assert_eq!(config.retain, 5);
        assert_eq!(config.family_suffix, "idae");
        assert_eq!(config.excluded_tokens.len(), 6);
    }
}
