//! Which files of a folder should be curated.
use curator::is_fasta;
use log::{debug, warn};
use std::path::{Path, PathBuf};

/// Files ending with these (before the extension) were written by an earlier run.
pub const PROCESSED_SUFFIXES: [&str; 3] = ["_trimmed", "_removed", "_updated"];

pub fn is_processed(path: &Path) -> bool {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .map(|stem| PROCESSED_SUFFIXES.iter().any(|suf| stem.ends_with(suf)))
        .unwrap_or(false)
}

/// FASTA files directly under `dir`, sorted by name.
pub fn fasta_files(dir: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut files = vec![];
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        if !is_fasta(&path) {
            debug!("SKIP\t{}\tNotFasta", path.display());
        } else if is_processed(&path) {
            warn!(
                "{} is skipped because it is already processed",
                path.display()
            );
        } else {
            files.push(path);
        }
    }
    files.sort();
    debug!("DISCOVER\t{}\t{}", dir.display(), files.len());
    Ok(files)
}
