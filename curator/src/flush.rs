use crate::error::{CurationError, Result};
use definitions::{CurationSet, Record};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    pub trimmed: PathBuf,
    pub removed: PathBuf,
}

/// `.fasta` or `.fa`, in any case.
pub fn is_fasta(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("fasta") || ext.eq_ignore_ascii_case("fa"))
        .unwrap_or(false)
}

/// `<stem>_trimmed.fasta` and `<stem>_removed.fasta`, next to the input.
/// The stem is the input path without its `.fasta`/`.fa` extension.
pub fn output_paths(input_file: &Path) -> OutputPaths {
    let stem = match is_fasta(input_file) {
        true => input_file.with_extension(""),
        false => input_file.to_path_buf(),
    };
    let with_suffix = |suffix: &str| {
        let mut path = stem.clone().into_os_string();
        path.push(suffix);
        PathBuf::from(path)
    };
    OutputPaths {
        trimmed: with_suffix("_trimmed.fasta"),
        removed: with_suffix("_removed.fasta"),
    }
}

// Label, body, and the separator that follows the record.
fn owned_lines(record: &Record) -> impl Iterator<Item = &str> {
    std::iter::once(record.label.as_str())
        .chain(record.seq.iter().map(|line| line.as_str()))
        .chain(std::iter::once(""))
}

fn render<'a, I: Iterator<Item = &'a str>>(lines: I) -> String {
    let mut buffer = String::new();
    for line in lines {
        buffer.push_str(line);
        buffer.push('\n');
    }
    buffer
}

pub trait Flush {
    /// Kept stream. Surviving records in input order.
    fn kept_lines(&self) -> Vec<&str>;
    /// Removed stream. Excluded records in input order, then trimmed records in removal order.
    fn removed_lines(&self) -> Vec<&str>;
    /// Write both streams. Nothing is written until both are rendered.
    fn flush(&self, paths: &OutputPaths) -> Result<()>;
}

impl Flush for CurationSet {
    fn kept_lines(&self) -> Vec<&str> {
        self.kept().flat_map(owned_lines).collect()
    }
    fn removed_lines(&self) -> Vec<&str> {
        self.excluded()
            .chain(self.trimmed())
            .flat_map(owned_lines)
            .collect()
    }
    fn flush(&self, paths: &OutputPaths) -> Result<()> {
        let kept = render(self.kept_lines().into_iter());
        let removed = render(self.removed_lines().into_iter());
        for (path, contents) in [(&paths.trimmed, kept), (&paths.removed, removed)] {
            debug!("FLUSH\t{}\t{}", path.display(), contents.len());
            std::fs::write(path, contents).map_err(|source| CurationError::Write {
                path: path.clone(),
                source,
            })?;
        }
        Ok(())
    }
}
