use definitions::{CurationSet, Record};
use std::path::Path;
pub trait Entry {
    fn entry(input_file: &Path, raw: &str) -> Self;
}

impl Entry for CurationSet {
    fn entry(input_file: &Path, raw: &str) -> Self {
        let lines = normalize_lines(raw);
        debug!("ENTRY\tLines\t{}", lines.len());
        let records = split_records(&lines);
        debug!("ENTRY\tRecords\t{}", records.len());
        CurationSet::new(&input_file.to_string_lossy(), records)
    }
}

/// Canonical line sequence: no blank line before the first header, exactly one before
/// every other header, and one at the very end. Blank lines elsewhere and anything
/// before the first header are dropped.
pub fn normalize_lines(raw: &str) -> Vec<String> {
    let mut lines: Vec<String> = vec![];
    for line in raw.lines() {
        if line.starts_with('>') {
            if !lines.is_empty() {
                lines.push(String::new());
            }
            lines.push(line.to_string());
        } else if !lines.is_empty() && !line.trim().is_empty() {
            lines.push(line.to_string());
        }
    }
    if !lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

/// Split a normalized line sequence into records. Each record remembers where its header sits.
pub fn split_records(lines: &[String]) -> Vec<Record> {
    let mut records: Vec<Record> = vec![];
    for (idx, line) in lines.iter().enumerate() {
        if line.starts_with('>') {
            records.push(Record::new(records.len(), idx, line.clone(), vec![]));
        } else if line.is_empty() {
            continue;
        } else if let Some(record) = records.last_mut() {
            record.seq.push(line.clone());
        }
    }
    records
}
