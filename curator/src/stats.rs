use crate::flush::OutputPaths;
use definitions::{CurationSet, Summary};
use std::collections::BTreeMap;
pub trait Stats {
    fn summary(&self, paths: &OutputPaths) -> Summary;
}

impl Stats for CurationSet {
    fn summary(&self, paths: &OutputPaths) -> Summary {
        let mut groups = BTreeMap::new();
        for record in self.kept() {
            if let Some(key) = record.group() {
                *groups.entry(key.clone()).or_insert(0) += 1;
            }
        }
        Summary {
            input_file: self.input_file.clone(),
            trimmed_file: paths.trimmed.to_string_lossy().to_string(),
            removed_file: paths.removed.to_string_lossy().to_string(),
            records: self.records.len(),
            kept: self.kept().count(),
            excluded: self.excluded().count(),
            trimmed: self.removal_order.len(),
            groups,
        }
    }
}
