use definitions::{CurationSet, Group, GroupKey, Member, Status};
use std::collections::HashMap;
pub trait Aggregate {
    /// Kept records grouped by genus and species. Groups are in order of first appearance.
    fn groups(&self) -> Vec<Group>;
}

impl Aggregate for CurationSet {
    fn groups(&self) -> Vec<Group> {
        let mut slots: HashMap<&GroupKey, usize> = HashMap::new();
        let mut groups: Vec<Group> = vec![];
        for (idx, record) in self.records.iter().enumerate() {
            let key = match &record.status {
                Status::Kept(key) => key,
                _ => continue,
            };
            let slot = *slots.entry(key).or_insert_with(|| {
                groups.push(Group::new(key.clone()));
                groups.len() - 1
            });
            groups[slot].members.push(Member {
                record: idx,
                start: record.start,
                length: record.seq_length(),
            });
        }
        debug!("AGGREGATE\tGroups\t{}", groups.len());
        groups
    }
}
