use crate::aggregate::Aggregate;
use definitions::{CurationSet, Group, Member, Status};

/// How many records of the same species we keep.
pub const RETAIN: usize = 3;

#[derive(Debug, Clone, Copy)]
pub struct SelectConfig {
    retain: usize,
}

impl SelectConfig {
    pub fn new(retain: usize) -> Self {
        Self { retain }
    }
}

impl std::default::Default for SelectConfig {
    fn default() -> Self {
        Self { retain: RETAIN }
    }
}

/// Members to drop so that only the `retain` longest remain, in the order they are dropped.
/// Same as taking the shortest member again and again, the earliest one on ties.
pub fn surplus(group: &Group, retain: usize) -> Vec<Member> {
    let len = group.members.len();
    if len <= retain {
        return vec![];
    }
    let mut by_length = group.members.clone();
    // Stable, so equal lengths stay in input order.
    by_length.sort_by_key(|member| member.length);
    by_length.truncate(len - retain);
    by_length
}

pub trait SelectTopK {
    fn select_top_k(&mut self, c: &SelectConfig);
}

impl SelectTopK for CurationSet {
    fn select_top_k(&mut self, c: &SelectConfig) {
        for group in self.groups() {
            let dropped = surplus(&group, c.retain);
            if dropped.is_empty() {
                continue;
            }
            debug!(
                "SELECT\t{}\t{}\t{}",
                group.key,
                group.members.len(),
                dropped.len()
            );
            for member in dropped {
                let record = &mut self.records[member.record];
                let end = member.start + record.span();
                trace!(
                    "TRIM\t{}\t{}\t{}..{}",
                    record.label,
                    member.length,
                    member.start,
                    end
                );
                record.status = Status::Trimmed(group.key.clone());
                self.removal_order.push(member.record);
            }
        }
        debug!("SELECT\tTrimmed\t{}", self.removal_order.len());
    }
}
