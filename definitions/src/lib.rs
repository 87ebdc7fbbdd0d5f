//! Definitions -- the data model of the FASTA curation toolkit.
//! One input file is held in one, possibly large, structure named [CurationSet](CurationSet):
//! the normalized lines of the file split into [Record](Record)s, each of which is
//! kept, excluded by its header, or trimmed away from an over-represented species group.
use serde::{Deserialize, Serialize};
use serde_with::{DeserializeFromStr, SerializeDisplay};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurationSet {
    pub input_file: String,
    pub records: Vec<Record>,
    /// Indices of the records trimmed by the selector, in the order they were removed.
    pub removal_order: Vec<usize>,
}

impl CurationSet {
    pub fn new(input_file: &str, records: Vec<Record>) -> Self {
        Self {
            input_file: input_file.to_string(),
            records,
            removal_order: vec![],
        }
    }
    pub fn kept(&self) -> impl Iterator<Item = &Record> {
        self.records.iter().filter(|r| r.is_kept())
    }
    pub fn excluded(&self) -> impl Iterator<Item = &Record> {
        self.records
            .iter()
            .filter(|r| matches!(r.status, Status::Excluded(_)))
    }
    pub fn trimmed(&self) -> impl Iterator<Item = &Record> {
        self.removal_order.iter().map(move |&idx| &self.records[idx])
    }
    /// Every record is settled and ends up in exactly one of the two streams.
    pub fn is_consistent(&self) -> bool {
        let settled = self
            .records
            .iter()
            .all(|r| !matches!(r.status, Status::Pending));
        let trimmed = self
            .records
            .iter()
            .filter(|r| matches!(r.status, Status::Trimmed(_)))
            .count();
        let total = self.kept().count() + self.excluded().count() + self.removal_order.len();
        settled && trimmed == self.removal_order.len() && total == self.records.len()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Record {
    /// 0-index ordinal of the record in the input file.
    pub id: usize,
    /// Position of the header in the normalized line sequence.
    pub start: usize,
    /// The header as it appears in the input, `>` included.
    pub header: String,
    /// Canonical label. Empty until the record is classified.
    pub label: String,
    pub seq: Vec<String>,
    pub status: Status,
}

impl Record {
    pub fn new(id: usize, start: usize, header: String, seq: Vec<String>) -> Self {
        Self {
            id,
            start,
            header,
            label: String::new(),
            seq,
            status: Status::Pending,
        }
    }
    /// Sequence characters, counting one terminator per sequence line (the last line included,
    /// whether or not the file ends with a newline).
    pub fn seq_length(&self) -> usize {
        self.seq.iter().map(|line| line.chars().count() + 1).sum()
    }
    /// Number of lines owned in the normalized sequence: header, body, and the trailing separator.
    pub fn span(&self) -> usize {
        self.seq.len() + 2
    }
    pub fn is_kept(&self) -> bool {
        matches!(self.status, Status::Kept(_))
    }
    pub fn group(&self) -> Option<&GroupKey> {
        match &self.status {
            Status::Kept(key) | Status::Trimmed(key) => Some(key),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum Status {
    Pending,
    Kept(GroupKey),
    /// Rejected by its header.
    Excluded(Exclusion),
    /// Kept by its header, then dropped because its group had too many longer records.
    Trimmed(GroupKey),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum Exclusion {
    /// One of the tokens is on the exclusion list (`sp.`, `cf`, `mitochondrion`, ...).
    Token(String),
    /// The second token is a family name (e.g. `Nereididae`).
    Family(String),
}

impl std::fmt::Display for Exclusion {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Exclusion::Token(token) => write!(f, "token:{token}"),
            Exclusion::Family(name) => write!(f, "family:{name}"),
        }
    }
}

/// Genus and species. Serialized as `Genus_species`, or `Genus` alone when the species is empty.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, SerializeDisplay, DeserializeFromStr,
)]
pub struct GroupKey {
    pub genus: String,
    pub species: String,
}

impl GroupKey {
    pub fn new(genus: &str, species: &str) -> Self {
        Self {
            genus: genus.to_string(),
            species: species.to_string(),
        }
    }
}

impl std::fmt::Display for GroupKey {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self.species.is_empty() {
            true => write!(f, "{}", self.genus),
            false => write!(f, "{}_{}", self.genus, self.species),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseGroupKeyError(String);

impl std::fmt::Display for ParseGroupKeyError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "`{}` is not a Genus_species pair", self.0)
    }
}

impl std::error::Error for ParseGroupKeyError {}

impl std::str::FromStr for GroupKey {
    type Err = ParseGroupKeyError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (genus, species) = s.split_once('_').unwrap_or((s, ""));
        match genus.is_empty() {
            true => Err(ParseGroupKeyError(s.to_string())),
            false => Ok(GroupKey::new(genus, species)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Group {
    pub key: GroupKey,
    /// Kept records of this group, in input order.
    pub members: Vec<Member>,
}

impl Group {
    pub fn new(key: GroupKey) -> Self {
        Self {
            key,
            members: vec![],
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Member {
    /// Index into [CurationSet::records].
    pub record: usize,
    pub start: usize,
    pub length: usize,
}

/// What happened to one input file.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Summary {
    pub input_file: String,
    pub trimmed_file: String,
    pub removed_file: String,
    pub records: usize,
    pub kept: usize,
    pub excluded: usize,
    pub trimmed: usize,
    /// Kept records per group after selection.
    pub groups: BTreeMap<GroupKey, usize>,
}
