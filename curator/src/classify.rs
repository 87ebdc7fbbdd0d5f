//! Header classification.
//!
//! A header is read with one of two grammars. Database exports are whitespace
//! delimited (`>HQ932670.1 Lumbrineris japonica voucher ...`), while files this
//! tool already wrote are underscore delimited (`>HQ932670_Lumbrineris_japonica_voucher`).
//! The grammar decides how the header is tokenized, how its canonical label is
//! built, and where the genus and species are found.
use crate::error::{CurationError, Result};
use definitions::{CurationSet, Exclusion, GroupKey, Status};
use std::collections::HashSet;

pub const EXCLUDED_TOKENS: [&str; 6] = ["sp.", "sp", "cf", "cf.", "mitochondrion", "mitochondrion,"];
pub const FAMILY_SUFFIX: &str = "idae";

#[derive(Debug, Clone)]
pub struct ClassifyConfig {
    /// Lowercased.
    excluded_tokens: HashSet<String>,
    /// Lowercased.
    family_suffix: String,
}

impl ClassifyConfig {
    pub fn new<S: AsRef<str>>(excluded_tokens: &[S], family_suffix: &str) -> Self {
        let excluded_tokens = excluded_tokens
            .iter()
            .map(|token| token.as_ref().to_lowercase())
            .collect();
        Self {
            excluded_tokens,
            family_suffix: family_suffix.to_lowercase(),
        }
    }
}

impl std::default::Default for ClassifyConfig {
    fn default() -> Self {
        Self::new(&EXCLUDED_TOKENS, FAMILY_SUFFIX)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderGrammar {
    Underscore,
    Whitespace,
}

impl HeaderGrammar {
    /// Underscore grammar needs strictly more `_` than ` `. A tie reads as whitespace.
    pub fn detect(line: &str) -> Self {
        let underscores = bytecount::count(line.as_bytes(), b'_');
        let spaces = bytecount::count(line.as_bytes(), b' ');
        if underscores > spaces {
            HeaderGrammar::Underscore
        } else {
            HeaderGrammar::Whitespace
        }
    }
    pub fn tokenize<'a>(&self, line: &'a str) -> Vec<&'a str> {
        let line = line.trim_end();
        match self {
            HeaderGrammar::Underscore => line.split('_').collect(),
            HeaderGrammar::Whitespace => line.split_whitespace().collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TooFewTokens {
    pub found: usize,
    pub needed: usize,
}

#[derive(Debug, Clone)]
pub struct Header<'a> {
    grammar: HeaderGrammar,
    tokens: Vec<&'a str>,
}

impl<'a> Header<'a> {
    pub fn parse(line: &'a str) -> Self {
        let grammar = HeaderGrammar::detect(line);
        let tokens = grammar.tokenize(line);
        Self { grammar, tokens }
    }
    pub fn grammar(&self) -> HeaderGrammar {
        self.grammar
    }
    pub fn tokens(&self) -> &[&'a str] {
        &self.tokens
    }
    fn require(&self, needed: usize) -> std::result::Result<(), TooFewTokens> {
        let found = self.tokens.len();
        match found < needed {
            true => Err(TooFewTokens { found, needed }),
            false => Ok(()),
        }
    }
    /// Why this header should be dropped, if it should.
    pub fn exclusion(
        &self,
        config: &ClassifyConfig,
    ) -> std::result::Result<Option<Exclusion>, TooFewTokens> {
        self.require(2)?;
        let excluded = self
            .tokens
            .iter()
            .find(|token| config.excluded_tokens.contains(&token.to_lowercase()));
        if let Some(token) = excluded {
            return Ok(Some(Exclusion::Token(token.to_string())));
        }
        let second = self.tokens[1];
        if second.to_lowercase().ends_with(&config.family_suffix) {
            return Ok(Some(Exclusion::Family(second.to_string())));
        }
        Ok(None)
    }
    /// The canonical label, `>` included.
    pub fn label(&self) -> std::result::Result<String, TooFewTokens> {
        let tokens = &self.tokens;
        match self.grammar {
            HeaderGrammar::Underscore => Ok(tokens.join("_")),
            HeaderGrammar::Whitespace => {
                self.require(3)?;
                let (genus, species) = (label_field(tokens[1]), label_field(tokens[2]));
                if tokens.len() == 3 {
                    return Ok(format!("{}_{genus}_{species}", tokens[0]));
                }
                let accession = strip_version(tokens[0]);
                let voucher = label_field(tokens[3]);
                Ok(format!("{accession}_{genus}_{species}_{voucher}"))
            }
        }
    }
    pub fn group_key(&self) -> std::result::Result<GroupKey, TooFewTokens> {
        let tokens = &self.tokens;
        match self.grammar {
            HeaderGrammar::Underscore => {
                self.require(2)?;
                let len = tokens.len();
                // A two token label has no species; its first token is the whole key.
                let key = match len {
                    2 => GroupKey::new(tokens[0], ""),
                    _ => GroupKey::new(tokens[len - 3], tokens[len - 2]),
                };
                Ok(key)
            }
            HeaderGrammar::Whitespace => {
                self.require(3)?;
                let (genus, species) = (label_field(tokens[1]), label_field(tokens[2]));
                Ok(GroupKey::new(&genus, &species))
            }
        }
    }
}

// `_` separates the fields of a label, so it can not appear inside one.
fn label_field(token: &str) -> String {
    token.replace('_', "-")
}

// Drop the trailing two characters, a database version suffix such as `.1`.
fn strip_version(accession: &str) -> &str {
    match accession.char_indices().rev().nth(1) {
        Some((idx, _)) => &accession[..idx],
        None => "",
    }
}

/// Label and status of a single header.
pub fn judge(
    header: &str,
    config: &ClassifyConfig,
) -> std::result::Result<(String, Status), TooFewTokens> {
    let header = Header::parse(header);
    let exclusion = header.exclusion(config)?;
    let label = match (header.grammar(), header.tokens().len()) {
        // Too short for a label, but already rejected: keep the header as is.
        (HeaderGrammar::Whitespace, 2) if exclusion.is_some() => header.tokens().join("_"),
        _ => header.label()?,
    };
    let status = match exclusion {
        Some(exclusion) => Status::Excluded(exclusion),
        None => Status::Kept(header.group_key()?),
    };
    Ok((label, status))
}

pub trait Classify {
    fn classify(&mut self, config: &ClassifyConfig) -> Result<()>;
}

impl Classify for CurationSet {
    fn classify(&mut self, config: &ClassifyConfig) -> Result<()> {
        for record in self.records.iter_mut() {
            let (label, status) = judge(&record.header, config).map_err(|e| {
                CurationError::MalformedHeader {
                    input_file: self.input_file.clone(),
                    record: record.id,
                    header: record.header.clone(),
                    found: e.found,
                    needed: e.needed,
                }
            })?;
            if let Status::Excluded(exclusion) = &status {
                trace!("EXCLUDE\t{}\t{}", label, exclusion);
            }
            record.label = label;
            record.status = status;
        }
        debug!("CLASSIFY\tKept\t{}", self.kept().count());
        debug!("CLASSIFY\tExcluded\t{}", self.excluded().count());
        Ok(())
    }
}
