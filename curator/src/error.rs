use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum CurationError {
    #[error("{input_file}: record {record} has a malformed header `{header}` ({found} token(s), at least {needed} needed)")]
    MalformedHeader {
        input_file: String,
        /// 0-index ordinal of the record.
        record: usize,
        header: String,
        found: usize,
        needed: usize,
    },
    #[error("failed to read {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, CurationError>;
