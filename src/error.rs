/// error.rs — Ambient, I/O-facing error type
///
/// Covers exactly the recoverable failure modes from the ambient shell (I/O,
/// FASTA parsing, CLI argument validation). The core's contract violations
/// (deref of past-the-end, `k < 2`, non-DNA input) remain panics, as
/// specified — they can only be reached by a caller that skips the
/// validation this layer already performs, so they are never represented
/// here.
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Input file is not valid UTF-8")]
    FastaNotUtf8,

    #[error("FASTA record '{record}' contains an invalid base '{byte}'")]
    InvalidBase { record: String, byte: char },

    #[error("FASTA record '{record}' contains the reserved deletion sentinel '-'")]
    ReservedSentinelInInput { record: String },

    #[error("FASTA record '{name}' contains no bases")]
    EmptyRecord { name: String },

    #[error("Input file contains no FASTA records")]
    EmptyFasta,

    #[error("No record at index {index}; the input has {available} record(s)")]
    RecordIndexOutOfRange { index: usize, available: usize },

    #[error("Invalid k-mer size {0}: k must be at least 2 and no greater than the sequence length")]
    InvalidK(usize),

    #[error("Cannot write report to {path}: {source}")]
    ReportWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
