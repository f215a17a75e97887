use std::io;
use thiserror::Error;

/// Input-contract violations raised by the dashboard transformations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("unknown junction: {0}")]
    UnknownJunction(String),

    #[error("no valid samples for junction {0}")]
    EmptySeries(String),

    #[error("datasets are not date-aligned: expected {expected} rows, found {found}")]
    DatasetLengthMismatch { expected: usize, found: usize },
}

/// Errors raised while reading or writing a dataset.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("serde_json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] io::Error),

    #[error("dataset has no header row")]
    EmptyHeader,

    #[error("no Date column found")]
    MissingDateColumn,

    #[error("junction {0} appears more than once")]
    DuplicateJunction(String),

    #[error("expected a JSON array of records")]
    NotAnArray,

    #[error("record {0} is not a JSON object")]
    NotARecord(usize),

    #[error("row {0} has no date")]
    MissingDate(usize),

    #[error("row {row} has {found} values, expected {expected}")]
    RowWidth {
        row: usize,
        expected: usize,
        found: usize,
    },
}
