//! Trajectory parsing and loading errors.

use std::path::PathBuf;

/// A single data row could not be turned into a sample.
///
/// `row` is the 1-based physical line number in the source file.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParseError {
    #[error("row {row}: expected at least {expected} fields, found {found}")]
    TooFewFields {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error(
        "row {row}: {found} fields do not fit the end-effector layout \
         ({remainder} columns left over after blocks of {stride})"
    )]
    EffectorStride {
        row: usize,
        found: usize,
        stride: usize,
        remainder: usize,
    },

    #[error("row {row}, column {column}: invalid number {token:?}")]
    InvalidNumber {
        row: usize,
        column: usize,
        token: String,
    },

    #[error("row {row}: {found} end effectors, expected {expected} as in the first data row")]
    EffectorCountMismatch {
        row: usize,
        expected: usize,
        found: usize,
    },
}

impl ParseError {
    /// Physical line the error refers to.
    pub fn row(&self) -> usize {
        match self {
            Self::TooFewFields { row, .. }
            | Self::EffectorStride { row, .. }
            | Self::InvalidNumber { row, .. }
            | Self::EffectorCountMismatch { row, .. } => *row,
        }
    }
}

/// Loading a trajectory failed; no partial trajectory is kept.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("couldn't find trajectory file {path}")]
    ResourceNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read trajectory: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed trajectory row")]
    MalformedRow(#[from] ParseError),

    #[error("malformed trajectory file: {0}")]
    MalformedFile(String),
}
