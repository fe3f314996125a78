//! Error types for record validation, BED parsing and overlap queries.

use std::io;
use thiserror::Error;

/// A record invariant was violated while constructing a record.
///
/// Every variant names the column that carried the offending value.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("field '{field}' must not be empty")]
    EmptyField { field: &'static str },

    #[error("field '{field}' has invalid text '{value}': {reason}")]
    InvalidText {
        field: &'static str,
        value: String,
        reason: &'static str,
    },

    #[error("field '{field}' must be non-negative, found '{value}'")]
    NegativeValue { field: &'static str, value: String },

    #[error("field '{field}': end ({end}) is less than start ({start})")]
    EndBeforeStart {
        field: &'static str,
        start: u64,
        end: u64,
    },

    #[error("field '{field}' has invalid strand '{value}', expected one of '+', '-', '.'")]
    InvalidStrand { field: &'static str, value: String },

    #[error("field '{field}' expected {expected}, found '{value}'")]
    InvalidNumber {
        field: &'static str,
        expected: &'static str,
        value: String,
    },

    #[error("field '{field}' must be a finite real number, found '{value}'")]
    NonFinite { field: &'static str, value: String },

    #[error("field '{field}' score {value} is outside [0, 1000]")]
    ScoreOutOfRange { field: &'static str, value: i64 },

    #[error("field '{field}' has invalid color '{value}', expected 'r,g,b' with values 0-255")]
    InvalidColor { field: &'static str, value: String },

    #[error("field '{field}' has {found} entries but blockCount is {expected}")]
    BlockMismatch {
        field: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("field '{field}': thickEnd ({thick_end}) is less than thickStart ({thick_start})")]
    ThickRange {
        field: &'static str,
        thick_start: u64,
        thick_end: u64,
    },
}

impl ValidationError {
    /// The column the violation is attributed to.
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::EmptyField { field }
            | ValidationError::InvalidText { field, .. }
            | ValidationError::NegativeValue { field, .. }
            | ValidationError::EndBeforeStart { field, .. }
            | ValidationError::InvalidStrand { field, .. }
            | ValidationError::InvalidNumber { field, .. }
            | ValidationError::NonFinite { field, .. }
            | ValidationError::ScoreOutOfRange { field, .. }
            | ValidationError::InvalidColor { field, .. }
            | ValidationError::BlockMismatch { field, .. }
            | ValidationError::ThickRange { field, .. } => field,
        }
    }
}

/// A line's shape does not match the record layout it is decoded as.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("{kind} expects {expected} columns but found {found}")]
    ColumnCount {
        kind: String,
        expected: usize,
        found: usize,
    },

    #[error("no BED layout has {found} columns")]
    UnknownLayout { found: usize },

    #[error("cannot write a {found} record after a {expected} record")]
    MixedRecordKinds { expected: String, found: String },
}

/// A query interval is structurally invalid.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    #[error("query {reference_name}:{start}-{end} has end before start")]
    EndBeforeStart {
        reference_name: String,
        start: u64,
        end: u64,
    },

    #[error("query has an empty reference name")]
    EmptyReferenceName,
}

/// Errors raised while reading, writing or querying BED data.
#[derive(Error, Debug)]
pub enum BedError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid record: {0}")]
    Validation(#[from] ValidationError),

    #[error("Invalid BED format: {0}")]
    Format(#[from] FormatError),

    #[error("Invalid query: {0}")]
    Query(#[from] QueryError),

    #[error("Parse error at line {line}: {source}")]
    Parse {
        line: usize,
        #[source]
        source: Box<BedError>,
    },
}

impl BedError {
    /// Attach a 1-based line number to a decode failure.
    pub fn at_line(self, line: usize) -> Self {
        BedError::Parse {
            line,
            source: Box::new(self),
        }
    }
}

pub type Result<T> = std::result::Result<T, BedError>;
