//! Error handling for PPPNAVA analysis operations.
//!
//! Line-level parse failures are reported as [`ParseError`]; everything that
//! can abort a run (I/O, malformed input, empty input) is a [`NavError`].

use std::path::PathBuf;
use thiserror::Error;

/// Failure to turn a single log line into a position record
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("expected at least {required} comma-separated fields, found {found}")]
    TooFewFields { found: usize, required: usize },

    #[error("field {index} ({field}) is not a decimal number: '{value}'")]
    InvalidNumber {
        field: &'static str,
        index: usize,
        value: String,
    },

    #[error("line is not valid UTF-8")]
    InvalidUtf8,

    #[error("blank line between records")]
    BlankLine,
}

#[derive(Error, Debug)]
pub enum NavError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Input file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("Malformed record on line {line}: {source}")]
    Parse {
        line: usize,
        #[source]
        source: ParseError,
    },

    #[error("Coordinate out of range on line {line}: {field} = {value}")]
    CoordinateOutOfRange {
        line: usize,
        field: &'static str,
        value: f64,
    },

    #[error("No position records found in input")]
    EmptyInput,

    #[error("Report serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, NavError>;
