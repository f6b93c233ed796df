use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("field not found in header: {field} (available: {})", .available.join(", "))]
    FieldNotFound {
        field: String,
        available: Vec<String>,
    },

    #[error("{records} records do not fill a {n_roi} ROI x {n_frames} frame matrix")]
    MalformedRowCount {
        records: usize,
        n_roi: usize,
        n_frames: usize,
    },

    #[error("line {line}: frame {frame} holds {found} ROI values, expected {expected}")]
    IrregularFrame {
        line: u64,
        frame: i64,
        expected: usize,
        found: usize,
    },

    #[error("line {line}: {reason}")]
    InvalidRecord {
        line: u64,
        reason: String,
    },

    #[error("No data rows in input: {}", .0.display())]
    EmptyInput(PathBuf),

    #[error("No header row in input: {}", .0.display())]
    MissingHeader(PathBuf),

    #[error("Failed to read input file: {0}")]
    InputReadError(String),

    #[error("Failed to write output file: {0}")]
    OutputWriteError(String),

    #[error("Tab-delimited parse error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ParseError>;
