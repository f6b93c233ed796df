//! Reader for matrices written by [`TabMatrixWriter`](super::TabMatrixWriter).

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use csv::{ReaderBuilder, Trim};

use crate::roi_pipeline::common::error::{ParseError, Result};
use crate::roi_pipeline::matrix::TraceMatrix;

/// Parses an exported matrix, dropping the row and column labels.
///
/// The column count comes from the non-blank header cells after the leading blank
/// one. A single trailing tab per line is accepted; every row must then hold exactly
/// that many values.
pub fn read_matrix<R: Read>(input: R) -> Result<TraceMatrix> {
    let mut reader = ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(true)
        .flexible(true)
        .quoting(false)
        .trim(Trim::All)
        .from_reader(input);

    let n_cols = reader
        .headers()?
        .iter()
        .skip(1)
        .filter(|cell| !cell.is_empty())
        .count();

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        let line = record.position().map_or(0, |pos| pos.line());

        let mut cells: Vec<&str> = record.iter().skip(1).collect();
        // The writer ends every line with a tab.
        if cells.last() == Some(&"") {
            cells.pop();
        }
        if cells.len() != n_cols {
            return Err(ParseError::InvalidRecord {
                line,
                reason: format!("expected {} values, found {}", n_cols, cells.len()),
            });
        }

        let row = cells
            .into_iter()
            .map(|cell| {
                cell.parse::<f64>().map_err(|_| ParseError::InvalidRecord {
                    line,
                    reason: format!("matrix value '{cell}' is not a number"),
                })
            })
            .collect::<Result<Vec<f64>>>()?;
        rows.push(row);
    }

    TraceMatrix::with_columns(rows, n_cols).ok_or_else(|| ParseError::InvalidRecord {
        line: 0,
        reason: "ragged matrix".to_string(),
    })
}

pub fn read_matrix_file<P: AsRef<Path>>(path: P) -> Result<TraceMatrix> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| {
        ParseError::InputReadError(format!("{}: {}", path.display(), e))
    })?;
    read_matrix(BufReader::new(file))
}
