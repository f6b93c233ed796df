use std::io::{BufWriter, Write};

use tracing::debug;

use crate::roi_pipeline::common::config::ParseConfig;
use crate::roi_pipeline::common::error::Result;
use crate::roi_pipeline::export::writer::MatrixWriter;
use crate::roi_pipeline::matrix::TraceMatrix;

/// Writes a matrix as a labelled, tab-delimited grid.
///
/// The first header cell is blank, followed by `<column_label><i>` for every frame; each
/// row starts with `<row_label><idx>`. Every cell, including the last of a line, is
/// followed by a tab. Row indices count the rows as written, so a filtered matrix is
/// renumbered from 0.
pub struct TabMatrixWriter;

impl MatrixWriter for TabMatrixWriter {
    fn write_matrix(&self, matrix: &TraceMatrix, output: &mut dyn Write, config: &ParseConfig) -> Result<()> {
        debug!("Writing matrix: {} rows x {} columns", matrix.n_rows(), matrix.n_cols());

        let mut out = BufWriter::new(output);

        out.write_all(b"\t")?;
        for col in 0..matrix.n_cols() {
            write!(out, "{}{}\t", config.column_label, col)?;
        }
        out.write_all(b"\n")?;

        for (idx, row) in matrix.rows().enumerate() {
            write!(out, "{}{}\t", config.row_label, idx)?;
            for value in row {
                write!(out, "{value}\t")?;
            }
            out.write_all(b"\n")?;
        }

        out.flush()?;
        Ok(())
    }
}
