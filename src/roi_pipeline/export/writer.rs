use std::io::Write;

use crate::roi_pipeline::common::config::ParseConfig;
use crate::roi_pipeline::common::error::Result;
use crate::roi_pipeline::matrix::TraceMatrix;

pub trait MatrixWriter {
    fn write_matrix(&self, matrix: &TraceMatrix, output: &mut dyn Write, config: &ParseConfig) -> Result<()>;
}
