//! Pipeline conversions module
//!
//! This module contains the orchestration that turns a results table into the raw and
//! activity-filtered ROI matrices.

mod results_to_matrix;

#[cfg(test)]
mod tests;

pub use results_to_matrix::{ParseSummary, ResultsToMatrixPipeline};
