//! ROI matrix module
//!
//! Infers the ROI × frame shape of a record stream, fills the matrix, and selects
//! the ROIs whose intensity varies enough to count as active.

mod activity;
mod builder;
mod shape;
pub mod types;

pub use activity::{row_range, select_active};
pub use builder::build_matrix;
pub use shape::{count_frames, count_rois, infer_shape};
pub use types::{MatrixShape, TraceMatrix};
