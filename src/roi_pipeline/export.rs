//! Matrix export module
//!
//! Writes ROI matrices as tab-delimited text that spreadsheets open directly, and
//! reads such files back.

mod matrix_reader;
mod tab_writer;
mod writer;

pub use matrix_reader::{read_matrix, read_matrix_file};
pub use tab_writer::TabMatrixWriter;
pub use writer::MatrixWriter;
