//! Results table reading module
//!
//! This module turns a tab-delimited ImageJ results table into a stream of
//! (frame, intensity) records, locating the two columns of interest by header name.

mod header;
mod reader;
mod tab_source;
pub mod types;

pub use header::ColumnIndices;
pub use reader::{RecordSource, Records};
pub use tab_source::{TabFileSource, TabTextSource};
pub use types::Record;
