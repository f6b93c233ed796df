use std::path::Path;

use crate::roi_pipeline::common::error::Result;
use crate::roi_pipeline::records::types::Record;

pub type Records<'a> = Box<dyn Iterator<Item = Result<Record>> + 'a>;

pub trait RecordSource {
    /// Starts a fresh pass over the data rows, in source order.
    fn records(&self) -> Result<Records<'_>>;

    /// Where the records come from, for error messages and logs.
    fn origin(&self) -> &Path;
}
