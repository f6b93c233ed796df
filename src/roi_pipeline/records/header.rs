use crate::roi_pipeline::common::error::{ParseError, Result};

/// Zero-based positions of the frame and data columns within a row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnIndices {
    pub frame: usize,
    pub data: usize,
}

impl ColumnIndices {
    /// Locates `frame_field` and `data_field` among the header cells.
    ///
    /// Cells are compared after trimming. Blank cells still occupy a position, so ImageJ's
    /// unlabeled row-number column keeps header and data positions aligned.
    ///
    /// # Errors
    ///
    /// `ParseError::FieldNotFound` naming the first field that is absent.
    pub fn locate<'a, I>(header: I, frame_field: &str, data_field: &str) -> Result<Self>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let cells: Vec<&str> = header.into_iter().map(str::trim).collect();

        let position = |field: &str| {
            cells
                .iter()
                .position(|cell| *cell == field)
                .ok_or_else(|| ParseError::FieldNotFound {
                    field: field.to_string(),
                    available: cells.iter().map(|cell| cell.to_string()).collect(),
                })
        };

        Ok(Self {
            frame: position(frame_field)?,
            data: position(data_field)?,
        })
    }
}
