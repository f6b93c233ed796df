//! Shape inference over an un-indexed record stream.
//!
//! Records are expected grouped by frame, with the same ROIs in the same order inside
//! every frame. The ROI count is the length of the first frame's run and the frame
//! count is the number of runs; each is measured by its own pass over the source.

use tracing::{debug, instrument};

use crate::roi_pipeline::common::error::{ParseError, Result};
use crate::roi_pipeline::matrix::types::MatrixShape;
use crate::roi_pipeline::records::RecordSource;

/// Counts the records before the frame id first changes.
///
/// A source holding a single frame yields its full record count.
pub fn count_rois(source: &dyn RecordSource) -> Result<usize> {
    let mut records = source.records()?;

    let first = match records.next() {
        Some(record) => record?,
        None => return Err(ParseError::EmptyInput(source.origin().to_path_buf())),
    };

    let mut n_roi = 1;
    for record in records {
        if record?.frame != first.frame {
            break;
        }
        n_roi += 1;
    }
    Ok(n_roi)
}

/// Counts frame id transitions, plus one for the first frame.
pub fn count_frames(source: &dyn RecordSource) -> Result<usize> {
    scan_frames(source).map(|(n_frames, _)| n_frames)
}

/// Returns the frame count and the total record count in a single pass.
fn scan_frames(source: &dyn RecordSource) -> Result<(usize, usize)> {
    let mut records = source.records()?;

    let mut prev = match records.next() {
        Some(record) => record?.frame,
        None => return Err(ParseError::EmptyInput(source.origin().to_path_buf())),
    };

    let mut n_frames = 1;
    let mut n_records = 1;
    for record in records {
        let frame = record?.frame;
        n_records += 1;
        if frame != prev {
            n_frames += 1;
            prev = frame;
        }
    }
    Ok((n_frames, n_records))
}

/// Infers the matrix dimensions and checks the records fill them exactly.
///
/// # Errors
///
/// `ParseError::MalformedRowCount` if `n_roi * n_frames` differs from the number of
/// records, which also rejects shapes whose grid would not fit in memory.
#[instrument(skip(source), fields(origin = %source.origin().display()))]
pub fn infer_shape(source: &dyn RecordSource) -> Result<MatrixShape> {
    let n_roi = count_rois(source)?;
    let (n_frames, records) = scan_frames(source)?;
    let shape = MatrixShape { n_roi, n_frames };

    if shape.expected_records() != Some(records) {
        return Err(ParseError::MalformedRowCount { records, n_roi, n_frames });
    }

    debug!(n_roi, n_frames, records, "Inferred matrix shape");
    Ok(shape)
}
