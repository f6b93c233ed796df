use tracing::{debug, info_span, instrument};

use crate::roi_pipeline::common::error::{ParseError, Result};
use crate::roi_pipeline::matrix::shape::infer_shape;
use crate::roi_pipeline::matrix::types::{MatrixShape, TraceMatrix};
use crate::roi_pipeline::records::RecordSource;

/// Builds the ROI × frame matrix from a frame-grouped record stream.
///
/// The shape is inferred and checked against the record count first (two passes), so
/// nothing is allocated for a shape the records cannot fill. A third pass places each value by
/// position: the ROI counter wraps at the frame boundary and the frame counter advances
/// whenever the frame id changes. The frame-major grid is transposed before returning,
/// so row `i` is the trace of ROI `i` across all frames.
///
/// # Errors
///
/// * `ParseError::IrregularFrame` if a frame holds more or fewer values than the first
/// * `ParseError::MalformedRowCount` if the records do not fill the inferred shape
/// * any read or parse error from the source
#[instrument(skip(source), fields(origin = %source.origin().display()))]
pub fn build_matrix(source: &dyn RecordSource) -> Result<TraceMatrix> {
    let shape = infer_shape(source)?;
    let frames = {
        let _span = info_span!("fill_matrix", n_roi = shape.n_roi, n_frames = shape.n_frames).entered();
        fill_frames(source, shape)?
    };
    Ok(frames.transpose())
}

fn fill_frames(source: &dyn RecordSource, shape: MatrixShape) -> Result<TraceMatrix> {
    let MatrixShape { n_roi, n_frames } = shape;
    let mut grid = vec![vec![0.0; n_roi]; n_frames];

    let mut frame_idx = 0;
    let mut roi_idx = 0;
    let mut prev_frame: Option<i64> = None;
    let mut seen = 0;

    for record in source.records()? {
        let record = record?;

        if let Some(prev) = prev_frame {
            if record.frame != prev {
                if roi_idx != n_roi {
                    return Err(ParseError::IrregularFrame {
                        line: record.line,
                        frame: prev,
                        expected: n_roi,
                        found: roi_idx,
                    });
                }
                frame_idx += 1;
                roi_idx = 0;
            } else if roi_idx == n_roi {
                return Err(ParseError::IrregularFrame {
                    line: record.line,
                    frame: prev,
                    expected: n_roi,
                    found: roi_idx + 1,
                });
            }
        }

        seen += 1;
        // The source yielded more frames than the counting pass saw.
        if frame_idx >= n_frames {
            return Err(ParseError::MalformedRowCount { records: seen, n_roi, n_frames });
        }

        grid[frame_idx][roi_idx] = record.value;
        roi_idx += 1;
        prev_frame = Some(record.frame);
    }

    if shape.expected_records() != Some(seen) {
        return Err(ParseError::MalformedRowCount { records: seen, n_roi, n_frames });
    }

    debug!(records = seen, "Filled frame-major matrix");
    TraceMatrix::with_columns(grid, n_roi)
        .ok_or(ParseError::MalformedRowCount { records: seen, n_roi, n_frames })
}
