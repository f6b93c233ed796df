use tracing::debug;

use crate::roi_pipeline::matrix::types::TraceMatrix;

/// Spread (max - min) of a ROI trace.
///
/// An empty trace has range 0; a trace containing NaN has range NaN.
pub fn row_range(row: &[f64]) -> f64 {
    if row.is_empty() {
        return 0.0;
    }
    if row.iter().any(|v| v.is_nan()) {
        return f64::NAN;
    }
    let (min, max) = row
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), &v| (min.min(v), max.max(v)));
    max - min
}

/// Keeps the rows whose range reaches `threshold`, preserving their order.
pub fn select_active(matrix: &TraceMatrix, threshold: f64) -> TraceMatrix {
    let active = matrix.filter_rows(|row| row_range(row) >= threshold);

    debug!(
        kept = active.n_rows(),
        dropped = matrix.n_rows() - active.n_rows(),
        threshold,
        "Selected active ROIs"
    );

    active
}
