//! Matrix types

/// Dimensions inferred from a record stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatrixShape {
    /// Regions of interest measured in every frame
    pub n_roi: usize,
    /// Distinct frames (time points)
    pub n_frames: usize,
}

impl MatrixShape {
    /// Number of records a complete input holds, or `None` if it overflows `usize`.
    pub fn expected_records(&self) -> Option<usize> {
        self.n_roi.checked_mul(self.n_frames)
    }
}

/// Rectangular matrix of intensities stored as a list of rows.
///
/// The column count is kept separately so a matrix with no rows (every ROI filtered
/// out) still knows how many frames it spans.
#[derive(Debug, Clone, PartialEq)]
pub struct TraceMatrix {
    rows: Vec<Vec<f64>>,
    n_cols: usize,
}

impl TraceMatrix {
    /// Creates an empty matrix with `n_cols` columns.
    pub fn empty(n_cols: usize) -> Self {
        Self { rows: Vec::new(), n_cols }
    }

    /// Builds a matrix from rows, or `None` if the rows differ in length.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Option<Self> {
        let n_cols = rows.first().map_or(0, Vec::len);
        if rows.iter().any(|row| row.len() != n_cols) {
            return None;
        }
        Some(Self { rows, n_cols })
    }

    /// Builds a matrix whose rows are all `n_cols` long, or `None` otherwise.
    pub fn with_columns(rows: Vec<Vec<f64>>, n_cols: usize) -> Option<Self> {
        if rows.iter().any(|row| row.len() != n_cols) {
            return None;
        }
        Some(Self { rows, n_cols })
    }

    #[inline]
    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    #[inline]
    pub fn n_cols(&self) -> usize {
        self.n_cols
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row(&self, idx: usize) -> Option<&[f64]> {
        self.rows.get(idx).map(Vec::as_slice)
    }

    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        self.rows.iter().map(Vec::as_slice)
    }

    /// Copies the rows matching `keep` into a new matrix with the same column count.
    pub fn filter_rows(&self, mut keep: impl FnMut(&[f64]) -> bool) -> Self {
        let rows = self
            .rows
            .iter()
            .filter(|row| keep(row.as_slice()))
            .cloned()
            .collect();
        Self { rows, n_cols: self.n_cols }
    }

    /// Swaps rows and columns.
    pub fn transpose(&self) -> Self {
        let rows = (0..self.n_cols)
            .map(|col| self.rows.iter().map(|row| row[col]).collect())
            .collect();
        Self { rows, n_cols: self.rows.len() }
    }
}
