//! Record types

/// One data row of the results table
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Record {
    /// 1-based line in the source, header included
    pub line: u64,
    /// Frame / slice id the measurement belongs to
    pub frame: i64,
    /// Measured intensity
    pub value: f64,
}
