//! Pipeline configuration types

use std::path::{Path, PathBuf};

/// Suffix of the file holding every ROI row.
const RAW_SUFFIX: &str = "_raw.txt";

/// Suffix of the file holding only active ROI rows. Spelling kept for existing spreadsheets.
const ACTIVE_SUFFIX: &str = "_threshholded.txt";

/// Configuration for converting an ImageJ results table to ROI matrices
#[derive(Debug, Clone)]
pub struct ParseConfig {
    /// Tab-delimited results table exported by ImageJ
    pub input_path: PathBuf,
    /// Base path of the two output files (`<base>_raw.txt`, `<base>_threshholded.txt`)
    pub output_base: PathBuf,
    /// Minimum intensity range (max - min) for a ROI to count as active
    pub activity_threshold: f64,
    /// Prefix of the row labels in the output (one row per ROI)
    pub row_label: String,
    /// Prefix of the column labels in the output (one column per frame)
    pub column_label: String,
    /// Header of the column holding the frame / slice id
    pub frame_field: String,
    /// Header of the column holding the intensity value
    pub data_field: String,
}

impl Default for ParseConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from("Results.txt"),
            output_base: PathBuf::from("Results_parsed"),
            activity_threshold: 15000.0,
            row_label: "roi".to_string(),
            column_label: "frame".to_string(),
            frame_field: "Slice".to_string(),
            data_field: "IntDen".to_string(),
        }
    }
}

impl ParseConfig {
    pub fn builder() -> ParseConfigBuilder {
        ParseConfigBuilder::default()
    }

    pub fn raw_output_path(&self) -> PathBuf {
        with_suffix(&self.output_base, RAW_SUFFIX)
    }

    pub fn active_output_path(&self) -> PathBuf {
        with_suffix(&self.output_base, ACTIVE_SUFFIX)
    }
}

// Appends to the file name rather than replacing an extension, so "run.1" stays "run.1_raw.txt".
fn with_suffix(base: &Path, suffix: &str) -> PathBuf {
    let mut name = base.as_os_str().to_owned();
    name.push(suffix);
    PathBuf::from(name)
}

/// Builder for ParseConfig
#[derive(Default)]
pub struct ParseConfigBuilder {
    input_path: Option<PathBuf>,
    output_base: Option<PathBuf>,
    activity_threshold: Option<f64>,
    row_label: Option<String>,
    column_label: Option<String>,
    frame_field: Option<String>,
    data_field: Option<String>,
}

impl ParseConfigBuilder {
    pub fn input_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.input_path = Some(path.into());
        self
    }

    pub fn output_base(mut self, base: impl Into<PathBuf>) -> Self {
        self.output_base = Some(base.into());
        self
    }

    pub fn activity_threshold(mut self, threshold: f64) -> Self {
        self.activity_threshold = Some(threshold);
        self
    }

    pub fn row_label(mut self, label: impl Into<String>) -> Self {
        self.row_label = Some(label.into());
        self
    }

    pub fn column_label(mut self, label: impl Into<String>) -> Self {
        self.column_label = Some(label.into());
        self
    }

    pub fn frame_field(mut self, field: impl Into<String>) -> Self {
        self.frame_field = Some(field.into());
        self
    }

    pub fn data_field(mut self, field: impl Into<String>) -> Self {
        self.data_field = Some(field.into());
        self
    }

    pub fn build(self) -> ParseConfig {
        let default = ParseConfig::default();
        ParseConfig {
            input_path: self.input_path.unwrap_or(default.input_path),
            output_base: self.output_base.unwrap_or(default.output_base),
            activity_threshold: self.activity_threshold.unwrap_or(default.activity_threshold),
            row_label: self.row_label.unwrap_or(default.row_label),
            column_label: self.column_label.unwrap_or(default.column_label),
            frame_field: self.frame_field.unwrap_or(default.frame_field),
            data_field: self.data_field.unwrap_or(default.data_field),
        }
    }
}
