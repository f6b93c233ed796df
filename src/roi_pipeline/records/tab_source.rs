//! Tab-delimited results table sources.
//!
//! ImageJ exports its "Results" window as tab-separated text with a header row. Each
//! pass over a source re-reads it from the start, so shape inference and matrix fill
//! can scan the same input independently without holding it in memory.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::debug;

use crate::roi_pipeline::common::config::ParseConfig;
use crate::roi_pipeline::common::error::{ParseError, Result};
use crate::roi_pipeline::records::header::ColumnIndices;
use crate::roi_pipeline::records::reader::{RecordSource, Records};
use crate::roi_pipeline::records::types::Record;

/// Origin reported by sources that do not come from a file.
const TEXT_ORIGIN: &str = "<text>";

/// Results table read from a file on disk, reopened for every pass.
#[derive(Debug, Clone)]
pub struct TabFileSource {
    path: PathBuf,
    frame_field: String,
    data_field: String,
}

impl TabFileSource {
    pub fn new(
        path: impl Into<PathBuf>,
        frame_field: impl Into<String>,
        data_field: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            frame_field: frame_field.into(),
            data_field: data_field.into(),
        }
    }

    pub fn from_config(config: &ParseConfig) -> Self {
        Self::new(&config.input_path, &config.frame_field, &config.data_field)
    }
}

impl RecordSource for TabFileSource {
    fn records(&self) -> Result<Records<'_>> {
        let file = File::open(&self.path).map_err(|e| {
            ParseError::InputReadError(format!("{}: {}", self.path.display(), e))
        })?;
        parse_records(BufReader::new(file), &self.path, &self.frame_field, &self.data_field)
    }

    fn origin(&self) -> &Path {
        &self.path
    }
}

/// Results table held in memory.
#[derive(Debug, Clone)]
pub struct TabTextSource {
    text: String,
    origin: PathBuf,
    frame_field: String,
    data_field: String,
}

impl TabTextSource {
    pub fn new(
        text: impl Into<String>,
        frame_field: impl Into<String>,
        data_field: impl Into<String>,
    ) -> Self {
        Self {
            text: text.into(),
            origin: PathBuf::from(TEXT_ORIGIN),
            frame_field: frame_field.into(),
            data_field: data_field.into(),
        }
    }
}

impl RecordSource for TabTextSource {
    fn records(&self) -> Result<Records<'_>> {
        parse_records(self.text.as_bytes(), &self.origin, &self.frame_field, &self.data_field)
    }

    fn origin(&self) -> &Path {
        &self.origin
    }
}

fn parse_records<'a, R: Read + 'a>(
    input: R,
    origin: &Path,
    frame_field: &str,
    data_field: &str,
) -> Result<Records<'a>> {
    let mut reader = ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(true)
        .flexible(true)
        .quoting(false)
        .trim(Trim::All)
        .from_reader(input);

    let headers = reader.headers()?;
    if headers.is_empty() {
        return Err(ParseError::MissingHeader(origin.to_path_buf()));
    }

    let indices = ColumnIndices::locate(headers.iter(), frame_field, data_field)?;
    debug!(
        origin = %origin.display(),
        frame_column = indices.frame,
        data_column = indices.data,
        "Located result columns"
    );

    let records = reader
        .into_records()
        .map(move |result| to_record(&result?, indices));
    Ok(Box::new(records))
}

fn to_record(row: &StringRecord, indices: ColumnIndices) -> Result<Record> {
    let line = row.position().map_or(0, |pos| pos.line());

    let cell = |idx: usize| {
        row.get(idx).ok_or_else(|| ParseError::InvalidRecord {
            line,
            reason: format!("row has {} columns, no column {}", row.len(), idx),
        })
    };

    let frame_cell = cell(indices.frame)?;
    let frame = frame_cell.parse::<i64>().map_err(|_| ParseError::InvalidRecord {
        line,
        reason: format!("frame id '{frame_cell}' is not an integer"),
    })?;

    let data_cell = cell(indices.data)?;
    let value = data_cell.parse::<f64>().map_err(|_| ParseError::InvalidRecord {
        line,
        reason: format!("intensity '{data_cell}' is not a number"),
    })?;

    Ok(Record { line, frame, value })
}
