use std::io::{Cursor, Write};
use std::path::Path;
use std::sync::{Arc, Mutex};

use tempfile::TempDir;

use crate::roi_pipeline::common::config::ParseConfig;
use crate::roi_pipeline::common::error::{ParseError, Result};
use crate::roi_pipeline::conversions::ResultsToMatrixPipeline;
use crate::roi_pipeline::export::{MatrixWriter, read_matrix_file};
use crate::roi_pipeline::matrix::{TraceMatrix, row_range};
use crate::roi_pipeline::records::{Record, RecordSource, Records, TabTextSource};

const EXAMPLE: &str = "Slice\tIntDen\n1\t1\n1\t5\n2\t2\n2\t9\n3\t3\n3\t20\n";

struct MockSource {
    should_fail: bool,
    records: Vec<Record>,
}

impl MockSource {
    /// Frame-major records with `n_roi` ROIs per frame; ROI `r` rises by `r` each frame.
    fn round_robin(n_roi: usize, n_frames: usize) -> Self {
        let mut records = Vec::with_capacity(n_roi * n_frames);
        for frame in 0..n_frames {
            for roi in 0..n_roi {
                records.push(Record {
                    line: records.len() as u64 + 2,
                    frame: frame as i64,
                    value: (roi * 10 + frame * roi) as f64,
                });
            }
        }
        Self { should_fail: false, records }
    }
}

impl RecordSource for MockSource {
    fn records(&self) -> Result<Records<'_>> {
        if self.should_fail {
            return Err(ParseError::InputReadError("Mock read error".to_string()));
        }
        Ok(Box::new(self.records.iter().copied().map(Ok::<Record, ParseError>)))
    }

    fn origin(&self) -> &Path {
        Path::new("mock")
    }
}

struct MockWriter {
    should_fail: bool,
    written: Arc<Mutex<Vec<TraceMatrix>>>,
}

impl MatrixWriter for MockWriter {
    fn write_matrix(&self, matrix: &TraceMatrix, _output: &mut dyn Write, _config: &ParseConfig) -> Result<()> {
        if self.should_fail {
            return Err(ParseError::OutputWriteError("Mock write error".to_string()));
        }
        self.written.lock().unwrap().push(matrix.clone());
        Ok(())
    }
}

fn mock_pipeline(should_fail: bool, config: ParseConfig) -> (ResultsToMatrixPipeline<MockWriter>, Arc<Mutex<Vec<TraceMatrix>>>) {
    let written = Arc::new(Mutex::new(Vec::new()));
    let writer = MockWriter { should_fail, written: written.clone() };
    (ResultsToMatrixPipeline::with_custom(writer, config), written)
}

#[test]
fn test_successful_conversion() {
    let config = ParseConfig::builder().activity_threshold(15.0).build();
    let (pipeline, written) = mock_pipeline(false, config);
    let source = TabTextSource::new(EXAMPLE, "Slice", "IntDen");

    let mut raw_out = Cursor::new(Vec::new());
    let mut active_out = Cursor::new(Vec::new());
    let summary = pipeline.convert(&source, &mut raw_out, &mut active_out).unwrap();

    assert_eq!(summary.shape.n_roi, 2);
    assert_eq!(summary.shape.n_frames, 3);
    assert_eq!(summary.active_rows, 1);
    assert!(summary.raw_path.is_none());

    let written = written.lock().unwrap();
    assert_eq!(written.len(), 2);
    assert_eq!(
        written[0],
        TraceMatrix::from_rows(vec![vec![1.0, 2.0, 3.0], vec![5.0, 9.0, 20.0]]).unwrap()
    );
    assert_eq!(written[1], TraceMatrix::from_rows(vec![vec![5.0, 9.0, 20.0]]).unwrap());
}

#[test]
fn test_dimensions_match_source() {
    let (pipeline, written) = mock_pipeline(false, ParseConfig::default());
    let source = MockSource::round_robin(7, 11);

    let summary = pipeline
        .convert(&source, &mut Cursor::new(Vec::new()), &mut Cursor::new(Vec::new()))
        .unwrap();

    assert_eq!(summary.shape.n_roi, 7);
    assert_eq!(summary.shape.n_frames, 11);
    let raw = &written.lock().unwrap()[0];
    assert_eq!(raw.n_rows(), 7);
    assert_eq!(raw.n_cols(), 11);
    assert_eq!(raw.row(6).unwrap()[10], 120.0);
}

#[test]
fn test_filter_partitions_rows() {
    let threshold = 5.0;
    let config = ParseConfig::builder().activity_threshold(threshold).build();
    let (pipeline, written) = mock_pipeline(false, config);
    // Ranges are 0, 5 and 10.
    let source = MockSource::round_robin(3, 6);

    let summary = pipeline
        .convert(&source, &mut Cursor::new(Vec::new()), &mut Cursor::new(Vec::new()))
        .unwrap();
    assert_eq!(summary.active_rows, 2);

    let written = written.lock().unwrap();
    let (raw, active) = (&written[0], &written[1]);
    for row in active.rows() {
        assert!(row_range(row) >= threshold);
    }
    let excluded = raw.rows().filter(|row| !active.rows().any(|kept| kept == *row));
    for row in excluded {
        assert!(row_range(row) < threshold);
    }
}

#[test]
fn test_reader_failure() {
    let (pipeline, written) = mock_pipeline(false, ParseConfig::default());
    let source = MockSource { should_fail: true, records: Vec::new() };

    let result = pipeline.convert(&source, &mut Cursor::new(Vec::new()), &mut Cursor::new(Vec::new()));

    assert!(matches!(result.unwrap_err(), ParseError::InputReadError(_)));
    assert!(written.lock().unwrap().is_empty());
}

#[test]
fn test_writer_failure() {
    let (pipeline, _) = mock_pipeline(true, ParseConfig::default());
    let source = MockSource::round_robin(2, 2);

    let result = pipeline.convert(&source, &mut Cursor::new(Vec::new()), &mut Cursor::new(Vec::new()));

    assert!(matches!(result.unwrap_err(), ParseError::OutputWriteError(_)));
}

#[test]
fn test_irregular_input_writes_nothing() {
    let (pipeline, written) = mock_pipeline(false, ParseConfig::default());
    let mut source = MockSource::round_robin(3, 4);
    // Frame 1 loses its last ROI to frame 2.
    source.records[5].frame = 2;

    let result = pipeline.convert(&source, &mut Cursor::new(Vec::new()), &mut Cursor::new(Vec::new()));

    assert!(matches!(result.unwrap_err(), ParseError::IrregularFrame { .. }));
    assert!(written.lock().unwrap().is_empty());
}

#[test]
fn test_set_config() {
    let mut pipeline = ResultsToMatrixPipeline::new(ParseConfig::default());
    pipeline.set_config(ParseConfig::builder().activity_threshold(3.0).build());
    assert_eq!(pipeline.config().activity_threshold, 3.0);
}

#[test]
fn test_convert_file_writes_both_outputs() -> Result<()> {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("Results.txt");
    std::fs::write(&input, " \tArea\tIntDen\tSlice\n1\t4\t1\t1\n2\t4\t5\t1\n3\t4\t2\t2\n4\t4\t9\t2\n5\t4\t3\t3\n6\t4\t20\t3\n")?;

    let config = ParseConfig::builder()
        .input_path(&input)
        .output_base(dir.path().join("out").join("Results_parsed"))
        .activity_threshold(15.0)
        .build();
    let pipeline = ResultsToMatrixPipeline::new(config);
    let summary = pipeline.convert_file()?;

    let raw_path = summary.raw_path.clone().unwrap();
    let active_path = summary.active_path.clone().unwrap();
    assert!(raw_path.ends_with("out/Results_parsed_raw.txt"));
    assert!(active_path.ends_with("out/Results_parsed_threshholded.txt"));

    assert_eq!(
        std::fs::read_to_string(&raw_path)?,
        "\tframe0\tframe1\tframe2\t\nroi0\t1\t2\t3\t\nroi1\t5\t9\t20\t\n"
    );
    assert_eq!(
        std::fs::read_to_string(&active_path)?,
        "\tframe0\tframe1\tframe2\t\nroi0\t5\t9\t20\t\n"
    );

    let reloaded = read_matrix_file(&raw_path)?;
    assert_eq!(reloaded.row(1), Some(&[5.0, 9.0, 20.0][..]));
    assert!(summary.timings.get_step("build_matrix").is_some());
    Ok(())
}

#[test]
fn test_convert_file_missing_field_creates_no_outputs() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("Results.txt");
    std::fs::write(&input, "Slice\tMean\n1\t5\n").unwrap();

    let config = ParseConfig::builder()
        .input_path(&input)
        .output_base(dir.path().join("Results_parsed"))
        .build();
    let pipeline = ResultsToMatrixPipeline::new(config.clone());

    let err = pipeline.convert_file().unwrap_err();
    assert!(matches!(err, ParseError::FieldNotFound { ref field, .. } if field == "IntDen"));
    assert!(!config.raw_output_path().exists());
    assert!(!config.active_output_path().exists());
}

/// Fails every write with a bare I/O error, like a full disk.
struct DiskFullWriter;

impl MatrixWriter for DiskFullWriter {
    fn write_matrix(&self, _matrix: &TraceMatrix, _output: &mut dyn Write, _config: &ParseConfig) -> Result<()> {
        Err(std::io::Error::other("no space left on device").into())
    }
}

#[test]
fn test_convert_file_write_error_names_output() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("Results.txt");
    std::fs::write(&input, EXAMPLE).unwrap();

    let config = ParseConfig::builder()
        .input_path(&input)
        .output_base(dir.path().join("Results_parsed"))
        .build();
    let pipeline = ResultsToMatrixPipeline::with_custom(DiskFullWriter, config);

    match pipeline.convert_file().unwrap_err() {
        ParseError::OutputWriteError(msg) => {
            assert!(msg.contains("Results_parsed_raw.txt"), "{msg}");
            assert!(msg.contains("no space left on device"), "{msg}");
        }
        other => panic!("unexpected error: {other}"),
    }
}
