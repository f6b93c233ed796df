use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::{info, info_span, instrument};

use crate::roi_pipeline::{
    common::{config::ParseConfig, error::{ParseError, Result}},
    export::{MatrixWriter, TabMatrixWriter},
    matrix::{MatrixShape, TraceMatrix, build_matrix, select_active},
    records::{RecordSource, TabFileSource},
    timing::PipelineTimings,
};

/// Outcome of one conversion
#[derive(Debug, Clone)]
pub struct ParseSummary {
    /// ROIs and frames of the raw matrix
    pub shape: MatrixShape,
    /// ROIs whose range reached the activity threshold
    pub active_rows: usize,
    /// Output files, when the conversion wrote to disk
    pub raw_path: Option<PathBuf>,
    pub active_path: Option<PathBuf>,
    pub timings: PipelineTimings,
}

pub struct ResultsToMatrixPipeline<W: MatrixWriter> {
    writer: W,
    config: ParseConfig,
}

impl ResultsToMatrixPipeline<TabMatrixWriter> {
    pub fn new(config: ParseConfig) -> Self {
        Self {
            writer: TabMatrixWriter,
            config,
        }
    }
}

impl<W: MatrixWriter> ResultsToMatrixPipeline<W> {
    pub fn with_custom(writer: W, config: ParseConfig) -> Self {
        Self { writer, config }
    }

    fn build(&self, source: &dyn RecordSource, timings: &mut PipelineTimings) -> Result<(TraceMatrix, TraceMatrix)> {
        let raw = {
            let _span = info_span!("build_matrix").entered();
            timings.time("build_matrix", || build_matrix(source))?
        };

        let active = {
            let _span = info_span!("select_active", threshold = self.config.activity_threshold).entered();
            timings.time("select_active", || select_active(&raw, self.config.activity_threshold))
        };

        Ok((raw, active))
    }

    fn write_step(
        &self,
        step: &str,
        matrix: &TraceMatrix,
        output: &mut dyn Write,
        timings: &mut PipelineTimings,
    ) -> Result<()> {
        let _span = info_span!("write_matrix", step, rows = matrix.n_rows()).entered();
        timings.time(step, || self.writer.write_matrix(matrix, output, &self.config))
    }

    fn summarize(
        &self,
        raw: &TraceMatrix,
        active: &TraceMatrix,
        paths: Option<(PathBuf, PathBuf)>,
        timings: PipelineTimings,
    ) -> ParseSummary {
        let shape = MatrixShape {
            n_roi: raw.n_rows(),
            n_frames: raw.n_cols(),
        };

        info!(
            n_roi = shape.n_roi,
            n_frames = shape.n_frames,
            active = active.n_rows(),
            "Data with {} regions of interest and {} time points parsed in {:.3} seconds",
            shape.n_roi,
            shape.n_frames,
            timings.total_duration().as_secs_f64()
        );

        let (raw_path, active_path) = paths.unzip();

        ParseSummary {
            shape,
            active_rows: active.n_rows(),
            raw_path,
            active_path,
            timings,
        }
    }

    /// Builds the matrices from `source` and writes them to the given sinks.
    ///
    /// Nothing is written unless the full raw matrix could be built.
    #[instrument(skip(self, source, raw_output, active_output), fields(origin = %source.origin().display()))]
    pub fn convert(
        &self,
        source: &dyn RecordSource,
        raw_output: &mut dyn Write,
        active_output: &mut dyn Write,
    ) -> Result<ParseSummary> {
        info!("Starting results to matrix conversion");
        let mut timings = PipelineTimings::new();

        let (raw, active) = self.build(source, &mut timings)?;
        self.write_step("write_raw", &raw, raw_output, &mut timings)?;
        self.write_step("write_active", &active, active_output, &mut timings)?;

        Ok(self.summarize(&raw, &active, None, timings))
    }

    /// Converts `config.input_path` into `<output_base>_raw.txt` and
    /// `<output_base>_threshholded.txt`.
    #[instrument(skip(self), fields(input = %self.config.input_path.display()))]
    pub fn convert_file(&self) -> Result<ParseSummary> {
        let raw_path = self.config.raw_output_path();
        let active_path = self.config.active_output_path();

        info!(
            input = %self.config.input_path.display(),
            raw = %raw_path.display(),
            active = %active_path.display(),
            "Converting file"
        );

        let mut timings = PipelineTimings::new();
        let source = TabFileSource::from_config(&self.config);
        let (raw, active) = self.build(&source, &mut timings)?;

        ensure_parent_dirs(&raw_path)?;

        let mut raw_file = create_output(&raw_path)?;
        self.write_step("write_raw", &raw, &mut raw_file, &mut timings)
            .map_err(|e| at_output(&raw_path, e))?;

        let mut active_file = create_output(&active_path)?;
        self.write_step("write_active", &active, &mut active_file, &mut timings)
            .map_err(|e| at_output(&active_path, e))?;

        Ok(self.summarize(&raw, &active, Some((raw_path, active_path)), timings))
    }

    pub fn config(&self) -> &ParseConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: ParseConfig) {
        self.config = config;
    }
}

fn ensure_parent_dirs(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).map_err(|e| {
                ParseError::OutputWriteError(format!("{}: {}", parent.display(), e))
            })?;
        }
    }
    Ok(())
}

/// Attaches the output path to I/O failures raised while writing a file.
fn at_output(path: &Path, err: ParseError) -> ParseError {
    match err {
        ParseError::IoError(e) => ParseError::OutputWriteError(format!("{}: {}", path.display(), e)),
        other => other,
    }
}

fn create_output(path: &Path) -> Result<File> {
    let _span = info_span!("create_output_file").entered();
    File::create(path).map_err(|e| {
        ParseError::OutputWriteError(format!("{}: {}", path.display(), e))
    })
}
