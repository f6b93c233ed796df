//! ROI intensity reshaping pipeline
//!
//! This module turns an ImageJ "Results" table (one line per ROI per frame) into a
//! dense ROI × frame matrix, with separate modules for record reading, matrix
//! construction, matrix export, and conversion orchestration.

pub mod common;
pub mod records;
pub mod matrix;
pub mod export;
pub mod conversions;
pub mod timing;

pub use common::{
    ParseConfig,
    ParseConfigBuilder,
    ParseError,
    Result,
};

pub use records::{
    ColumnIndices,
    Record,
    RecordSource,
    Records,
    TabFileSource,
    TabTextSource,
};

pub use matrix::{
    MatrixShape,
    TraceMatrix,
    build_matrix,
    count_frames,
    count_rois,
    infer_shape,
    row_range,
    select_active,
};

pub use export::{
    MatrixWriter,
    TabMatrixWriter,
    read_matrix,
};

pub use conversions::{
    ParseSummary,
    ResultsToMatrixPipeline,
};

pub use timing::{PipelineTimings, StepTiming};
