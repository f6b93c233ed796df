use anyhow::Context;
use roi_matrix_rs::logger::{self, error, info};
use roi_matrix_rs::roi_pipeline::{ParseConfig, ResultsToMatrixPipeline};

// Edit these to match your export; nothing else needs changing.
const INPUT_FILE: &str = "Results.txt";
const OUTPUT_FILE: &str = "Results_parsed";
const ACTIVITY_THRESHOLD: f64 = 15000.0;
const ROW_LABEL: &str = "roi";
const COLUMN_LABEL: &str = "frame";
const FRAME_HEADER: &str = "Slice";
const DATA_TO_EXTRACT: &str = "IntDen";

fn main() -> anyhow::Result<()> {
    logger::init();

    info!("Starting roi_matrix...");

    let config = ParseConfig::builder()
        .input_path(INPUT_FILE)
        .output_base(OUTPUT_FILE)
        .activity_threshold(ACTIVITY_THRESHOLD)
        .row_label(ROW_LABEL)
        .column_label(COLUMN_LABEL)
        .frame_field(FRAME_HEADER)
        .data_field(DATA_TO_EXTRACT)
        .build();
    let pipeline = ResultsToMatrixPipeline::new(config);

    info!("Results to matrix pipeline initialized");
    info!("Frame column: {}, data column: {}", FRAME_HEADER, DATA_TO_EXTRACT);
    info!("Activity threshold: {}", pipeline.config().activity_threshold);

    let summary = pipeline
        .convert_file()
        .inspect_err(|e| error!("Conversion failed: {}", e))
        .with_context(|| format!("converting {}", pipeline.config().input_path.display()))?;

    info!(
        "Conversion successful! {} of {} ROIs active",
        summary.active_rows, summary.shape.n_roi
    );
    summary.timings.print_summary();

    Ok(())
}
