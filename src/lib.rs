//! Field amplitude estimation from magnetometer recordings.
//!
//! Loads signal and noise recordings from CSV, runs the segmented analysis in
//! [`fieldscope_core`], and packages the result as a report.

pub mod config;
pub mod error;
pub mod recording;
pub mod report;

pub use error::{Error, Result};
pub use fieldscope_core as analysis;
pub use fieldscope_core::AnalysisParams;
pub use report::AnalysisReport;

use fieldscope_core::AnalysisPipeline;
use std::path::Path;

/// Load both recordings and run the analysis.
pub fn analyze_recordings(
    signal_path: &Path,
    noise_path: &Path,
    column: usize,
    params: AnalysisParams,
) -> Result<AnalysisReport> {
    let signal = recording::load_recording(signal_path, column)?;
    let noise = recording::load_recording(noise_path, column)?;
    log::info!(
        "loaded {} signal and {} noise samples",
        signal.len(),
        noise.len()
    );
    let result = AnalysisPipeline::new(params.clone()).run(&signal, &noise)?;
    Ok(AnalysisReport::new(result, params))
}
