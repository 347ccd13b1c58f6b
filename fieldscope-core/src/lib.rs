//! Segmented spectral analysis of magnetometer recordings.
//!
//! A signal recording and a noise recording are summed into one waveform, the
//! sampling rate is inferred from the declared duration, and the waveform is
//! cut into fixed intervals. Each interval gets an amplitude spectrum, an SNR
//! at the excitation frequency, and a calibrated field value.

pub mod dsp;
pub mod error;
pub mod field;
pub mod params;
pub mod pipeline;
pub mod segment;
pub mod types;
pub mod waveform;

pub use error::{Error, Result};
pub use params::AnalysisParams;
pub use pipeline::AnalysisPipeline;
pub use types::{
    AnalysisResult, FieldMeasurement, Segment, SkippedSegment, SpectralEstimate, Spectrum, Waveform,
};
