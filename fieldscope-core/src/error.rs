//! Error types for the analysis core.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Insufficient data: {which} sequence is empty")]
    InsufficientData { which: &'static str },

    #[error("Invalid sampling rate {rate} Hz: check data length or total duration")]
    InvalidRate { rate: f64 },

    #[error("Interval of {interval_secs}s maps to zero samples at {sample_rate} Hz")]
    DegenerateInterval { sample_rate: f64, interval_secs: f64 },

    #[error("Noise selection is empty: {bins} bins, signal bin {i_signal}, exclusion half-width {i_bw}")]
    EmptySelection {
        bins: usize,
        i_signal: usize,
        i_bw: usize,
    },

    #[error("Invalid parameter {name} = {value}")]
    InvalidParameter { name: &'static str, value: f64 },

    #[error("SNR {snr} cannot be calibrated into a field amplitude")]
    DegenerateSnr { snr: f64 },

    #[error("FFT failed: {0}")]
    Fft(String),
}

impl Error {
    /// Whether the error invalidates the rest of a segment loop.
    ///
    /// Non-structural errors only drop the segment that raised them.
    pub fn is_structural(&self) -> bool {
        !matches!(self, Error::DegenerateSnr { .. })
    }
}

impl From<realfft::FftError> for Error {
    fn from(e: realfft::FftError) -> Self {
        Error::Fft(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
