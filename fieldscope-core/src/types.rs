use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Composite waveform: the summed signal and noise recordings plus the
/// sampling rate inferred from the declared measurement duration.
#[derive(Clone, Debug)]
pub struct Waveform {
    samples: Vec<f64>,
    sample_rate: f64,
}

impl Waveform {
    pub(crate) fn new(samples: Vec<f64>, sample_rate: f64) -> Self {
        Self { samples, sample_rate }
    }

    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Borrow the samples covered by `segment`.
    pub fn slice(&self, segment: &Segment) -> &[f64] {
        &self.samples[segment.range()]
    }
}

/// Half-open `[start, end)` sample range into a [`Waveform`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Segment {
    pub index: usize, // position in the nominal interval sequence
    pub start: usize,
    pub end: usize,
}

impl Segment {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.end == self.start
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}

/// Single-sided amplitude spectrum: `frequencies[k]` pairs with `magnitudes[k]`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Spectrum {
    pub frequencies: Vec<f64>,
    pub magnitudes: Vec<f64>,
}

impl Spectrum {
    pub fn len(&self) -> usize {
        self.magnitudes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.magnitudes.is_empty()
    }

    /// Frequency spacing between adjacent bins (Hz).
    pub fn freq_resolution(&self) -> Option<f64> {
        match self.frequencies.as_slice() {
            [f0, f1, ..] => Some(f1 - f0),
            _ => None,
        }
    }

    /// Bin with the largest magnitude as `(frequency, magnitude)`.
    pub fn peak(&self) -> Option<(f64, f64)> {
        let mut best: Option<usize> = None;
        for (k, &mag) in self.magnitudes.iter().enumerate() {
            if best.map_or(true, |b| mag > self.magnitudes[b]) {
                best = Some(k);
            }
        }
        best.map(|k| (self.frequencies[k], self.magnitudes[k]))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SpectralEstimate {
    pub spectrum: Spectrum,
    pub signal_bin: usize,
    /// Exclusion half-width around `signal_bin`, in bins.
    pub exclusion_bins: usize,
    pub signal_amplitude: f64,
    pub noise_amplitude: f64,
}

impl SpectralEstimate {
    /// Signal amplitude over noise amplitude. Infinite when the noise floor is exactly zero.
    pub fn snr(&self) -> f64 {
        self.signal_amplitude / self.noise_amplitude
    }

    pub fn signal_frequency(&self) -> f64 {
        self.spectrum.frequencies[self.signal_bin]
    }
}

/// Calibrated field value at the end of one segment.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FieldMeasurement {
    /// Elapsed seconds at the end of the segment: `(index + 1) * interval`.
    pub time_offset: f64,
    /// Field amplitude (pT).
    pub field: f64,
    pub sensitivity: f64,
    pub snr: f64,
}

/// A segment that was analyzed but could not be calibrated.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SkippedSegment {
    pub index: usize,
    pub time_offset: f64,
    pub reason: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct AnalysisResult {
    pub measurements: Vec<FieldMeasurement>,
    /// Segments left out of `measurements`, in segment order.
    pub skipped: Vec<SkippedSegment>,
    /// Full-waveform spectrum used for the summary plot.
    pub spectrum: Spectrum,
    pub sample_rate: f64,
}

impl AnalysisResult {
    pub fn times(&self) -> Vec<f64> {
        self.measurements.iter().map(|m| m.time_offset).collect()
    }

    pub fn fields(&self) -> Vec<f64> {
        self.measurements.iter().map(|m| m.field).collect()
    }
}
