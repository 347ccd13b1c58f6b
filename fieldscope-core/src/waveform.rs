use crate::error::{Error, Result};
use crate::types::Waveform;

/// Truncate both recordings to the shorter length and sum them sample by sample.
///
/// The recordings are captured independently, so their lengths may differ by a
/// few samples; truncation keeps them aligned without resampling.
pub fn assemble(signal: &[f64], noise: &[f64]) -> Result<Vec<f64>> {
    if signal.is_empty() {
        return Err(Error::InsufficientData { which: "signal" });
    }
    if noise.is_empty() {
        return Err(Error::InsufficientData { which: "noise" });
    }
    if signal.len() != noise.len() {
        log::debug!(
            "truncating recordings to {} samples (signal {}, noise {})",
            signal.len().min(noise.len()),
            signal.len(),
            noise.len()
        );
    }
    Ok(signal.iter().zip(noise).map(|(s, n)| s + n).collect())
}

/// Infer the sampling rate from the sample count and the declared duration.
///
/// The recordings carry no timestamps, so the caller's duration is trusted.
pub fn estimate_sample_rate(num_samples: usize, total_duration_secs: f64) -> Result<f64> {
    let rate = num_samples as f64 / total_duration_secs;
    // 0/0 is NaN, n/0 is infinite
    if !(rate.is_finite() && rate > 0.0) {
        return Err(Error::InvalidRate { rate });
    }
    Ok(rate)
}

/// Build the composite [`Waveform`] from the two recordings.
pub fn build_waveform(signal: &[f64], noise: &[f64], total_duration_secs: f64) -> Result<Waveform> {
    let samples = assemble(signal, noise)?;
    let sample_rate = estimate_sample_rate(samples.len(), total_duration_secs)?;
    log::debug!("composite waveform: {} samples at {sample_rate} Hz", samples.len());
    Ok(Waveform::new(samples, sample_rate))
}
