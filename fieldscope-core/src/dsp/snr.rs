use super::fft::{amplitude_spectrum, bin_spacing};
use crate::error::{Error, Result};
use crate::types::SpectralEstimate;

/// Index of the bin whose frequency is closest to `target`.
///
/// Ties resolve to the lower index.
pub fn nearest_bin(frequencies: &[f64], target: f64) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (k, &f) in frequencies.iter().enumerate() {
        let dist = (f - target).abs();
        match best {
            Some((_, best_dist)) if dist >= best_dist => {}
            _ => best = Some((k, dist)),
        }
    }
    best.map(|(k, _)| k)
}

/// Half-width (in bins) of the band excluded from the noise floor: `max(1, floor(bw / df))`.
pub fn exclusion_bins(bandwidth: f64, freq_resolution: f64) -> usize {
    ((bandwidth / freq_resolution) as usize).max(1)
}

/// Mean magnitude over the signal bin and its immediate neighbours, clipped at the edges.
pub fn signal_amplitude(magnitudes: &[f64], signal_bin: usize) -> f64 {
    let lo = signal_bin.saturating_sub(1);
    let hi = (signal_bin + 1).min(magnitudes.len() - 1);
    mean(&magnitudes[lo..=hi])
}

/// Mean magnitude over every bin outside `[signal_bin - i_bw, signal_bin + i_bw)`.
pub fn noise_amplitude(magnitudes: &[f64], signal_bin: usize, i_bw: usize) -> Result<f64> {
    let below = signal_bin.saturating_sub(i_bw);
    let above = signal_bin.saturating_add(i_bw).min(magnitudes.len());
    let count = below + (magnitudes.len() - above);
    if count == 0 {
        return Err(Error::EmptySelection {
            bins: magnitudes.len(),
            i_signal: signal_bin,
            i_bw,
        });
    }
    let sum: f64 = magnitudes[..below].iter().chain(&magnitudes[above..]).sum();
    Ok(sum / count as f64)
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Spectrum of one segment with signal and noise amplitudes extracted around `target_freq`.
pub fn analyze_segment(
    samples: &[f64],
    sample_rate: f64,
    target_freq: f64,
    bandwidth: f64,
) -> Result<SpectralEstimate> {
    let spectrum = amplitude_spectrum(samples, sample_rate)?;
    let signal_bin = nearest_bin(&spectrum.frequencies, target_freq)
        .ok_or(Error::InsufficientData { which: "spectrum" })?;

    let signal = signal_amplitude(&spectrum.magnitudes, signal_bin);
    let i_bw = exclusion_bins(bandwidth, bin_spacing(samples.len(), sample_rate));
    let noise = noise_amplitude(&spectrum.magnitudes, signal_bin, i_bw)?;

    Ok(SpectralEstimate {
        spectrum,
        signal_bin,
        exclusion_bins: i_bw,
        signal_amplitude: signal,
        noise_amplitude: noise,
    })
}
