use crate::error::{Error, Result};
use crate::types::Spectrum;
use realfft::RealFftPlanner;
use std::cell::RefCell;

thread_local! {
    static FFT_PLANNER: RefCell<RealFftPlanner<f64>> = RefCell::new(RealFftPlanner::new());
}

/// Spacing between bins of an `len`-point transform (Hz).
///
/// Computed as `1 / (N * (1 / Fs))`, the same arithmetic numpy's `fftfreq`
/// uses, so nearest-bin ties resolve identically.
pub fn bin_spacing(len: usize, sample_rate: f64) -> f64 {
    1.0 / (len as f64 * (1.0 / sample_rate))
}

/// Frequencies of the first `N/2` bins of an `N`-point transform.
pub fn bin_frequencies(len: usize, sample_rate: f64) -> Vec<f64> {
    let step = bin_spacing(len, sample_rate);
    (0..len / 2).map(|k| k as f64 * step).collect()
}

/// Single-sided amplitude spectrum of `samples`.
///
/// Keeps the first `N/2` bins (non-negative frequencies) and scales each
/// magnitude by `2/N`. No window is applied: the SNR extraction averages over
/// neighbouring bins to absorb leakage instead.
pub fn amplitude_spectrum(samples: &[f64], sample_rate: f64) -> Result<Spectrum> {
    let n = samples.len();
    if n < 2 {
        return Err(Error::InsufficientData { which: "segment" });
    }

    let fft = FFT_PLANNER.with(|p| p.borrow_mut().plan_fft_forward(n));
    let mut input = fft.make_input_vec();
    let mut spectrum = fft.make_output_vec();
    input.copy_from_slice(samples);
    fft.process(&mut input, &mut spectrum)?;

    let scale = 2.0 / n as f64;
    let magnitudes: Vec<f64> = spectrum[..n / 2].iter().map(|c| c.norm() * scale).collect();

    Ok(Spectrum {
        frequencies: bin_frequencies(n, sample_rate),
        magnitudes,
    })
}
