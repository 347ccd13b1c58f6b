use crate::error::{Error, Result};

/// Field calibration for one segment.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FieldEstimate {
    /// `(I / (SNR * sqrt(bw))) * s`, the part that varies with SNR.
    pub sensitivity: f64,
    /// `sensitivity * sqrt(bw) * SNR`.
    pub field: f64,
}

/// Convert an SNR into a calibrated field amplitude.
///
/// The field formula cancels algebraically to `current * scaling_factor`,
/// independent of SNR and bandwidth. It is kept literally for compatibility
/// with existing measurement records; `sensitivity` carries the SNR dependence.
pub fn estimate_field(snr: f64, bandwidth: f64, current: f64, scaling_factor: f64) -> Result<FieldEstimate> {
    if !(snr.is_finite() && snr > 0.0) {
        return Err(Error::DegenerateSnr { snr });
    }
    let root_bw = bandwidth.sqrt();
    let sensitivity = current / (snr * root_bw) * scaling_factor;
    let field = sensitivity * root_bw * snr;
    Ok(FieldEstimate { sensitivity, field })
}
