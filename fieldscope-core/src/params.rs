use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisParams {
    /// Frequency of the excitation tone (Hz).
    pub target_freq: f64,
    /// Half-width of the band excluded from the noise floor (Hz).
    pub bandwidth: f64,
    /// Drive current (A).
    pub current: f64,
    /// Unit scaling applied to the field (1000.0 gives pT).
    pub scaling_factor: f64,
    /// Declared length of the recording. The sample rate is derived from it.
    pub total_duration_secs: f64,
    pub interval_secs: f64,
}

impl Default for AnalysisParams {
    fn default() -> Self {
        Self {
            target_freq: 1028.0,
            bandwidth: 2.0,
            current: 1.0,
            scaling_factor: 1000.0,
            total_duration_secs: 30.0,
            interval_secs: 1.0,
        }
    }
}

impl AnalysisParams {
    /// Reject non-finite or non-positive values, and intervals longer than the recording.
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("target_freq", self.target_freq),
            ("bandwidth", self.bandwidth),
            ("current", self.current),
            ("scaling_factor", self.scaling_factor),
            ("total_duration_secs", self.total_duration_secs),
            ("interval_secs", self.interval_secs),
        ];
        for (name, value) in fields {
            if !value.is_finite() || value <= 0.0 {
                return Err(Error::InvalidParameter { name, value });
            }
        }
        if self.interval_secs > self.total_duration_secs {
            return Err(Error::InvalidParameter {
                name: "interval_secs",
                value: self.interval_secs,
            });
        }
        Ok(())
    }
}
