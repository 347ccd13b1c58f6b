use crate::dsp::fft::amplitude_spectrum;
use crate::dsp::snr::analyze_segment;
use crate::error::Result;
use crate::field::estimate_field;
use crate::params::AnalysisParams;
use crate::segment::SegmentPlan;
use crate::types::{AnalysisResult, FieldMeasurement, Segment, SkippedSegment, Waveform};
use crate::waveform::build_waveform;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// One analysis run: assemble, segment, measure each segment, and compute the
/// full-waveform summary spectrum.
///
/// Holds only the parameters; build one per run.
#[derive(Clone, Debug)]
pub struct AnalysisPipeline {
    params: AnalysisParams,
}

impl AnalysisPipeline {
    pub fn new(params: AnalysisParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &AnalysisParams {
        &self.params
    }

    /// Run the full analysis over a signal and a noise recording.
    ///
    /// Input, rate, parameter and interval errors are reported before any
    /// segment is analyzed. A structural error in a segment aborts the run;
    /// a segment whose SNR cannot be calibrated is listed in
    /// [`AnalysisResult::skipped`] instead of `measurements`.
    pub fn run(&self, signal: &[f64], noise: &[f64]) -> Result<AnalysisResult> {
        let p = &self.params;
        let waveform = build_waveform(signal, noise, p.total_duration_secs)?;
        p.validate()?;
        let plan = SegmentPlan::new(
            waveform.sample_rate(),
            waveform.len(),
            p.total_duration_secs,
            p.interval_secs,
        )?;

        let (measurements, skipped) = self.measure_all(&waveform, &plan)?;
        log::debug!(
            "{} measurements, {} skipped, from {} candidate intervals",
            measurements.len(),
            skipped.len(),
            plan.num_intervals
        );

        let spectrum = amplitude_spectrum(waveform.samples(), waveform.sample_rate())?;

        Ok(AnalysisResult {
            measurements,
            skipped,
            spectrum,
            sample_rate: waveform.sample_rate(),
        })
    }

    fn measure(&self, waveform: &Waveform, plan: &SegmentPlan, segment: &Segment) -> Result<FieldMeasurement> {
        let p = &self.params;
        let est = analyze_segment(
            waveform.slice(segment),
            waveform.sample_rate(),
            p.target_freq,
            p.bandwidth,
        )?;
        let snr = est.snr();
        let field = estimate_field(snr, p.bandwidth, p.current, p.scaling_factor)?;
        log::trace!(
            "segment {}: bin {} ({:.3} Hz), snr {snr:.4}",
            segment.index,
            est.signal_bin,
            est.signal_frequency()
        );
        Ok(FieldMeasurement {
            time_offset: plan.end_time(segment.index),
            field: field.field,
            sensitivity: field.sensitivity,
            snr,
        })
    }

    #[cfg(not(feature = "parallel"))]
    fn measure_all(&self, waveform: &Waveform, plan: &SegmentPlan) -> Result<Measured> {
        let outcomes = plan
            .segments()
            .map(|seg| (seg.index, self.measure(waveform, plan, &seg)));
        collect_in_order(plan, outcomes)
    }

    #[cfg(feature = "parallel")]
    fn measure_all(&self, waveform: &Waveform, plan: &SegmentPlan) -> Result<Measured> {
        let segments: Vec<Segment> = plan.segments().collect();
        let outcomes: Vec<(usize, Result<FieldMeasurement>)> = segments
            .par_iter()
            .map(|seg| (seg.index, self.measure(waveform, plan, seg)))
            .collect();
        collect_in_order(plan, outcomes)
    }
}

type Measured = (Vec<FieldMeasurement>, Vec<SkippedSegment>);

/// Split outcomes into measurements and skipped segments, in segment order,
/// stopping at the first structural error.
fn collect_in_order(
    plan: &SegmentPlan,
    outcomes: impl IntoIterator<Item = (usize, Result<FieldMeasurement>)>,
) -> Result<Measured> {
    let mut measurements = Vec::new();
    let mut skipped = Vec::new();
    for (index, outcome) in outcomes {
        match outcome {
            Ok(m) => measurements.push(m),
            Err(e) if !e.is_structural() => {
                log::warn!("skipping segment {index}: {e}");
                skipped.push(SkippedSegment {
                    index,
                    time_offset: plan.end_time(index),
                    reason: e.to_string(),
                });
            }
            Err(e) => return Err(e),
        }
    }
    Ok((measurements, skipped))
}
