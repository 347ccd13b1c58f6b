use crate::error::{Error, Result};
use crate::types::Segment;

/// Fixed-duration, non-overlapping partition of a waveform.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SegmentPlan {
    pub samples_per_interval: usize,
    /// Candidate count: `floor(total_duration / interval)`.
    pub num_intervals: usize,
    pub total_samples: usize,
    pub interval_secs: f64,
}

impl SegmentPlan {
    pub fn new(
        sample_rate: f64,
        total_samples: usize,
        total_duration_secs: f64,
        interval_secs: f64,
    ) -> Result<Self> {
        let samples_per_interval = (sample_rate * interval_secs) as usize;
        if samples_per_interval == 0 {
            return Err(Error::DegenerateInterval {
                sample_rate,
                interval_secs,
            });
        }
        let num_intervals = (total_duration_secs / interval_secs) as usize;
        log::debug!(
            "{num_intervals} intervals of {samples_per_interval} samples over {total_samples} samples"
        );
        Ok(Self {
            samples_per_interval,
            num_intervals,
            total_samples,
            interval_secs,
        })
    }

    /// Segments in start order. Emission stops at the end of the data; ranges
    /// shorter than two samples are skipped since they cannot be transformed.
    pub fn segments(&self) -> impl Iterator<Item = Segment> + '_ {
        let (step, total) = (self.samples_per_interval, self.total_samples);
        (0..self.num_intervals)
            .map(move |index| {
                let start = index * step;
                let end = (start + step).min(total);
                Segment { index, start, end }
            })
            .take_while(move |seg| seg.start < total)
            .filter(|seg| {
                if seg.len() < 2 {
                    log::debug!("skipping segment {} with {} samples", seg.index, seg.len());
                    return false;
                }
                true
            })
    }

    /// Elapsed time at the end of the segment with this index.
    pub fn end_time(&self, index: usize) -> f64 {
        (index + 1) as f64 * self.interval_secs
    }
}
