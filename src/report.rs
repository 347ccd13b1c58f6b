use crate::error::{Error, Result};
use chrono::{DateTime, Utc};
use fieldscope_core::{AnalysisParams, AnalysisResult, SkippedSegment};
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::Path;

/// Full-waveform spectrum for plotting, with the target marked.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpectrumSummary {
    pub frequencies: Vec<f64>,
    pub magnitudes: Vec<f64>,
    pub target_freq: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Field per segment (pT with the default scaling).
    pub magnetic_field_time_series: Vec<f64>,
    pub time_stamps: Vec<f64>,
    pub sensitivity_series: Vec<f64>,
    pub snr_series: Vec<f64>,
    /// Segments with no field value, and why.
    #[serde(default)]
    pub skipped_segments: Vec<SkippedSegment>,
    pub spectrum: SpectrumSummary,
    pub sample_rate: f64,
    pub params: AnalysisParams,
    pub timestamp: DateTime<Utc>,
}

impl AnalysisReport {
    pub fn new(result: AnalysisResult, params: AnalysisParams) -> Self {
        let ms = &result.measurements;
        Self {
            magnetic_field_time_series: ms.iter().map(|m| m.field).collect(),
            time_stamps: ms.iter().map(|m| m.time_offset).collect(),
            sensitivity_series: ms.iter().map(|m| m.sensitivity).collect(),
            snr_series: ms.iter().map(|m| m.snr).collect(),
            skipped_segments: result.skipped,
            spectrum: SpectrumSummary {
                frequencies: result.spectrum.frequencies,
                magnitudes: result.spectrum.magnitudes,
                target_freq: params.target_freq,
            },
            sample_rate: result.sample_rate,
            params,
            timestamp: Utc::now(),
        }
    }

    pub fn len(&self) -> usize {
        self.time_stamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time_stamps.is_empty()
    }

    /// `(time, field, sensitivity, snr)` per measured segment.
    pub fn rows(&self) -> impl Iterator<Item = (f64, f64, f64, f64)> + '_ {
        self.time_stamps
            .iter()
            .zip(&self.magnetic_field_time_series)
            .zip(&self.sensitivity_series)
            .zip(&self.snr_series)
            .map(|(((&t, &b), &s), &snr)| (t, b, s, snr))
    }

    /// Pretty-printed JSON.
    pub fn write_json<W: Write>(&self, writer: W) -> Result<()> {
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// One row per segment in time order: `time_s,b_signal_pt,sensitivity_pt,snr,skipped`.
    /// Skipped segments have empty values and the reason in the last column.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut rows: Vec<(f64, Option<f64>, Option<f64>, Option<f64>, &str)> = self
            .rows()
            .map(|(t, b, s, snr)| (t, Some(b), Some(s), Some(snr), ""))
            .chain(
                self.skipped_segments
                    .iter()
                    .map(|seg| (seg.time_offset, None, None, None, seg.reason.as_str())),
            )
            .collect();
        rows.sort_by(|a, b| a.0.total_cmp(&b.0));

        let mut wtr = csv::Writer::from_writer(writer);
        let csv_err = |source| Error::Csv { path: "<report>".into(), source };
        wtr.write_record(["time_s", "b_signal_pt", "sensitivity_pt", "snr", "skipped"])
            .map_err(csv_err)?;
        for row in rows {
            wtr.serialize(row).map_err(csv_err)?;
        }
        wtr.flush().map_err(|source| Error::Io { path: "<report>".into(), source })?;
        Ok(())
    }

    pub fn save_json(&self, path: &Path) -> Result<()> {
        self.write_json(create(path)?)
    }

    pub fn save_csv(&self, path: &Path) -> Result<()> {
        self.write_csv(create(path)?)
    }
}

fn create(path: &Path) -> Result<std::io::BufWriter<std::fs::File>> {
    let file = std::fs::File::create(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(std::io::BufWriter::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;
    use fieldscope_core::{FieldMeasurement, SkippedSegment, Spectrum};

    fn sample_report() -> AnalysisReport {
        let result = AnalysisResult {
            measurements: vec![
                FieldMeasurement { time_offset: 1.0, field: 1000.0, sensitivity: 20.0, snr: 35.0 },
                FieldMeasurement { time_offset: 2.0, field: 1000.0, sensitivity: 25.0, snr: 28.0 },
            ],
            skipped: vec![SkippedSegment {
                index: 2,
                time_offset: 3.0,
                reason: "SNR NaN cannot be calibrated into a field amplitude".into(),
            }],
            spectrum: Spectrum {
                frequencies: vec![0.0, 1.0, 2.0],
                magnitudes: vec![0.1, 0.9, 0.2],
            },
            sample_rate: 6.0,
        };
        AnalysisReport::new(result, AnalysisParams::default())
    }

    #[test]
    fn test_report_series_line_up() {
        let report = sample_report();
        assert_eq!(report.len(), 2);
        assert_eq!(report.time_stamps, vec![1.0, 2.0]);
        assert_eq!(report.sensitivity_series, vec![20.0, 25.0]);
        assert_eq!(report.spectrum.target_freq, 1028.0);
    }

    #[test]
    fn test_json_field_names() {
        let mut buf = Vec::new();
        sample_report().write_json(&mut buf).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(value["magnetic_field_time_series"][0], 1000.0);
        assert_eq!(value["time_stamps"][1], 2.0);
        assert_eq!(value["spectrum"]["magnitudes"][1], 0.9);
        assert_eq!(value["params"]["interval_secs"], 1.0);
        assert!(value["timestamp"].is_string());
    }

    #[test]
    fn test_skipped_segments_in_json() {
        let mut buf = Vec::new();
        sample_report().write_json(&mut buf).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(value["skipped_segments"][0]["index"], 2);
        assert_eq!(value["skipped_segments"][0]["time_offset"], 3.0);
        assert!(value["skipped_segments"][0]["reason"]
            .as_str()
            .unwrap()
            .contains("SNR"));
    }

    #[test]
    fn test_older_json_without_skipped_segments() {
        let mut value = serde_json::to_value(sample_report()).unwrap();
        value.as_object_mut().unwrap().remove("skipped_segments");
        let report: AnalysisReport = serde_json::from_value(value).unwrap();
        assert!(report.skipped_segments.is_empty());
        assert_eq!(report.len(), 2);
    }

    #[test]
    fn test_csv_rows() {
        let mut buf = Vec::new();
        sample_report().write_csv(&mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "time_s,b_signal_pt,sensitivity_pt,snr,skipped");
        assert_eq!(lines[1], "1.0,1000.0,20.0,35.0,");
        assert_eq!(lines[2], "2.0,1000.0,25.0,28.0,");
        assert_eq!(
            lines[3],
            "3.0,,,,SNR NaN cannot be calibrated into a field amplitude"
        );
        assert_eq!(lines.len(), 4);
    }

    #[test]
    fn test_skipped_rows_sorted_by_time() {
        let mut report = sample_report();
        report.skipped_segments[0].time_offset = 0.5;
        let mut buf = Vec::new();
        report.write_csv(&mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.lines().nth(1).unwrap().starts_with("0.5,,,,"));
    }

    #[test]
    fn test_mismatched_series_do_not_panic() {
        let mut value = serde_json::to_value(sample_report()).unwrap();
        value["snr_series"] = serde_json::json!([35.0]);
        value["skipped_segments"] = serde_json::json!([]);
        let report: AnalysisReport = serde_json::from_value(value).unwrap();

        assert_eq!(report.rows().count(), 1);
        let mut buf = Vec::new();
        report.write_csv(&mut buf).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap().lines().count(), 2);
    }
}
