use fieldscope::analysis::Error as AnalysisError;
use fieldscope::{analyze_recordings, AnalysisParams, Error};
use std::f64::consts::PI;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

fn write_recording(path: &Path, samples: impl IntoIterator<Item = f64>, sample_rate: f64) {
    let mut text = String::from("time,value\n");
    for (i, s) in samples.into_iter().enumerate() {
        writeln!(text, "{},{}", i as f64 / sample_rate, s).unwrap();
    }
    fs::write(path, text).unwrap();
}

fn tone(freq: f64, amplitude: f64, sample_rate: f64, range: std::ops::Range<usize>) -> Vec<f64> {
    range
        .map(|i| amplitude * (2.0 * PI * freq * i as f64 / sample_rate).sin())
        .collect()
}

fn params() -> AnalysisParams {
    AnalysisParams {
        target_freq: 40.0,
        bandwidth: 2.0,
        current: 1.0,
        scaling_factor: 1000.0,
        total_duration_secs: 5.0,
        interval_secs: 1.0,
    }
}

#[test]
fn test_split_recording_matches_single_file() {
    let dir = tempfile::tempdir().unwrap();
    let rate = 200.0;

    // Signal split over two files in a directory, noise in one file
    let sig_dir = dir.path().join("signal");
    fs::create_dir(&sig_dir).unwrap();
    write_recording(&sig_dir.join("part0.csv"), tone(40.0, 1.0, rate, 0..600), rate);
    write_recording(&sig_dir.join("part1.csv"), tone(40.0, 1.0, rate, 600..1000), rate);
    let noise_path = dir.path().join("noise.csv");
    // a few extra noise samples get truncated away
    write_recording(&noise_path, tone(71.0, 0.3, rate, 0..1010), rate);

    let report = analyze_recordings(&sig_dir, &noise_path, 1, params()).unwrap();
    assert_eq!(report.sample_rate, 200.0);
    assert_eq!(report.time_stamps, vec![1.0, 2.0, 3.0, 4.0, 5.0]);
    assert_eq!(report.spectrum.frequencies.len(), 500);
    for (&b, &snr) in report.magnetic_field_time_series.iter().zip(&report.snr_series) {
        assert!((b - 1000.0).abs() < 1e-9);
        assert!(snr > 10.0, "snr {snr}");
    }

    let single = dir.path().join("signal.csv");
    write_recording(&single, tone(40.0, 1.0, rate, 0..1000), rate);
    let again = analyze_recordings(&single, &noise_path, 1, params()).unwrap();
    assert_eq!(again.snr_series.len(), report.snr_series.len());
    for (a, b) in again.snr_series.iter().zip(&report.snr_series) {
        assert!((a - b).abs() <= 1e-9 * a.abs(), "{a} vs {b}");
    }
}

#[test]
fn test_empty_noise_directory() {
    let dir = tempfile::tempdir().unwrap();
    let signal = dir.path().join("signal.csv");
    write_recording(&signal, tone(40.0, 1.0, 200.0, 0..1000), 200.0);
    let noise_dir = dir.path().join("noise");
    fs::create_dir(&noise_dir).unwrap();

    let err = analyze_recordings(&signal, &noise_dir, 1, params()).unwrap_err();
    assert!(matches!(
        err,
        Error::Analysis(AnalysisError::InsufficientData { which: "noise" })
    ));
}

#[test]
fn test_reports_written_to_disk() {
    let dir = tempfile::tempdir().unwrap();
    let signal = dir.path().join("signal.csv");
    let noise = dir.path().join("noise.csv");
    write_recording(&signal, tone(40.0, 1.0, 200.0, 0..1000), 200.0);
    write_recording(&noise, tone(13.0, 0.1, 200.0, 0..1000), 200.0);

    let report = analyze_recordings(&signal, &noise, 1, params()).unwrap();
    let json_path = dir.path().join("out.json");
    let csv_path = dir.path().join("out.csv");
    report.save_json(&json_path).unwrap();
    report.save_csv(&csv_path).unwrap();

    let text = fs::read_to_string(&json_path).unwrap();
    let parsed: fieldscope::AnalysisReport = serde_json::from_str(&text).unwrap();
    assert_eq!(parsed.time_stamps, report.time_stamps);
    assert_eq!(fs::read_to_string(&csv_path).unwrap().lines().count(), 6);
}

#[test]
fn test_silent_segments_listed_in_report() {
    let dir = tempfile::tempdir().unwrap();
    let rate = 100.0;
    let signal = dir.path().join("signal.csv");
    let noise = dir.path().join("noise.csv");
    let mut samples = vec![0.0; 500];
    samples.extend(tone(40.0, 1.0, rate, 500..1000));
    write_recording(&signal, samples, rate);
    write_recording(&noise, vec![0.0; 1000], rate);

    let params = AnalysisParams {
        total_duration_secs: 10.0,
        ..params()
    };
    let report = analyze_recordings(&signal, &noise, 1, params).unwrap();
    assert_eq!(report.len() + report.skipped_segments.len(), 10);
    let times: Vec<f64> = report.skipped_segments.iter().map(|s| s.time_offset).collect();
    assert_eq!(times, vec![1.0, 2.0, 3.0, 4.0, 5.0]);

    let csv_path = dir.path().join("out.csv");
    report.save_csv(&csv_path).unwrap();
    let text = fs::read_to_string(&csv_path).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 11);
    assert!(lines[1].starts_with("1.0,,,,"), "{}", lines[1]);
    assert!(lines[6].starts_with("6.0,"), "{}", lines[6]);
}
