//! Loading of sensor recordings exported as CSV.
//!
//! Each file has a single header row; samples live in one column (the second
//! by default, after the time column). A recording can be split across
//! several files in one directory, read in file-name order.

use crate::error::{Error, Result};
use std::path::{Path, PathBuf};

/// Zero-based index of the sample column.
pub const DEFAULT_SAMPLE_COLUMN: usize = 1;

fn is_csv(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.ends_with(".csv"))
}

/// Read one column of a CSV file as `f64` samples, skipping the header row.
pub fn read_csv_column(path: &Path, column: usize) -> Result<Vec<f64>> {
    let csv_err = |source| Error::Csv { path: path.to_path_buf(), source };
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(csv_err)?;

    let mut samples = Vec::new();
    for record in reader.records() {
        let record = record.map_err(csv_err)?;
        let row = record.position().map_or(0, |p| p.line());
        let field = record.get(column).ok_or_else(|| Error::MissingColumn {
            path: path.to_path_buf(),
            row,
            column,
        })?;
        let value: f64 = field.parse().map_err(|_| Error::ParseSample {
            path: path.to_path_buf(),
            row,
            value: field.to_string(),
        })?;
        samples.push(value);
    }
    log::debug!("{}: {} samples", path.display(), samples.len());
    Ok(samples)
}

/// CSV files making up the recording at `path`, in read order.
pub fn recording_files(path: &Path) -> Result<Vec<PathBuf>> {
    let io_err = |source| Error::Io { path: path.to_path_buf(), source };
    if !path.is_dir() {
        if is_csv(path) {
            return Ok(vec![path.to_path_buf()]);
        }
        return Err(Error::NoCsvData(path.to_path_buf()));
    }

    let mut files = Vec::new();
    for entry in std::fs::read_dir(path).map_err(io_err)? {
        let entry_path = entry.map_err(io_err)?.path();
        if entry_path.is_file() && is_csv(&entry_path) {
            files.push(entry_path);
        }
    }
    files.sort();
    Ok(files)
}

/// Load and concatenate every CSV file of a recording.
///
/// A directory without CSV files yields an empty recording; the analysis
/// rejects it as insufficient data.
pub fn load_recording(path: &Path, column: usize) -> Result<Vec<f64>> {
    let files = recording_files(path)?;
    if files.is_empty() {
        log::warn!("{}: no CSV files", path.display());
    }
    let mut samples = Vec::new();
    for file in &files {
        samples.extend(read_csv_column(file, column)?);
    }
    Ok(samples)
}
