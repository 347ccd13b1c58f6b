use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Analysis(#[from] fieldscope_core::Error),

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error in {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("{path}, row {row}: cannot parse {value:?} as a sample")]
    ParseSample {
        path: PathBuf,
        row: u64,
        value: String,
    },

    #[error("{path}, row {row}: missing column {column}")]
    MissingColumn { path: PathBuf, row: u64, column: usize },

    #[error("No CSV data found in {0}")]
    NoCsvData(PathBuf),

    #[error("Parameter file error: {0}")]
    Yaml(#[from] yaml_serde::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
