use crate::error::{Error, Result};
use fieldscope_core::AnalysisParams;
use std::path::Path;

/// Parse analysis parameters from YAML. Missing keys take their defaults.
pub fn parse_params(text: &str) -> Result<AnalysisParams> {
    Ok(yaml_serde::from_str(text)?)
}

/// Load analysis parameters from a YAML file.
pub fn load_params(path: &Path) -> Result<AnalysisParams> {
    let text = std::fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let params = parse_params(&text)?;
    log::debug!("loaded parameters from {}: {params:?}", path.display());
    Ok(params)
}

/// YAML text for `params`, suitable as a starting parameter file.
pub fn params_to_yaml(params: &AnalysisParams) -> Result<String> {
    Ok(yaml_serde::to_string(params)?)
}
