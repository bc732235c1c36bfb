use crate::math::integrate::IntegrationMethod;
use crate::prelude::{ChromaError, ChromaResult, DetectionParameters};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Detection and integration settings, loadable from YAML:
///
/// ```yaml
/// detection:
///   normalize: true
///   prominence: 0.15
///   distance: 75
///   min_width: 10
///   max_width: 1000
///   relative_height: 0.95
/// integration: simpson
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub detection: DetectionParameters,
    pub integration: IntegrationMethod,
}

impl AnalysisConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> ChromaResult<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref).map_err(|source| ChromaError::Io {
            path: path_ref.to_path_buf(),
            source,
        })?;
        Self::parse(&contents, &path_ref.display().to_string())
    }

    /// Parse and validate; unknown integration names and out-of-range
    /// parameters are rejected here rather than at detection time.
    pub fn from_yaml_str(contents: &str) -> ChromaResult<Self> {
        Self::parse(contents, "inline config")
    }

    fn parse(contents: &str, origin: &str) -> ChromaResult<Self> {
        let config: AnalysisConfig = serde_yaml::from_str(contents)
            .map_err(|err| ChromaError::Config(format!("parsing {}: {}", origin, err)))?;
        config.detection.validate()?;
        Ok(config)
    }
}
