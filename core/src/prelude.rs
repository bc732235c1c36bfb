use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Peak-finding parameters for a single detection call.
///
/// The threshold is a topographic prominence: a candidate survives when its
/// apex stands at least `prominence` above the higher of its two valley
/// floors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionParameters {
    /// Shift the series so its minimum is 0.0 before detection and integration.
    pub normalize: bool,
    pub prominence: f64,
    /// Minimum number of samples between two retained apexes.
    pub distance: usize,
    /// Bounds on `right_boundary_index - left_boundary_index`, in samples.
    pub min_width: usize,
    pub max_width: usize,
    /// Fraction of the prominence, measured down from the apex, at which the
    /// boundaries are placed.
    pub relative_height: f64,
}

impl Default for DetectionParameters {
    fn default() -> Self {
        Self {
            normalize: false,
            prominence: 0.15,
            distance: 75,
            min_width: 10,
            max_width: 1000,
            relative_height: 0.95,
        }
    }
}

impl DetectionParameters {
    pub fn validate(&self) -> ChromaResult<()> {
        if self.distance == 0 {
            return Err(ChromaError::InvalidParameters(
                "distance must be at least 1".into(),
            ));
        }
        if self.max_width < self.min_width {
            return Err(ChromaError::InvalidParameters(format!(
                "max_width {} is smaller than min_width {}",
                self.max_width, self.min_width
            )));
        }
        if !(0.0..=1.0).contains(&self.relative_height) {
            return Err(ChromaError::InvalidParameters(format!(
                "relative_height {} is outside [0, 1]",
                self.relative_height
            )));
        }
        if !self.prominence.is_finite() || self.prominence < 0.0 {
            return Err(ChromaError::InvalidParameters(format!(
                "prominence {} must be a non-negative number",
                self.prominence
            )));
        }
        Ok(())
    }
}

/// Common error type for loading and analysing a run.
#[derive(thiserror::Error, Debug)]
pub enum ChromaError {
    #[error("reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid detection parameters: {0}")]
    InvalidParameters(String),
    #[error("unsupported integration method: {0}")]
    UnsupportedIntegration(String),
    #[error("invalid peak: {0}")]
    InvalidPeak(String),
    #[error("configuration error: {0}")]
    Config(String),
    #[error("serializing report: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type ChromaResult<T> = Result<T, ChromaError>;
