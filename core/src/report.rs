use crate::prelude::ChromaResult;
use crate::processing::peak::Peak;
use serde::Serialize;

/// Read-only snapshot of a run for plotting: the series the peaks were
/// detected on and the resolved peaks.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RunReport {
    pub times: Vec<f64>,
    pub values: Vec<f64>,
    pub normalized: bool,
    pub peaks: Vec<Peak>,
    pub total_elution_volume: f64,
}

impl RunReport {
    pub fn to_json(&self) -> ChromaResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prelude::ChromaError;

    #[test]
    fn empty_report_serializes() {
        let json = RunReport::default().to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["peaks"], serde_json::json!([]));
        assert_eq!(value["total_elution_volume"], 0.0);
    }

    #[test]
    fn serializer_failures_share_the_crate_error() {
        // JSON object keys must be strings
        let keyed = std::collections::BTreeMap::from([(vec![1, 2], 1)]);
        let err = ChromaError::from(serde_json::to_string(&keyed).unwrap_err());
        assert!(matches!(err, ChromaError::Serialization(_)));
        assert!(err.to_string().starts_with("serializing report"));
    }
}
