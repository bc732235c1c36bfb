use crate::config::AnalysisConfig;
use crate::math::integrate::IntegrationMethod;
use crate::prelude::{ChromaResult, DetectionParameters};
use crate::processing::detector::PeakDetector;
use crate::processing::peak::Peak;
use crate::report::RunReport;
use crate::source::file::ChromatogramFile;
use crate::source::metadata::Metadata;
use crate::source::signal::SignalSource;
use crate::telemetry::log::LogManager;
use ndarray::{ArrayView1, CowArray, Ix1};
use std::path::Path;

/// One chromatography run: its signal, its metadata and the peaks found by
/// the most recent detection.
pub struct Run {
    signal: SignalSource,
    metadata: Metadata,
    integration: IntegrationMethod,
    detector: PeakDetector,
    peaks: Vec<Peak>,
    parameters: Option<DetectionParameters>,
    logger: LogManager,
}

impl Run {
    pub fn new(signal: SignalSource) -> Self {
        Self::from_file(ChromatogramFile {
            metadata: Metadata::default(),
            signal,
        })
    }

    pub fn from_file(file: ChromatogramFile) -> Self {
        Self {
            signal: file.signal,
            metadata: file.metadata,
            integration: IntegrationMethod::default(),
            detector: PeakDetector::new(),
            peaks: Vec::new(),
            parameters: None,
            logger: LogManager::new("chromacore::run"),
        }
    }

    /// Read an instrument export. A missing or unreadable file is an error;
    /// no half-built run is ever returned.
    pub fn open<P: AsRef<Path>>(path: P) -> ChromaResult<Self> {
        let path_ref = path.as_ref();
        let run = Self::from_file(ChromatogramFile::read(path_ref)?);
        run.logger.record(&format!(
            "opened {} with {} samples",
            path_ref.display(),
            run.signal.len()
        ));
        Ok(run)
    }

    pub fn with_integration(mut self, method: IntegrationMethod) -> Self {
        self.integration = method;
        self
    }

    pub fn integration(&self) -> IntegrationMethod {
        self.integration
    }

    pub fn signal(&self) -> &SignalSource {
        &self.signal
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    pub fn times(&self) -> ArrayView1<'_, f64> {
        self.signal.times()
    }

    pub fn values(&self, normalized: bool) -> CowArray<'_, f64, Ix1> {
        self.signal.values(normalized)
    }

    /// Apply a loaded configuration: its integration rule and its detection
    /// parameters. The rule is only adopted when detection succeeds.
    pub fn analyze(&mut self, config: &AnalysisConfig) -> ChromaResult<&[Peak]> {
        self.detect_with(&config.detection, config.integration)
    }

    /// Detect and integrate peaks, replacing the previous list.
    ///
    /// The new list is built completely before it replaces the old one; on
    /// error the previous peaks are kept.
    pub fn detect_peaks(&mut self, params: &DetectionParameters) -> ChromaResult<&[Peak]> {
        self.detect_with(params, self.integration)
    }

    fn detect_with(
        &mut self,
        params: &DetectionParameters,
        method: IntegrationMethod,
    ) -> ChromaResult<&[Peak]> {
        let times = self.signal.times();
        let values = self.signal.values(params.normalize);

        let candidates = self.detector.detect(values.view(), params)?;
        let peaks = candidates
            .iter()
            .map(|candidate| {
                Peak::new(
                    candidate.apex_index,
                    candidate.left_boundary_index,
                    candidate.right_boundary_index,
                    times,
                    values.view(),
                    method,
                )
            })
            .collect::<ChromaResult<Vec<_>>>()?;

        self.peaks = peaks;
        self.parameters = Some(params.clone());
        self.integration = method;
        self.logger.record(&format!(
            "detected {} peaks, total elution volume {:.4} ({})",
            self.peaks.len(),
            self.total_elution_volume(),
            self.integration
        ));
        Ok(&self.peaks)
    }

    /// Peaks from the latest detection, in time order.
    pub fn peaks(&self) -> &[Peak] {
        &self.peaks
    }

    /// Parameters of the latest successful detection.
    pub fn parameters(&self) -> Option<&DetectionParameters> {
        self.parameters.as_ref()
    }

    pub fn elution_volumes(&self) -> Vec<f64> {
        self.peaks.iter().map(Peak::area).collect()
    }

    /// Sum of all peak areas; 0.0 before any detection.
    pub fn total_elution_volume(&self) -> f64 {
        self.peaks.iter().map(Peak::area).sum()
    }

    /// Snapshot for a plotting collaborator, on the same series the current
    /// peaks were detected on.
    pub fn report(&self) -> RunReport {
        let normalized = self.parameters.as_ref().is_some_and(|p| p.normalize);
        RunReport {
            times: self.signal.times().to_vec(),
            values: self.signal.values(normalized).to_vec(),
            normalized,
            peaks: self.peaks.clone(),
            total_elution_volume: self.total_elution_volume(),
        }
    }
}
