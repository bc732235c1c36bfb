//! Peak detection and elution-volume quantification for chromatography runs.
//!
//! An instrument export is read into a [`SignalSource`], peaks are found on
//! its value column by [`PeakDetector`], and each bounded peak is integrated
//! into an elution volume. [`Run`] ties the three together.

pub mod config;
pub mod math;
pub mod prelude;
pub mod processing;
pub mod report;
pub mod source;
pub mod telemetry;

pub use config::AnalysisConfig;
pub use math::IntegrationMethod;
pub use prelude::{ChromaError, ChromaResult, DetectionParameters};
pub use processing::{Peak, PeakCandidate, PeakDetector, Run};
pub use report::RunReport;
pub use source::{ChromatogramFile, Metadata, SignalSource};
