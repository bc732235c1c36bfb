pub mod detector;
pub mod peak;
pub mod run;

pub use detector::{PeakCandidate, PeakDetector};
pub use peak::Peak;
pub use run::Run;
