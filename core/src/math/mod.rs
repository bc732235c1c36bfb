pub mod integrate;
pub mod stats;

pub use integrate::{integrate, simpson, trapezoid, IntegrationMethod};
pub use stats::StatsHelper;
