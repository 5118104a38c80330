//! Inspects plans and their lowered output.
pub mod stats;
pub mod topology;

pub use stats::LoweringReport;
