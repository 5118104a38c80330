//! Human-readable renderings of a plan.
pub mod trace;

pub use trace::format_plan;
