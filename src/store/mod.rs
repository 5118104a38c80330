//! Defines the lowered-operator plan and its node-level data.
pub mod props;
pub mod registry;
pub mod types;

// Re-export key types for convenient access
pub use props::{ExecEnv, ExecLocation, JobFlags, JobSet, JobType, LopProperties};
pub use registry::LopPlan;
pub use types::{
    DataType, LiteralValue, LopId, LopKind, LopMetadata, OperatorKind, SourceLocation, ValueType,
};
