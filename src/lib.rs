#![forbid(unsafe_code)]
//! lalop: lowered-operator plans for a linear-algebra program compiler and
//! their textual instruction encoding.
//!
//! The crate sits between operator lowering and runtime execution:
//! - `store` owns the plan arena: typed nodes with fixed execution
//!   properties, CSR input edges, and per-node output back-references.
//! - `instr` turns operator nodes into the five-field instruction text the
//!   runtime parses (`env ° opcode ° input1 ° input2 ° output`).
//! - `analysis` orders plans producers-first and summarizes emitted listings.
//! - `display` renders a human-readable audit trace of a plan subtree.
//!
//! The layer computes nothing itself. Instructions name their operands
//! textually; evaluation belongs to an external runtime, and the names of
//! computed intermediates come from an [`OperandResolver`] owned by the
//! surrounding compiler driver.

pub mod analysis;
pub mod display;
pub mod error;
pub mod instr;
pub mod store;

pub use error::LopError;
pub use instr::{InstructionWriter, OperandResolver, OPERAND_DELIMITER};
pub use store::{LopId, LopPlan, OperatorKind};
