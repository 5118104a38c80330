//! Turns plan nodes into runtime instruction text.
pub mod encode;
pub mod opcode;

// Re-export key types for convenient access
pub use encode::{encode, InstructionWriter, OperandResolver};
pub use opcode::opcode;

/// Field separator in the instruction wire format.
///
/// A single instruction is `env ° opcode ° operand1 ° operand2 ° output`
/// with this character between fields. The runtime splits on it verbatim,
/// so it must never appear inside an operand; [`encode()`] rejects any that
/// carry it rather than escaping.
pub const OPERAND_DELIMITER: char = '\u{00B0}';
