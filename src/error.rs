//! Error taxonomy of the lowering layer.
//!
//! Every condition here is a contract violation between compiler stages, not
//! a user input error: callers abort the current program unit and discard any
//! partial instruction stream.

use crate::store::{LopId, OperatorKind};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LopError {
    /// The operator kind has no opcode in the canonical table. Never
    /// defaulted; the offending kind is named so the construct can be traced
    /// back to the source program.
    #[error("no instruction defined for scalar operator {kind:?}")]
    UnsupportedOperation { kind: OperatorKind },

    /// A node was supplied the wrong number of inputs for its kind. Raised at
    /// construction time; indicates a bug in the upstream plan builder.
    #[error("operator {kind:?} takes exactly {expected} inputs, got {actual}")]
    ArityMismatch {
        kind: OperatorKind,
        expected: usize,
        actual: usize,
    },

    /// A construction call referenced a node id outside the plan arena.
    #[error("input {input} is not a node of this plan ({node_count} nodes)")]
    UnknownInput { input: LopId, node_count: usize },

    /// The plan is not acyclic. Like [`LopError::ArityMismatch`], this can
    /// only come from a broken upstream builder.
    #[error("cycle detected in operator plan involving node {involving}")]
    CyclicPlan { involving: LopId },

    /// The operand-preparation collaborator had no name for a computed node.
    #[error("no operand name resolved for node {id}")]
    UnresolvedOperand { id: LopId },

    /// An operand rendering would embed the reserved field delimiter, which
    /// the wire format forbids in every field.
    #[error("operand '{text}' contains the reserved operand delimiter")]
    OperandContainsDelimiter { text: String },

    /// Node context wrapped around an encoding failure by the plan walk.
    #[error("lowering failed at node {id} ('{name}'): {source}")]
    AtNode {
        id: LopId,
        name: String,
        source: Box<LopError>,
    },
}
