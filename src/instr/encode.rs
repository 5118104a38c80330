//! Five-field instruction assembly and the whole-plan lowering walk.
//!
//! An instruction names its operands textually; this module never touches
//! runtime values. Operand names for computed intermediates come from an
//! [`OperandResolver`] owned by the surrounding compiler driver.

use std::collections::HashMap;

use crate::analysis::topology;
use crate::error::LopError;
use crate::store::{ExecEnv, LopId, LopKind, LopPlan, OperatorKind};

use super::opcode::opcode;
use super::OPERAND_DELIMITER;

/// Assembles the instruction text for one operator application.
///
/// Emits `tag ° opcode ° input1 ° input2 ° output`. Operands are joined
/// verbatim in argument order; nothing is reordered or normalized, so two
/// calls with the same arguments produce byte-identical text. Operands that
/// carry the field delimiter are rejected, never escaped.
pub fn encode(
    kind: OperatorKind,
    env: ExecEnv,
    input1: &str,
    input2: &str,
    output: &str,
) -> Result<String, LopError> {
    let op = opcode(kind).ok_or(LopError::UnsupportedOperation { kind })?;

    for operand in [input1, input2, output] {
        if operand.contains(OPERAND_DELIMITER) {
            return Err(LopError::OperandContainsDelimiter {
                text: operand.to_string(),
            });
        }
    }

    let tag = env.tag();
    let mut text = String::with_capacity(
        tag.len() + op.len() + input1.len() + input2.len() + output.len() + 8,
    );
    text.push_str(tag);
    text.push(OPERAND_DELIMITER);
    text.push_str(op);
    text.push(OPERAND_DELIMITER);
    text.push_str(input1);
    text.push(OPERAND_DELIMITER);
    text.push_str(input2);
    text.push(OPERAND_DELIMITER);
    text.push_str(output);
    Ok(text)
}

/// Supplies operand names for computed intermediates.
///
/// The writer asks for a name whenever an operand or the output slot refers
/// to an operator node's result. Failures pass through the lowering walk
/// unchanged.
pub trait OperandResolver {
    fn resolve(&self, id: LopId, env: ExecEnv) -> Result<String, LopError>;
}

impl OperandResolver for HashMap<LopId, String> {
    fn resolve(&self, id: LopId, _env: ExecEnv) -> Result<String, LopError> {
        self.get(&id)
            .cloned()
            .ok_or(LopError::UnresolvedOperand { id })
    }
}

/// Lowers plan nodes into the textual instruction stream.
pub struct InstructionWriter<'a> {
    plan: &'a LopPlan,
}

impl<'a> InstructionWriter<'a> {
    pub fn new(plan: &'a LopPlan) -> Self {
        Self { plan }
    }

    /// Operand text for `id` as seen by a consumer running in `env`.
    ///
    /// Literals render themselves and variables contribute their name; only
    /// computed results go through the resolver.
    fn operand<R: OperandResolver>(
        &self,
        id: LopId,
        env: ExecEnv,
        resolver: &R,
    ) -> Result<String, LopError> {
        match self.plan.kind(id) {
            LopKind::Literal(value) => value.render(),
            LopKind::Variable(name) => {
                if name.contains(OPERAND_DELIMITER) {
                    return Err(LopError::OperandContainsDelimiter { text: name.clone() });
                }
                Ok(name.clone())
            }
            LopKind::Operator(_) => resolver.resolve(id, env),
        }
    }

    /// Encodes the instruction for one node.
    ///
    /// Data leaves produce no instruction of their own; they surface as
    /// operands of their consumers, so they map to `Ok(None)`. Encoding
    /// failures come back wrapped with the node's id and advisory name.
    pub fn instruction<R: OperandResolver>(
        &self,
        id: LopId,
        resolver: &R,
    ) -> Result<Option<String>, LopError> {
        let kind = match self.plan.kind(id) {
            LopKind::Operator(kind) => *kind,
            LopKind::Literal(_) | LopKind::Variable(_) => return Ok(None),
        };
        let env = self.plan.properties(id).env;

        // Constructors guarantee two inputs per operator; a plan mutated
        // behind their back still must not panic the walk.
        let (lhs, rhs) = match self.plan.inputs(id) {
            [lhs, rhs] => (*lhs, *rhs),
            other => {
                return Err(LopError::ArityMismatch {
                    kind,
                    expected: kind.arity(),
                    actual: other.len(),
                })
            }
        };

        let input1 = self.operand(lhs, env, resolver)?;
        let input2 = self.operand(rhs, env, resolver)?;
        let output = resolver.resolve(id, env)?;

        match encode(kind, env, &input1, &input2, &output) {
            Ok(text) => {
                #[cfg(feature = "tracing")]
                tracing::trace!(node = %id, op = opcode(kind).unwrap_or("?"), "encoded instruction");
                Ok(Some(text))
            }
            Err(source) => Err(LopError::AtNode {
                id,
                name: self.plan.metadata(id).name.clone(),
                source: Box::new(source),
            }),
        }
    }

    /// Encodes `order` into an instruction listing, skipping data leaves.
    ///
    /// Ordering is the caller's obligation; pass a producers-first order or
    /// the runtime will read operand slots before they are written. Any
    /// failure discards the whole listing.
    pub fn lower<R: OperandResolver>(
        &self,
        order: &[LopId],
        resolver: &R,
    ) -> Result<Vec<String>, LopError> {
        let mut listing = Vec::with_capacity(order.len());
        for &id in order {
            if let Some(text) = self.instruction(id, resolver)? {
                listing.push(text);
            }
        }
        Ok(listing)
    }

    /// Encodes the whole plan in dependency order.
    pub fn lower_topological<R: OperandResolver>(
        &self,
        resolver: &R,
    ) -> Result<Vec<String>, LopError> {
        let order = topology::sort(self.plan)?;
        self.lower(&order, resolver)
    }
}
