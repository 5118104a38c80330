use crate::error::LopError;
use crate::instr::OPERAND_DELIMITER;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identifier of a node inside one [`LopPlan`](super::LopPlan) arena.
///
/// Ids are dense arena indices; they are never reused and never valid across
/// plans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct LopId(pub u32);

impl LopId {
    #[inline(always)]
    pub fn index(&self) -> usize {
        self.0 as usize
    }

    pub fn new(idx: usize) -> Self {
        Self(idx as u32)
    }
}

impl fmt::Display for LopId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The closed set of primitive scalar operations this layer can lower.
///
/// `SubtractReversed` and `Over` are declared kinds without an opcode: they
/// can be built into a plan, but encoding them surfaces
/// [`LopError::UnsupportedOperation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OperatorKind {
    // Arithmetic
    Add,
    Subtract,
    SubtractReversed,
    Multiply,
    Divide,
    Modulus,
    IntegerDivide,
    Power,
    // Relational
    LessThan,
    LessOrEqual,
    GreaterThan,
    GreaterOrEqual,
    Equal,
    NotEqual,
    // Boolean
    And,
    Or,
    // Builtin functions
    Log,
    Max,
    Min,
    Print,
    InterQuartileRangeSize,
    Over,
    SequenceIncrement,
    // Structural
    MatrixMultiply,
}

impl OperatorKind {
    /// Number of inputs the kind demands. Every operator covered by this
    /// layer is binary.
    pub const fn arity(&self) -> usize {
        2
    }
}

/// Declared shape class of a node's result. Recorded verbatim from the
/// upstream plan builder; this layer performs no inference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataType {
    Matrix,
    Scalar,
    Unknown,
}

/// Declared value type of a node's result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueType {
    Int,
    Double,
    Boolean,
    String,
    Unknown,
}

/// A compile-time-known scalar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LiteralValue {
    Int(i64),
    Double(f64),
    Boolean(bool),
    String(String),
}

impl LiteralValue {
    pub fn value_type(&self) -> ValueType {
        match self {
            LiteralValue::Int(_) => ValueType::Int,
            LiteralValue::Double(_) => ValueType::Double,
            LiteralValue::Boolean(_) => ValueType::Boolean,
            LiteralValue::String(_) => ValueType::String,
        }
    }

    /// Textual operand form of the literal.
    ///
    /// The rendering must be delimiter-free; only `String` literals can
    /// violate that, and they are rejected rather than escaped.
    pub fn render(&self) -> Result<String, LopError> {
        match self {
            LiteralValue::Int(v) => Ok(v.to_string()),
            LiteralValue::Double(v) => Ok(v.to_string()),
            LiteralValue::Boolean(v) => Ok(v.to_string()),
            LiteralValue::String(s) => {
                if s.contains(OPERAND_DELIMITER) {
                    return Err(LopError::OperandContainsDelimiter { text: s.clone() });
                }
                Ok(s.clone())
            }
        }
    }
}

/// What a node in the plan arena is.
///
/// Leaves (`Literal`, `Variable`) take zero inputs and serve as operands of
/// the five-field instruction format; `Operator` nodes take exactly two.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LopKind {
    /// Compile-time-known scalar; renders itself as an operand.
    Literal(LiteralValue),
    /// Named read of a program variable resolved by the runtime.
    Variable(String),
    /// Binary scalar operator.
    Operator(OperatorKind),
}

/// Position of the originating construct in the source program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SourceLocation {
    pub line: u32,
    pub column: u32,
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Advisory provenance carried for diagnostics and the audit trace. Assigned
/// by the upstream plan builder and never interpreted here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LopMetadata {
    pub name: String,
    pub location: Option<SourceLocation>,
}

impl LopMetadata {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            location: None,
        }
    }
}
