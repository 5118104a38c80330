//! The operator-to-opcode table.
//!
//! Opcode strings are a wire contract with the runtime's instruction parser
//! and must match it byte for byte. The table is the single place where an
//! operator kind is granted (or denied) a scalar instruction form.

use crate::store::OperatorKind;

/// Runtime opcode for `kind`, or `None` for kinds that have no scalar
/// instruction form (`SubtractReversed`, `Over`).
pub const fn opcode(kind: OperatorKind) -> Option<&'static str> {
    match kind {
        OperatorKind::Add => Some("+"),
        OperatorKind::Subtract => Some("-"),
        OperatorKind::Multiply => Some("*"),
        OperatorKind::Divide => Some("/"),
        OperatorKind::Modulus => Some("%%"),
        OperatorKind::IntegerDivide => Some("%/%"),
        OperatorKind::Power => Some("^"),
        OperatorKind::LessThan => Some("<"),
        OperatorKind::LessOrEqual => Some("<="),
        OperatorKind::GreaterThan => Some(">"),
        OperatorKind::GreaterOrEqual => Some(">="),
        OperatorKind::Equal => Some("=="),
        OperatorKind::NotEqual => Some("!="),
        OperatorKind::And => Some("&&"),
        OperatorKind::Or => Some("||"),
        OperatorKind::Log => Some("log"),
        OperatorKind::Min => Some("min"),
        OperatorKind::Max => Some("max"),
        OperatorKind::Print => Some("print"),
        OperatorKind::InterQuartileRangeSize => Some("iqsize"),
        OperatorKind::SequenceIncrement => Some("seqincr"),
        OperatorKind::MatrixMultiply => Some("ba+*"),
        OperatorKind::SubtractReversed | OperatorKind::Over => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(OperatorKind::Add, "+")]
    #[case(OperatorKind::Subtract, "-")]
    #[case(OperatorKind::Multiply, "*")]
    #[case(OperatorKind::Divide, "/")]
    #[case(OperatorKind::Modulus, "%%")]
    #[case(OperatorKind::IntegerDivide, "%/%")]
    #[case(OperatorKind::Power, "^")]
    #[case(OperatorKind::LessThan, "<")]
    #[case(OperatorKind::LessOrEqual, "<=")]
    #[case(OperatorKind::GreaterThan, ">")]
    #[case(OperatorKind::GreaterOrEqual, ">=")]
    #[case(OperatorKind::Equal, "==")]
    #[case(OperatorKind::NotEqual, "!=")]
    #[case(OperatorKind::And, "&&")]
    #[case(OperatorKind::Or, "||")]
    #[case(OperatorKind::Log, "log")]
    #[case(OperatorKind::Min, "min")]
    #[case(OperatorKind::Max, "max")]
    #[case(OperatorKind::Print, "print")]
    #[case(OperatorKind::InterQuartileRangeSize, "iqsize")]
    #[case(OperatorKind::SequenceIncrement, "seqincr")]
    #[case(OperatorKind::MatrixMultiply, "ba+*")]
    fn test_table_matches_the_runtime_parser(#[case] kind: OperatorKind, #[case] expected: &str) {
        assert_eq!(opcode(kind), Some(expected));
    }

    #[rstest]
    #[case(OperatorKind::SubtractReversed)]
    #[case(OperatorKind::Over)]
    fn test_kinds_without_an_instruction_form(#[case] kind: OperatorKind) {
        assert_eq!(opcode(kind), None);
    }
}
