use crate::instr::OPERAND_DELIMITER;
use std::collections::HashMap;

/// Shape summary of an encoded instruction listing.
///
/// Works on the emitted text rather than the plan so it can double as a
/// read-back check: a well-formed listing has zero malformed lines and its
/// opcode total equals the instruction total.
#[derive(Debug, Clone, Default)]
pub struct LoweringReport {
    pub total_instructions: usize,
    /// Occurrences per opcode token (field 2 of the wire format).
    pub opcode_counts: HashMap<String, usize>,
    /// Occurrences per environment tag (field 1 of the wire format).
    pub env_counts: HashMap<String, usize>,
    /// Lines that do not split into exactly five fields.
    pub malformed: usize,
}

impl LoweringReport {
    pub fn analyze(listing: &[String]) -> Self {
        let mut opcode_counts = HashMap::new();
        let mut env_counts = HashMap::new();
        let mut malformed = 0;

        for line in listing {
            let mut fields = line.split(OPERAND_DELIMITER);
            let env = fields.next();
            let op = fields.next();
            // env ° op ° in1 ° in2 ° out: three operand fields must remain.
            match (env, op, fields.count()) {
                (Some(env), Some(op), 3) => {
                    *env_counts.entry(env.to_string()).or_insert(0) += 1;
                    *opcode_counts.entry(op.to_string()).or_insert(0) += 1;
                }
                _ => malformed += 1,
            }
        }

        Self {
            total_instructions: listing.len(),
            opcode_counts,
            env_counts,
            malformed,
        }
    }

    pub fn count_of(&self, op: &str) -> usize {
        self.opcode_counts.get(op).copied().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing(lines: &[&str]) -> Vec<String> {
        lines.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_counts_opcodes_and_env_tags() {
        let report = LoweringReport::analyze(&listing(&[
            "CP\u{00B0}+\u{00B0}i\u{00B0}1\u{00B0}_t0",
            "CP\u{00B0}*\u{00B0}_t0\u{00B0}2\u{00B0}_t1",
            "CP\u{00B0}+\u{00B0}_t1\u{00B0}1\u{00B0}_t2",
        ]));

        assert_eq!(report.total_instructions, 3);
        assert_eq!(report.malformed, 0);
        assert_eq!(report.count_of("+"), 2);
        assert_eq!(report.count_of("*"), 1);
        assert_eq!(report.count_of("ba+*"), 0);
        assert_eq!(report.env_counts.get("CP"), Some(&3));
    }

    #[test]
    fn test_short_and_long_lines_count_as_malformed() {
        let report = LoweringReport::analyze(&listing(&[
            "CP\u{00B0}+\u{00B0}a\u{00B0}b\u{00B0}c",
            "CP\u{00B0}+\u{00B0}a\u{00B0}b",
            "CP\u{00B0}+\u{00B0}a\u{00B0}b\u{00B0}c\u{00B0}d",
            "garbage",
        ]));

        assert_eq!(report.total_instructions, 4);
        assert_eq!(report.malformed, 3);
        assert_eq!(report.count_of("+"), 1);
    }

    #[test]
    fn test_empty_listing_is_a_clean_report() {
        let report = LoweringReport::analyze(&[]);
        assert_eq!(report.total_instructions, 0);
        assert_eq!(report.malformed, 0);
        assert!(report.opcode_counts.is_empty());
    }
}
