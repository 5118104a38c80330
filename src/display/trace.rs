use crate::instr::opcode;
use crate::store::{LiteralValue, LopId, LopKind, LopPlan, OperatorKind};
use std::collections::HashMap;
use std::fmt::Write;

/// Renders an indented audit trace of the plan subtree feeding `target`.
///
/// Each node appears once, at the first level it is reached; later
/// occurrences print a back-reference to that level instead of repeating
/// the subtree.
pub fn format_plan(plan: &LopPlan, target: LopId) -> String {
    let mut tracer = Tracer {
        plan,
        visited_at_level: HashMap::new(),
        output: String::new(),
    };

    if target.index() < plan.count() {
        let header = tracer.label(target);
        let _ = writeln!(tracer.output, "AUDIT TRACE for node '{}':", header);
        let _ = writeln!(
            tracer.output,
            "--------------------------------------------------"
        );
        tracer.trace_node(target, 1, "");
    } else {
        let _ = writeln!(tracer.output, "Error: Invalid Node ID {:?}", target);
    }
    tracer.output
}

struct Tracer<'a> {
    plan: &'a LopPlan,
    visited_at_level: HashMap<LopId, usize>,
    output: String,
}

impl<'a> Tracer<'a> {
    fn trace_node(&mut self, node_id: LopId, level: usize, prefix: &str) {
        if let Some(&first_seen) = self.visited_at_level.get(&node_id) {
            let _ = writeln!(self.output, "{}-> (Ref to L{})", prefix, first_seen);
            return;
        }
        self.visited_at_level.insert(node_id, level);

        let line_header = format!("[L{}] {}", level, self.label(node_id));

        match self.plan.kind(node_id) {
            LopKind::Literal(value) => {
                let _ = writeln!(
                    self.output,
                    "{}{} -> Literal({})",
                    prefix,
                    line_header,
                    literal_text(value)
                );
            }
            LopKind::Variable(name) => {
                let _ = writeln!(self.output, "{}{} -> Var({})", prefix, line_header, name);
            }
            LopKind::Operator(op) => {
                let inputs = self.plan.inputs(node_id);
                let formula = self.format_operator(*op, inputs);
                let _ = writeln!(self.output, "{}{} = {}", prefix, line_header, formula);
                self.recurse_inputs(prefix, inputs, level);
            }
        }
    }

    fn recurse_inputs(&mut self, prefix: &str, inputs: &[LopId], level: usize) {
        let stem = build_child_stem(prefix);
        for (i, &input) in inputs.iter().enumerate() {
            let connector = if i == inputs.len() - 1 { "`--" } else { "|--" };
            let full_prefix = format!("{}{}", stem, connector);
            self.trace_node(input, level + 1, &full_prefix);
        }
    }

    fn format_operator(&self, kind: OperatorKind, inputs: &[LopId]) -> String {
        let sym = opcode(kind).unwrap_or("?");
        if let [lhs, rhs] = inputs {
            let lhs = self.label(*lhs);
            let rhs = self.label(*rhs);
            // Word-like opcodes read as calls, symbolic ones as infix.
            if sym.chars().all(|c| c.is_ascii_alphanumeric()) {
                format!("{}({}, {})", sym, lhs, rhs)
            } else {
                format!("{} {} {}", lhs, sym, rhs)
            }
        } else {
            sym.to_string()
        }
    }

    fn label(&self, id: LopId) -> String {
        let name = &self.plan.meta[id.index()].name;
        let base = if name.is_empty() {
            format!("#{}", id)
        } else {
            name.clone()
        };
        match self.plan.kind(id) {
            LopKind::Literal(value) => format!("{}[{}]", base, literal_text(value)),
            _ => base,
        }
    }
}

fn literal_text(value: &LiteralValue) -> String {
    match value {
        LiteralValue::Int(v) => v.to_string(),
        LiteralValue::Double(v) => format!("{:.3}", v),
        LiteralValue::Boolean(v) => v.to_string(),
        LiteralValue::String(s) => format!("\"{}\"", s),
    }
}

fn build_child_stem(current_prefix: &str) -> String {
    current_prefix.replace("`--", "   ").replace("|--", "|  ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{DataType, LopMetadata, ValueType};

    fn meta(name: &str) -> LopMetadata {
        LopMetadata::named(name)
    }

    #[test]
    fn test_trace_walks_the_subtree_with_levels() {
        // (i + 1) * 2
        let mut plan = LopPlan::new();
        let i = plan.add_variable("i", ValueType::Int, meta("i"));
        let one = plan.add_literal(LiteralValue::Int(1), meta("one"));
        let sum = plan.add_binary(
            OperatorKind::Add,
            i,
            one,
            DataType::Scalar,
            ValueType::Int,
            meta("sum"),
        );
        let two = plan.add_literal(LiteralValue::Int(2), meta("two"));
        let scaled = plan.add_binary(
            OperatorKind::Multiply,
            sum,
            two,
            DataType::Scalar,
            ValueType::Int,
            meta("scaled"),
        );

        let trace = format_plan(&plan, scaled);
        assert!(trace.contains("AUDIT TRACE for node 'scaled':"));
        assert!(trace.contains("[L1] scaled = sum * two[2]"));
        assert!(trace.contains("[L2] sum = i + one[1]"));
        assert!(trace.contains("[L3] i -> Var(i)"));
        assert!(trace.contains("[L3] one[1] -> Literal(1)"));
        assert!(trace.contains("[L2] two[2] -> Literal(2)"));
    }

    #[test]
    fn test_shared_nodes_become_back_references() {
        // d = (a + a) - (a * a): `a` must print once and back-reference after.
        let mut plan = LopPlan::new();
        let a = plan.add_variable("a", ValueType::Double, meta("a"));
        let b = plan.add_binary(
            OperatorKind::Add,
            a,
            a,
            DataType::Scalar,
            ValueType::Double,
            meta("b"),
        );
        let c = plan.add_binary(
            OperatorKind::Multiply,
            a,
            a,
            DataType::Scalar,
            ValueType::Double,
            meta("c"),
        );
        let d = plan.add_binary(
            OperatorKind::Subtract,
            b,
            c,
            DataType::Scalar,
            ValueType::Double,
            meta("d"),
        );

        let trace = format_plan(&plan, d);
        assert_eq!(trace.matches("-> Var(a)").count(), 1);
        assert_eq!(trace.matches("-> (Ref to L3)").count(), 3);
    }

    #[test]
    fn test_function_style_opcodes_render_as_calls() {
        let mut plan = LopPlan::new();
        let x = plan.add_variable("x", ValueType::Double, meta("x"));
        let y = plan.add_variable("y", ValueType::Double, meta("y"));
        let top = plan.add_binary(
            OperatorKind::Max,
            x,
            y,
            DataType::Scalar,
            ValueType::Double,
            meta("top"),
        );

        let trace = format_plan(&plan, top);
        assert!(trace.contains("[L1] top = max(x, y)"));
    }

    #[test]
    fn test_out_of_range_target_is_reported_inline() {
        let plan = LopPlan::new();
        let trace = format_plan(&plan, LopId::new(3));
        assert!(trace.contains("Invalid Node ID"));
    }
}
