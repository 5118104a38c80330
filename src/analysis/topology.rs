use crate::error::LopError;
use crate::store::{LopId, LopPlan};
use std::collections::HashSet;

/// Performs a Topological Sort using Depth-First Search (DFS).
///
/// Returns a list of LopIds where every input appears before its consumer,
/// which is the only node order the instruction writer accepts.
///
/// Uses DFS instead of BFS (Kahn's) to improve cache locality: a deep
/// dependency chain lands contiguously in the output order.
pub fn sort(plan: &LopPlan) -> Result<Vec<LopId>, LopError> {
    let count = plan.count();
    let mut order = Vec::with_capacity(count);
    let mut state = vec![VisitState::None; count];

    // Iterate 0..count so disconnected nodes are visited too.
    // Edges point consumer -> input; post-order DFS yields inputs first.
    for i in 0..count {
        if state[i] == VisitState::None {
            visit(LopId::new(i), plan, &mut state, &mut order)?;
        }
    }

    Ok(order)
}

#[derive(Clone, PartialEq, Eq)]
enum VisitState {
    None,
    Visiting, // Used for cycle detection
    Visited,
}

fn visit(
    node: LopId,
    plan: &LopPlan,
    state: &mut Vec<VisitState>,
    order: &mut Vec<LopId>,
) -> Result<(), LopError> {
    let idx = node.index();

    match state[idx] {
        VisitState::Visited => return Ok(()),
        VisitState::Visiting => return Err(LopError::CyclicPlan { involving: node }),
        VisitState::None => state[idx] = VisitState::Visiting,
    }

    for &input in plan.inputs(node) {
        visit(input, plan, state, order)?;
    }

    state[idx] = VisitState::Visited;
    order.push(node);
    Ok(())
}

/// Identifies all nodes whose results transitively depend on the given start
/// nodes. Used for liveness bookkeeping when an upstream value changes.
pub fn downstream_from(plan: &LopPlan, start_nodes: &[LopId]) -> HashSet<LopId> {
    use std::collections::VecDeque;
    let mut visited = HashSet::new();
    let mut queue = VecDeque::from(start_nodes.to_vec());

    while let Some(node) = queue.pop_front() {
        if visited.insert(node) {
            let mut edge_idx = plan.first_output[node.index()];
            while edge_idx != u32::MAX {
                let consumer = plan.output_targets[edge_idx as usize];
                queue.push_back(consumer);
                edge_idx = plan.next_output[edge_idx as usize];
            }
        }
    }
    visited
}
