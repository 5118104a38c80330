//! The plan arena: one append-only store owning every lowered-operator node.
//!
//! Dense columnar layout. Input edges are CSR ranges into one flat array;
//! output back-references (who consumes a node's result) are an intrusive
//! singly-linked adjacency list. Both only ever grow: nodes are immutable
//! once pushed and are dropped together with the plan.

use super::props::LopProperties;
use super::types::{
    DataType, LiteralValue, LopId, LopKind, LopMetadata, OperatorKind, ValueType,
};
use crate::error::LopError;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LopPlan {
    // Columnar node data
    pub kinds: Vec<LopKind>,
    pub meta: Vec<LopMetadata>,
    pub data_types: Vec<DataType>,
    pub value_types: Vec<ValueType>,
    pub props: Vec<LopProperties>,

    // Input topology (CSR)
    pub inputs_flat: Vec<LopId>,
    pub inputs_ranges: Vec<(u32, u32)>, // (start, count)

    // Output back-references (intrusive linked adjacency)
    pub first_output: Vec<u32>,
    pub output_targets: Vec<LopId>,
    pub next_output: Vec<u32>,
}

impl LopPlan {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    fn push_node(
        &mut self,
        kind: LopKind,
        inputs: &[LopId],
        dt: DataType,
        vt: ValueType,
        props: LopProperties,
        meta: LopMetadata,
    ) -> LopId {
        let id = LopId(self.kinds.len() as u32);

        // 1. Register this node as a consumer on each input (adjacency append)
        for &input in inputs {
            debug_assert!(input.index() < self.kinds.len());
            let head = self.first_output[input.index()];
            let new_edge = self.output_targets.len() as u32;
            self.output_targets.push(id);
            self.next_output.push(head);
            self.first_output[input.index()] = new_edge;
        }

        // 2. Inputs (CSR append)
        let start = self.inputs_flat.len() as u32;
        let count = inputs.len() as u32;
        self.inputs_flat.extend_from_slice(inputs);
        self.inputs_ranges.push((start, count));

        // 3. Node columns
        self.kinds.push(kind);
        self.meta.push(meta);
        self.data_types.push(dt);
        self.value_types.push(vt);
        self.props.push(props);
        self.first_output.push(u32::MAX);

        id
    }

    /// Adds a compile-time-known scalar leaf.
    pub fn add_literal(&mut self, value: LiteralValue, meta: LopMetadata) -> LopId {
        let vt = value.value_type();
        self.push_node(
            LopKind::Literal(value),
            &[],
            DataType::Scalar,
            vt,
            LopProperties::data_cp(),
            meta,
        )
    }

    /// Adds a named scalar-variable read leaf.
    pub fn add_variable(
        &mut self,
        name: impl Into<String>,
        vt: ValueType,
        meta: LopMetadata,
    ) -> LopId {
        self.push_node(
            LopKind::Variable(name.into()),
            &[],
            DataType::Scalar,
            vt,
            LopProperties::data_cp(),
            meta,
        )
    }

    /// Adds a binary scalar operator over `lhs` and `rhs`, in that order.
    ///
    /// Always valid at this layer: no type or shape checking happens here.
    /// The new node registers itself as a consumer on both inputs, and its
    /// execution properties are the fixed control-program set for every kind.
    pub fn add_binary(
        &mut self,
        kind: OperatorKind,
        lhs: LopId,
        rhs: LopId,
        dt: DataType,
        vt: ValueType,
        meta: LopMetadata,
    ) -> LopId {
        self.push_node(
            LopKind::Operator(kind),
            &[lhs, rhs],
            dt,
            vt,
            LopProperties::control_program(),
            meta,
        )
    }

    /// Dynamic-arity entry point for generic plan builders.
    ///
    /// Fails without touching the arena when the input count does not match
    /// the kind's arity or an input id falls outside this plan. Both are
    /// upstream-builder bugs; callers abort the plan under construction.
    pub fn add_node(
        &mut self,
        kind: OperatorKind,
        inputs: &[LopId],
        dt: DataType,
        vt: ValueType,
        meta: LopMetadata,
    ) -> Result<LopId, LopError> {
        if inputs.len() != kind.arity() {
            return Err(LopError::ArityMismatch {
                kind,
                expected: kind.arity(),
                actual: inputs.len(),
            });
        }
        for &input in inputs {
            if input.index() >= self.count() {
                return Err(LopError::UnknownInput {
                    input,
                    node_count: self.count(),
                });
            }
        }
        Ok(self.push_node(
            LopKind::Operator(kind),
            inputs,
            dt,
            vt,
            LopProperties::control_program(),
            meta,
        ))
    }

    // --- Accessors ---

    #[inline(always)]
    pub fn inputs(&self, id: LopId) -> &[LopId] {
        let (start, count) = self.inputs_ranges[id.index()];
        &self.inputs_flat[start as usize..(start + count) as usize]
    }

    /// Consumers of `id`'s result, one entry per use.
    ///
    /// Collected from the intrusive list; most recently registered first.
    pub fn outputs(&self, id: LopId) -> SmallVec<[LopId; 4]> {
        let mut consumers = SmallVec::new();
        let mut edge = self.first_output[id.index()];
        while edge != u32::MAX {
            consumers.push(self.output_targets[edge as usize]);
            edge = self.next_output[edge as usize];
        }
        consumers
    }

    /// Number of uses of `id`'s result (liveness bookkeeping).
    pub fn output_count(&self, id: LopId) -> usize {
        let mut n = 0;
        let mut edge = self.first_output[id.index()];
        while edge != u32::MAX {
            n += 1;
            edge = self.next_output[edge as usize];
        }
        n
    }

    #[inline(always)]
    pub fn kind(&self, id: LopId) -> &LopKind {
        &self.kinds[id.index()]
    }

    #[inline(always)]
    pub fn metadata(&self, id: LopId) -> &LopMetadata {
        &self.meta[id.index()]
    }

    /// Execution properties, unchanged from construction time.
    #[inline(always)]
    pub fn properties(&self, id: LopId) -> &LopProperties {
        &self.props[id.index()]
    }

    pub fn data_type(&self, id: LopId) -> DataType {
        self.data_types[id.index()]
    }

    pub fn value_type(&self, id: LopId) -> ValueType {
        self.value_types[id.index()]
    }

    // --- Snapshots ---

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn from_json(s: &str) -> serde_json::Result<Self> {
        serde_json::from_str(s)
    }
}
