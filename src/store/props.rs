//! Execution metadata fixed on every node at construction time.
//!
//! Nothing here is negotiated or recomputed later: the job-assembly pass
//! reads these values back exactly as the node-type constructor set them.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Where a node executes.
///
/// The tag is the first field of every encoded instruction and selects the
/// encoder branch; it never changes after construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExecEnv {
    /// Single-process control program.
    Cp,
    /// Staged distributed job.
    Mr,
}

impl ExecEnv {
    pub const fn tag(&self) -> &'static str {
        match self {
            ExecEnv::Cp => "CP",
            ExecEnv::Mr => "MR",
        }
    }
}

impl fmt::Display for ExecEnv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Position of a node relative to job staging. Recorded for the external
/// scheduler; the encoder never reads it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExecLocation {
    ControlProgram,
    Data,
    Map,
    MapAndReduce,
    MapOrReduce,
    Reduce,
}

/// How a node interacts with distributed-job boundaries.
///
/// A node with `defines_new_job` set must never be fused into a job with any
/// other node, regardless of the remaining flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct JobFlags {
    /// Output partitioning/ordering may differ from the inputs.
    pub breaks_alignment: bool,
    /// Re-establishes alignment for downstream consumers.
    pub is_aligner: bool,
    /// Forces a new distributed-job boundary.
    pub defines_new_job: bool,
}

impl JobFlags {
    pub const fn none() -> Self {
        Self {
            breaks_alignment: false,
            is_aligner: false,
            defines_new_job: false,
        }
    }
}

/// Distributed-job categories a node can declare compatibility with.
///
/// `Invalid` is the reserved tag meaning "incompatible with any distributed
/// job": a control-program-only node carries exactly that tag and nothing
/// else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JobType {
    Invalid,
    GenericMr,
    DataGen,
    Reblock,
    MatMult,
    Sort,
    Combine,
}

impl JobType {
    pub const ALL: [JobType; 7] = [
        JobType::Invalid,
        JobType::GenericMr,
        JobType::DataGen,
        JobType::Reblock,
        JobType::MatMult,
        JobType::Sort,
        JobType::Combine,
    ];

    const fn bit(self) -> u16 {
        1 << self as u16
    }
}

/// Set of [`JobType`] tags, stored as a bitmask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct JobSet(u16);

impl JobSet {
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Exactly the reserved `Invalid` tag: never joins a distributed job.
    pub const fn incompatible() -> Self {
        Self(JobType::Invalid.bit())
    }

    /// Every real distributed-job tag (everything except `Invalid`).
    pub fn any_distributed() -> Self {
        let mut set = Self::empty();
        for job in JobType::ALL {
            if job != JobType::Invalid {
                set.insert(job);
            }
        }
        set
    }

    pub fn insert(&mut self, job: JobType) {
        self.0 |= job.bit();
    }

    pub fn contains(&self, job: JobType) -> bool {
        self.0 & job.bit() != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// True when the set is exactly `{Invalid}`.
    pub fn is_control_only(&self) -> bool {
        self.0 == JobType::Invalid.bit()
    }

    pub fn iter(&self) -> impl Iterator<Item = JobType> + '_ {
        JobType::ALL.into_iter().filter(|job| self.contains(*job))
    }
}

/// Execution metadata bundle carried by every node.
///
/// Values come from a per-node-type table, never from runtime parameters: a
/// kind/environment pair that would need different flags is a distinct node
/// type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LopProperties {
    pub env: ExecEnv,
    pub location: ExecLocation,
    pub flags: JobFlags,
    pub compatible: JobSet,
}

impl LopProperties {
    /// Properties of every scalar operator node in this layer: runs in the
    /// control program, touches no job alignment, joins no distributed job.
    pub const fn control_program() -> Self {
        Self {
            env: ExecEnv::Cp,
            location: ExecLocation::ControlProgram,
            flags: JobFlags::none(),
            compatible: JobSet::incompatible(),
        }
    }

    /// Properties of literal and variable leaves feeding those operators.
    pub const fn data_cp() -> Self {
        Self {
            env: ExecEnv::Cp,
            location: ExecLocation::Data,
            flags: JobFlags::none(),
            compatible: JobSet::incompatible(),
        }
    }
}
