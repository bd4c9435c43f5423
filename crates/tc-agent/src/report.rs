//! Per-agent run summary.

use std::fmt;

use tc_core::AgentId;

/// Counters collected by [`AgentBehavior`][crate::AgentBehavior] over a run.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AgentReport {
    pub agent:      AgentId,
    /// Completed laps (lap-end checkpoints reached).
    pub laps:       u32,
    pub inversions: u32,
    pub announces:  u32,
    /// Times the agent was granted the segment.
    pub grants:     u32,
    /// Grants that required stopping and waiting first.
    pub waits:      u32,
}

impl AgentReport {
    pub fn new(agent: AgentId) -> Self {
        Self { agent, laps: 0, inversions: 0, announces: 0, grants: 0, waits: 0 }
    }
}

impl fmt::Display for AgentReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} laps, {} inversions, {} grants ({} after waiting)",
            self.agent, self.laps, self.inversions, self.grants, self.waits,
        )
    }
}
