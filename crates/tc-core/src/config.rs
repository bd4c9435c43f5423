//! Run configuration.

use std::time::Duration;

use crate::{TcError, TcResult};

/// Top-level configuration for one run of the two-locomotive scenario.
///
/// Typically built in code by the application crate; the `serde` feature
/// allows loading it from a file instead.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunConfig {
    /// Laps a locomotive completes before it stops, reverses, and restarts.
    /// Must be at least 1.
    pub laps_before_inversion: u32,

    /// Stop each agent after this many laps.  `None` runs until the track
    /// driver shuts down.
    pub total_laps: Option<u32>,

    /// Simulated travel time between two consecutive checkpoints.
    pub step_millis: u64,

    /// Upper bound of the random extra travel time added to each step.
    pub jitter_millis: u64,

    /// Seed for the simulated track's jitter.  The same seed gives the same
    /// per-agent delay sequence (thread interleaving still varies).
    pub seed: u64,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            laps_before_inversion: 2,
            total_laps:            None,
            step_millis:           0,
            jitter_millis:         0,
            seed:                  0,
        }
    }
}

impl RunConfig {
    /// Reject configurations the agent loop cannot honour.
    pub fn validate(&self) -> TcResult<()> {
        if self.laps_before_inversion == 0 {
            return Err(TcError::Config(
                "laps_before_inversion must be at least 1".into(),
            ));
        }
        if self.total_laps == Some(0) {
            return Err(TcError::Config("total_laps must be at least 1 when set".into()));
        }
        Ok(())
    }

    #[inline]
    pub fn step(&self) -> Duration {
        Duration::from_millis(self.step_millis)
    }
}
