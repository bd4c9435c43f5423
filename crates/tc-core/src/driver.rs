//! The track driver seam.
//!
//! Everything physical (sensor polling, motor commands, switch actuation)
//! lives behind [`TrackDriver`].  The controller and the agent loop only
//! issue commands through it, so the same protocol code runs against the
//! real layout or against an in-memory simulation.

use crate::{AgentId, CheckpointId, Direction, SwitchId, SwitchPosition, TcResult};

/// Pluggable access to the physical (or simulated) track.
///
/// # Thread safety
///
/// One driver instance is shared by both agent threads, and the controller
/// calls [`stop`][Self::stop] and [`resume`][Self::resume] while holding its
/// internal lock.  Implementations must therefore be `Send + Sync` and must
/// never call back into the controller.
pub trait TrackDriver: Send + Sync {
    /// Block until `agent` reaches its next checkpoint and return it.
    ///
    /// Checkpoints are delivered one at a time, in travel order.
    ///
    /// # Errors
    ///
    /// Returns [`TcError::DriverShutdown`][crate::TcError::DriverShutdown]
    /// once the driver is shutting down.
    fn next_checkpoint(&self, agent: AgentId) -> TcResult<CheckpointId>;

    /// Block until `agent` reaches `checkpoint`, skipping any others.
    fn wait_for_checkpoint(&self, agent: AgentId, checkpoint: CheckpointId) -> TcResult<()> {
        while self.next_checkpoint(agent)? != checkpoint {}
        Ok(())
    }

    /// Bring `agent` to a halt.
    fn stop(&self, agent: AgentId);

    /// Restart `agent` at its cruising speed.
    fn resume(&self, agent: AgentId);

    /// Set the travel direction of `agent`.  Only issued while it is stopped.
    fn set_direction(&self, agent: AgentId, direction: Direction);

    /// Throw `switch` to `position`.
    fn set_switch(&self, switch: SwitchId, position: SwitchPosition);
}
