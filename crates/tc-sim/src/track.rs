//! `SimulatedTrack`: in-memory stand-in for the physical layout.
//!
//! Each locomotive walks its own loop one checkpoint per
//! [`next_checkpoint`][TrackDriver::next_checkpoint] call, in its current
//! direction, after a simulated travel delay.  A stopped locomotive blocks
//! its caller until it is resumed.
//!
//! # Jitter determinism
//!
//! Every locomotive owns a `SmallRng` seeded with
//! `seed XOR (agent_id * MIXING_CONSTANT)`, so a given seed always yields the
//! same per-agent delay sequence.  Thread interleaving is not reproducible.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};
use std::thread;
use std::time::Duration;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use tc_core::{
    AgentId, CheckpointId, Direction, RunConfig, SwitchId, SwitchPosition, TcError, TcResult,
    TrackDriver,
};
use tc_route::RouteModel;

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

/// One command received by the track, in arrival order.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum TrackCommand {
    Stop(AgentId),
    Resume(AgentId),
    SetDirection(AgentId, Direction),
    SetSwitch(SwitchId, SwitchPosition),
}

// ── Internal state ────────────────────────────────────────────────────────────

struct Loco {
    lap:       Vec<CheckpointId>,
    /// Index into `lap` of the last checkpoint reached.
    position:  usize,
    direction: Direction,
    moving:    bool,
    rng:       SmallRng,
}

impl Loco {
    fn current(&self) -> CheckpointId {
        self.lap[self.position]
    }

    fn advance(&mut self) -> CheckpointId {
        let len = self.lap.len();
        self.position = match self.direction {
            Direction::Forward => (self.position + 1) % len,
            Direction::Reverse => (self.position + len - 1) % len,
        };
        self.current()
    }
}

#[derive(Default)]
struct TrackState {
    locos:         BTreeMap<AgentId, Loco>,
    switches:      BTreeMap<SwitchId, SwitchPosition>,
    commands:      Vec<TrackCommand>,
    max_on_shared: usize,
    shut_down:     bool,
}

impl TrackState {
    fn loco_mut(&mut self, agent: AgentId) -> TcResult<&mut Loco> {
        self.locos.get_mut(&agent).ok_or(TcError::UnknownAgent(agent))
    }

    fn on_shared(&self, shared: &BTreeSet<CheckpointId>) -> usize {
        self.locos.values().filter(|l| shared.contains(&l.current())).count()
    }
}

// ── SimulatedTrack ────────────────────────────────────────────────────────────

pub struct SimulatedTrack {
    state:         Mutex<TrackState>,
    moving:        Condvar,
    /// Union of every agent's shared checkpoints.
    shared:        BTreeSet<CheckpointId>,
    step:          Duration,
    jitter_millis: u64,
}

impl SimulatedTrack {
    /// Place one stopped locomotive per route on its lap end, facing the
    /// route's current direction.
    pub fn new<'a, I>(routes: I, config: &RunConfig) -> Self
    where
        I: IntoIterator<Item = (AgentId, &'a RouteModel)>,
    {
        let mut state = TrackState::default();
        let mut shared = BTreeSet::new();

        for (agent, route) in routes {
            shared.extend(route.shared().iter().copied());
            let lap = route.checkpoints().to_vec();
            let position = lap.iter().position(|&c| c == route.lap_end()).unwrap_or(0);
            let seed = config.seed ^ u64::from(agent.raw()).wrapping_mul(MIXING_CONSTANT);
            state.locos.insert(agent, Loco {
                lap,
                position,
                direction: route.direction(),
                moving:    false,
                rng:       SmallRng::seed_from_u64(seed),
            });
        }

        Self {
            state: Mutex::new(state),
            moving: Condvar::new(),
            shared,
            step: config.step(),
            jitter_millis: config.jitter_millis,
        }
    }

    /// Make every current and future `next_checkpoint` call fail with
    /// [`TcError::DriverShutdown`].
    pub fn shutdown(&self) {
        self.lock().shut_down = true;
        self.moving.notify_all();
        log::info!("simulated track shut down");
    }

    // ── Inspection ────────────────────────────────────────────────────────

    pub fn commands(&self) -> Vec<TrackCommand> {
        self.lock().commands.clone()
    }

    /// Largest number of locomotives seen on shared checkpoints at once.
    /// Anything above 1 is a collision.
    pub fn max_on_shared(&self) -> usize {
        self.lock().max_on_shared
    }

    pub fn position(&self, agent: AgentId) -> Option<CheckpointId> {
        self.lock().locos.get(&agent).map(Loco::current)
    }

    pub fn direction(&self, agent: AgentId) -> Option<Direction> {
        self.lock().locos.get(&agent).map(|l| l.direction)
    }

    pub fn is_moving(&self, agent: AgentId) -> bool {
        self.lock().locos.get(&agent).is_some_and(|l| l.moving)
    }

    pub fn switch(&self, switch: SwitchId) -> Option<SwitchPosition> {
        self.lock().switches.get(&switch).copied()
    }

    pub fn shared_checkpoints(&self) -> &BTreeSet<CheckpointId> {
        &self.shared
    }

    fn lock(&self) -> MutexGuard<'_, TrackState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn record(&self, command: TrackCommand) -> MutexGuard<'_, TrackState> {
        let mut state = self.lock();
        state.commands.push(command);
        state
    }
}

impl TrackDriver for SimulatedTrack {
    fn next_checkpoint(&self, agent: AgentId) -> TcResult<CheckpointId> {
        let delay = {
            let state = self.lock();
            let mut state = self
                .moving
                .wait_while(state, |s| {
                    !s.shut_down && s.locos.get(&agent).is_some_and(|l| !l.moving)
                })
                .unwrap_or_else(PoisonError::into_inner);
            if state.shut_down {
                return Err(TcError::DriverShutdown(agent));
            }
            let jitter = state.loco_mut(agent)?.rng.gen_range(0..=self.jitter_millis);
            self.step + Duration::from_millis(jitter)
        };

        if !delay.is_zero() {
            thread::sleep(delay);
        }

        let mut state = self.lock();
        if state.shut_down {
            return Err(TcError::DriverShutdown(agent));
        }
        let reached = state.loco_mut(agent)?.advance();

        let on_shared = state.on_shared(&self.shared);
        state.max_on_shared = state.max_on_shared.max(on_shared);
        if on_shared > 1 {
            log::error!("collision: {on_shared} locomotives on the shared segment");
        }
        log::trace!("{agent} passes {reached}");
        Ok(reached)
    }

    fn stop(&self, agent: AgentId) {
        let mut state = self.record(TrackCommand::Stop(agent));
        if let Some(loco) = state.locos.get_mut(&agent) {
            loco.moving = false;
        }
        log::debug!("{agent} stopped");
    }

    fn resume(&self, agent: AgentId) {
        let mut state = self.record(TrackCommand::Resume(agent));
        if let Some(loco) = state.locos.get_mut(&agent) {
            loco.moving = true;
        }
        drop(state);
        self.moving.notify_all();
        log::debug!("{agent} resumed");
    }

    fn set_direction(&self, agent: AgentId, direction: Direction) {
        let mut state = self.record(TrackCommand::SetDirection(agent, direction));
        if let Some(loco) = state.locos.get_mut(&agent) {
            loco.direction = direction;
        }
        log::debug!("{agent} set to {direction}");
    }

    fn set_switch(&self, switch: SwitchId, position: SwitchPosition) {
        self.record(TrackCommand::SetSwitch(switch, position)).switches.insert(switch, position);
        log::debug!("{switch} thrown {position}");
    }
}
