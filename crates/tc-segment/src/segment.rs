//! The `SharedSegment` controller and its monitor state.

use std::collections::VecDeque;
use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};

use tc_core::{AgentId, EntrySide, TcError, TcResult, TrackDriver};

use crate::priority::{Priority, Request, Round};

// ── Public snapshot types ─────────────────────────────────────────────────────

/// How an [`acquire`][SharedSegment::acquire] call was satisfied.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Admission {
    /// Granted on the spot; the agent never stopped.
    Immediate,
    /// The agent was stopped, parked, handed the segment on release, and
    /// restarted.
    AfterWait,
}

/// Point-in-time copy of the controller state.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SegmentStatus {
    pub occupant:  Option<AgentId>,
    pub pending:   Option<Request>,
    pub contested: bool,
    pub high:      Option<AgentId>,
    pub parked:    Vec<AgentId>,
}

// ── Monitor state ─────────────────────────────────────────────────────────────

#[derive(Default)]
struct SegmentState {
    /// Agent currently granted the segment.
    occupant: Option<AgentId>,

    /// A lone announce waiting to be paired.
    pending: Option<Request>,

    /// Open contested round.  `Some` is the "contested admission" flag.
    round: Option<Round>,

    /// Agents blocked in `acquire`, in arrival order.
    parked: VecDeque<AgentId>,

    /// Winner of the most recent different-side round.
    last_opposite_winner: Option<AgentId>,
}

impl SegmentState {
    fn admits(&self, agent: AgentId) -> bool {
        self.occupant.is_none() && self.round.as_ref().is_none_or(|r| r.high == agent)
    }

    /// Bookkeeping shared by every path that ends with `agent` owning the
    /// segment.
    fn granted(&mut self, agent: AgentId) {
        if self.pending.is_some_and(|p| p.agent == agent) {
            self.pending = None;
        }
        if let Some(round) = self.round.take() {
            if round.is_opposite() {
                self.last_opposite_winner = Some(agent);
            }
        }
    }
}

// ── SharedSegment ─────────────────────────────────────────────────────────────

/// Serialises access to one shared stretch of track between exactly two
/// agents.
///
/// All state lives behind a single mutex.  Each party has its own condition
/// variable so a release wakes exactly the agent it hands the segment to.
///
/// # Contract
///
/// Per agent the call sequence is `announce → acquire → release`, repeated.
/// `announce` may be skipped.  Calling `release` without owning the segment,
/// calling `acquire` while owning it, or calling anything with an agent that
/// is not one of the two parties panics.
///
/// # Liveness
///
/// A denied agent waits without timeout.  Progress relies on the other agent
/// eventually acquiring and releasing, which holds for a closed two-agent
/// layout where both loops pass through the segment.
pub struct SharedSegment {
    parties: [AgentId; 2],
    state:   Mutex<SegmentState>,
    wake:    [Condvar; 2],
}

impl SharedSegment {
    /// Create a free segment shared by `first` and `second`.
    ///
    /// # Errors
    ///
    /// [`TcError::Config`] if both ids are equal.
    pub fn new(first: AgentId, second: AgentId) -> TcResult<Self> {
        if first == second {
            return Err(TcError::Config(format!(
                "a shared segment needs two distinct agents, got {first} twice"
            )));
        }
        Ok(Self {
            parties: [first, second],
            state:   Mutex::new(SegmentState::default()),
            wake:    [Condvar::new(), Condvar::new()],
        })
    }

    /// The two agents allowed to use this segment.
    #[inline]
    pub fn parties(&self) -> [AgentId; 2] {
        self.parties
    }

    // ── Protocol ──────────────────────────────────────────────────────────

    /// Record that `agent` will reach the segment from `side`.
    ///
    /// Never blocks.  Pairs with the other agent's pending request if there
    /// is one, opening a contested round; otherwise becomes the pending
    /// request, replacing any earlier one from the same agent.
    pub fn announce(&self, agent: AgentId, side: EntrySide) {
        self.slot(agent);
        let request = Request::new(agent, side);
        let mut state = self.lock();
        let last = state.last_opposite_winner;

        if let Some(round) = state.round.as_mut() {
            round.update(request, last);
            log::debug!("{agent} re-announced from side {side}; {} has priority", round.high);
            return;
        }

        match state.pending {
            Some(first) if first.agent != agent => {
                let round = Round::new(first, request, last);
                log::info!(
                    "{agent} requested the shared segment from side {side}; contested with {}, {} has priority",
                    first.agent,
                    round.high,
                );
                state.pending = None;
                state.round = Some(round);
            }
            _ => {
                log::info!("{agent} requested the shared segment from side {side}");
                state.pending = Some(request);
            }
        }
    }

    /// Take the segment for `agent`, blocking until it is available.
    ///
    /// If admission is denied, `driver.stop(agent)` is issued before the
    /// lock is released; once the segment has been handed over,
    /// `driver.resume(agent)` is issued before returning.
    pub fn acquire<D: TrackDriver + ?Sized>(&self, agent: AgentId, driver: &D) -> Admission {
        let slot = self.slot(agent);
        let mut state = self.lock();
        assert!(
            state.occupant != Some(agent),
            "{agent} acquired the shared segment it already occupies",
        );

        if state.admits(agent) {
            state.occupant = Some(agent);
            state.granted(agent);
            log::info!("{agent} accesses the shared segment");
            return Admission::Immediate;
        }

        driver.stop(agent);
        state.parked.push_back(agent);
        log::info!("{agent} is waiting for the shared segment");

        let mut state = self.wake[slot]
            .wait_while(state, |s| s.occupant != Some(agent))
            .unwrap_or_else(PoisonError::into_inner);

        state.granted(agent);
        driver.resume(agent);
        log::info!("{agent} accesses the shared segment after waiting");
        Admission::AfterWait
    }

    /// Leave the segment.
    ///
    /// Frees it, or hands it directly to the agent parked longest so the
    /// segment is never observed free in between.
    pub fn release(&self, agent: AgentId) {
        self.slot(agent);
        let mut state = self.lock();
        assert!(
            state.occupant == Some(agent),
            "{agent} released the shared segment without occupying it (occupant: {:?})",
            state.occupant,
        );

        match state.parked.pop_front() {
            Some(next) => {
                state.occupant = Some(next);
                log::info!("{agent} leaves the shared segment; handing over to {next}");
                self.wake[self.slot(next)].notify_one();
            }
            None => {
                state.occupant = None;
                log::info!("{agent} leaves the shared segment");
            }
        }
    }

    // ── Queries ───────────────────────────────────────────────────────────

    pub fn status(&self) -> SegmentStatus {
        let state = self.lock();
        SegmentStatus {
            occupant:  state.occupant,
            pending:   state.pending,
            contested: state.round.is_some(),
            high:      state.round.map(|r| r.high),
            parked:    state.parked.iter().copied().collect(),
        }
    }

    pub fn priority_of(&self, agent: AgentId) -> Priority {
        self.slot(agent);
        self.lock().round.map_or(Priority::None, |r| r.priority_of(agent))
    }

    // ── Internals ─────────────────────────────────────────────────────────

    fn slot(&self, agent: AgentId) -> usize {
        match self.parties.iter().position(|&p| p == agent) {
            Some(slot) => slot,
            None => panic!("{agent} is not a party to this shared segment"),
        }
    }

    /// A poisoned lock only follows a contract panic on the other thread;
    /// the state itself is still consistent.
    fn lock(&self) -> MutexGuard<'_, SegmentState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
