//! Priority resolution between two pending requests.
//!
//! | Entry sides | HIGH agent                                              |
//! |-------------|---------------------------------------------------------|
//! | same        | the agent whose announce was pending first              |
//! | different   | the agent that did not win the previous different-side  |
//! |             | round; the later announcer on the very first one        |
//!
//! Same-side rounds are ordered by arrival so the agent already waiting for a
//! partner cannot be overtaken by one that looped around behind it.
//! Different-side rounds alternate, so neither direction holds the crossing
//! twice in a row.

use tc_core::{AgentId, EntrySide};

/// Priority of one agent relative to the other.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Priority {
    High,
    Low,
    /// No contested round is open.
    None,
}

/// An announced intent to use the segment.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Request {
    pub agent: AgentId,
    pub side:  EntrySide,
}

impl Request {
    #[inline]
    pub fn new(agent: AgentId, side: EntrySide) -> Self {
        Self { agent, side }
    }
}

/// Pick the HIGH agent of a contested round.
///
/// `first` is the request that was pending when `second` arrived.
/// `last_opposite_winner` is whoever was granted the previous
/// different-side round, if any.
pub fn resolve(first: Request, second: Request, last_opposite_winner: Option<AgentId>) -> AgentId {
    let second_wins = first.side != second.side && last_opposite_winner != Some(second.agent);
    if second_wins { second.agent } else { first.agent }
}

/// Two paired requests awaiting admission.
#[derive(Copy, Clone, Debug)]
pub(crate) struct Round {
    pub first:  Request,
    pub second: Request,
    pub high:   AgentId,
}

impl Round {
    pub fn new(first: Request, second: Request, last_opposite_winner: Option<AgentId>) -> Self {
        Self { first, second, high: resolve(first, second, last_opposite_winner) }
    }

    /// Replace the side of whichever request belongs to `request.agent`.
    pub fn update(&mut self, request: Request, last_opposite_winner: Option<AgentId>) {
        if self.first.agent == request.agent {
            self.first = request;
        } else {
            self.second = request;
        }
        self.high = resolve(self.first, self.second, last_opposite_winner);
    }

    #[inline]
    pub fn is_opposite(&self) -> bool {
        self.first.side != self.second.side
    }

    pub fn priority_of(&self, agent: AgentId) -> Priority {
        if self.high == agent { Priority::High } else { Priority::Low }
    }
}
