//! `RouteModel`: derives the four protocol checkpoints from a loop.
//!
//! # Lap view
//!
//! A route is a cyclic list `[c0, c1, …, cN]`.  The last checkpoint `cN` is
//! the lap end, where direction inversions happen.  Role derivation works on
//! the lap as seen from the lap end:
//!
//! ```text
//! forward  lap: [cN, c0, c1, …, cN-1]
//! reverse  lap: [cN, cN-1, …, c1, c0]
//! ```
//!
//! With the shared run starting at lap index `s` and holding `k` checkpoints:
//!
//! | Role       | Lap index   |
//! |------------|-------------|
//! | `announce` | `s - 3`     |
//! | `entry`    | `s - 1`     |
//! | `exit`     | `s + k`     |
//!
//! The announce checkpoint may coincide with the lap end (index 0) but must
//! not precede it; otherwise an inversion would happen between announcing
//! and acquiring.  Both directions are derived once at construction.

use std::collections::HashSet;

use tc_core::{CheckpointId, Direction, EntrySide, SwitchId, SwitchPosition};

use crate::{RouteError, RouteResult};

/// Checkpoints before the segment at which intent is announced.
const ANNOUNCE_LEAD: usize = 3;

// ── SwitchSetting ─────────────────────────────────────────────────────────────

/// A switch position the route needs while its agent owns the segment.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SwitchSetting {
    pub switch:   SwitchId,
    pub position: SwitchPosition,
}

impl SwitchSetting {
    #[inline]
    pub fn new(switch: SwitchId, position: SwitchPosition) -> Self {
        Self { switch, position }
    }
}

// ── Boundaries ────────────────────────────────────────────────────────────────

/// The segment-related checkpoints for one travel direction.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Boundaries {
    pub announce: CheckpointId,
    pub entry:    CheckpointId,
    pub exit:     CheckpointId,
}

// ── RouteModel ────────────────────────────────────────────────────────────────

/// The checkpoint translator for one agent.
///
/// Holds the loop, the shared run, the switch settings applied on entry, and
/// the precomputed boundaries for both directions.  [`invert`][Self::invert]
/// only flips a flag; role queries never recompute.
#[derive(Clone, Debug)]
pub struct RouteModel {
    checkpoints: Vec<CheckpointId>,
    shared:      Vec<CheckpointId>,
    switches:    Vec<SwitchSetting>,
    forward:     Boundaries,
    reverse:     Boundaries,
    lap_end:     CheckpointId,
    inverted:    bool,
}

impl RouteModel {
    /// Build a translator from a loop and its shared sub-list.
    ///
    /// # Errors
    ///
    /// Any [`RouteError`] other than `Parse`/`Io`: an empty list, a repeated
    /// checkpoint, a shared list that is not a contiguous run, a shared run
    /// over the lap end, or a run too close to the lap end in either
    /// direction.
    pub fn new(
        checkpoints: Vec<CheckpointId>,
        shared:      Vec<CheckpointId>,
        switches:    Vec<SwitchSetting>,
    ) -> RouteResult<Self> {
        let Some(&lap_end) = checkpoints.last() else {
            return Err(RouteError::EmptyRoute);
        };
        if shared.is_empty() {
            return Err(RouteError::EmptySegment);
        }

        let mut seen = HashSet::with_capacity(checkpoints.len());
        if let Some(&dup) = checkpoints.iter().find(|c| !seen.insert(**c)) {
            return Err(RouteError::DuplicateCheckpoint(dup));
        }

        if find_run(&checkpoints, &shared).is_none() {
            return Err(RouteError::SegmentNotContiguous);
        }
        if shared.contains(&lap_end) {
            return Err(RouteError::SegmentContainsLapEnd(lap_end));
        }

        let body = &checkpoints[..checkpoints.len() - 1];

        let forward_lap: Vec<CheckpointId> =
            std::iter::once(lap_end).chain(body.iter().copied()).collect();
        let forward = derive(&forward_lap, &shared, Direction::Forward)?;

        let reverse_lap: Vec<CheckpointId> =
            std::iter::once(lap_end).chain(body.iter().rev().copied()).collect();
        let reverse_shared: Vec<CheckpointId> = shared.iter().rev().copied().collect();
        let reverse = derive(&reverse_lap, &reverse_shared, Direction::Reverse)?;

        log::debug!(
            "route over {} checkpoints: forward {forward:?}, reverse {reverse:?}, lap end {lap_end}",
            checkpoints.len(),
        );

        Ok(Self {
            checkpoints,
            shared,
            switches,
            forward,
            reverse,
            lap_end,
            inverted: false,
        })
    }

    // ── Role queries ──────────────────────────────────────────────────────

    /// Checkpoint at which the agent announces its intent.
    #[inline]
    pub fn segment_announce(&self) -> CheckpointId {
        self.boundaries().announce
    }

    /// Checkpoint immediately before the shared run; `acquire` happens here.
    #[inline]
    pub fn segment_entry(&self) -> CheckpointId {
        self.boundaries().entry
    }

    /// Checkpoint immediately after the shared run; `release` happens here.
    #[inline]
    pub fn segment_exit(&self) -> CheckpointId {
        self.boundaries().exit
    }

    /// Last checkpoint of the loop.  The same in both directions.
    #[inline]
    pub fn lap_end(&self) -> CheckpointId {
        self.lap_end
    }

    /// Boundaries for the current direction.
    #[inline]
    pub fn boundaries(&self) -> Boundaries {
        if self.inverted { self.reverse } else { self.forward }
    }

    /// Boundaries for an explicit direction.
    pub fn boundaries_for(&self, direction: Direction) -> Boundaries {
        match direction {
            Direction::Forward => self.forward,
            Direction::Reverse => self.reverse,
        }
    }

    // ── Direction ─────────────────────────────────────────────────────────

    /// Toggle the traversal direction.
    #[inline]
    pub fn invert(&mut self) {
        self.inverted = !self.inverted;
    }

    #[inline]
    pub fn currently_inverted(&self) -> bool {
        self.inverted
    }

    #[inline]
    pub fn direction(&self) -> Direction {
        if self.inverted { Direction::Reverse } else { Direction::Forward }
    }

    /// The side to announce from in the current direction.
    ///
    /// Side `A` is the end of the shared run listed first.  Two routes only
    /// agree on sides when they list the run in the same order.
    #[inline]
    pub fn entry_side(&self) -> EntrySide {
        EntrySide::for_inverted(self.inverted)
    }

    // ── Layout accessors ──────────────────────────────────────────────────

    pub fn checkpoints(&self) -> &[CheckpointId] {
        &self.checkpoints
    }

    pub fn shared(&self) -> &[CheckpointId] {
        &self.shared
    }

    /// Switch settings to apply once the agent owns the segment.
    pub fn switches(&self) -> &[SwitchSetting] {
        &self.switches
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Start index of `run` as a contiguous slice of `haystack`.
fn find_run(haystack: &[CheckpointId], run: &[CheckpointId]) -> Option<usize> {
    if run.len() > haystack.len() {
        return None;
    }
    haystack.windows(run.len()).position(|w| w == run)
}

/// Derive the boundaries of one direction from its lap view.
fn derive(
    lap:       &[CheckpointId],
    run:       &[CheckpointId],
    direction: Direction,
) -> RouteResult<Boundaries> {
    let start = find_run(lap, run).ok_or(RouteError::SegmentNotContiguous)?;

    let announce = start
        .checked_sub(ANNOUNCE_LEAD)
        .ok_or(RouteError::BoundaryOutsideLap { direction, role: "announce" })?;
    let exit = start + run.len();
    if exit >= lap.len() {
        return Err(RouteError::BoundaryOutsideLap { direction, role: "exit" });
    }

    Ok(Boundaries {
        announce: lap[announce],
        entry:    lap[start - 1],
        exit:     lap[exit],
    })
}
