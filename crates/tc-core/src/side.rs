//! Direction-like enums shared by the translator, controller, and driver.

use std::fmt;

/// The side from which a locomotive approaches the shared segment.
///
/// Two locomotives arriving from the same side would follow each other into
/// the segment; arriving from different sides is a potential head-on
/// conflict.  The controller resolves priority differently in each case.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EntrySide {
    /// Side used while the route is traversed in its declared order.
    #[default]
    A,
    /// Side used while the route is inverted.
    B,
}

impl EntrySide {
    /// The side a locomotive approaches from given its route orientation.
    #[inline]
    pub fn for_inverted(inverted: bool) -> Self {
        if inverted { EntrySide::B } else { EntrySide::A }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            EntrySide::A => "A",
            EntrySide::B => "B",
        }
    }
}

impl fmt::Display for EntrySide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Travel direction of a locomotive along its loop.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    /// The declared checkpoint order.
    #[default]
    Forward,
    /// The mirrored order.
    Reverse,
}

impl Direction {
    #[inline]
    pub fn opposite(self) -> Self {
        match self {
            Direction::Forward => Direction::Reverse,
            Direction::Reverse => Direction::Forward,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Direction::Forward => "forward",
            Direction::Reverse => "reverse",
        })
    }
}

/// Position a railway switch can be thrown to.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SwitchPosition {
    Straight,
    Diverted,
}

impl SwitchPosition {
    pub fn as_str(self) -> &'static str {
        match self {
            SwitchPosition::Straight => "straight",
            SwitchPosition::Diverted => "diverted",
        }
    }
}

impl fmt::Display for SwitchPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
