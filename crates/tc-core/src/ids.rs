//! Strongly typed identifier wrappers.
//!
//! All IDs are `Copy + Ord + Hash` so they work as map keys and in sorted
//! collections.  The inner integer is `pub` because layouts are described by
//! the raw contact/switch numbers printed on the physical track.

use std::fmt;

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// The raw number as used by the track hardware.
            #[inline(always)]
            pub fn raw(self) -> $inner {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl From<$inner> for $name {
            #[inline(always)]
            fn from(n: $inner) -> Self {
                $name(n)
            }
        }
    };
}

typed_id! {
    /// Identity of a locomotive taking part in the shared-segment protocol.
    pub struct AgentId(u32);
}

typed_id! {
    /// A contact sensor on the track.  Locomotives report their position
    /// one checkpoint at a time.
    pub struct CheckpointId(u32);
}

typed_id! {
    /// A railway switch (turnout) that can be thrown straight or diverted.
    pub struct SwitchId(u32);
}
