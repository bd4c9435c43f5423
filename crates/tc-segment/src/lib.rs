//! `tc-segment`: the shared-segment access controller.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                     |
//! |--------------|--------------------------------------------------------------|
//! | [`segment`]  | `SharedSegment`, `Admission`, `SegmentStatus`                |
//! | [`priority`] | `Priority`, `Request`, `resolve`                             |
//!
//! # Per-agent state machine
//!
//! ```text
//! IDLE ──announce──▶ REQUESTED ──acquire (granted)──▶ ACCESSING ──release──▶ IDLE
//!                        │                                ▲
//!                        └──acquire (denied)──▶ BLOCKED ──┘ (handed over on release)
//! ```
//!
//! Admission is granted when the segment is free and either no contested
//! round is open or the caller holds HIGH priority in it.  A release with a
//! parked agent transfers occupancy directly, so at most one agent ever
//! occupies the segment and no third party can slip in between.

pub mod priority;
pub mod segment;


pub use priority::{Priority, Request, resolve};
pub use segment::{Admission, SegmentStatus, SharedSegment};
