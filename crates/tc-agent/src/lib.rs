//! `tc-agent`: the per-locomotive control loop.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                   |
//! |--------------|------------------------------------------------------------|
//! | [`behavior`] | `AgentBehavior<D>`, `Step`                                 |
//! | [`report`]   | `AgentReport`, counters returned when a run ends           |
//! | [`error`]    | `AgentError`, `AgentResult<T>`                             |
//!
//! `AgentBehavior` owns its [`RouteModel`][tc_route::RouteModel] and shares
//! the [`SharedSegment`][tc_segment::SharedSegment] and the driver with the
//! other agent through `Arc`s.  Nothing is global: two loops on two threads
//! coordinate only through the segment instance they were given.

pub mod behavior;
pub mod error;
pub mod report;


pub use behavior::{AgentBehavior, Step};
pub use error::{AgentError, AgentResult};
pub use report::AgentReport;
