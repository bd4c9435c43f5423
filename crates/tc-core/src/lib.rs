//! `tc-core`: foundational types for the shared-segment track controller.
//!
//! This crate is a dependency of every other `tc-*` crate.  It has no `tc-*`
//! dependencies and only `thiserror` (plus optional `serde`) as external ones.
//!
//! # What lives here
//!
//! | Module       | Contents                                                  |
//! |--------------|-----------------------------------------------------------|
//! | [`ids`]      | `AgentId`, `CheckpointId`, `SwitchId`                     |
//! | [`side`]     | `EntrySide`, `Direction`, `SwitchPosition`                |
//! | [`config`]   | `RunConfig`                                               |
//! | [`driver`]   | `TrackDriver` trait, the physical/simulated track seam    |
//! | [`error`]    | `TcError`, `TcResult`                                     |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public data types.   |

pub mod config;
pub mod driver;
pub mod error;
pub mod ids;
pub mod side;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::RunConfig;
pub use driver::TrackDriver;
pub use error::{TcError, TcResult};
pub use ids::{AgentId, CheckpointId, SwitchId};
pub use side::{Direction, EntrySide, SwitchPosition};
