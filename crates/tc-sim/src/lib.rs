//! `tc-sim`: run orchestration for the two-locomotive scenario.
//!
//! # Run lifecycle
//!
//! ```text
//! RunBuilder::new(config)
//!   .layout_csv(path)? / .route(agent, model)
//!   .build()?                 → SimulatedTrack + SharedSegment + 2 AgentBehaviors
//! Runner::run()
//!   ① spawn "loco-<id>" thread per agent → AgentBehavior::run
//!   ② join all threads
//!   ③ Vec<AgentReport>, or the first failure (panic → AgentPanicked)
//! ```
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use tc_core::RunConfig;
//! use tc_sim::RunBuilder;
//!
//! let config = RunConfig { total_laps: Some(4), step_millis: 20, ..RunConfig::default() };
//! let runner = RunBuilder::new(config).routes(layout).build()?;
//! let track = std::sync::Arc::clone(runner.driver());
//! for report in runner.run()? {
//!     println!("{report}");
//! }
//! assert_eq!(track.max_on_shared(), 1);
//! ```

pub mod builder;
pub mod error;
pub mod runner;
pub mod track;


pub use builder::RunBuilder;
pub use error::{SimError, SimResult};
pub use runner::Runner;
pub use track::{SimulatedTrack, TrackCommand};
