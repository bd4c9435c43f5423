//! Framework error type.
//!
//! Sub-crates define their own error enums and wrap `TcError` as one variant
//! via `#[from]`.

use thiserror::Error;

use crate::AgentId;

/// The base error type shared by all `tc-*` crates.
#[derive(Debug, Error)]
pub enum TcError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("track driver shut down while {0} was travelling")]
    DriverShutdown(AgentId),

    #[error("{0} is not driven by this track")]
    UnknownAgent(AgentId),
}

/// Shorthand result type for all `tc-*` crates.
pub type TcResult<T> = Result<T, TcError>;
