use tc_agent::AgentError;
use tc_core::{AgentId, TcError};
use tc_route::RouteError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("run configuration error: {0}")]
    Config(String),

    #[error("a shared segment needs exactly {expected} agents, the layout has {got}")]
    AgentCountMismatch {
        expected: usize,
        got:      usize,
    },

    #[error("{0} thread panicked")]
    AgentPanicked(AgentId),

    #[error("could not spawn agent thread: {0}")]
    Spawn(#[from] std::io::Error),

    #[error(transparent)]
    Agent(#[from] AgentError),

    #[error(transparent)]
    Route(#[from] RouteError),

    #[error(transparent)]
    Core(#[from] TcError),
}

pub type SimResult<T> = Result<T, SimError>;
