use tc_core::{AgentId, TcError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AgentError {
    #[error("{0} is not a party to the shared segment")]
    NotAParty(AgentId),

    #[error(transparent)]
    Core(#[from] TcError),
}

pub type AgentResult<T> = Result<T, AgentError>;
