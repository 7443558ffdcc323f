use ct_agent::AgentError;
use ct_core::CoreError;
use ct_grid::GridError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("grid error: {0}")]
    Grid(#[from] GridError),

    #[error("agent state machine invariant violated: {0}")]
    Agent(#[from] AgentError),
}

pub type SimResult<T> = Result<T, SimError>;
