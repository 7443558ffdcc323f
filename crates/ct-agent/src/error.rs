use ct_core::AgentId;
use thiserror::Error;

/// Broken state-machine invariants.  These indicate a logic defect, never an
/// expected runtime condition.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AgentError {
    #[error("{0} is in NoPath without a back-off timer")]
    MissingNoPathTimer(AgentId),

    #[error("{0} is Driving without a vehicle")]
    MissingVehicle(AgentId),
}

pub type AgentResult<T> = Result<T, AgentError>;
