//! Agent life-cycle states.

use std::fmt;

/// Where an agent is in its daily loop.
///
/// ```text
/// Resting ──► GoToWork ──► FindingPath ──► Driving ──► Working
///                │                                        │
///                └──► FindWorkplace ──► Resting           ▼
///                                                      GoToShop ──► FindingPath ──► Driving ──► Shopping
///                                                         │                                        │
///                                                         └──► FindShop ──► Working                ▼
///                                                                         Resting ◄── Driving ◄── GoHome
/// ```
///
/// A failed path request from `FindingPath` leads to `NoPath`, which backs
/// off and then retries from home (`GoToWork`) or elsewhere (`GoHome`).
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AgentState {
    Resting,
    GoToWork,
    FindWorkplace,
    /// Waiting for the vehicle solver.
    FindingPath,
    /// The only state in which the agent owns a vehicle.
    Driving,
    Working,
    GoToShop,
    FindShop,
    Shopping,
    GoHome,
    /// A path request failed; waiting out the back-off timer.
    NoPath,
}

impl AgentState {
    pub const ALL: [AgentState; 11] = [
        AgentState::Resting,
        AgentState::GoToWork,
        AgentState::FindWorkplace,
        AgentState::FindingPath,
        AgentState::Driving,
        AgentState::Working,
        AgentState::GoToShop,
        AgentState::FindShop,
        AgentState::Shopping,
        AgentState::GoHome,
        AgentState::NoPath,
    ];

    /// States that contribute to the output metric.
    #[inline]
    pub fn is_productive(self) -> bool {
        matches!(self, AgentState::Working | AgentState::Shopping)
    }
}

impl fmt::Display for AgentState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}
