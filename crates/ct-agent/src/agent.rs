//! A single simulated resident.

use ct_core::{AgentId, AgentRng, RequestId, TileCoord};
use ct_grid::{BuildingKind, CityGrid};
use ct_mobility::Vehicle;

use crate::AgentState;

/// One resident.  Created when a Residential building completes and owned by
/// the [`AgentStore`][crate::AgentStore].
///
/// Invariant: `vehicle.is_some()` iff `state == Driving`.
#[derive(Debug, Clone)]
pub struct Agent {
    pub id:                 AgentId,
    pub home:               TileCoord,
    pub workplace:          Option<TileCoord>,
    pub shop:               Option<TileCoord>,
    pub current:            TileCoord,
    /// Set only while a trip is being requested or driven.
    pub destination:        Option<TileCoord>,
    pub state:              AgentState,
    pub fatigue:            f32,
    /// Remaining back-off in ms; present exactly while in `NoPath`.
    pub no_path_timer:      Option<f32>,
    pub vehicle:            Option<Vehicle>,
    /// The outstanding vehicle-solver request, if any.
    pub pending_request:    Option<RequestId>,
    pub marked_for_removal: bool,
    pub(crate) rng:         AgentRng,
}

impl Agent {
    /// A freshly spawned resident, resting at home.
    pub fn new(id: AgentId, home: TileCoord, fatigue: f32, seed: u64) -> Self {
        Self {
            id,
            home,
            workplace:          None,
            shop:               None,
            current:            home,
            destination:        None,
            state:              AgentState::Resting,
            fatigue,
            no_path_timer:      None,
            vehicle:            None,
            pending_request:    None,
            marked_for_removal: false,
            rng:                AgentRng::new(seed, id),
        }
    }

    #[inline]
    pub fn is_home(&self) -> bool {
        self.current == self.home
    }

    /// Record the solver request submitted on this agent's behalf.
    #[inline]
    pub fn await_path(&mut self, id: RequestId) {
        self.pending_request = Some(id);
    }

    /// `true` while the "unreachable" indicator over the agent's tile should
    /// be shown.
    #[inline]
    pub fn shows_unreachable(&self) -> bool {
        self.state == AgentState::NoPath && self.no_path_timer.is_some_and(|t| t >= 0.0)
    }

    /// `true` if the agent's home tile still carries a Residential building.
    pub fn home_exists(&self, grid: &CityGrid) -> bool {
        grid.get(self.home)
            .is_some_and(|t| t.has_building(BuildingKind::Residential))
    }
}
