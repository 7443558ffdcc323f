//! Read-only simulation state passed to every agent step.

use ct_core::SimConfig;
use ct_grid::CityGrid;

/// A read-only snapshot shared by all agents during one sweep.
///
/// Built once per tick by the world.  The city grid cannot change while the
/// context is alive, so every agent in the sweep sees the same map.
pub struct AgentContext<'a> {
    pub grid:   &'a CityGrid,
    pub config: &'a SimConfig,
    /// Elapsed simulated time this tick, in milliseconds.
    pub dt_ms:  f32,
}

impl<'a> AgentContext<'a> {
    #[inline]
    pub fn new(grid: &'a CityGrid, config: &'a SimConfig, dt_ms: f32) -> Self {
        Self { grid, config, dt_ms }
    }
}
