//! Built-in building growth.
//!
//! Every zoned tile without a building carries a construction countdown.  A
//! tile without one draws it from `SimConfig::growth_timers`; afterwards it
//! counts down once per tick and completes the building matching its zone
//! when it runs out.

use ct_core::{AgentId, TileCoord};

use crate::{SimResult, SimulationWorld};

impl SimulationWorld {
    /// Run one growth step over the whole grid.  Returns the residents
    /// spawned by completed Residential buildings.
    pub(crate) fn grow(&mut self) -> SimResult<Vec<(AgentId, TileCoord)>> {
        let candidates: Vec<TileCoord> = self
            .grid
            .iter()
            .filter(|(_, t)| t.zone.is_some() && t.building.is_none())
            .map(|(coord, _)| coord)
            .collect();

        let mut spawned = Vec::new();
        for coord in candidates {
            let tile = self.grid.tile_mut(coord)?;
            let Some(zone) = tile.zone else { continue };
            let remaining = match tile.growth_timer {
                Some(t) => t.saturating_sub(1),
                None => self.rng.choose(&self.config.growth_timers).copied().unwrap_or(0),
            };
            if remaining > 0 {
                tile.growth_timer = Some(remaining);
                continue;
            }
            if let Some(agent) = self.complete_building(coord, zone.building())? {
                spawned.push((agent, coord));
            }
        }
        Ok(spawned)
    }
}
