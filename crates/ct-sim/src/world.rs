//! The `SimulationWorld` struct: state ownership, tile mutation and the
//! external path API.

use ct_agent::{Agent, AgentStore};
use ct_core::{AgentId, CellCoord, RequestId, SimClock, SimConfig, SimRng, TileCoord};
use ct_grid::{
    BuildingKind, CityGrid, FineGrid, GridError, Terrain, Zone, rebuild, reclassify_around,
    refresh_entrances_around,
};
use ct_path::{PathSolver, RoadPreview, Resolution};

use crate::SimResult;

// ── Solver tokens ─────────────────────────────────────────────────────────────

/// Context carried through the vehicle solver with every request.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum PathTicket {
    /// Submitted for an agent's trip from `departure` to `destination`.
    Agent {
        agent:       AgentId,
        departure:   TileCoord,
        destination: TileCoord,
    },
    /// Submitted through [`SimulationWorld::submit_vehicle_path`]; the
    /// resolution is queued for [`SimulationWorld::take_vehicle_results`].
    External,
}

// ── SimulationWorld ───────────────────────────────────────────────────────────

/// Explicit owner of all simulation state.
///
/// Holds the city and fine grids, both path solvers, the agent collection
/// and the output metric.  Nothing is global: two worlds in one process are
/// fully independent.
///
/// Tile mutations ([`set_terrain`](Self::set_terrain),
/// [`set_zone`](Self::set_zone), [`remove_building`](Self::remove_building),
/// [`complete_building`](Self::complete_building)) rewrite the fine grid
/// synchronously, so a solver `advance` never observes a half-updated tile.
///
/// Create via [`WorldBuilder`][crate::WorldBuilder] or [`SimulationWorld::new`].
pub struct SimulationWorld {
    pub config: SimConfig,
    pub clock:  SimClock,

    pub(crate) grid:             CityGrid,
    pub(crate) fine:             FineGrid,
    pub(crate) vehicle_solver:   PathSolver<CellCoord, PathTicket>,
    pub(crate) planning_solver:  PathSolver<TileCoord, ()>,
    pub(crate) preview:          RoadPreview,
    pub(crate) agents:           AgentStore,
    pub(crate) rng:              SimRng,
    pub(crate) output:           f32,
    pub(crate) vehicle_results:  Vec<Resolution<CellCoord, PathTicket>>,
    pub(crate) planning_results: Vec<Resolution<TileCoord, ()>>,
}

impl SimulationWorld {
    /// An empty all-Forest world sized by `config`.
    pub fn new(config: SimConfig) -> SimResult<Self> {
        config.validate()?;
        let grid = CityGrid::new(config.columns, config.rows);
        let mut fine = FineGrid::for_city(config.columns, config.rows);
        rebuild(&grid, &mut fine);
        Ok(Self {
            clock:            SimClock::new(),
            grid,
            fine,
            vehicle_solver:   PathSolver::new("vehicle", config.vehicle_iterations_per_advance),
            planning_solver:  PathSolver::new("planning", config.planning_iterations_per_advance),
            preview:          RoadPreview::new(),
            agents:           AgentStore::new(),
            rng:              SimRng::new(config.seed),
            output:           0.0,
            vehicle_results:  Vec::new(),
            planning_results: Vec::new(),
            config,
        })
    }

    // ── Read access ───────────────────────────────────────────────────────

    #[inline]
    pub fn grid(&self) -> &CityGrid {
        &self.grid
    }

    #[inline]
    pub fn fine_grid(&self) -> &FineGrid {
        &self.fine
    }

    #[inline]
    pub fn agents(&self) -> &AgentStore {
        &self.agents
    }

    pub fn agent(&self, id: AgentId) -> Option<&Agent> {
        self.agents.get(id)
    }

    /// Current value of the output metric.
    #[inline]
    pub fn output(&self) -> f32 {
        self.output
    }

    /// Requests still queued in the vehicle solver.
    pub fn pending_vehicle_paths(&self) -> usize {
        self.vehicle_solver.pending()
    }

    pub fn pending_planning_paths(&self) -> usize {
        self.planning_solver.pending()
    }

    // ── Tile mutation ─────────────────────────────────────────────────────

    /// Paint `terrain` onto `tile`.
    ///
    /// Laying a road clears any zone and building on the tile first.
    pub fn set_terrain(&mut self, tile: TileCoord, terrain: Terrain) -> SimResult<()> {
        let current = self.grid.tile(tile)?;
        if current.terrain == terrain {
            return Ok(());
        }
        if terrain == Terrain::Road {
            self.clear_building(tile)?;
            let t = self.grid.tile_mut(tile)?;
            t.zone = None;
            t.growth_timer = None;
        }
        self.grid.tile_mut(tile)?.terrain = terrain;
        tracing::debug!(%tile, ?terrain, "terrain changed");
        self.on_tile_changed(tile);
        Ok(())
    }

    /// Zone `tile`, or clear its zoning with `None`.
    ///
    /// Zoning a Road tile turns it back to Forest.  A building that no longer
    /// matches the new zoning is removed.
    pub fn set_zone(&mut self, tile: TileCoord, zone: Option<Zone>) -> SimResult<()> {
        let current = self.grid.tile(tile)?;
        let was_road = current.is_road();
        let mismatched = current.building.is_some_and(|b| Some(b.zone()) != zone);
        if mismatched {
            self.clear_building(tile)?;
        }
        let t = self.grid.tile_mut(tile)?;
        if zone.is_some() && was_road {
            t.terrain = Terrain::Forest;
        }
        if t.zone != zone {
            t.growth_timer = None;
        }
        t.zone = zone;
        tracing::debug!(%tile, ?zone, "zone changed");
        self.on_tile_changed(tile);
        Ok(())
    }

    /// Demolish the building on `tile`, keeping its zoning.
    ///
    /// Residents currently at home are marked for removal and leave in the
    /// next removal phase; residents away find out when they next check.
    pub fn remove_building(&mut self, tile: TileCoord) -> SimResult<()> {
        self.clear_building(tile)?;
        self.on_tile_changed(tile);
        Ok(())
    }

    /// Finish construction of `kind` on `tile`.  The tile must be zoned for
    /// it.  A Residential building spawns its first resident, whose id is
    /// returned.
    pub fn complete_building(
        &mut self,
        tile: TileCoord,
        kind: BuildingKind,
    ) -> SimResult<Option<AgentId>> {
        let t = self.grid.tile_mut(tile)?;
        if t.zone != Some(kind.zone()) {
            return Err(GridError::ZoneMismatch { tile, zone: t.zone, building: kind }.into());
        }
        t.building = Some(kind);
        t.growth_timer = None;
        tracing::info!(%tile, ?kind, "building completed");
        self.on_tile_changed(tile);

        if kind != BuildingKind::Residential {
            return Ok(None);
        }
        let id = self.agents.spawn(tile, self.config.initial_fatigue, self.config.seed);
        tracing::info!(agent = %id, home = %tile, "agent spawned");
        Ok(Some(id))
    }

    /// Re-run road classification and entrance derivation around `tile`.
    ///
    /// Called by every mutation above.  Exposed for callers that edit tiles
    /// through other means.
    pub fn on_tile_changed(&mut self, tile: TileCoord) {
        reclassify_around(&self.grid, &mut self.fine, tile);
        refresh_entrances_around(&mut self.grid, tile);
    }

    fn clear_building(&mut self, tile: TileCoord) -> SimResult<()> {
        let t = self.grid.tile_mut(tile)?;
        let Some(kind) = t.building.take() else {
            return Ok(());
        };
        t.growth_timer = None;
        tracing::info!(%tile, ?kind, "building removed");

        if kind == BuildingKind::Residential {
            for agent in self.agents.iter_mut() {
                if agent.home == tile && agent.is_home() && !agent.marked_for_removal {
                    tracing::info!(agent = %agent.id, home = %tile, "home demolished, agent leaves");
                    agent.marked_for_removal = true;
                }
            }
        }
        Ok(())
    }

    // ── Path API ──────────────────────────────────────────────────────────

    /// Queue a vehicle path between two fine-grid cells.  The resolution is
    /// available from [`take_vehicle_results`](Self::take_vehicle_results)
    /// after the tick that resolves it.
    pub fn submit_vehicle_path(&mut self, origin: CellCoord, destination: CellCoord) -> RequestId {
        self.vehicle_solver.submit(origin, destination, PathTicket::External)
    }

    /// Cancel a vehicle request.  Its resolution is never delivered.
    pub fn cancel_vehicle_path(&mut self, id: RequestId) -> bool {
        self.vehicle_solver.cancel(id)
    }

    /// Queue a coarse tile path for planning tools.
    pub fn submit_planning_path(&mut self, origin: TileCoord, destination: TileCoord) -> RequestId {
        self.planning_solver.submit(origin, destination, ())
    }

    pub fn cancel_planning_path(&mut self, id: RequestId) -> bool {
        self.planning_solver.cancel(id)
    }

    /// Drain resolved external vehicle requests, in resolution order.
    pub fn take_vehicle_results(&mut self) -> Vec<Resolution<CellCoord, PathTicket>> {
        std::mem::take(&mut self.vehicle_results)
    }

    /// Drain resolved planning requests, excluding road-preview ones.
    pub fn take_planning_results(&mut self) -> Vec<Resolution<TileCoord, ()>> {
        std::mem::take(&mut self.planning_results)
    }

    /// Request a road preview `from → to`, replacing any outstanding one.
    pub fn preview_road(&mut self, from: TileCoord, to: TileCoord) -> RequestId {
        self.preview.request(&mut self.planning_solver, from, to, ())
    }

    /// The latest delivered preview path.
    pub fn road_preview(&self) -> &[TileCoord] {
        self.preview.path()
    }

    pub fn clear_road_preview(&mut self) {
        self.preview.clear(&mut self.planning_solver);
    }
}
