//! The tick-driven agent state machine.
//!
//! | State         | Per tick                                   | Exit                                         |
//! |---------------|--------------------------------------------|----------------------------------------------|
//! | Resting       | fatigue −= dt·recovery·amenity             | fatigue < 0 → GoToWork                       |
//! | GoToWork      | check workplace                            | none → FindWorkplace, else request → FindingPath |
//! | FindWorkplace | random scan for an Industrial building     | → Resting                                    |
//! | FindingPath   | wait for [`apply_path`]                    | path → Driving, none → NoPath                |
//! | Driving       | move vehicle, fatigue += dt·driving        | arrival → by tile building kind              |
//! | Working       | fatigue += dt·work, emit output            | fatigue > limit → GoToShop                   |
//! | GoToShop      | check shop                                 | none → FindShop, else request → FindingPath  |
//! | FindShop      | random scan for a Commercial building      | → Working                                    |
//! | Shopping      | fatigue −= dt·recovery·amenity, emit output| fatigue < satisfied → GoHome                 |
//! | GoHome        | request home → FindingPath                 | —                                            |
//! | NoPath        | timer −= dt                                | timer < 0 → GoToWork at home, else GoHome    |
//!
//! Stale references (a workplace, shop or home whose building is gone) are
//! detected lazily when the agent next needs them.

use ct_core::{CellCoord, RequestId, SimConfig, TileCoord};
use ct_grid::{BuildingKind, CityGrid, amenity_bonus, commercial_count};
use ct_mobility::{MoveOutcome, Vehicle};
use ct_path::PathOutcome;

use crate::{Agent, AgentContext, AgentError, AgentResult, AgentState, Intent};

// ── Sweep step ────────────────────────────────────────────────────────────────

/// Advance one agent by `ctx.dt_ms`.
///
/// `throttled` is the collision decision for the agent's vehicle this tick
/// and is ignored unless the agent is Driving.
pub fn step(agent: &mut Agent, ctx: &AgentContext<'_>, throttled: bool) -> AgentResult<Vec<Intent>> {
    let cfg = ctx.config;
    let dt = ctx.dt_ms;
    let mut intents = Vec::new();

    match agent.state {
        AgentState::Resting => {
            let fatigue = agent.fatigue - recovery(agent, ctx);
            if fatigue < 0.0 {
                agent.fatigue = 0.0;
                transition(agent, AgentState::GoToWork);
            } else {
                agent.fatigue = fatigue;
            }
        }

        AgentState::GoToWork => {
            if !agent.home_exists(ctx.grid) {
                mark_homeless(agent);
                return Ok(intents);
            }
            drop_stale(&mut agent.workplace, ctx.grid, BuildingKind::Industrial);
            match agent.workplace {
                None => transition(agent, AgentState::FindWorkplace),
                Some(work) => intents.push(request_path(agent, work)),
            }
        }

        AgentState::FindWorkplace => {
            if let Some(found) = random_scan(agent, ctx.grid, BuildingKind::Industrial) {
                tracing::debug!(agent = %agent.id, %found, "workplace assigned");
                agent.workplace = Some(found);
            }
            transition(agent, AgentState::Resting);
        }

        AgentState::FindingPath => {}

        AgentState::Driving => {
            let Some(vehicle) = agent.vehicle.as_mut() else {
                tracing::error!(agent = %agent.id, "driving without a vehicle");
                return Err(AgentError::MissingVehicle(agent.id));
            };
            // Fatigue moves only once `arrive` has dropped the vehicle.
            if vehicle.step(dt, throttled, cfg.throttle_factor) == MoveOutcome::Arrived {
                arrive(agent, ctx.grid);
            }
            agent.fatigue += dt * cfg.driving_fatigue_rate;
        }

        AgentState::Working => {
            agent.fatigue += dt * cfg.work_rate;
            intents.push(Intent::EmitOutput(dt * cfg.output_rate));
            if agent.fatigue > cfg.work_fatigue_limit {
                transition(agent, AgentState::GoToShop);
            }
        }

        AgentState::GoToShop => {
            if !agent.home_exists(ctx.grid) {
                mark_homeless(agent);
                return Ok(intents);
            }
            drop_stale(&mut agent.shop, ctx.grid, BuildingKind::Commercial);
            match agent.shop {
                None => transition(agent, AgentState::FindShop),
                Some(shop) => intents.push(request_path(agent, shop)),
            }
        }

        AgentState::FindShop => {
            if let Some(found) = random_scan(agent, ctx.grid, BuildingKind::Commercial) {
                tracing::debug!(agent = %agent.id, %found, "shop assigned");
                agent.shop = Some(found);
            }
            transition(agent, AgentState::Working);
        }

        AgentState::Shopping => {
            agent.fatigue = (agent.fatigue - recovery(agent, ctx)).max(0.0);
            intents.push(Intent::EmitOutput(dt * cfg.output_rate));
            if agent.fatigue < cfg.shop_satisfied_fatigue {
                transition(agent, AgentState::GoHome);
            }
        }

        AgentState::GoHome => {
            if !agent.home_exists(ctx.grid) {
                mark_homeless(agent);
            } else if agent.is_home() {
                transition(agent, AgentState::Resting);
            } else {
                let home = agent.home;
                intents.push(request_path(agent, home));
            }
        }

        AgentState::NoPath => {
            let Some(timer) = agent.no_path_timer else {
                tracing::error!(agent = %agent.id, "no-path state without a timer");
                return Err(AgentError::MissingNoPathTimer(agent.id));
            };
            let timer = timer - dt;
            if timer < 0.0 {
                agent.no_path_timer = None;
                let next = if agent.is_home() { AgentState::GoToWork } else { AgentState::GoHome };
                transition(agent, next);
            } else {
                agent.no_path_timer = Some(timer);
            }
        }
    }

    Ok(intents)
}

// ── Path delivery ─────────────────────────────────────────────────────────────

/// What [`apply_path`] did with a resolution.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum PathDelivery {
    /// A vehicle was created and the agent is Driving.
    Driving,
    /// The path was absent or empty; the agent is in NoPath.
    NoPath,
    /// The agent is no longer waiting for this request; nothing changed.
    Stale,
}

/// Apply a vehicle-solver resolution for `request`, which was submitted for
/// a trip to `destination`.
pub fn apply_path(
    agent: &mut Agent,
    request: RequestId,
    destination: TileCoord,
    outcome: PathOutcome<CellCoord>,
    cfg: &SimConfig,
) -> PathDelivery {
    if agent.state != AgentState::FindingPath
        || agent.pending_request != Some(request)
        || agent.destination != Some(destination)
    {
        tracing::warn!(
            agent = %agent.id,
            %request,
            state = %agent.state,
            "stale path delivery dropped"
        );
        return PathDelivery::Stale;
    }

    agent.pending_request = None;
    match outcome.into_path() {
        Some(path) => {
            let speed = agent.rng.gen_range(cfg.min_vehicle_speed..=cfg.max_vehicle_speed);
            agent.vehicle = Some(Vehicle::new(path, speed, cfg.probe_offset, cfg.touch_radius));
            transition(agent, AgentState::Driving);
            PathDelivery::Driving
        }
        None => {
            enter_no_path(agent, cfg);
            PathDelivery::NoPath
        }
    }
}

/// Give up on the current trip and back off.
pub fn enter_no_path(agent: &mut Agent, cfg: &SimConfig) {
    agent.vehicle = None;
    agent.pending_request = None;
    agent.destination = None;
    agent.no_path_timer = Some(cfg.no_path_backoff_ms);
    transition(agent, AgentState::NoPath);
}

// ── Internals ─────────────────────────────────────────────────────────────────

fn transition(agent: &mut Agent, to: AgentState) {
    if agent.state != to {
        tracing::debug!(agent = %agent.id, from = %agent.state, %to, "state transition");
        agent.state = to;
    }
}

/// Fatigue recovered this tick, scaled by the commerce around the agent.
fn recovery(agent: &Agent, ctx: &AgentContext<'_>) -> f32 {
    let commercial = commercial_count(ctx.grid, agent.current, ctx.config.amenity_radius);
    ctx.dt_ms * ctx.config.recovery_rate * amenity_bonus(commercial)
}

/// Enter FindingPath towards `to` and produce the matching request.
fn request_path(agent: &mut Agent, to: TileCoord) -> Intent {
    agent.destination = Some(to);
    agent.pending_request = None;
    transition(agent, AgentState::FindingPath);
    Intent::RequestPath { from: agent.current, to }
}

/// Clear an assignment whose building is gone.
fn drop_stale(slot: &mut Option<TileCoord>, grid: &CityGrid, kind: BuildingKind) {
    if let Some(t) = *slot {
        if !grid.get(t).is_some_and(|tile| tile.has_building(kind)) {
            tracing::debug!(tile = %t, ?kind, "assignment dropped, building gone");
            *slot = None;
        }
    }
}

fn mark_homeless(agent: &mut Agent) {
    if !agent.marked_for_removal {
        tracing::info!(agent = %agent.id, home = %agent.home, "home gone, agent leaves the city");
        agent.marked_for_removal = true;
    }
}

/// The vehicle emptied its queue: drop it, then dispatch on what stands at
/// the arrival tile.
fn arrive(agent: &mut Agent, grid: &CityGrid) {
    agent.vehicle = None;
    if let Some(here) = agent.destination.take() {
        agent.current = here;
    }
    match grid.get(agent.current).and_then(|t| t.building) {
        Some(BuildingKind::Industrial) => transition(agent, AgentState::Working),
        Some(BuildingKind::Residential) => transition(agent, AgentState::Resting),
        Some(BuildingKind::Commercial) => transition(agent, AgentState::Shopping),
        None => {
            drop_stale(&mut agent.workplace, grid, BuildingKind::Industrial);
            drop_stale(&mut agent.shop, grid, BuildingKind::Commercial);
            if !agent.home_exists(grid) {
                mark_homeless(agent);
            }
            transition(agent, AgentState::GoHome);
        }
    }
}

/// First tile carrying a `kind` building, visiting rows and columns in
/// freshly shuffled orders.
fn random_scan(agent: &mut Agent, grid: &CityGrid, kind: BuildingKind) -> Option<TileCoord> {
    let rows = agent.rng.shuffled_indices(grid.rows());
    let cols = agent.rng.shuffled_indices(grid.columns());
    rows.iter()
        .flat_map(|&r| cols.iter().map(move |&c| TileCoord::new(c, r)))
        .find(|&t| grid.get(t).is_some_and(|tile| tile.has_building(kind)))
}
