//! The tick loop.

use ct_agent::{AgentContext, Intent, PathDelivery, apply_path, enter_no_path, step};
use ct_core::{AgentId, CellCoord, TileCoord};
use ct_mobility::{TrafficSnapshot, Vehicle, throttle_flags};
use ct_path::{PathOutcome, PlanningGrid, Resolution, VehicleGrid};
use rustc_hash::FxHashSet;

use crate::{NoopObserver, PathTicket, SimObserver, SimResult, SimulationWorld, TickSummary};

impl SimulationWorld {
    // ── Public API ────────────────────────────────────────────────────────

    /// Advance the world by one tick of `dt_ms` simulated milliseconds.
    pub fn tick(&mut self, dt_ms: f32) -> SimResult<TickSummary> {
        self.tick_observed(dt_ms, &mut NoopObserver)
    }

    /// [`tick`](Self::tick) with observer callbacks.
    ///
    /// Phases, in order:
    ///
    /// 1. **Solvers**: advance the vehicle and planning solvers and deliver
    ///    their resolutions, so transitions they trigger are visible to the
    ///    sweep below.
    /// 2. **Sweep**: snapshot vehicle probes, decide throttles, then step
    ///    every agent in spawn order and apply its intents.
    /// 3. **Removal**: cancel the requests of marked agents and compact the
    ///    store.
    /// 4. **Growth**: construction countdowns on zoned, unbuilt tiles.
    /// 5. **Bookkeeping**: decay the output metric and advance the clock.
    pub fn tick_observed<O: SimObserver>(
        &mut self,
        dt_ms:    f32,
        observer: &mut O,
    ) -> SimResult<TickSummary> {
        let now = self.clock.current_tick;
        observer.on_tick_start(now);

        // ── Phase 1: path solvers ─────────────────────────────────────────
        let paths_resolved = self.advance_solvers();

        // ── Phase 2: agent sweep ──────────────────────────────────────────
        self.sweep_agents(dt_ms)
            .inspect_err(|e| tracing::error!(tick = %now, error = %e, "agent sweep aborted"))?;

        // ── Phase 3: deferred removal ─────────────────────────────────────
        let removed = self.remove_marked(observer);

        // ── Phase 4: growth ───────────────────────────────────────────────
        let spawned = if self.config.growth_enabled { self.grow()? } else { Vec::new() };
        for &(agent, home) in &spawned {
            observer.on_agent_spawned(agent, home);
        }

        // ── Phase 5: output metric and clock ──────────────────────────────
        self.output *= self.config.output_decay;
        self.clock.advance(dt_ms);

        let summary = TickSummary {
            tick: now,
            dt_ms,
            paths_resolved,
            driving: self.agents.iter().filter(|a| a.vehicle.is_some()).count(),
            spawned: spawned.len(),
            removed,
            agents: self.agents.len(),
            output: self.output,
        };
        observer.on_tick_end(&summary);
        Ok(summary)
    }

    /// Run exactly `n` ticks of `dt_ms` each, then call
    /// [`SimObserver::on_sim_end`].
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, dt_ms: f32, observer: &mut O) -> SimResult<()> {
        for _ in 0..n {
            self.tick_observed(dt_ms, observer)?;
        }
        observer.on_sim_end(self.clock.current_tick);
        Ok(())
    }

    // ── Phase 1 ───────────────────────────────────────────────────────────

    fn advance_solvers(&mut self) -> usize {
        let vehicle = self.vehicle_solver.advance(&VehicleGrid::new(&self.fine));
        let mut resolved = vehicle.len();
        for res in vehicle {
            match res.token {
                PathTicket::Agent { agent, departure, destination } => {
                    self.deliver(agent, departure, destination, res);
                }
                PathTicket::External => self.vehicle_results.push(res),
            }
        }

        let planning = self.planning_solver.advance(&PlanningGrid::new(&self.grid));
        resolved += planning.len();
        for res in planning {
            if !self.preview.accept(&res) {
                self.planning_results.push(res);
            }
        }
        resolved
    }

    /// Hand a vehicle resolution to its agent and record a departing path on
    /// the departure tile.
    fn deliver(
        &mut self,
        id:          AgentId,
        departure:   TileCoord,
        destination: TileCoord,
        res:         Resolution<CellCoord, PathTicket>,
    ) {
        let Some(agent) = self.agents.get_mut(id) else {
            tracing::warn!(agent = %id, request = %res.id, "path resolved for a removed agent");
            return;
        };
        let path = match &res.outcome {
            PathOutcome::Found(p) if !p.is_empty() => Some(p.clone()),
            _ => None,
        };
        let delivery = apply_path(agent, res.id, destination, res.outcome, &self.config);
        if delivery != PathDelivery::Driving {
            return;
        }
        if let (Some(path), Some(tile)) = (path, self.grid.get_mut(departure)) {
            tile.recent_paths.push(path, self.config.recent_paths_capacity);
        }
    }

    // ── Phase 2 ───────────────────────────────────────────────────────────

    /// Agents whose vehicle is blocked at the start of this tick.
    fn throttled_agents(&self) -> FxHashSet<AgentId> {
        let driving: Vec<(AgentId, &Vehicle)> = self
            .agents
            .iter()
            .filter_map(|a| a.vehicle.as_ref().map(|v| (a.id, v)))
            .collect();
        if driving.len() < 2 {
            return FxHashSet::default();
        }
        let snapshot = TrafficSnapshot::build(driving.iter().copied());
        throttle_flags(&snapshot, &driving)
            .into_iter()
            .zip(&driving)
            .filter_map(|(blocked, &(id, _))| blocked.then_some(id))
            .collect()
    }

    fn sweep_agents(&mut self, dt_ms: f32) -> SimResult<()> {
        let throttled = self.throttled_agents();

        // Explicit field borrows so the borrow checker sees disjoint access.
        let grid    = &self.grid;
        let config  = &self.config;
        let solver  = &mut self.vehicle_solver;
        let output  = &mut self.output;
        let ctx     = AgentContext::new(grid, config, dt_ms);

        for agent in self.agents.iter_mut() {
            let blocked = throttled.contains(&agent.id);
            for intent in step(agent, &ctx, blocked)? {
                match intent {
                    Intent::RequestPath { from, to } => {
                        let entrance = |t: TileCoord| grid.get(t).and_then(|tile| tile.path_entrance);
                        match entrance(from).zip(entrance(to)) {
                            Some((origin, target)) => {
                                let ticket = PathTicket::Agent {
                                    agent:       agent.id,
                                    departure:   from,
                                    destination: to,
                                };
                                agent.await_path(solver.submit(origin, target, ticket));
                            }
                            None => {
                                tracing::debug!(agent = %agent.id, %from, %to, "trip endpoint has no road access");
                                enter_no_path(agent, config);
                            }
                        }
                    }
                    Intent::EmitOutput(amount) => *output += amount,
                }
            }
        }
        Ok(())
    }

    // ── Phase 3 ───────────────────────────────────────────────────────────

    fn remove_marked<O: SimObserver>(&mut self, observer: &mut O) -> usize {
        for agent in self.agents.iter().filter(|a| a.marked_for_removal) {
            if let Some(request) = agent.pending_request {
                self.vehicle_solver.cancel(request);
            }
        }
        let removed = self.agents.remove_marked();
        for agent in &removed {
            tracing::info!(agent = %agent.id, home = %agent.home, state = %agent.state, "agent removed");
            observer.on_agent_removed(agent);
        }
        removed.len()
    }
}
