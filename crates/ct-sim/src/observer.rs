//! Simulation observer trait for progress reporting and data collection.

use ct_agent::Agent;
use ct_core::{AgentId, Tick, TileCoord};

/// What happened during one tick.  Passed to [`SimObserver::on_tick_end`]
/// and returned from [`SimulationWorld::tick`][crate::SimulationWorld::tick].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TickSummary {
    pub tick:           Tick,
    pub dt_ms:          f32,
    /// Vehicle and planning requests resolved in the solver phase.
    pub paths_resolved: usize,
    /// Agents owning a vehicle after the sweep.
    pub driving:        usize,
    pub spawned:        usize,
    pub removed:        usize,
    /// Population after the removal phase.
    pub agents:         usize,
    /// Output metric after decay.
    pub output:         f32,
}

/// Callbacks invoked by [`SimulationWorld::tick_observed`][crate::SimulationWorld::tick_observed]
/// at key points of a tick.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example: progress printer
///
/// ```rust,ignore
/// struct ProgressPrinter { interval: u64 }
///
/// impl SimObserver for ProgressPrinter {
///     fn on_tick_end(&mut self, summary: &TickSummary) {
///         if summary.tick.0 % self.interval == 0 {
///             println!("{}: {} agents, {} driving", summary.tick, summary.agents, summary.driving);
///         }
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each tick, before any processing.
    fn on_tick_start(&mut self, _tick: Tick) {}

    fn on_tick_end(&mut self, _summary: &TickSummary) {}

    /// A Residential building completed during the growth phase and spawned
    /// a resident.
    fn on_agent_spawned(&mut self, _agent: AgentId, _home: TileCoord) {}

    /// Called once per agent compacted out of the store, with its final state.
    fn on_agent_removed(&mut self, _agent: &Agent) {}

    /// Called once after [`SimulationWorld::run_ticks`][crate::SimulationWorld::run_ticks].
    fn on_sim_end(&mut self, _final_tick: Tick) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
