//! Top-level simulation configuration.

use crate::{CoreError, CoreResult};

/// All tunables of one simulation run.
///
/// Typically built with `SimConfig::default()` and a few overrides, or loaded
/// from JSON by the application crate (enable the `serde` feature).  Missing
/// JSON fields fall back to their defaults.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimConfig {
    // ── World ─────────────────────────────────────────────────────────────
    /// City grid width in tiles.
    pub columns: i32,
    /// City grid height in tiles.
    pub rows: i32,
    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,

    // ── Path solvers ──────────────────────────────────────────────────────
    /// Node expansions the vehicle solver may perform per `advance()`.
    pub vehicle_iterations_per_advance: u32,
    /// Node expansions the planning solver may perform per `advance()`.
    pub planning_iterations_per_advance: u32,

    // ── Agent fatigue model (milliseconds) ────────────────────────────────
    /// Fatigue of a freshly spawned agent.
    pub initial_fatigue: f32,
    /// Fatigue recovered per ms while Resting or Shopping, before the amenity multiplier.
    pub recovery_rate: f32,
    /// Fatigue accrued per ms while Driving.
    pub driving_fatigue_rate: f32,
    /// Fatigue accrued per ms while Working.
    pub work_rate: f32,
    /// Working agents above this fatigue head for a shop.
    pub work_fatigue_limit: f32,
    /// Shopping agents below this fatigue head home.
    pub shop_satisfied_fatigue: f32,
    /// Back-off before retrying after a failed path request.
    pub no_path_backoff_ms: f32,
    /// Half-width of the square amenity window (4 → 9×9 tiles).
    pub amenity_radius: i32,

    // ── Vehicles (fine-grid units) ────────────────────────────────────────
    /// Slowest cruising speed, cells per second.
    pub min_vehicle_speed: f32,
    /// Fastest cruising speed, cells per second.
    pub max_vehicle_speed: f32,
    /// Fraction of cruising speed used while another vehicle blocks the way.
    pub throttle_factor: f32,
    /// Distance of the front/back probe points from the vehicle centre.
    pub probe_offset: f32,
    /// Touch radius used by the collision probe.
    pub touch_radius: f32,

    // ── Tiles ─────────────────────────────────────────────────────────────
    /// Capacity of each tile's `recent_paths` ring buffer.
    pub recent_paths_capacity: usize,
    /// Run the built-in building growth sweep.
    pub growth_enabled: bool,
    /// Possible construction countdowns, in ticks.
    pub growth_timers: Vec<u32>,

    // ── Output metric ─────────────────────────────────────────────────────
    /// Output contribution per ms per Working or Shopping agent.
    pub output_rate: f32,
    /// Multiplicative per-tick decay of the output metric.
    pub output_decay: f32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            columns: 30,
            rows:    24,
            seed:    42,

            vehicle_iterations_per_advance:  1000,
            planning_iterations_per_advance: 1000,

            initial_fatigue:        2000.0,
            recovery_rate:          0.5,
            driving_fatigue_rate:   0.25,
            work_rate:              1.0,
            work_fatigue_limit:     4000.0,
            shop_satisfied_fatigue: 3000.0,
            no_path_backoff_ms:     4000.0,
            amenity_radius:         4,

            min_vehicle_speed: 2.25,
            max_vehicle_speed: 5.625,
            throttle_factor:   0.1,
            probe_offset:      0.25,
            touch_radius:      0.3,

            recent_paths_capacity: 7,
            growth_enabled:        true,
            growth_timers:         vec![100, 150, 200, 250, 300],

            output_rate:  0.001,
            output_decay: 0.999,
        }
    }
}

impl SimConfig {
    /// Reject configurations the simulation cannot run with.
    pub fn validate(&self) -> CoreResult<()> {
        if self.columns <= 0 || self.rows <= 0 {
            return Err(CoreError::Config(format!(
                "grid must be non-empty, got {}x{}",
                self.columns, self.rows
            )));
        }
        if self.vehicle_iterations_per_advance == 0 || self.planning_iterations_per_advance == 0 {
            return Err(CoreError::Config("solver iteration budget must be positive".into()));
        }
        if !(self.min_vehicle_speed > 0.0 && self.min_vehicle_speed <= self.max_vehicle_speed) {
            return Err(CoreError::Config(format!(
                "invalid vehicle speed range {}..={}",
                self.min_vehicle_speed, self.max_vehicle_speed
            )));
        }
        if !(0.0..=1.0).contains(&self.throttle_factor) || self.throttle_factor == 0.0 {
            return Err(CoreError::Config("throttle_factor must be in (0, 1]".into()));
        }
        if self.shop_satisfied_fatigue >= self.work_fatigue_limit {
            return Err(CoreError::Config(
                "shop_satisfied_fatigue must be below work_fatigue_limit".into(),
            ));
        }
        if self.recent_paths_capacity == 0 {
            return Err(CoreError::Config("recent_paths_capacity must be positive".into()));
        }
        if self.growth_enabled && self.growth_timers.is_empty() {
            return Err(CoreError::Config("growth_timers must not be empty".into()));
        }
        Ok(())
    }
}
