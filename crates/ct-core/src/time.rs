//! Simulation time model.
//!
//! # Design
//!
//! Every call to `SimulationWorld::tick(dt)` advances a monotonically
//! increasing `Tick` counter by one and the elapsed simulated time by `dt`
//! milliseconds.  Unlike a fixed-step clock, `dt` may vary per tick (it is
//! typically the frame time of the presentation layer), so `SimClock` tracks
//! both quantities.

use std::fmt;

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute simulation tick counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// Return the tick `n` steps after `self`.
    #[inline]
    pub fn offset(self, n: u64) -> Tick {
        Tick(self.0 + n)
    }
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// Tick counter plus accumulated simulated milliseconds.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimClock {
    /// The current tick, advanced by [`SimClock::advance`] once per tick.
    pub current_tick: Tick,
    /// Simulated milliseconds elapsed since tick 0.
    pub elapsed_ms: f64,
}

impl SimClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the clock by one tick of `dt_ms` milliseconds.
    #[inline]
    pub fn advance(&mut self, dt_ms: f32) {
        self.current_tick = self.current_tick + 1;
        self.elapsed_ms += f64::from(dt_ms);
    }

    /// Elapsed simulated time as whole seconds.
    #[inline]
    pub fn elapsed_secs(&self) -> u64 {
        (self.elapsed_ms / 1000.0).max(0.0) as u64
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let secs = self.elapsed_secs();
        write!(f, "{} ({:02}:{:02})", self.current_tick, secs / 60, secs % 60)
    }
}
