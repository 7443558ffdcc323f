//! `ct-sim` — the simulation world and its tick loop.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                      |
//! |--------------|---------------------------------------------------------------|
//! | [`world`]    | `SimulationWorld` — state ownership, tile mutation, path API  |
//! | `tick`       | `tick`, `tick_observed`, `run_ticks` and the five tick phases |
//! | `growth`     | construction countdowns on zoned tiles                        |
//! | [`builder`]  | `WorldBuilder` — fluent world construction                    |
//! | [`observer`] | `SimObserver` trait, `TickSummary`, `NoopObserver`            |
//! | [`error`]    | `SimError`, `SimResult<T>`                                    |
//!
//! # Quick start
//!
//! ```rust,ignore
//! use ct_core::{SimConfig, TileCoord};
//! use ct_grid::BuildingKind;
//! use ct_sim::{NoopObserver, WorldBuilder};
//!
//! let mut world = WorldBuilder::new(SimConfig::default())
//!     .road_line(TileCoord::new(1, 1), TileCoord::new(8, 1))
//!     .building(TileCoord::new(0, 1), BuildingKind::Residential)
//!     .building(TileCoord::new(9, 1), BuildingKind::Industrial)
//!     .build()?;
//!
//! world.run_ticks(600, 16.0, &mut NoopObserver)?;
//! ```
//!
//! # Parallelism
//!
//! With the `parallel` Cargo feature the per-vehicle throttle decisions are
//! computed on Rayon's thread pool.  They read an immutable start-of-tick
//! snapshot and are applied in agent order, so results are identical with
//! and without the feature.

pub mod builder;
pub mod error;
pub mod observer;
pub mod world;

mod growth;
mod tick;

#[cfg(test)]
mod tests;

pub use builder::WorldBuilder;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver, TickSummary};
pub use world::{PathTicket, SimulationWorld};
