//! `ct-core` — foundational types for the city traffic simulation.
//!
//! This crate is a dependency of every other `ct-*` crate.  It has no `ct-*`
//! dependencies and minimal external ones (only `rand` and `thiserror`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `AgentId`, `RequestId`                                |
//! | [`coords`]      | `TileCoord` (city grid), `CellCoord` (fine grid)      |
//! | [`direction`]   | `Direction`, `DirectionSet`                           |
//! | [`geom`]        | `Point` — continuous fine-grid position               |
//! | [`time`]        | `Tick`, `SimClock`                                    |
//! | [`config`]      | `SimConfig`                                           |
//! | [`rng`]         | `AgentRng` (per-agent), `SimRng` (global)             |
//! | [`error`]       | `CoreError`, `CoreResult`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod config;
pub mod coords;
pub mod direction;
pub mod error;
pub mod geom;
pub mod ids;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::SimConfig;
pub use coords::{CellCoord, TileCoord};
pub use direction::{Direction, DirectionSet};
pub use error::{CoreError, CoreResult};
pub use geom::Point;
pub use ids::{AgentId, RequestId};
pub use rng::{AgentRng, SimRng};
pub use time::{SimClock, Tick};
