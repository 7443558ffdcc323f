//! `ct-grid` — city grid, fine (lane-level) grid, and road connectivity.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                     |
//! |--------------|--------------------------------------------------------------|
//! | [`tile`]     | `Tile`, `Terrain`, `Zone`, `BuildingKind`, `RecentPaths`     |
//! | [`city`]     | `CityGrid` — C×R tile storage and bounds-checked access      |
//! | [`fine`]     | `FineGrid` — 2C×2R cells with per-cell entry directions      |
//! | [`classify`] | `RoadShape`, road connectivity classifier                    |
//! | [`entrance`] | path-entrance derivation for tiles next to a road            |
//! | [`amenity`]  | commercial-neighbourhood amenity multiplier                  |
//! | [`error`]    | `GridError`, `GridResult<T>`                                 |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on public types.           |

pub mod amenity;
pub mod city;
pub mod classify;
pub mod entrance;
pub mod error;
pub mod fine;
pub mod tile;


pub use amenity::{amenity_bonus, commercial_count};
pub use city::CityGrid;
pub use classify::{Axis, RoadShape, apply_tile, classify_tile, neighbor_mask, rebuild, reclassify_around};
pub use entrance::{derive_entrance, refresh_entrances_around};
pub use error::{GridError, GridResult};
pub use fine::{FineCell, FineGrid};
pub use tile::{BuildingKind, RecentPaths, Terrain, Tile, Zone};
