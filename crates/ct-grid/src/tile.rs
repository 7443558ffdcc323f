//! Per-tile state of the city grid.

use std::collections::VecDeque;

use ct_core::CellCoord;

/// Ground cover of a tile.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Terrain {
    #[default]
    Forest,
    Road,
}

/// Zoning designation painted by the player.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Zone {
    Residential,
    Commercial,
    Industrial,
}

impl Zone {
    /// The building that grows on this zone.
    #[inline]
    pub fn building(self) -> BuildingKind {
        match self {
            Zone::Residential => BuildingKind::Residential,
            Zone::Commercial  => BuildingKind::Commercial,
            Zone::Industrial  => BuildingKind::Industrial,
        }
    }
}

/// A completed building.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BuildingKind {
    Residential,
    Commercial,
    Industrial,
}

impl BuildingKind {
    /// The zone this building belongs to.
    #[inline]
    pub fn zone(self) -> Zone {
        match self {
            BuildingKind::Residential => Zone::Residential,
            BuildingKind::Commercial  => Zone::Commercial,
            BuildingKind::Industrial  => Zone::Industrial,
        }
    }
}

// ── RecentPaths ───────────────────────────────────────────────────────────────

/// Bounded ring buffer of the last few fine-grid paths that departed from a
/// tile.  Kept for inspection by the presentation layer only.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RecentPaths {
    paths: VecDeque<Vec<CellCoord>>,
}

impl RecentPaths {
    /// Append `path`, evicting the oldest entry once `capacity` is reached.
    pub fn push(&mut self, path: Vec<CellCoord>, capacity: usize) {
        while self.paths.len() >= capacity.max(1) {
            self.paths.pop_front();
        }
        self.paths.push_back(path);
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &[CellCoord]> {
        self.paths.iter().map(Vec::as_slice)
    }
}

// ── Tile ──────────────────────────────────────────────────────────────────────

/// One cell of the city-resolution grid.
///
/// Owned exclusively by [`CityGrid`](crate::CityGrid).  `path_entrance` is
/// derived state maintained by [`refresh_entrances_around`](crate::refresh_entrances_around):
/// it is `None` whenever no orthogonal neighbour is Road terrain.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tile {
    pub terrain: Terrain,
    pub zone: Option<Zone>,
    pub building: Option<BuildingKind>,
    /// Fine-grid cell used as this tile's pathfinding endpoint.
    pub path_entrance: Option<CellCoord>,
    /// Construction countdown (ticks) used by the growth sweep.
    pub growth_timer: Option<u32>,
    pub recent_paths: RecentPaths,
}

impl Tile {
    #[inline]
    pub fn is_road(&self) -> bool {
        self.terrain == Terrain::Road
    }

    /// `true` if a building of `kind` stands here.
    #[inline]
    pub fn has_building(&self, kind: BuildingKind) -> bool {
        self.building == Some(kind)
    }
}
