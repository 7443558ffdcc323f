//! Road connectivity classifier.
//!
//! A Road tile's shape is a pure function of which of its four orthogonal
//! neighbours are also Road terrain.  Each shape assigns its four sub-cells
//! (`[TL, TR, BL, BR]`) the directions they may be entered from, encoding
//! right-hand traffic: on a straight east–west segment the top lane runs
//! west and the bottom lane east, on a north–south segment the left lane
//! runs south and the right lane north.  Dead ends loop the lane around so
//! vehicles can turn back.
//!
//! Connectivity is local but propagates one hop: after any terrain or zoning
//! change the tile itself **and** each Road neighbour must be reclassified
//! ([`reclassify_around`]).

use ct_core::{Direction, DirectionSet, TileCoord};

use crate::{CityGrid, FineGrid};

use Direction::{East as E, North as N, South as S, West as W};

/// Lane axis of a straight segment.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum Axis {
    EastWest,
    NorthSouth,
}

/// The canonical shapes a Road tile can take.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum RoadShape {
    /// Exactly one connected side.
    DeadEnd(Direction),
    Straight(Axis),
    /// Two perpendicular connected sides.
    Turn {
        horizontal: Direction,
        vertical:   Direction,
    },
    /// Three connected sides; the field names the closed one.
    TJunction(Direction),
    Crossroad,
    /// No connected neighbour.  Still passable, with no lane constraint.
    Isolated,
}

impl RoadShape {
    /// Classify a 4-bit Road-neighbour pattern.
    pub fn from_neighbors(mask: DirectionSet) -> RoadShape {
        let has = |d| mask.contains(d);
        match (has(N), has(E), has(S), has(W)) {
            (false, false, false, false) => RoadShape::Isolated,
            (true, true, true, true) => RoadShape::Crossroad,

            (true, false, false, false) => RoadShape::DeadEnd(N),
            (false, true, false, false) => RoadShape::DeadEnd(E),
            (false, false, true, false) => RoadShape::DeadEnd(S),
            (false, false, false, true) => RoadShape::DeadEnd(W),

            (false, true, false, true) => RoadShape::Straight(Axis::EastWest),
            (true, false, true, false) => RoadShape::Straight(Axis::NorthSouth),

            (n, e, _, _) if mask.iter().count() == 2 => RoadShape::Turn {
                horizontal: if e { E } else { W },
                vertical:   if n { N } else { S },
            },

            (false, _, _, _) => RoadShape::TJunction(N),
            (_, false, _, _) => RoadShape::TJunction(E),
            (_, _, false, _) => RoadShape::TJunction(S),
            (_, _, _, false) => RoadShape::TJunction(W),
        }
    }

    /// Entry sets for the `[TL, TR, BL, BR]` sub-cells.
    pub fn entry_sets(self) -> [DirectionSet; 4] {
        let one = |d| DirectionSet::of(&[d]);
        let two = |a, b| DirectionSet::of(&[a, b]);
        match self {
            RoadShape::DeadEnd(E) => [one(E), one(E), one(N), one(W)],
            RoadShape::DeadEnd(W) => [one(E), one(S), one(W), one(W)],
            RoadShape::DeadEnd(N) => [one(N), one(S), one(N), one(W)],
            RoadShape::DeadEnd(S) => [one(E), one(S), one(N), one(S)],

            RoadShape::Straight(Axis::EastWest)   => [one(E), one(E), one(W), one(W)],
            RoadShape::Straight(Axis::NorthSouth) => [one(N), one(S), one(N), one(S)],

            RoadShape::Turn { horizontal: W, vertical: S } => [one(E), one(S), one(W), one(S)],
            RoadShape::Turn { horizontal: W, vertical: _ } => [one(N), one(S), one(W), one(W)],
            RoadShape::Turn { horizontal: _, vertical: S } => [one(E), one(E), one(N), one(S)],
            RoadShape::Turn { horizontal: _, vertical: _ } => [one(N), one(E), one(N), one(W)],

            RoadShape::TJunction(N) => [one(E), two(E, S), one(W), two(W, S)],
            RoadShape::TJunction(S) => [two(E, N), two(E, S), one(W), one(W)],
            RoadShape::TJunction(W) => [two(N, E), two(S, E), one(N), two(S, W)],
            RoadShape::TJunction(E) => [two(N, E), one(S), two(N, W), two(S, W)],

            RoadShape::Crossroad => [two(N, E), two(S, E), two(N, W), two(S, W)],
            RoadShape::Isolated  => [DirectionSet::ALL; 4],
        }
    }
}

/// The set of directions in which `tile` has a Road neighbour.
pub fn neighbor_mask(grid: &CityGrid, tile: TileCoord) -> DirectionSet {
    Direction::ALL
        .into_iter()
        .filter(|&d| grid.is_road(tile.neighbor(d)))
        .fold(DirectionSet::EMPTY, DirectionSet::with)
}

/// Shape of `tile`, or `None` if it is not Road terrain.
pub fn classify_tile(grid: &CityGrid, tile: TileCoord) -> Option<RoadShape> {
    grid.is_road(tile)
        .then(|| RoadShape::from_neighbors(neighbor_mask(grid, tile)))
}

/// Rewrite `tile`'s fine-grid block from its current shape.
///
/// Non-road tiles get an impassable block.
pub fn apply_tile(grid: &CityGrid, fine: &mut FineGrid, tile: TileCoord) {
    match classify_tile(grid, tile) {
        Some(shape) => {
            tracing::trace!(%tile, ?shape, "road classified");
            fine.set_block(tile, shape.entry_sets());
        }
        None => fine.clear_block(tile),
    }
}

/// Reclassify `tile` and every orthogonal neighbour that is Road terrain.
pub fn reclassify_around(grid: &CityGrid, fine: &mut FineGrid, tile: TileCoord) {
    if grid.in_bounds(tile) {
        apply_tile(grid, fine, tile);
    }
    for d in Direction::ALL {
        let n = tile.neighbor(d);
        if grid.is_road(n) {
            apply_tile(grid, fine, n);
        }
    }
}

/// Classify every tile of the grid from scratch.
pub fn rebuild(grid: &CityGrid, fine: &mut FineGrid) {
    for tile in grid.coords() {
        apply_tile(grid, fine, tile);
    }
}
