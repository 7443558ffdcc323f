//! Path-entrance derivation.
//!
//! Buildings are not addressable in the fine grid, so every tile next to a
//! road gets an *entrance*: the sub-cell of the neighbouring Road tile that
//! touches it.  Neighbours are scanned in the fixed priority order south,
//! west, north, east; the first Road neighbour wins.

use ct_core::{CellCoord, Direction, TileCoord};

use crate::CityGrid;

/// Scan order for entrance derivation.
const ENTRANCE_PRIORITY: [Direction; 4] = [
    Direction::South,
    Direction::West,
    Direction::North,
    Direction::East,
];

/// The sub-cell of the Road neighbour in `dir` that borders the tile.
fn entrance_cell(tile: TileCoord, dir: Direction) -> CellCoord {
    let [tl, tr, bl, br] = tile.neighbor(dir).sub_cells();
    match dir {
        Direction::South => tl,
        Direction::West  => tr,
        Direction::North => br,
        Direction::East  => bl,
    }
}

/// Entrance of `tile`, or `None` if no orthogonal neighbour is Road terrain.
pub fn derive_entrance(grid: &CityGrid, tile: TileCoord) -> Option<CellCoord> {
    ENTRANCE_PRIORITY
        .into_iter()
        .find(|&d| grid.is_road(tile.neighbor(d)))
        .map(|d| entrance_cell(tile, d))
}

/// Recompute the stored entrance of `tile` and its four neighbours.
pub fn refresh_entrances_around(grid: &mut CityGrid, tile: TileCoord) {
    let targets = std::iter::once(tile).chain(Direction::ALL.map(|d| tile.neighbor(d)));
    for t in targets {
        if !grid.in_bounds(t) {
            continue;
        }
        let entrance = derive_entrance(grid, t);
        if let Some(slot) = grid.get_mut(t) {
            slot.path_entrance = entrance;
        }
    }
}
