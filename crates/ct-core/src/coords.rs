//! Integer grid coordinates at the two simulation resolutions.
//!
//! The **city grid** is addressed by [`TileCoord`] (`col`, `row`).  The **fine
//! grid** used for vehicle routing subdivides every tile into a 2×2 block of
//! sub-cells addressed by [`CellCoord`] (`x`, `y`):
//!
//! ```text
//! tile (c, r)  ->  cells (2c, 2r)     (2c+1, 2r)       TL  TR
//!                        (2c, 2r+1)   (2c+1, 2r+1)     BL  BR
//! ```
//!
//! Rows grow southwards, so `North` is `row - 1`.  Coordinates are signed so
//! neighbour arithmetic never underflows; bounds are checked by the grids.

use std::fmt;

use crate::{Direction, Point};

// ── TileCoord ─────────────────────────────────────────────────────────────────

/// A city-resolution tile coordinate.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TileCoord {
    pub col: i32,
    pub row: i32,
}

impl TileCoord {
    #[inline]
    pub const fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }

    /// The orthogonal neighbour in `dir` (may lie outside the grid).
    #[inline]
    pub fn neighbor(self, dir: Direction) -> TileCoord {
        let (dx, dy) = dir.offset();
        TileCoord::new(self.col + dx, self.row + dy)
    }

    /// The tile's four fine-grid sub-cells in `[TL, TR, BL, BR]` order.
    pub fn sub_cells(self) -> [CellCoord; 4] {
        let (x, y) = (self.col * 2, self.row * 2);
        [
            CellCoord::new(x, y),
            CellCoord::new(x + 1, y),
            CellCoord::new(x, y + 1),
            CellCoord::new(x + 1, y + 1),
        ]
    }

    /// Chebyshev distance, used for square neighbourhood windows.
    #[inline]
    pub fn chebyshev(self, other: TileCoord) -> i32 {
        (self.col - other.col).abs().max((self.row - other.row).abs())
    }
}

impl fmt::Display for TileCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tile({}, {})", self.col, self.row)
    }
}

// ── CellCoord ─────────────────────────────────────────────────────────────────

/// A fine-grid (lane-level) cell coordinate.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellCoord {
    pub x: i32,
    pub y: i32,
}

impl CellCoord {
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn neighbor(self, dir: Direction) -> CellCoord {
        let (dx, dy) = dir.offset();
        CellCoord::new(self.x + dx, self.y + dy)
    }

    /// The city tile containing this cell.
    #[inline]
    pub fn tile(self) -> TileCoord {
        TileCoord::new(self.x.div_euclid(2), self.y.div_euclid(2))
    }

    /// Manhattan distance, the A* heuristic on a 4-connected grid.
    #[inline]
    pub fn manhattan(self, other: CellCoord) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// Continuous position of the cell in fine-grid units.
    #[inline]
    pub fn to_point(self) -> Point {
        Point::new(self.x as f32, self.y as f32)
    }
}

impl fmt::Display for CellCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cell({}, {})", self.x, self.y)
    }
}

impl From<TileCoord> for CellCoord {
    /// Treat a tile coordinate as a single search cell (coarse planning grid).
    fn from(t: TileCoord) -> Self {
        CellCoord::new(t.col, t.row)
    }
}
