//! The lane-level fine grid consumed by the vehicle path solver.
//!
//! Every city tile maps to a 2×2 block of [`FineCell`]s.  A cell is walkable
//! only if its tile is Road terrain, and carries the set of neighbour
//! directions it may be entered from.  The grid is written exclusively by the
//! road classifier ([`crate::classify`]) and always one whole 2×2 block at a
//! time, so a reader never observes a half-updated tile.

use ct_core::{CellCoord, DirectionSet, TileCoord};

/// Routing state of one fine-grid cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FineCell {
    /// `true` if the owning tile is Road terrain.
    pub walkable: bool,
    /// Neighbours this cell may be entered from.  Empty for non-road cells.
    pub entry: DirectionSet,
}

/// The 2C×2R grid of [`FineCell`]s.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FineGrid {
    width:    i32,
    height:   i32,
    cells:    Vec<FineCell>,
    /// Bumped whenever a block write changes at least one cell.
    revision: u64,
}

impl FineGrid {
    /// A fine grid matching a `columns × rows` city grid; nothing walkable.
    pub fn for_city(columns: i32, rows: i32) -> Self {
        let width = columns.max(0) * 2;
        let height = rows.max(0) * 2;
        Self {
            width,
            height,
            cells: vec![FineCell::default(); (width * height) as usize],
            revision: 0,
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Monotonic change counter; moves only when some cell's contents change.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    #[inline]
    pub fn in_bounds(&self, c: CellCoord) -> bool {
        c.x >= 0 && c.y >= 0 && c.x < self.width && c.y < self.height
    }

    #[inline]
    pub fn cell(&self, c: CellCoord) -> Option<FineCell> {
        self.in_bounds(c)
            .then(|| self.cells[(c.y * self.width + c.x) as usize])
    }

    #[inline]
    pub fn is_walkable(&self, c: CellCoord) -> bool {
        self.cell(c).is_some_and(|cell| cell.walkable)
    }

    /// Entry set of `c`; empty outside the grid.
    #[inline]
    pub fn entry(&self, c: CellCoord) -> DirectionSet {
        self.cell(c).map_or(DirectionSet::EMPTY, |cell| cell.entry)
    }

    /// Entry sets of a tile's block in `[TL, TR, BL, BR]` order.
    pub fn block(&self, tile: TileCoord) -> [DirectionSet; 4] {
        tile.sub_cells().map(|c| self.entry(c))
    }

    // ── Writes (road classifier only) ─────────────────────────────────────

    /// Make `tile`'s block walkable with the given entry sets.
    pub(crate) fn set_block(&mut self, tile: TileCoord, entries: [DirectionSet; 4]) {
        self.write_block(tile, |i| FineCell { walkable: true, entry: entries[i] });
    }

    /// Make `tile`'s block impassable.
    pub(crate) fn clear_block(&mut self, tile: TileCoord) {
        self.write_block(tile, |_| FineCell::default());
    }

    /// The revision only moves when at least one cell actually changes, so
    /// rewriting a block with its current contents keeps in-flight searches.
    fn write_block(&mut self, tile: TileCoord, f: impl Fn(usize) -> FineCell) {
        let mut changed = false;
        for (i, c) in tile.sub_cells().into_iter().enumerate() {
            if self.in_bounds(c) {
                let slot = &mut self.cells[(c.y * self.width + c.x) as usize];
                let cell = f(i);
                if *slot != cell {
                    *slot = cell;
                    changed = true;
                }
            }
        }
        if changed {
            self.revision += 1;
        }
    }
}
