//! City-resolution tile storage.
//!
//! # Data layout
//!
//! Tiles are stored row-major in one flat `Vec`:
//!
//! ```text
//! tiles[ row * columns + col ]
//! ```
//!
//! All public accessors take a [`TileCoord`] and bounds-check it; coordinates
//! outside the grid simply yield `None`, which the classifier and entrance
//! scan treat as "not a road".

use ct_core::TileCoord;

use crate::{GridError, GridResult, Terrain, Tile};

/// The C×R grid of [`Tile`]s.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CityGrid {
    columns: i32,
    rows:    i32,
    tiles:   Vec<Tile>,
}

impl CityGrid {
    /// A grid of `columns × rows` Forest tiles with no zoning.
    pub fn new(columns: i32, rows: i32) -> Self {
        let columns = columns.max(0);
        let rows = rows.max(0);
        Self {
            columns,
            rows,
            tiles: vec![Tile::default(); (columns * rows) as usize],
        }
    }

    // ── Dimensions ────────────────────────────────────────────────────────

    pub fn columns(&self) -> i32 {
        self.columns
    }

    pub fn rows(&self) -> i32 {
        self.rows
    }

    #[inline]
    pub fn in_bounds(&self, t: TileCoord) -> bool {
        t.col >= 0 && t.row >= 0 && t.col < self.columns && t.row < self.rows
    }

    #[inline]
    fn index(&self, t: TileCoord) -> Option<usize> {
        self.in_bounds(t)
            .then(|| (t.row * self.columns + t.col) as usize)
    }

    // ── Access ────────────────────────────────────────────────────────────

    #[inline]
    pub fn get(&self, t: TileCoord) -> Option<&Tile> {
        self.index(t).map(|i| &self.tiles[i])
    }

    #[inline]
    pub fn get_mut(&mut self, t: TileCoord) -> Option<&mut Tile> {
        self.index(t).map(|i| &mut self.tiles[i])
    }

    /// Like [`get_mut`](Self::get_mut) but reports out-of-bounds as an error.
    pub fn tile_mut(&mut self, t: TileCoord) -> GridResult<&mut Tile> {
        self.get_mut(t).ok_or(GridError::OutOfBounds(t))
    }

    /// Like [`get`](Self::get) but reports out-of-bounds as an error.
    pub fn tile(&self, t: TileCoord) -> GridResult<&Tile> {
        self.get(t).ok_or(GridError::OutOfBounds(t))
    }

    /// `true` if `t` is inside the grid and has Road terrain.
    #[inline]
    pub fn is_road(&self, t: TileCoord) -> bool {
        self.get(t).is_some_and(|tile| tile.terrain == Terrain::Road)
    }

    /// Iterator over every tile coordinate in row-major order.
    pub fn coords(&self) -> impl Iterator<Item = TileCoord> + '_ {
        (0..self.rows).flat_map(move |r| (0..self.columns).map(move |c| TileCoord::new(c, r)))
    }

    /// Iterator over `(coord, tile)` pairs in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (TileCoord, &Tile)> + '_ {
        self.coords().zip(self.tiles.iter())
    }

    // ── Input mapping ─────────────────────────────────────────────────────

    /// Map a pointer position in pixels to the tile under it, clamped into
    /// the grid.  Returns `None` only for an empty grid.
    pub fn tile_at_pixel(&self, x: f32, y: f32, tile_size: f32) -> Option<TileCoord> {
        if self.columns == 0 || self.rows == 0 || tile_size <= 0.0 {
            return None;
        }
        let clamp = |v: f32, max: i32| (v / tile_size).clamp(0.0, (max - 1) as f32).floor() as i32;
        Some(TileCoord::new(clamp(x, self.columns), clamp(y, self.rows)))
    }
}
