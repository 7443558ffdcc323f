//! Searchable views over the two grid resolutions.
//!
//! The solver is generic over a [`SearchGrid`], so the same A* drives both
//! the lane-level vehicle search and the coarse road-preview search.

use std::fmt::Debug;
use std::hash::Hash;

use ct_core::{CellCoord, Direction, TileCoord};
use ct_grid::{CityGrid, FineGrid};

// ── SearchNode ────────────────────────────────────────────────────────────────

/// A grid coordinate the solver can expand.
///
/// `Ord` is only needed so heap entries are totally ordered; ties are broken
/// by insertion sequence before the node itself is compared.
pub trait SearchNode: Copy + Eq + Hash + Ord + Debug {
    fn step(self, dir: Direction) -> Self;

    /// Admissible unit-cost heuristic.
    fn manhattan(self, other: Self) -> u32;
}

impl SearchNode for CellCoord {
    #[inline]
    fn step(self, dir: Direction) -> Self {
        self.neighbor(dir)
    }

    #[inline]
    fn manhattan(self, other: Self) -> u32 {
        CellCoord::manhattan(self, other)
    }
}

impl SearchNode for TileCoord {
    #[inline]
    fn step(self, dir: Direction) -> Self {
        self.neighbor(dir)
    }

    #[inline]
    fn manhattan(self, other: Self) -> u32 {
        (self.col - other.col).unsigned_abs() + (self.row - other.row).unsigned_abs()
    }
}

// ── SearchGrid ────────────────────────────────────────────────────────────────

/// Read-only traversability oracle consulted by [`crate::PathSolver`].
pub trait SearchGrid {
    type Node: SearchNode;

    /// `true` if a path may start, end or pass through `node`.
    fn is_passable(&self, node: Self::Node) -> bool;

    /// `true` if a mover in `from` may step `dir` into `from.step(dir)`.
    fn can_step(&self, from: Self::Node, dir: Direction) -> bool;

    /// Topology revision.  Searches in flight restart when it changes.
    fn revision(&self) -> u64 {
        0
    }
}

// ── Vehicle view ──────────────────────────────────────────────────────────────

/// The fine grid as seen by vehicles: only Road sub-cells, and only through
/// the sides each cell permits entry from.
#[derive(Clone, Copy)]
pub struct VehicleGrid<'a> {
    fine: &'a FineGrid,
}

impl<'a> VehicleGrid<'a> {
    pub fn new(fine: &'a FineGrid) -> Self {
        Self { fine }
    }
}

impl SearchGrid for VehicleGrid<'_> {
    type Node = CellCoord;

    #[inline]
    fn is_passable(&self, node: CellCoord) -> bool {
        self.fine.is_walkable(node)
    }

    #[inline]
    fn can_step(&self, from: CellCoord, dir: Direction) -> bool {
        // The target is entered from the side facing `from`.
        let to = from.neighbor(dir);
        self.fine.is_walkable(to) && self.fine.entry(to).contains(dir.opposite())
    }

    fn revision(&self) -> u64 {
        self.fine.revision()
    }
}

// ── Planning view ─────────────────────────────────────────────────────────────

/// The city grid as seen by the road-preview planner: every in-bounds tile
/// with Forest or Road terrain, uniform cost, no direction constraints.
#[derive(Clone, Copy)]
pub struct PlanningGrid<'a> {
    city: &'a CityGrid,
}

impl<'a> PlanningGrid<'a> {
    pub fn new(city: &'a CityGrid) -> Self {
        Self { city }
    }
}

impl SearchGrid for PlanningGrid<'_> {
    type Node = TileCoord;

    #[inline]
    fn is_passable(&self, node: TileCoord) -> bool {
        // Both terrains are accepted, so bounds are the only constraint.
        self.city.in_bounds(node)
    }

    #[inline]
    fn can_step(&self, from: TileCoord, dir: Direction) -> bool {
        self.city.in_bounds(from.neighbor(dir))
    }
}
