//! Compass directions and compact direction sets.
//!
//! A fine-grid cell carries a [`DirectionSet`] naming the neighbours it may be
//! **entered from**: `North` in a cell's set means a vehicle in the cell above
//! may move into it.

use std::fmt;

/// One of the four orthogonal compass directions.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    /// All directions in neighbour-visit order.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// `(dx, dy)` step for this direction; rows grow southwards.
    #[inline]
    pub fn offset(self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::East  => (1, 0),
            Direction::South => (0, 1),
            Direction::West  => (-1, 0),
        }
    }

    #[inline]
    pub fn opposite(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::East  => Direction::West,
            Direction::South => Direction::North,
            Direction::West  => Direction::East,
        }
    }

    #[inline]
    fn bit(self) -> u8 {
        match self {
            Direction::North => 0b0001,
            Direction::East  => 0b0010,
            Direction::South => 0b0100,
            Direction::West  => 0b1000,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Direction::North => "N",
            Direction::East  => "E",
            Direction::South => "S",
            Direction::West  => "W",
        })
    }
}

// ── DirectionSet ──────────────────────────────────────────────────────────────

/// A subset of `{North, East, South, West}` packed into four bits.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DirectionSet(u8);

impl DirectionSet {
    pub const EMPTY: DirectionSet = DirectionSet(0);
    pub const ALL: DirectionSet = DirectionSet(0b1111);

    /// Build a set from a slice of directions.
    pub fn of(dirs: &[Direction]) -> Self {
        dirs.iter().fold(Self::EMPTY, |set, &d| set.with(d))
    }

    #[inline]
    pub fn with(self, dir: Direction) -> Self {
        DirectionSet(self.0 | dir.bit())
    }

    #[inline]
    pub fn contains(self, dir: Direction) -> bool {
        self.0 & dir.bit() != 0
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Raw 4-bit pattern (`N=1, E=2, S=4, W=8`).
    #[inline]
    pub fn bits(self) -> u8 {
        self.0
    }

    pub fn iter(self) -> impl Iterator<Item = Direction> {
        Direction::ALL.into_iter().filter(move |&d| self.contains(d))
    }
}

impl fmt::Display for DirectionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for d in self.iter() {
            write!(f, "{d}")?;
        }
        f.write_str("}")
    }
}
