//! Continuous 2-D position in fine-grid units.
//!
//! `Point` uses `f32`; a fine-grid cell `(x, y)` sits at `Point { x, y }`.
//! The whole city is at most a few hundred units across, so single precision
//! is ample.

/// A continuous position (or offset) in fine-grid units.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Unit vector for a heading angle in radians.
    #[inline]
    pub fn from_angle(angle: f32) -> Self {
        Self::new(angle.cos(), angle.sin())
    }

    #[inline]
    pub fn distance(self, other: Point) -> f32 {
        self.distance_squared(other).sqrt()
    }

    #[inline]
    pub fn distance_squared(self, other: Point) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        dx * dx + dy * dy
    }

    /// Heading from `self` towards `target`, via `atan2`.
    #[inline]
    pub fn angle_to(self, target: Point) -> f32 {
        (target.y - self.y).atan2(target.x - self.x)
    }

    /// `self + dir * len`.
    #[inline]
    pub fn offset(self, dir: Point, len: f32) -> Point {
        Point::new(self.x + dir.x * len, self.y + dir.y * len)
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.3}, {:.3})", self.x, self.y)
    }
}
