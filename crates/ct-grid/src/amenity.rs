//! Commercial-neighbourhood amenity multiplier.
//!
//! Living or shopping near commerce speeds up fatigue recovery.  The bonus
//! counts built Commercial tiles in a square window around a tile and maps
//! the count onto a tier.

use ct_core::TileCoord;

use crate::{BuildingKind, CityGrid};

/// Built Commercial tiles within `radius` (Chebyshev) of `center`,
/// including `center` itself.  `radius = 4` gives the 9×9 window.
pub fn commercial_count(grid: &CityGrid, center: TileCoord, radius: i32) -> u32 {
    let mut count = 0;
    for row in center.row - radius..=center.row + radius {
        for col in center.col - radius..=center.col + radius {
            if grid
                .get(TileCoord::new(col, row))
                .is_some_and(|t| t.has_building(BuildingKind::Commercial))
            {
                count += 1;
            }
        }
    }
    count
}

/// Recovery multiplier for a given commercial count.
pub fn amenity_bonus(commercial: u32) -> f32 {
    match commercial {
        0       => 1.0,
        1..=3   => 4.0,
        4..=6   => 10.0,
        7..=10  => 20.0,
        11..=15 => 25.0,
        _       => 30.0,
    }
}
