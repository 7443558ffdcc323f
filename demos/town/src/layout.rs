//! Synthetic street plan for the demo town.
//!
//! Three avenues and three cross streets split the map into blocks.  Every
//! lot that touches a road is zoned: the west third residential, the middle
//! commercial, the east industrial.  A few buildings are completed up front
//! so traffic starts before the growth sweep fills the rest in.

use ct_core::{Direction, TileCoord};
use ct_grid::{BuildingKind, Zone};
use ct_sim::WorldBuilder;

/// Lay out a `columns × rows` town on `builder`.
pub fn town(mut builder: WorldBuilder, columns: i32, rows: i32) -> WorldBuilder {
    let avenues: Vec<i32> = [rows / 4, rows / 2, rows * 3 / 4].into_iter().filter(|&r| r > 0).collect();
    let streets: Vec<i32> = [columns / 4, columns / 2, columns * 3 / 4].into_iter().filter(|&c| c > 0).collect();

    for &r in &avenues {
        builder = builder.road_line(TileCoord::new(0, r), TileCoord::new(columns - 1, r));
    }
    for &c in &streets {
        builder = builder.road_line(TileCoord::new(c, 0), TileCoord::new(c, rows - 1));
    }

    let is_road = |t: TileCoord| avenues.contains(&t.row) || streets.contains(&t.col);
    let mut seeded = [0usize; 3];

    for row in 0..rows {
        for col in 0..columns {
            let t = TileCoord::new(col, row);
            if is_road(t) || !Direction::ALL.iter().any(|&d| is_road(t.neighbor(d))) {
                continue;
            }
            let (zone, slot) = if col < columns / 3 {
                (Zone::Residential, 0)
            } else if col < columns * 2 / 3 {
                (Zone::Commercial, 1)
            } else {
                (Zone::Industrial, 2)
            };
            // Every fifth lot of each kind starts out built.
            builder = if seeded[slot] % 5 == 0 {
                builder.building(t, zone.building())
            } else {
                builder.zone(t, zone)
            };
            seeded[slot] += 1;
        }
    }
    builder
}

/// A representative building per kind, for the summary table.
pub fn first_of(world: &ct_sim::SimulationWorld, kind: BuildingKind) -> Option<TileCoord> {
    world.grid().iter().find(|(_, tile)| tile.has_building(kind)).map(|(t, _)| t)
}
