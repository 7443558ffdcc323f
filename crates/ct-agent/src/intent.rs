//! Requests an agent hands back to the world during the sweep.

use ct_core::TileCoord;

/// An action the agent wants the world to perform this tick.
///
/// Produced by [`step`][crate::step] and applied by the simulation loop in
/// agent order.
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    /// Submit a vehicle path between the entrances of two tiles.
    ///
    /// The agent is already in `FindingPath` with `destination = to`.
    RequestPath {
        from: TileCoord,
        to:   TileCoord,
    },

    /// Add to the city's output metric.
    EmitOutput(f32),
}
