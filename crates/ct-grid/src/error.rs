//! Grid-subsystem error type.

use thiserror::Error;

use ct_core::TileCoord;

/// Errors produced by `ct-grid`.
#[derive(Debug, Error)]
pub enum GridError {
    #[error("{0} is outside the city grid")]
    OutOfBounds(TileCoord),

    #[error("{tile} is zoned {zone:?}; cannot complete a {building:?} building there")]
    ZoneMismatch {
        tile:     TileCoord,
        zone:     Option<crate::Zone>,
        building: crate::BuildingKind,
    },
}

pub type GridResult<T> = Result<T, GridError>;
