//! Error types for spatial operations.

use crate::coord::GridCoord;
use crate::grid::GridBounds;
use crate::occupancy::CombatantId;

/// Errors from validating grid regions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum SpatialError {
    /// A bounds minimum corner exceeds its maximum on some axis.
    #[error("invalid bounds: min {min} exceeds max {max}")]
    InvalidBounds {
        /// The requested minimum corner.
        min: GridCoord,
        /// The requested maximum corner.
        max: GridCoord,
    },

    /// A coordinate lies outside the playable area.
    #[error("coordinate {coord} is outside {bounds:?}")]
    OutOfBounds {
        /// The offending coordinate.
        coord: GridCoord,
        /// The playable area.
        bounds: GridBounds,
    },
}

/// Recoverable failures of occupancy mutations.
///
/// These are expected domain outcomes (an action targets an occupied cell, a
/// combatant was never placed) that action-resolution code branches on.
///
/// # Example
///
/// ```
/// use tactica_spatial::{CombatantId, GridCoord, OccupancyError, OccupancyMap};
///
/// let mut map = OccupancyMap::new();
/// map.place(CombatantId::new(1), GridCoord::new(0, 0, 0)).unwrap();
///
/// let err = map.place(CombatantId::new(2), GridCoord::new(0, 0, 0)).unwrap_err();
/// assert!(matches!(err, OccupancyError::CellOccupied { .. }));
/// assert!(err.to_string().contains("occupied"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum OccupancyError {
    /// The combatant is already on the grid.
    #[error("combatant {id} is already placed at {at}")]
    AlreadyPlaced {
        /// The combatant that was placed twice.
        id: CombatantId,
        /// Where it currently stands.
        at: GridCoord,
    },

    /// The target cell holds another combatant.
    #[error("cell {coord} is occupied by combatant {occupant}")]
    CellOccupied {
        /// The requested cell.
        coord: GridCoord,
        /// The combatant standing there.
        occupant: CombatantId,
    },

    /// The combatant is not on the grid.
    #[error("combatant {0} is not placed")]
    NotPlaced(CombatantId),
}
