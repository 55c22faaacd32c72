//! Error types for battlefield operations.

use tactica_spatial::{CombatantId, GridCoord, OccupancyError, SpatialError};

/// Reasons a movement or placement on the battlefield is refused.
///
/// These are expected outcomes of game actions, never bugs; nothing is
/// changed when one is returned.
///
/// # Example
///
/// ```
/// use tactica_battlefield::{Battlefield, MovementError};
/// use tactica_spatial::{CombatantId, GridCoord};
///
/// let mut battlefield = Battlefield::new();
/// let scout = CombatantId::new(1);
/// battlefield.place(scout, GridCoord::new(0, 0, 0)).unwrap();
///
/// let err = battlefield.move_along(scout, GridCoord::new(4, 0, 0), 15).unwrap_err();
/// assert_eq!(err, MovementError::OverBudget { cost: 20, budget: 15 });
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum MovementError {
    /// The moving combatant is not on the battlefield.
    #[error("combatant {0} is not on the battlefield")]
    NotPlaced(CombatantId),

    /// No route connects the two cells.
    #[error("no path from {from} to {to}")]
    NoPath {
        /// Where the combatant stands.
        from: GridCoord,
        /// The requested destination.
        to: GridCoord,
    },

    /// The cheapest route costs more movement than remains.
    #[error("path costs {cost} but only {budget} movement remains")]
    OverBudget {
        /// Cost of the cheapest route.
        cost: u32,
        /// Movement available.
        budget: u32,
    },

    /// The occupancy map refused the change.
    #[error(transparent)]
    Occupancy(#[from] OccupancyError),

    /// The target lies outside the playable area.
    #[error(transparent)]
    Spatial(#[from] SpatialError),
}
