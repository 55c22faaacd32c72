//! The grid distance metric.
//!
//! Every range, reach and area check in the workspace goes through
//! [`distance`], and the pathfinder uses it as its A* heuristic. Diagonal
//! steps cost the same as orthogonal ones, so the metric is Chebyshev distance
//! scaled to game units.

use crate::coord::GridCoord;

/// Game-distance units covered by one cell step (five feet).
pub const CELL_SIZE: u32 = 5;

/// Number of single-cell steps separating two coordinates on an open grid.
///
/// This is the Chebyshev distance: the largest absolute per-axis difference.
///
/// # Example
///
/// ```
/// use tactica_spatial::{GridCoord, cells_between};
///
/// let a = GridCoord::new(0, 0, 0);
/// assert_eq!(cells_between(a, GridCoord::new(3, -1, 2)), 3);
/// ```
#[must_use]
pub const fn cells_between(a: GridCoord, b: GridCoord) -> u32 {
    let [dx, dy, dz] = a.abs_delta(b);
    let mut max = dx;
    if dy > max {
        max = dy;
    }
    if dz > max {
        max = dz;
    }
    max
}

/// Distance between two coordinates in game units.
///
/// `distance(a, b) = 5 × max(|Δx|, |Δy|, |Δz|)`. Symmetric, zero iff
/// `a == b`, and saturating at `u32::MAX` for cells too far apart to express.
///
/// # Example
///
/// ```
/// use tactica_spatial::{GridCoord, distance};
///
/// let a = GridCoord::new(10, 10, 0);
/// assert_eq!(distance(a, GridCoord::new(10, 12, 0)), 10);
/// assert_eq!(distance(a, GridCoord::new(11, 11, 1)), 5); // diagonal steps are free
/// assert_eq!(distance(a, a), 0);
/// ```
#[must_use]
pub const fn distance(a: GridCoord, b: GridCoord) -> u32 {
    cells_between(a, b).saturating_mul(CELL_SIZE)
}

/// Returns `true` if `b` lies within `range` game units of `a`.
///
/// Used for weapon range and reach checks.
#[must_use]
pub const fn within_range(a: GridCoord, b: GridCoord, range: u32) -> bool {
    distance(a, b) <= range
}

/// Converts a game-unit distance to whole cells, rounding down.
#[must_use]
pub const fn units_to_cells(units: u32) -> u32 {
    units / CELL_SIZE
}
