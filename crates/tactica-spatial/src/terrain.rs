//! Terrain layers: obstructed and difficult cells.
//!
//! The two layers are independent of each other and of occupancy. An
//! obstructed cell can never be entered and blocks line of sight; a difficult
//! cell can be entered at double cost.

use std::collections::HashSet;

use tracing::debug;

use crate::coord::GridCoord;
use crate::grid::GridBounds;
use crate::metric::CELL_SIZE;
use crate::shape::AreaShape;

/// Entry cost of an ordinary cell, in game units.
pub const NORMAL_COST: u32 = CELL_SIZE;

/// Entry cost of a difficult cell, in game units.
pub const DIFFICULT_COST: u32 = CELL_SIZE * 2;

/// Sparse registry of terrain features over the grid.
///
/// # Example
///
/// ```
/// use tactica_spatial::{GridCoord, TerrainRegistry};
///
/// let mut terrain = TerrainRegistry::new();
/// let rubble = GridCoord::new(1, 0, 0);
/// let wall = GridCoord::new(2, 0, 0);
///
/// terrain.mark_difficult(rubble);
/// terrain.mark_obstructed(wall);
///
/// assert_eq!(terrain.entry_cost(GridCoord::origin()), Some(5));
/// assert_eq!(terrain.entry_cost(rubble), Some(10));
/// assert_eq!(terrain.entry_cost(wall), None);
/// ```
#[derive(Debug, Clone, Default)]
pub struct TerrainRegistry {
    obstructed: HashSet<GridCoord>,
    difficult: HashSet<GridCoord>,
}

impl TerrainRegistry {
    /// Creates a registry with no terrain features.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks a cell as obstructed. Returns `true` if the layer changed.
    pub fn mark_obstructed(&mut self, pos: GridCoord) -> bool {
        let changed = self.obstructed.insert(pos);
        if changed {
            debug!(%pos, "cell obstructed");
        }
        changed
    }

    /// Clears the obstruction on a cell. Returns `true` if the layer changed.
    pub fn clear_obstructed(&mut self, pos: GridCoord) -> bool {
        let changed = self.obstructed.remove(&pos);
        if changed {
            debug!(%pos, "obstruction cleared");
        }
        changed
    }

    /// Returns `true` if the cell is obstructed.
    #[must_use]
    pub fn is_obstructed(&self, pos: GridCoord) -> bool {
        self.obstructed.contains(&pos)
    }

    /// Marks a cell as difficult terrain. Returns `true` if the layer changed.
    pub fn mark_difficult(&mut self, pos: GridCoord) -> bool {
        let changed = self.difficult.insert(pos);
        if changed {
            debug!(%pos, "cell marked difficult");
        }
        changed
    }

    /// Clears difficult terrain on a cell. Returns `true` if the layer changed.
    pub fn clear_difficult(&mut self, pos: GridCoord) -> bool {
        let changed = self.difficult.remove(&pos);
        if changed {
            debug!(%pos, "difficult terrain cleared");
        }
        changed
    }

    /// Returns `true` if the cell is difficult terrain.
    #[must_use]
    pub fn is_difficult(&self, pos: GridCoord) -> bool {
        self.difficult.contains(&pos)
    }

    /// Movement cost of stepping onto a cell.
    ///
    /// `None` for obstructed cells, which can never be entered;
    /// [`DIFFICULT_COST`] for difficult cells; [`NORMAL_COST`] otherwise.
    #[must_use]
    pub fn entry_cost(&self, pos: GridCoord) -> Option<u32> {
        if self.is_obstructed(pos) {
            None
        } else if self.is_difficult(pos) {
            Some(DIFFICULT_COST)
        } else {
            Some(NORMAL_COST)
        }
    }

    /// Marks every cell covered by an area shape as obstructed.
    ///
    /// Returns the number of cells that changed.
    pub fn mark_obstructed_area(
        &mut self,
        origin: GridCoord,
        shape: &AreaShape,
        direction: Option<GridCoord>,
    ) -> usize {
        shape
            .cells(origin, direction)
            .into_iter()
            .filter(|&cell| self.mark_obstructed(cell))
            .count()
    }

    /// Marks every cell covered by an area shape as difficult terrain.
    ///
    /// Returns the number of cells that changed.
    ///
    /// # Example
    ///
    /// ```
    /// use tactica_spatial::{AreaShape, GridCoord, TerrainRegistry};
    ///
    /// let mut terrain = TerrainRegistry::new();
    /// // A 10-foot cube of grease covers the 3x3x3 block around its centre.
    /// let changed = terrain.mark_difficult_area(
    ///     GridCoord::origin(),
    ///     &AreaShape::Cube { size: 10 },
    ///     None,
    /// );
    /// assert_eq!(changed, 27);
    /// assert!(terrain.is_difficult(GridCoord::new(1, -1, 1)));
    /// ```
    pub fn mark_difficult_area(
        &mut self,
        origin: GridCoord,
        shape: &AreaShape,
        direction: Option<GridCoord>,
    ) -> usize {
        shape
            .cells(origin, direction)
            .into_iter()
            .filter(|&cell| self.mark_difficult(cell))
            .count()
    }

    /// Iterates over obstructed cells in no particular order.
    pub fn obstructed(&self) -> impl Iterator<Item = GridCoord> + '_ {
        self.obstructed.iter().copied()
    }

    /// Iterates over difficult cells in no particular order.
    pub fn difficult(&self) -> impl Iterator<Item = GridCoord> + '_ {
        self.difficult.iter().copied()
    }

    /// Returns `true` if at least one cell is obstructed.
    #[must_use]
    pub fn has_obstructions(&self) -> bool {
        !self.obstructed.is_empty()
    }

    /// Returns `true` if no cell carries any terrain feature.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.obstructed.is_empty() && self.difficult.is_empty()
    }

    /// Smallest bounds containing every marked cell of either layer.
    #[must_use]
    pub fn extent(&self) -> Option<GridBounds> {
        GridBounds::enclosing(self.obstructed().chain(self.difficult()))
    }

    /// Removes every terrain feature.
    pub fn clear(&mut self) {
        self.obstructed.clear();
        self.difficult.clear();
    }
}
