//! Neighbour generation for grid searches.
//!
//! # Example
//!
//! ```
//! use tactica_pathfind::neighbors::NeighborGenerator;
//! use tactica_spatial::{GridCoord, TerrainRegistry};
//!
//! let mut terrain = TerrainRegistry::new();
//! terrain.mark_obstructed(GridCoord::new(1, 0, 0));
//! terrain.mark_difficult(GridCoord::new(0, 1, 0));
//!
//! let generator = NeighborGenerator::new(&terrain);
//! let successors: Vec<_> = generator.successors(GridCoord::origin()).collect();
//!
//! assert_eq!(successors.len(), 25);
//! assert!(successors.contains(&(GridCoord::new(0, 1, 0), 10)));
//! ```

use tactica_spatial::{GridBounds, GridCoord, OccupancyMap, TerrainRegistry};

/// Generator for passable neighbouring cells and their entry costs.
///
/// All 26 surrounding cells are candidates, visited in
/// [`GridCoord::all_neighbors`] order.
#[derive(Debug, Clone, Copy)]
pub struct NeighborGenerator<'a> {
    /// Terrain layers.
    terrain: &'a TerrainRegistry,
    /// Occupancy to avoid, with the one occupied cell that stays passable.
    occupancy: Option<(&'a OccupancyMap, GridCoord)>,
    /// Cells outside these bounds are impassable.
    bounds: Option<GridBounds>,
}

impl<'a> NeighborGenerator<'a> {
    /// Creates a generator over terrain only, with no bounds.
    #[must_use]
    pub const fn new(terrain: &'a TerrainRegistry) -> Self {
        Self {
            terrain,
            occupancy: None,
            bounds: None,
        }
    }

    /// Treats every occupied cell except `own_cell` as impassable.
    #[must_use]
    pub const fn avoiding(mut self, occupancy: &'a OccupancyMap, own_cell: GridCoord) -> Self {
        self.occupancy = Some((occupancy, own_cell));
        self
    }

    /// Restricts successors to the given bounds.
    #[must_use]
    pub const fn with_bounds(mut self, bounds: GridBounds) -> Self {
        self.bounds = Some(bounds);
        self
    }

    /// Cost of stepping onto `coord`, or `None` if it cannot be entered.
    #[must_use]
    pub fn entry_cost(&self, coord: GridCoord) -> Option<u32> {
        if self.bounds.is_some_and(|bounds| !bounds.contains(coord)) {
            return None;
        }
        if let Some((occupancy, own_cell)) = self.occupancy {
            if coord != own_cell && occupancy.is_occupied(coord) {
                return None;
            }
        }
        self.terrain.entry_cost(coord)
    }

    /// Returns `true` if `coord` can be entered.
    #[must_use]
    pub fn is_passable(&self, coord: GridCoord) -> bool {
        self.entry_cost(coord).is_some()
    }

    /// Returns an iterator over enterable neighbours with their entry costs.
    ///
    /// This is the primary interface for the searches.
    pub fn successors(&self, coord: GridCoord) -> impl Iterator<Item = (GridCoord, u32)> + '_ {
        coord
            .all_neighbors()
            .into_iter()
            .filter_map(move |n| self.entry_cost(n).map(|cost| (n, cost)))
    }
}
