//! Movement range: every cell a combatant can reach on a budget.
//!
//! # Example
//!
//! ```
//! use tactica_pathfind::{GridAStar, PathfinderConfig};
//! use tactica_spatial::{GridCoord, OccupancyMap, TerrainRegistry};
//!
//! let terrain = TerrainRegistry::new();
//! let occupancy = OccupancyMap::new();
//! let pathfinder = GridAStar::new(&terrain, &occupancy, PathfinderConfig::default());
//!
//! // One step in any direction on an open grid.
//! let range = pathfinder.reachable_within(GridCoord::origin(), 5);
//! assert_eq!(range.len(), 27);
//! assert_eq!(range[0], (GridCoord::origin(), 0));
//! ```

use pathfinding::prelude::dijkstra_reach;
use tactica_spatial::GridCoord;
use tracing::debug;

use crate::astar::GridAStar;
use crate::neighbors::NeighborGenerator;

impl GridAStar<'_> {
    /// Lists every cell reachable from `start` with total entry cost at most
    /// `budget`, paired with that cost.
    ///
    /// Costs are the same cheapest costs [`find_path`](Self::find_path)
    /// reports. Results are ordered by cost, then coordinate. An impassable
    /// start yields nothing.
    #[must_use]
    pub fn reachable_within(&self, start: GridCoord, budget: u32) -> Vec<(GridCoord, u32)> {
        let generator = self.generator(self.config().bounds(), start);
        let cells = reachable_cells(&generator, start, budget);
        debug!(%start, budget, reachable = cells.len(), "movement range computed");
        cells
    }
}

/// Dijkstra expansion from `start`, cut off once costs exceed `budget`.
fn reachable_cells(
    generator: &NeighborGenerator<'_>,
    start: GridCoord,
    budget: u32,
) -> Vec<(GridCoord, u32)> {
    if !generator.is_passable(start) {
        return Vec::new();
    }

    let mut cells: Vec<(GridCoord, u32)> = dijkstra_reach(&start, |&coord, spent: u32| {
        let successors: Vec<(GridCoord, u32)> = if spent >= budget {
            // Nothing past the budget is ever yielded.
            Vec::new()
        } else {
            generator.successors(coord).collect()
        };
        successors
    })
    .take_while(|item| item.total_cost <= budget)
    .map(|item| (item.node, item.total_cost))
    .collect();

    cells.sort_unstable_by_key(|&(coord, cost)| (cost, coord));
    cells
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::{OccupiedCells, PathfinderConfig};
    use tactica_spatial::{CombatantId, GridBounds, OccupancyMap, TerrainRegistry};

    fn c(x: i32, y: i32, z: i32) -> GridCoord {
        GridCoord::new(x, y, z)
    }

    #[test]
    fn test_zero_budget_is_start_only() {
        let terrain = TerrainRegistry::new();
        let occupancy = OccupancyMap::new();
        let pathfinder = GridAStar::new(&terrain, &occupancy, PathfinderConfig::default());
        assert_eq!(pathfinder.reachable_within(c(1, 1, 1), 0), vec![(c(1, 1, 1), 0)]);
        assert_eq!(pathfinder.reachable_within(c(1, 1, 1), 4), vec![(c(1, 1, 1), 0)]);
    }

    #[test]
    fn test_open_grid_range_is_cube() {
        let terrain = TerrainRegistry::new();
        let occupancy = OccupancyMap::new();
        let bounds = GridBounds::new(c(-10, -10, 0), c(10, 10, 0));
        let config = PathfinderConfig::default().with_bounds(bounds);
        let pathfinder = GridAStar::new(&terrain, &occupancy, config);

        let range = pathfinder.reachable_within(c(0, 0, 0), 30);
        assert_eq!(range.len(), 13 * 13);
        assert!(
            range
                .iter()
                .all(|&(cell, cost)| cost == tactica_spatial::distance(c(0, 0, 0), cell))
        );
    }

    #[test]
    fn test_budget_between_step_costs_stops_short() {
        let terrain = TerrainRegistry::new();
        let occupancy = OccupancyMap::new();
        let pathfinder = GridAStar::new(&terrain, &occupancy, PathfinderConfig::default());

        let range = pathfinder.reachable_within(c(0, 0, 0), 12);
        assert_eq!(range.len(), 5 * 5 * 5);
        assert_eq!(range.last().map(|&(_, cost)| cost), Some(10));
        assert!(range.iter().all(|&(cell, _)| tactica_spatial::distance(c(0, 0, 0), cell) <= 10));
    }

    #[test]
    fn test_difficult_terrain_shrinks_range() {
        let mut terrain = TerrainRegistry::new();
        let bounds = GridBounds::new(c(0, 0, 0), c(5, 0, 0));
        terrain.mark_difficult(c(1, 0, 0));
        let occupancy = OccupancyMap::new();
        let config = PathfinderConfig::default().with_bounds(bounds);
        let pathfinder = GridAStar::new(&terrain, &occupancy, config);

        let range = pathfinder.reachable_within(c(0, 0, 0), 20);
        assert_eq!(
            range,
            vec![(c(0, 0, 0), 0), (c(1, 0, 0), 10), (c(2, 0, 0), 15), (c(3, 0, 0), 20)]
        );
    }

    #[test]
    fn test_range_costs_match_path_costs() {
        let mut terrain = TerrainRegistry::new();
        terrain.mark_obstructed(c(1, 0, 0));
        terrain.mark_obstructed(c(1, 1, 0));
        terrain.mark_difficult(c(1, -1, 0));
        let occupancy = OccupancyMap::new();
        let pathfinder = GridAStar::new(&terrain, &occupancy, PathfinderConfig::default());

        for (cell, cost) in pathfinder.reachable_within(c(0, 0, 0), 15) {
            assert_eq!(pathfinder.path_cost(c(0, 0, 0), cell), Some(cost), "{cell}");
        }
    }

    #[test]
    fn test_range_respects_occupants() {
        let terrain = TerrainRegistry::new();
        let mut occupancy = OccupancyMap::new();
        occupancy.place(CombatantId::new(1), c(0, 0, 0)).unwrap();
        occupancy.place(CombatantId::new(2), c(1, 0, 0)).unwrap();
        let config = PathfinderConfig::default().with_occupied_cells(OccupiedCells::Avoid);
        let pathfinder = GridAStar::new(&terrain, &occupancy, config);

        let range = pathfinder.reachable_within(c(0, 0, 0), 5);
        assert_eq!(range.len(), 26);
        assert!(range.iter().all(|&(cell, _)| cell != c(1, 0, 0)));
    }

    #[test]
    fn test_obstructed_start_reaches_nothing() {
        let mut terrain = TerrainRegistry::new();
        terrain.mark_obstructed(c(0, 0, 0));
        let occupancy = OccupancyMap::new();
        let pathfinder = GridAStar::new(&terrain, &occupancy, PathfinderConfig::default());
        assert!(pathfinder.reachable_within(c(0, 0, 0), 30).is_empty());
    }
}
