//! A* pathfinding over the combat grid.
//!
//! The search runs over the 26-connected grid. Entering a cell costs its
//! terrain entry cost (5, or 10 for difficult terrain); obstructed cells are
//! never entered. The heuristic is the grid [`distance`], which is admissible
//! and consistent because every step costs at least one cell's worth of
//! movement and changes the Chebyshev distance by at most one.
//!
//! # Example
//!
//! ```
//! use tactica_pathfind::{GridAStar, PathfinderConfig};
//! use tactica_spatial::{GridCoord, OccupancyMap, TerrainRegistry};
//!
//! let mut terrain = TerrainRegistry::new();
//! for y in -3..=3 {
//!     terrain.mark_obstructed(GridCoord::new(2, y, 0));
//! }
//! let occupancy = OccupancyMap::new();
//!
//! let pathfinder = GridAStar::new(&terrain, &occupancy, PathfinderConfig::default());
//! let path = pathfinder.find_path(GridCoord::new(0, 0, 0), GridCoord::new(4, 0, 0));
//!
//! assert!(!path.is_empty());
//! assert!(path.cells().iter().all(|&cell| !terrain.is_obstructed(cell)));
//! ```

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap, HashSet};

use tactica_spatial::{GridBounds, GridCoord, OccupancyMap, TerrainRegistry, distance};
use tracing::{debug, trace, warn};

use crate::config::{OccupiedCells, PathfinderConfig};
use crate::neighbors::NeighborGenerator;
use crate::path::{GridPath, SearchStats};

/// An open-set entry.
///
/// The derived ordering compares `f`, then `h`, then the squared straight-line
/// distance to the destination, then the coordinate. The heap (wrapped in
/// [`Reverse`]) pops the lowest total estimate first, prefers nodes nearer the
/// destination on ties, and among equally near nodes keeps to the straight
/// line, so routes on open ground don't zigzag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct OpenNode {
    f: u32,
    h: u32,
    straightness: u64,
    coord: GridCoord,
}

impl OpenNode {
    fn new(coord: GridCoord, g: u32, destination: GridCoord) -> Self {
        let h = distance(coord, destination);
        let straightness = coord
            .abs_delta(destination)
            .iter()
            .map(|&d| u64::from(d) * u64::from(d))
            .fold(0u64, u64::saturating_add);
        Self {
            f: g.saturating_add(h),
            h,
            straightness,
            coord,
        }
    }
}

/// A* pathfinder over the terrain and occupancy of one battlefield.
///
/// Borrowing both layers for the pathfinder's lifetime means no mutation can
/// happen while a search runs.
///
/// The open set is an explicit heap of `OpenNode`s rather than a call to
/// `pathfinding::prelude::astar`. That function fixes its own order among
/// equal-cost nodes and has no way to stop after
/// [`max_nodes`](PathfinderConfig::with_max_nodes) expansions, and both are
/// needed here.
///
/// # Example
///
/// ```
/// use tactica_pathfind::{GridAStar, PathfinderConfig};
/// use tactica_spatial::{GridCoord, OccupancyMap, TerrainRegistry};
///
/// let terrain = TerrainRegistry::new();
/// let occupancy = OccupancyMap::new();
/// let pathfinder = GridAStar::new(&terrain, &occupancy, PathfinderConfig::default());
///
/// let path = pathfinder.find_path(GridCoord::new(0, 0, 0), GridCoord::new(0, 2, 0));
/// assert_eq!(path.len(), 3);
/// assert_eq!(path.cost(), 10);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct GridAStar<'a> {
    terrain: &'a TerrainRegistry,
    occupancy: &'a OccupancyMap,
    config: PathfinderConfig,
}

impl<'a> GridAStar<'a> {
    /// Creates a pathfinder over the given layers.
    #[must_use]
    pub const fn new(
        terrain: &'a TerrainRegistry,
        occupancy: &'a OccupancyMap,
        config: PathfinderConfig,
    ) -> Self {
        Self {
            terrain,
            occupancy,
            config,
        }
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &PathfinderConfig {
        &self.config
    }

    /// The box of cells a search between two cells may visit.
    ///
    /// Uses the configured bounds if set. Otherwise returns the smallest box
    /// holding both endpoints, every terrain mark and (when occupied cells are
    /// avoided) every combatant, grown by one cell. Outside the marked region
    /// every cell costs the same, so any route leaving the box can be clamped
    /// onto its outer shell at no extra cost; the search stays optimal and
    /// always terminates.
    #[must_use]
    pub fn search_bounds(&self, start: GridCoord, destination: GridCoord) -> GridBounds {
        if let Some(bounds) = self.config.bounds() {
            return bounds;
        }
        let mut bounds = GridBounds::new(start, destination);
        if let Some(extent) = self.terrain.extent() {
            bounds.expand_to_include(extent.min);
            bounds.expand_to_include(extent.max);
        }
        if self.config.occupied_cells() == OccupiedCells::Avoid {
            if let Some(extent) = self.occupancy.extent() {
                bounds.expand_to_include(extent.min);
                bounds.expand_to_include(extent.max);
            }
        }
        bounds.expanded(1)
    }

    /// Neighbour generator for a search starting at `start`.
    pub(crate) fn generator(
        &self,
        bounds: Option<GridBounds>,
        start: GridCoord,
    ) -> NeighborGenerator<'a> {
        let mut generator = NeighborGenerator::new(self.terrain);
        if let Some(bounds) = bounds {
            generator = generator.with_bounds(bounds);
        }
        if self.config.occupied_cells() == OccupiedCells::Avoid {
            generator = generator.avoiding(self.occupancy, start);
        }
        generator
    }

    /// Finds a cheapest path from `start` to `destination`.
    ///
    /// Returns an empty path if no route exists, if either endpoint is
    /// obstructed (or otherwise impassable), or if the node limit is hit.
    /// Equal inputs always produce the same path.
    ///
    /// # Example
    ///
    /// ```
    /// use tactica_pathfind::{GridAStar, PathfinderConfig};
    /// use tactica_spatial::{GridCoord, OccupancyMap, TerrainRegistry};
    ///
    /// let mut terrain = TerrainRegistry::new();
    /// terrain.mark_obstructed(GridCoord::new(3, 3, 0));
    /// let occupancy = OccupancyMap::new();
    /// let pathfinder = GridAStar::new(&terrain, &occupancy, PathfinderConfig::default());
    ///
    /// let path = pathfinder.find_path(GridCoord::new(0, 0, 0), GridCoord::new(3, 3, 0));
    /// assert!(path.is_empty());
    /// assert_eq!(path.cost(), 0);
    /// ```
    #[must_use]
    pub fn find_path(&self, start: GridCoord, destination: GridCoord) -> GridPath {
        let bounds = self.search_bounds(start, destination);
        let generator = self.generator(Some(bounds), start);

        if !generator.is_passable(start) || !generator.is_passable(destination) {
            debug!(%start, %destination, "path endpoint is impassable");
            return GridPath::empty();
        }

        if start == destination {
            return GridPath::new(vec![start], 0);
        }

        let mut open = BinaryHeap::new();
        let mut settled: HashSet<GridCoord> = HashSet::new();
        let mut g_score: HashMap<GridCoord, u32> = HashMap::new();
        let mut came_from: HashMap<GridCoord, GridCoord> = HashMap::new();
        let mut pushed = 1usize;

        open.push(Reverse(OpenNode::new(start, 0, destination)));
        g_score.insert(start, 0);

        while let Some(Reverse(node)) = open.pop() {
            if !settled.insert(node.coord) {
                continue;
            }
            let Some(&current_g) = g_score.get(&node.coord) else {
                continue;
            };
            trace!(coord = %node.coord, g = current_g, f = node.f, "settled");

            if node.coord == destination {
                let stats = SearchStats::default()
                    .with_nodes_settled(settled.len())
                    .with_nodes_pushed(pushed);
                let cells = reconstruct_path(&came_from, start, destination);
                debug!(
                    %start,
                    %destination,
                    cost = current_g,
                    steps = cells.len() - 1,
                    settled = settled.len(),
                    "path found"
                );
                return GridPath::new(cells, current_g).with_stats(stats);
            }

            if self.config.max_nodes().is_some_and(|limit| settled.len() >= limit) {
                warn!(
                    %start,
                    %destination,
                    settled = settled.len(),
                    "path search hit its node limit"
                );
                let stats = SearchStats::default()
                    .with_nodes_settled(settled.len())
                    .with_nodes_pushed(pushed)
                    .with_limit_reached(true);
                return GridPath::empty().with_stats(stats);
            }

            for (next, step_cost) in generator.successors(node.coord) {
                if settled.contains(&next) {
                    continue;
                }
                let tentative = current_g.saturating_add(step_cost);
                if g_score.get(&next).is_none_or(|&known| tentative < known) {
                    g_score.insert(next, tentative);
                    came_from.insert(next, node.coord);
                    open.push(Reverse(OpenNode::new(next, tentative, destination)));
                    pushed += 1;
                }
            }
        }

        debug!(%start, %destination, settled = settled.len(), "no path");
        GridPath::empty().with_stats(
            SearchStats::default()
                .with_nodes_settled(settled.len())
                .with_nodes_pushed(pushed),
        )
    }

    /// Cost of the path [`find_path`](Self::find_path) would return, or
    /// `None` if it would return no path.
    #[must_use]
    pub fn path_cost(&self, start: GridCoord, destination: GridCoord) -> Option<u32> {
        let path = self.find_path(start, destination);
        (!path.is_empty()).then(|| path.cost())
    }
}

/// Walks parent links back from the destination.
fn reconstruct_path(
    came_from: &HashMap<GridCoord, GridCoord>,
    start: GridCoord,
    destination: GridCoord,
) -> Vec<GridCoord> {
    let mut cells = vec![destination];
    let mut current = destination;
    while current != start {
        match came_from.get(&current) {
            Some(&parent) => {
                cells.push(parent);
                current = parent;
            }
            None => break,
        }
    }
    cells.reverse();
    cells
}

/// Convenience function for a one-off search over terrain only.
///
/// # Example
///
/// ```
/// use tactica_pathfind::find_path;
/// use tactica_spatial::{GridCoord, TerrainRegistry};
///
/// let terrain = TerrainRegistry::new();
/// let path = find_path(&terrain, GridCoord::new(0, 0, 0), GridCoord::new(4, 2, 1));
/// assert_eq!(path.cost(), 20);
/// ```
#[must_use]
pub fn find_path(terrain: &TerrainRegistry, start: GridCoord, destination: GridCoord) -> GridPath {
    let occupancy = OccupancyMap::new();
    GridAStar::new(terrain, &occupancy, PathfinderConfig::default()).find_path(start, destination)
}
