//! Search results.

use tactica_spatial::GridCoord;

/// Counters describing the work a search did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SearchStats {
    /// Number of nodes taken off the open set and settled.
    nodes_settled: usize,
    /// Number of entries pushed onto the open set.
    nodes_pushed: usize,
    /// Whether the search stopped at its node limit.
    limit_reached: bool,
}

impl SearchStats {
    /// Sets the number of settled nodes.
    #[must_use]
    pub const fn with_nodes_settled(mut self, count: usize) -> Self {
        self.nodes_settled = count;
        self
    }

    /// Sets the number of pushed nodes.
    #[must_use]
    pub const fn with_nodes_pushed(mut self, count: usize) -> Self {
        self.nodes_pushed = count;
        self
    }

    /// Marks the search as stopped by its node limit.
    #[must_use]
    pub const fn with_limit_reached(mut self, reached: bool) -> Self {
        self.limit_reached = reached;
        self
    }

    /// Returns the number of settled nodes.
    #[must_use]
    pub const fn nodes_settled(&self) -> usize {
        self.nodes_settled
    }

    /// Returns the number of pushed nodes.
    #[must_use]
    pub const fn nodes_pushed(&self) -> usize {
        self.nodes_pushed
    }

    /// Returns `true` if the search gave up at its node limit.
    #[must_use]
    pub const fn limit_reached(&self) -> bool {
        self.limit_reached
    }
}

/// A route over the grid: cells from start to destination inclusive, plus the
/// summed entry cost of every cell after the start.
///
/// An empty path means no route exists; its cost is 0.
///
/// # Example
///
/// ```
/// use tactica_pathfind::GridPath;
/// use tactica_spatial::GridCoord;
///
/// let path = GridPath::new(
///     vec![GridCoord::new(0, 0, 0), GridCoord::new(1, 1, 0)],
///     5,
/// );
/// assert_eq!(path.len(), 2);
/// assert_eq!(path.destination(), Some(GridCoord::new(1, 1, 0)));
///
/// assert!(GridPath::empty().is_empty());
/// assert_eq!(GridPath::empty().cost(), 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GridPath {
    cells: Vec<GridCoord>,
    cost: u32,
    stats: SearchStats,
}

impl GridPath {
    /// Creates a path from its cells and total cost.
    #[must_use]
    pub const fn new(cells: Vec<GridCoord>, cost: u32) -> Self {
        Self {
            cells,
            cost,
            stats: SearchStats {
                nodes_settled: 0,
                nodes_pushed: 0,
                limit_reached: false,
            },
        }
    }

    /// The "no route" result.
    #[must_use]
    pub const fn empty() -> Self {
        Self::new(Vec::new(), 0)
    }

    /// Attaches search statistics.
    #[must_use]
    pub const fn with_stats(mut self, stats: SearchStats) -> Self {
        self.stats = stats;
        self
    }

    /// Returns `true` if no route was found.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Number of cells, including start and destination.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Total movement cost in game units.
    #[must_use]
    pub const fn cost(&self) -> u32 {
        self.cost
    }

    /// The cells in travel order.
    #[must_use]
    pub fn cells(&self) -> &[GridCoord] {
        &self.cells
    }

    /// First cell, if any.
    #[must_use]
    pub fn start(&self) -> Option<GridCoord> {
        self.cells.first().copied()
    }

    /// Last cell, if any.
    #[must_use]
    pub fn destination(&self) -> Option<GridCoord> {
        self.cells.last().copied()
    }

    /// Number of single-cell steps taken.
    #[must_use]
    pub fn steps(&self) -> usize {
        self.cells.len().saturating_sub(1)
    }

    /// Statistics from the search that produced this path.
    #[must_use]
    pub const fn stats(&self) -> &SearchStats {
        &self.stats
    }
}

impl<'a> IntoIterator for &'a GridPath {
    type Item = &'a GridCoord;
    type IntoIter = std::slice::Iter<'a, GridCoord>;

    fn into_iter(self) -> Self::IntoIter {
        self.cells.iter()
    }
}
