//! Line of sight over the terrain obstruction layer.
//!
//! Sight lines run between cell centres. The walk enumerates the exact
//! *supercover* of the segment: every cell whose closed unit cube the closed
//! segment touches, including cells it only grazes along an edge or at a
//! corner. The walk is a DDA in the style of Amanatides & Woo, but boundary
//! crossing times are compared as exact rationals instead of floats, so
//! simultaneous crossings (pure diagonals) are detected exactly and the walk
//! from `a` to `b` touches the same cells as the walk from `b` to `a`.
//!
//! # Example
//!
//! ```
//! use tactica_spatial::{GridCoord, TerrainRegistry, has_line_of_sight};
//!
//! let mut terrain = TerrainRegistry::new();
//! let archer = GridCoord::new(0, 0, 0);
//! let target = GridCoord::new(3, 3, 0);
//!
//! assert!(has_line_of_sight(&terrain, archer, target));
//!
//! terrain.mark_obstructed(GridCoord::new(1, 1, 0));
//! assert!(!has_line_of_sight(&terrain, archer, target));
//! assert!(!has_line_of_sight(&terrain, target, archer));
//! ```

use std::cmp::Ordering;
use std::collections::VecDeque;

use crate::coord::GridCoord;
use crate::terrain::TerrainRegistry;

/// An iterator over the supercover of the segment between two cell centres.
///
/// Yields the start cell first and the end cell last. Cells touched at the
/// same instant (when the segment passes through an edge or corner) are
/// yielded in order of how many axes they step along, with the fully stepped
/// cell last.
///
/// # Example
///
/// ```
/// use tactica_spatial::{GridCoord, SupercoverWalk};
///
/// let cells: Vec<_> = SupercoverWalk::new(GridCoord::new(0, 0, 0), GridCoord::new(1, 1, 0))
///     .collect();
/// assert_eq!(
///     cells,
///     vec![
///         GridCoord::new(0, 0, 0),
///         GridCoord::new(1, 0, 0),
///         GridCoord::new(0, 1, 0),
///         GridCoord::new(1, 1, 0),
///     ]
/// );
/// ```
#[derive(Debug, Clone)]
pub struct SupercoverWalk {
    /// Cell the segment is currently inside.
    current: GridCoord,
    /// Step direction for each axis (-1, 0 or 1).
    step: [i32; 3],
    /// Number of boundary planes crossed in total on each axis.
    span: [u64; 3],
    /// Number of boundary planes crossed so far on each axis.
    crossed: [u64; 3],
    /// Cells touched at the latest crossing that have not been yielded yet.
    pending: VecDeque<GridCoord>,
    /// Whether the start cell has been yielded.
    started: bool,
}

impl SupercoverWalk {
    /// Creates a walk from the centre of `from` to the centre of `to`.
    #[must_use]
    pub fn new(from: GridCoord, to: GridCoord) -> Self {
        let span = from.abs_delta(to).map(u64::from);
        let step = [
            axis_step(from.x, to.x),
            axis_step(from.y, to.y),
            axis_step(from.z, to.z),
        ];
        Self {
            current: from,
            step,
            span,
            crossed: [0; 3],
            pending: VecDeque::with_capacity(7),
            started: false,
        }
    }

    /// Orders the next boundary crossings of two axes by time.
    ///
    /// The `c`-th crossing (0-based) on an axis spanning `s` cells happens at
    /// `t = (2c + 1) / (2s)`; cross-multiplying keeps the comparison exact.
    fn compare_crossings(&self, a: usize, b: usize) -> Ordering {
        let lhs = u128::from(2 * self.crossed[a] + 1) * u128::from(self.span[b]);
        let rhs = u128::from(2 * self.crossed[b] + 1) * u128::from(self.span[a]);
        lhs.cmp(&rhs)
    }

    /// The current cell stepped along every axis set in `mask`.
    fn stepped(&self, mask: u8) -> GridCoord {
        let mut delta = [0i32; 3];
        for (axis, d) in delta.iter_mut().enumerate() {
            if mask & (1 << axis) != 0 {
                *d = self.step[axis];
            }
        }
        self.current.offset(delta[0], delta[1], delta[2])
    }
}

impl Iterator for SupercoverWalk {
    type Item = GridCoord;

    fn next(&mut self) -> Option<Self::Item> {
        if !self.started {
            self.started = true;
            return Some(self.current);
        }
        if let Some(cell) = self.pending.pop_front() {
            return Some(cell);
        }

        // Find the axes whose next crossing comes first.
        let mut earliest: Option<usize> = None;
        let mut tied: u8 = 0;
        for axis in 0..3 {
            if self.crossed[axis] >= self.span[axis] {
                continue;
            }
            match earliest {
                None => {
                    earliest = Some(axis);
                    tied = 1 << axis;
                }
                Some(best) => match self.compare_crossings(axis, best) {
                    Ordering::Less => {
                        earliest = Some(axis);
                        tied = 1 << axis;
                    }
                    Ordering::Equal => tied |= 1 << axis,
                    Ordering::Greater => {}
                },
            }
        }
        earliest?;

        // Crossing k planes at once touches every cell reachable by stepping
        // along a non-empty subset of those k axes.
        for size in 1..=tied.count_ones() {
            for mask in 1u8..8 {
                if mask & !tied == 0 && mask.count_ones() == size {
                    self.pending.push_back(self.stepped(mask));
                }
            }
        }

        self.current = self.stepped(tied);
        for axis in 0..3 {
            if tied & (1 << axis) != 0 {
                self.crossed[axis] += 1;
            }
        }

        self.pending.pop_front()
    }
}

fn axis_step(from: i32, to: i32) -> i32 {
    i32::from(to > from) - i32::from(to < from)
}

/// Returns the supercover of the segment between two cell centres, in walk
/// order, both endpoints included.
///
/// # Example
///
/// ```
/// use tactica_spatial::{GridCoord, supercover_line};
///
/// let cells = supercover_line(GridCoord::new(0, 0, 0), GridCoord::new(3, 0, 0));
/// assert_eq!(cells.len(), 4);
/// assert_eq!(cells[3], GridCoord::new(3, 0, 0));
/// ```
#[must_use]
pub fn supercover_line(from: GridCoord, to: GridCoord) -> Vec<GridCoord> {
    SupercoverWalk::new(from, to).collect()
}

/// Cells strictly between the endpoints.
fn interior(from: GridCoord, to: GridCoord) -> impl Iterator<Item = GridCoord> {
    SupercoverWalk::new(from, to).filter(move |&cell| cell != from && cell != to)
}

/// Checks whether `to` can be seen from `from`.
///
/// Returns `false` iff some interior cell of the supercover walk is
/// obstructed. The endpoints themselves never block, and occupancy is not
/// consulted. The relation is symmetric.
#[must_use]
pub fn has_line_of_sight(terrain: &TerrainRegistry, from: GridCoord, to: GridCoord) -> bool {
    if !terrain.has_obstructions() {
        return true;
    }
    interior(from, to).all(|cell| !terrain.is_obstructed(cell))
}

/// Returns the first obstructed interior cell met when walking from `from`
/// towards `to`, if any.
#[must_use]
pub fn first_obstruction(
    terrain: &TerrainRegistry,
    from: GridCoord,
    to: GridCoord,
) -> Option<GridCoord> {
    if !terrain.has_obstructions() {
        return None;
    }
    interior(from, to).find(|&cell| terrain.is_obstructed(cell))
}

/// Returns every obstructed interior cell between two cells, in walk order.
///
/// Combat resolution uses this to estimate cover.
#[must_use]
pub fn obstructions_between(
    terrain: &TerrainRegistry,
    from: GridCoord,
    to: GridCoord,
) -> Vec<GridCoord> {
    if !terrain.has_obstructions() {
        return Vec::new();
    }
    interior(from, to)
        .filter(|&cell| terrain.is_obstructed(cell))
        .collect()
}
