//! Cell-space bounding boxes.

use crate::coord::GridCoord;
use crate::error::SpatialError;

/// Axis-aligned bounds in grid (cell) space.
///
/// Represents a rectangular region of cells defined by minimum and maximum
/// coordinates. Both bounds are inclusive.
///
/// # Example
///
/// ```
/// use tactica_spatial::{GridBounds, GridCoord};
///
/// let bounds = GridBounds::new(
///     GridCoord::new(0, 0, 0),
///     GridCoord::new(10, 10, 0),
/// );
///
/// assert!(bounds.contains(GridCoord::new(5, 5, 0)));
/// assert!(!bounds.contains(GridCoord::new(5, 5, 1)));
/// assert_eq!(bounds.volume(), 121);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridBounds {
    /// Minimum corner (inclusive).
    pub min: GridCoord,
    /// Maximum corner (inclusive).
    pub max: GridCoord,
}

impl GridBounds {
    /// Creates bounds from two corners, in any order.
    #[must_use]
    pub fn new(a: GridCoord, b: GridCoord) -> Self {
        Self {
            min: GridCoord::new(a.x.min(b.x), a.y.min(b.y), a.z.min(b.z)),
            max: GridCoord::new(a.x.max(b.x), a.y.max(b.y), a.z.max(b.z)),
        }
    }

    /// Creates bounds from explicit corners, rejecting a `min` that exceeds
    /// `max` on any axis.
    ///
    /// # Errors
    ///
    /// Returns [`SpatialError::InvalidBounds`] if the corners are inverted.
    ///
    /// # Example
    ///
    /// ```
    /// use tactica_spatial::{GridBounds, GridCoord, SpatialError};
    ///
    /// let ok = GridBounds::try_new(GridCoord::new(0, 0, 0), GridCoord::new(9, 9, 0));
    /// assert!(ok.is_ok());
    ///
    /// let err = GridBounds::try_new(GridCoord::new(5, 0, 0), GridCoord::new(0, 0, 0));
    /// assert!(matches!(err, Err(SpatialError::InvalidBounds { .. })));
    /// ```
    pub const fn try_new(min: GridCoord, max: GridCoord) -> Result<Self, SpatialError> {
        let bounds = Self { min, max };
        if bounds.is_valid() {
            Ok(bounds)
        } else {
            Err(SpatialError::InvalidBounds { min, max })
        }
    }

    /// Returns `true` if `min <= max` on every axis.
    ///
    /// Bounds built by this module are always valid; deserialized bounds may
    /// not be.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.min.x <= self.max.x && self.min.y <= self.max.y && self.min.z <= self.max.z
    }

    /// Checks that a coordinate lies inside the bounds.
    ///
    /// # Errors
    ///
    /// Returns [`SpatialError::OutOfBounds`] if it does not.
    pub const fn check(&self, coord: GridCoord) -> Result<(), SpatialError> {
        if self.contains(coord) {
            Ok(())
        } else {
            Err(SpatialError::OutOfBounds {
                coord,
                bounds: *self,
            })
        }
    }

    /// Creates bounds containing a single cell.
    #[must_use]
    pub const fn from_point(coord: GridCoord) -> Self {
        Self {
            min: coord,
            max: coord,
        }
    }

    /// Creates the cube of cells within `reach` steps of `center` on every axis.
    ///
    /// Saturates at the edges of the `i32` range.
    ///
    /// # Example
    ///
    /// ```
    /// use tactica_spatial::{GridBounds, GridCoord};
    ///
    /// let bounds = GridBounds::around(GridCoord::new(1, 1, 1), 1);
    /// assert_eq!(bounds.min, GridCoord::new(0, 0, 0));
    /// assert_eq!(bounds.max, GridCoord::new(2, 2, 2));
    /// ```
    #[must_use]
    pub fn around(center: GridCoord, reach: u32) -> Self {
        let reach = i32::try_from(reach).unwrap_or(i32::MAX);
        Self {
            min: GridCoord::new(
                center.x.saturating_sub(reach),
                center.y.saturating_sub(reach),
                center.z.saturating_sub(reach),
            ),
            max: GridCoord::new(
                center.x.saturating_add(reach),
                center.y.saturating_add(reach),
                center.z.saturating_add(reach),
            ),
        }
    }

    /// Returns the smallest bounds containing every coordinate, or `None` if
    /// the iterator is empty.
    ///
    /// # Example
    ///
    /// ```
    /// use tactica_spatial::{GridBounds, GridCoord};
    ///
    /// let bounds = GridBounds::enclosing([
    ///     GridCoord::new(3, 0, 0),
    ///     GridCoord::new(-1, 4, 2),
    /// ])
    /// .unwrap();
    /// assert_eq!(bounds.min, GridCoord::new(-1, 0, 0));
    /// assert_eq!(bounds.max, GridCoord::new(3, 4, 2));
    ///
    /// assert!(GridBounds::enclosing(std::iter::empty()).is_none());
    /// ```
    #[must_use]
    pub fn enclosing<I>(coords: I) -> Option<Self>
    where
        I: IntoIterator<Item = GridCoord>,
    {
        let mut iter = coords.into_iter();
        let mut bounds = Self::from_point(iter.next()?);
        for coord in iter {
            bounds.expand_to_include(coord);
        }
        Some(bounds)
    }

    /// Returns the size of the bounds in cells along each axis.
    #[must_use]
    pub const fn size(&self) -> (u32, u32, u32) {
        (
            self.max.x.abs_diff(self.min.x).saturating_add(1),
            self.max.y.abs_diff(self.min.y).saturating_add(1),
            self.max.z.abs_diff(self.min.z).saturating_add(1),
        )
    }

    /// Returns the number of cells in the bounds.
    #[must_use]
    pub fn volume(&self) -> u64 {
        let (w, h, d) = self.size();
        u64::from(w)
            .saturating_mul(u64::from(h))
            .saturating_mul(u64::from(d))
    }

    /// Checks if a coordinate is within the bounds (inclusive).
    #[must_use]
    pub const fn contains(&self, coord: GridCoord) -> bool {
        coord.x >= self.min.x
            && coord.x <= self.max.x
            && coord.y >= self.min.y
            && coord.y <= self.max.y
            && coord.z >= self.min.z
            && coord.z <= self.max.z
    }

    /// Expands the bounds to include the given coordinate.
    pub fn expand_to_include(&mut self, coord: GridCoord) {
        self.min = GridCoord::new(
            self.min.x.min(coord.x),
            self.min.y.min(coord.y),
            self.min.z.min(coord.z),
        );
        self.max = GridCoord::new(
            self.max.x.max(coord.x),
            self.max.y.max(coord.y),
            self.max.z.max(coord.z),
        );
    }

    /// Returns a copy grown by `margin` cells on every side.
    ///
    /// Saturates at the edges of the `i32` range.
    #[must_use]
    pub fn expanded(&self, margin: u32) -> Self {
        let low = Self::around(self.min, margin);
        let high = Self::around(self.max, margin);
        Self {
            min: low.min,
            max: high.max,
        }
    }

    /// Returns an iterator over every cell in the bounds.
    ///
    /// Cells are visited with `x` varying fastest, then `y`, then `z`.
    /// Inverted bounds yield nothing.
    #[must_use]
    pub const fn iter(&self) -> GridBoundsIter {
        GridBoundsIter {
            bounds: *self,
            current: if self.is_valid() { Some(self.min) } else { None },
        }
    }
}

impl Default for GridBounds {
    fn default() -> Self {
        Self::from_point(GridCoord::origin())
    }
}

impl IntoIterator for GridBounds {
    type Item = GridCoord;
    type IntoIter = GridBoundsIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for &GridBounds {
    type Item = GridCoord;
    type IntoIter = GridBoundsIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the cells of a [`GridBounds`].
#[derive(Debug, Clone)]
pub struct GridBoundsIter {
    bounds: GridBounds,
    current: Option<GridCoord>,
}

impl Iterator for GridBoundsIter {
    type Item = GridCoord;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.current?;

        // x fastest, then y, then z; the max corner ends the walk.
        let mut next = current;
        if next.x < self.bounds.max.x {
            next.x += 1;
        } else {
            next.x = self.bounds.min.x;
            if next.y < self.bounds.max.y {
                next.y += 1;
            } else {
                next.y = self.bounds.min.y;
                if next.z < self.bounds.max.z {
                    next.z += 1;
                } else {
                    self.current = None;
                    return Some(current);
                }
            }
        }
        self.current = Some(next);

        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.current.map_or(0, |current| {
            let remaining_x = u64::from(self.bounds.max.x.abs_diff(current.x)) + 1;
            let remaining_y = u64::from(self.bounds.max.y.abs_diff(current.y));
            let remaining_z = u64::from(self.bounds.max.z.abs_diff(current.z));

            let size_x = u64::from(self.bounds.max.x.abs_diff(self.bounds.min.x)) + 1;
            let size_y = u64::from(self.bounds.max.y.abs_diff(self.bounds.min.y)) + 1;

            remaining_x
                .saturating_add(remaining_y.saturating_mul(size_x))
                .saturating_add(remaining_z.saturating_mul(size_x).saturating_mul(size_y))
        });

        let remaining = usize::try_from(remaining).unwrap_or(usize::MAX);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for GridBoundsIter {}
