//! Grid coordinate type.

use std::fmt;

use nalgebra::Vector3;

/// A discrete 3D cell position on the combat grid.
///
/// Coordinates are plain values: equality, hashing and ordering are defined by
/// the components alone. Ordering is lexicographic over `(x, y, z)`, which the
/// pathfinder relies on to break ties deterministically.
///
/// # Example
///
/// ```
/// use tactica_spatial::GridCoord;
///
/// let coord = GridCoord::new(1, 2, 3);
/// assert_eq!(coord.x, 1);
/// assert_eq!(coord.as_tuple(), (1, 2, 3));
///
/// // Negative cells are valid; the grid has no fixed origin corner.
/// let below = GridCoord::new(-4, 0, -1);
/// assert!(below < coord);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridCoord {
    /// X coordinate (east/west).
    pub x: i32,
    /// Y coordinate (north/south).
    pub y: i32,
    /// Z coordinate (elevation).
    pub z: i32,
}

impl GridCoord {
    /// Creates a new grid coordinate.
    #[must_use]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Creates a coordinate at the origin (0, 0, 0).
    #[must_use]
    pub const fn origin() -> Self {
        Self::new(0, 0, 0)
    }

    /// Returns the coordinate as a tuple.
    #[must_use]
    pub const fn as_tuple(self) -> (i32, i32, i32) {
        (self.x, self.y, self.z)
    }

    /// Returns the coordinate as an array.
    #[must_use]
    pub const fn as_array(self) -> [i32; 3] {
        [self.x, self.y, self.z]
    }

    /// Returns this coordinate shifted by the given per-axis offsets.
    ///
    /// Components wrap on overflow, matching the neighbour helpers.
    ///
    /// # Example
    ///
    /// ```
    /// use tactica_spatial::GridCoord;
    ///
    /// let moved = GridCoord::new(2, 2, 0).offset(-1, 3, 1);
    /// assert_eq!(moved, GridCoord::new(1, 5, 1));
    /// ```
    #[must_use]
    pub const fn offset(self, dx: i32, dy: i32, dz: i32) -> Self {
        Self::new(
            self.x.wrapping_add(dx),
            self.y.wrapping_add(dy),
            self.z.wrapping_add(dz),
        )
    }

    /// Returns the absolute per-axis differences to another coordinate.
    #[must_use]
    pub const fn abs_delta(self, other: Self) -> [u32; 3] {
        [
            self.x.abs_diff(other.x),
            self.y.abs_diff(other.y),
            self.z.abs_diff(other.z),
        ]
    }

    /// Returns the vector from this coordinate to `other`, in cell units.
    ///
    /// Computed in `f64`, so it never overflows even for cells at opposite
    /// ends of the `i32` range.
    ///
    /// # Example
    ///
    /// ```
    /// use tactica_spatial::GridCoord;
    /// use nalgebra::Vector3;
    ///
    /// let v = GridCoord::new(1, 1, 0).vector_to(GridCoord::new(4, -1, 0));
    /// assert_eq!(v, Vector3::new(3.0, -2.0, 0.0));
    /// ```
    #[must_use]
    pub fn vector_to(self, other: Self) -> Vector3<f64> {
        other.to_vector() - self.to_vector()
    }

    /// Converts to a floating-point vector of the components.
    #[must_use]
    pub fn to_vector(self) -> Vector3<f64> {
        Vector3::new(f64::from(self.x), f64::from(self.y), f64::from(self.z))
    }

    /// Returns `true` if `other` is one of the 26 cells surrounding this one.
    #[must_use]
    pub const fn is_adjacent(self, other: Self) -> bool {
        let [dx, dy, dz] = self.abs_delta(other);
        dx <= 1 && dy <= 1 && dz <= 1 && (dx | dy | dz) != 0
    }

    /// Returns all 26 neighbors (Moore neighborhood).
    ///
    /// These include face-adjacent (6), edge-adjacent (12), and corner-adjacent
    /// (8) neighbors. The order is fixed: `dx` outermost, then `dy`, then `dz`,
    /// each running from -1 to 1.
    ///
    /// # Example
    ///
    /// ```
    /// use tactica_spatial::GridCoord;
    ///
    /// let neighbors = GridCoord::origin().all_neighbors();
    /// assert_eq!(neighbors.len(), 26);
    /// assert_eq!(neighbors[0], GridCoord::new(-1, -1, -1));
    /// assert!(!neighbors.contains(&GridCoord::origin()));
    /// ```
    #[must_use]
    pub fn all_neighbors(self) -> [Self; 26] {
        let mut result = [Self::origin(); 26];
        let mut idx = 0;

        for dx in -1i32..=1 {
            for dy in -1i32..=1 {
                for dz in -1i32..=1 {
                    if dx == 0 && dy == 0 && dz == 0 {
                        continue;
                    }
                    result[idx] = self.offset(dx, dy, dz);
                    idx += 1;
                }
            }
        }

        result
    }
}

impl fmt::Display for GridCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

impl From<(i32, i32, i32)> for GridCoord {
    fn from((x, y, z): (i32, i32, i32)) -> Self {
        Self::new(x, y, z)
    }
}

impl From<[i32; 3]> for GridCoord {
    fn from([x, y, z]: [i32; 3]) -> Self {
        Self::new(x, y, z)
    }
}

impl From<GridCoord> for (i32, i32, i32) {
    fn from(coord: GridCoord) -> Self {
        coord.as_tuple()
    }
}

impl From<GridCoord> for [i32; 3] {
    fn from(coord: GridCoord) -> Self {
        coord.as_array()
    }
}
