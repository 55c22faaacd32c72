//! Area-of-effect shapes.
//!
//! Every shape answers one question: given an origin cell, an optional aim
//! cell and a candidate cell, is the candidate inside? Sizes are in game units
//! (feet), the same units [`distance`] returns.
//!
//! Sphere and cube use the grid metric directly, so a sphere of radius 10 is
//! the 5x5x5 block of cells within two steps of its centre. Cones and lines
//! are directional and are evaluated in continuous space between cell
//! centres.

use nalgebra::Vector3;

use crate::coord::GridCoord;
use crate::grid::GridBounds;
use crate::metric::{CELL_SIZE, distance, units_to_cells};

/// Half of the opening angle of a cone, in degrees.
pub const CONE_HALF_ANGLE_DEG: f64 = 45.0;

/// Slack for float comparisons on cell-centre geometry.
const EPSILON: f64 = 1e-9;

/// An area-of-effect template.
///
/// # Example
///
/// ```
/// use tactica_spatial::{AreaShape, GridCoord};
///
/// let fireball = AreaShape::Sphere { radius: 10 };
/// let centre = GridCoord::new(10, 10, 0);
///
/// assert!(fireball.contains(centre, GridCoord::new(10, 12, 0), None));
/// assert!(fireball.contains(centre, GridCoord::new(12, 12, 2), None));
/// assert!(!fireball.contains(centre, GridCoord::new(10, 13, 0), None));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(tag = "kind", rename_all = "snake_case")
)]
pub enum AreaShape {
    /// Every cell within `radius` of the origin.
    Sphere {
        /// Radius in game units.
        radius: u32,
    },
    /// An axis-aligned cube centred on the origin.
    Cube {
        /// Edge length in game units.
        size: u32,
    },
    /// A cone opening from the origin towards the aim cell.
    Cone {
        /// Reach of the cone in game units.
        length: u32,
    },
    /// A straight band starting at the origin and running towards the aim cell.
    Line {
        /// Length of the band in game units.
        length: u32,
        /// Total width of the band in game units.
        width: u32,
    },
}

impl AreaShape {
    /// Returns `true` if the shape needs an aim cell to cover more than its
    /// origin.
    #[must_use]
    pub const fn is_directional(&self) -> bool {
        matches!(self, Self::Cone { .. } | Self::Line { .. })
    }

    /// Tests whether `point` lies inside the shape anchored at `origin` and
    /// aimed at `direction`.
    ///
    /// Sphere and cube ignore `direction`. A cone or line with no aim, or
    /// aimed at its own origin, covers only the origin cell.
    ///
    /// # Example
    ///
    /// ```
    /// use tactica_spatial::{AreaShape, GridCoord};
    ///
    /// let breath = AreaShape::Cone { length: 15 };
    /// let origin = GridCoord::origin();
    /// let aim = Some(GridCoord::new(5, 0, 0));
    ///
    /// assert!(breath.contains(origin, GridCoord::new(2, 1, 0), aim));
    /// assert!(!breath.contains(origin, GridCoord::new(1, 2, 0), aim));
    /// assert!(!breath.contains(origin, GridCoord::new(-1, 0, 0), aim));
    /// ```
    #[must_use]
    pub fn contains(
        &self,
        origin: GridCoord,
        point: GridCoord,
        direction: Option<GridCoord>,
    ) -> bool {
        match *self {
            Self::Sphere { radius } => distance(origin, point) <= radius,
            Self::Cube { size } => distance(origin, point) <= size / 2,
            Self::Cone { length } => {
                let Some(axis) = aim_axis(origin, direction) else {
                    return point == origin;
                };
                if point == origin {
                    return true;
                }
                distance(origin, point) <= length
                    && cos_to_axis(&origin.vector_to(point), &axis)
                        >= CONE_HALF_ANGLE_DEG.to_radians().cos() - EPSILON
            }
            Self::Line { length, width } => {
                let Some(axis) = aim_axis(origin, direction) else {
                    return point == origin;
                };
                let offset = origin.vector_to(point) * f64::from(CELL_SIZE);
                let along = offset.dot(&axis);
                if along < -EPSILON || along > f64::from(length) + EPSILON {
                    return false;
                }
                let across = (offset - axis * along).norm();
                across <= f64::from(width) / 2.0 + EPSILON
            }
        }
    }

    /// Conservative box of cells that can satisfy [`contains`](Self::contains).
    #[must_use]
    pub fn bounds(&self, origin: GridCoord, direction: Option<GridCoord>) -> GridBounds {
        match *self {
            Self::Sphere { radius } => GridBounds::around(origin, units_to_cells(radius)),
            Self::Cube { size } => GridBounds::around(origin, units_to_cells(size / 2)),
            Self::Cone { length } => {
                if aim_axis(origin, direction).is_none() {
                    GridBounds::from_point(origin)
                } else {
                    GridBounds::around(origin, units_to_cells(length))
                }
            }
            Self::Line { length, width } => {
                if aim_axis(origin, direction).is_none() {
                    GridBounds::from_point(origin)
                } else {
                    let reach = units_to_cells(length.saturating_add(width)).saturating_add(1);
                    GridBounds::around(origin, reach)
                }
            }
        }
    }

    /// Every cell covered by the shape, with `x` varying fastest, then `y`,
    /// then `z`.
    ///
    /// # Example
    ///
    /// ```
    /// use tactica_spatial::{AreaShape, GridCoord};
    ///
    /// let cells = AreaShape::Line { length: 15, width: 5 }
    ///     .cells(GridCoord::origin(), Some(GridCoord::new(0, 3, 0)));
    /// assert_eq!(cells.len(), 4);
    /// ```
    #[must_use]
    pub fn cells(&self, origin: GridCoord, direction: Option<GridCoord>) -> Vec<GridCoord> {
        self.bounds(origin, direction)
            .iter()
            .filter(|&cell| self.contains(origin, cell, direction))
            .collect()
    }
}

/// Unit vector from `origin` towards the aim cell, if there is a usable aim.
fn aim_axis(origin: GridCoord, direction: Option<GridCoord>) -> Option<Vector3<f64>> {
    let target = direction.filter(|&aim| aim != origin)?;
    Some(origin.vector_to(target).normalize())
}

/// Cosine of the angle between `v` and a unit `axis`.
fn cos_to_axis(v: &Vector3<f64>, axis: &Vector3<f64>) -> f64 {
    v.dot(axis) / v.norm()
}
