//! Spatial core for turn-based tactical combat.
//!
//! This crate provides the grid model every other Tactica crate builds on:
//!
//! - [`GridCoord`] - Integer cell coordinates
//! - [`distance`] - The one distance metric (Chebyshev, 5 units per cell)
//! - [`GridBounds`] - Axis-aligned boxes of cells
//! - [`OccupancyMap`] - Bijection between combatants and cells
//! - [`TerrainRegistry`] - Obstructed and difficult terrain layers
//! - [`has_line_of_sight`] and [`SupercoverWalk`] - Exact grid line of sight
//! - [`AreaShape`] - Sphere, cube, cone and line area-of-effect templates
//! - [`combatants_in_shape`] - Who an area effect touches
//!
//! # Coordinate System
//!
//! - X: east/west
//! - Y: north/south
//! - Z: elevation
//!
//! Cells are unbounded in every direction. All sizes (ranges, radii, movement
//! budgets) are in game units, [`CELL_SIZE`] per cell step. Diagonal steps,
//! including vertical diagonals, cost the same as orthogonal ones.
//!
//! # Example
//!
//! ```
//! use tactica_spatial::{CombatantId, GridCoord, OccupancyMap, distance};
//!
//! let mut map = OccupancyMap::new();
//! let rogue = CombatantId::new(1);
//! let ogre = CombatantId::new(2);
//!
//! map.place(rogue, GridCoord::new(0, 0, 0)).unwrap();
//! map.place(ogre, GridCoord::new(2, 1, 0)).unwrap();
//!
//! let gap = distance(
//!     map.position_of(rogue).unwrap(),
//!     map.position_of(ogre).unwrap(),
//! );
//! assert_eq!(gap, 10);
//! ```
//!
//! # Line of Sight
//!
//! ```
//! use tactica_spatial::{GridCoord, TerrainRegistry, has_line_of_sight};
//!
//! let mut terrain = TerrainRegistry::new();
//! terrain.mark_obstructed(GridCoord::new(2, 0, 0));
//!
//! assert!(!has_line_of_sight(&terrain, GridCoord::new(0, 0, 0), GridCoord::new(4, 0, 0)));
//! assert!(has_line_of_sight(&terrain, GridCoord::new(0, 1, 0), GridCoord::new(4, 1, 0)));
//! ```
//!
//! # Area Effects
//!
//! ```
//! use tactica_spatial::{AreaShape, CombatantId, GridCoord, OccupancyMap, combatants_in_shape};
//!
//! let mut map = OccupancyMap::new();
//! map.place(CombatantId::new(1), GridCoord::new(3, 0, 0)).unwrap();
//! map.place(CombatantId::new(2), GridCoord::new(0, 3, 0)).unwrap();
//!
//! let line = AreaShape::Line { length: 30, width: 5 };
//! let hit = combatants_in_shape(&map, GridCoord::origin(), &line, Some(GridCoord::new(6, 0, 0)));
//! assert_eq!(hit, vec![(CombatantId::new(1), GridCoord::new(3, 0, 0))]);
//! ```

#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod area;
mod coord;
mod error;
mod grid;
mod metric;
mod occupancy;
mod shape;
mod terrain;
mod visibility;

pub use area::{combatants_in_shape, combatants_in_shape_with_sight};
pub use coord::GridCoord;
pub use error::{OccupancyError, SpatialError};
pub use grid::{GridBounds, GridBoundsIter};
pub use metric::{CELL_SIZE, cells_between, distance, units_to_cells, within_range};
pub use occupancy::{CombatantId, OccupancyMap};
pub use shape::{AreaShape, CONE_HALF_ANGLE_DEG};
pub use terrain::{DIFFICULT_COST, NORMAL_COST, TerrainRegistry};
pub use visibility::{
    SupercoverWalk, first_obstruction, has_line_of_sight, obstructions_between, supercover_line,
};

// Re-export nalgebra types for convenience
pub use nalgebra::Vector3;
