//! Pathfinding on the tactica combat grid.
//!
//! This crate finds movement routes over the terrain and occupancy layers
//! defined in `tactica-spatial`.
//!
//! # Overview
//!
//! - **A\*** ([`astar::GridAStar`]): cheapest route between two cells over the
//!   26-connected grid, paying each cell's terrain entry cost
//! - **Movement range** ([`GridAStar::reachable_within`]): every cell a
//!   combatant can reach on a movement budget
//!
//! # Quick Start
//!
//! ```
//! use tactica_pathfind::{GridAStar, OccupiedCells, PathfinderConfig};
//! use tactica_spatial::{CombatantId, GridCoord, OccupancyMap, TerrainRegistry};
//!
//! let mut terrain = TerrainRegistry::new();
//! terrain.mark_obstructed(GridCoord::new(1, 0, 0));
//! terrain.mark_obstructed(GridCoord::new(2, 0, 0));
//!
//! let mut occupancy = OccupancyMap::new();
//! occupancy.place(CombatantId::new(1), GridCoord::new(0, 0, 0)).unwrap();
//!
//! let config = PathfinderConfig::default().with_occupied_cells(OccupiedCells::Avoid);
//! let pathfinder = GridAStar::new(&terrain, &occupancy, config);
//!
//! let path = pathfinder.find_path(GridCoord::new(0, 0, 0), GridCoord::new(3, 0, 0));
//! assert_eq!(path.destination(), Some(GridCoord::new(3, 0, 0)));
//! assert!(!path.cells().contains(&GridCoord::new(1, 0, 0)));
//! assert_eq!(path.cost(), 15);
//! ```
//!
//! # Costs
//!
//! | Cell | Entry cost |
//! |------|------------|
//! | Normal | 5 |
//! | Difficult | 10 |
//! | Obstructed | never entered |
//!
//! Diagonal steps, including vertical ones, cost the same as orthogonal ones.
//! The start cell is free; the path cost is the sum of the entry costs of
//! every later cell.

#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod astar;
pub mod config;
pub mod neighbors;
pub mod path;
mod reach;

// Re-export main types for convenience
pub use astar::{GridAStar, find_path};
pub use config::{OccupiedCells, PathfinderConfig};
pub use neighbors::NeighborGenerator;
pub use path::{GridPath, SearchStats};
