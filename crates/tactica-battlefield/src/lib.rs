//! Battlefield sessions for turn-based tactical combat.
//!
//! A [`Battlefield`] owns the spatial state of one encounter: the occupancy
//! map, the terrain layers and the configuration. It is the single entry
//! point the rules engine talks to for placement, movement, line of sight
//! and area effects.
//!
//! # Example
//!
//! ```
//! use tactica_battlefield::{Battlefield, BattlefieldConfig, MovementError};
//! use tactica_spatial::{AreaShape, CombatantId, GridBounds, GridCoord};
//!
//! let config = BattlefieldConfig::new()
//!     .with_bounds(GridBounds::new(GridCoord::new(0, 0, 0), GridCoord::new(9, 9, 2)));
//! let mut battlefield = Battlefield::with_config(config).unwrap();
//!
//! let fighter = CombatantId::new(1);
//! let goblin = CombatantId::new(2);
//! battlefield.place(fighter, GridCoord::new(0, 0, 0)).unwrap();
//! battlefield.place(goblin, GridCoord::new(4, 0, 0)).unwrap();
//!
//! // 30 units of movement covers six steps on open ground.
//! let outcome = battlefield.move_along(fighter, GridCoord::new(3, 0, 0), 30).unwrap();
//! assert_eq!(outcome.cost(), 15);
//!
//! // Leaving the map is refused without changing anything.
//! let err = battlefield.move_along(fighter, GridCoord::new(12, 0, 0), 30);
//! assert!(matches!(err, Err(MovementError::Spatial(_))));
//!
//! let burst = AreaShape::Sphere { radius: 5 };
//! let hit = battlefield.combatants_in_shape(GridCoord::new(4, 1, 0), &burst, None);
//! assert_eq!(hit.len(), 2);
//! ```
//!
//! # Concurrency
//!
//! [`SharedBattlefield`] wraps a battlefield in a read-write lock so several
//! searches can run at once while moves are applied one at a time.

#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod battlefield;
mod config;
mod error;
mod shared;

pub use battlefield::{Battlefield, MoveOutcome, ReachExit};
pub use config::BattlefieldConfig;
pub use error::MovementError;
pub use shared::SharedBattlefield;
