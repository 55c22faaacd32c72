//! Battlefield configuration.
//!
//! # Example
//!
//! ```
//! use tactica_battlefield::BattlefieldConfig;
//! use tactica_pathfind::PathfinderConfig;
//! use tactica_spatial::{GridBounds, GridCoord};
//!
//! let config = BattlefieldConfig::default()
//!     .with_bounds(GridBounds::new(GridCoord::new(0, 0, 0), GridCoord::new(29, 29, 4)))
//!     .with_pathfinder(PathfinderConfig::default().with_max_nodes(50_000));
//!
//! assert!(config.validate().is_ok());
//! assert_eq!(config.pathfinder().max_nodes(), Some(50_000));
//! ```

use tactica_pathfind::PathfinderConfig;
use tactica_spatial::{GridBounds, SpatialError};

/// Settings for one encounter's battlefield.
///
/// Defaults:
/// - Unbounded grid
/// - Default pathfinder settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct BattlefieldConfig {
    /// Playable area. `None` leaves the grid unbounded.
    bounds: Option<GridBounds>,
    /// Defaults for every search run against the battlefield.
    pathfinder: PathfinderConfig,
}

impl BattlefieldConfig {
    /// Creates a configuration with default settings.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            bounds: None,
            pathfinder: PathfinderConfig::new(),
        }
    }

    /// Restricts the playable area.
    #[must_use]
    pub const fn with_bounds(mut self, bounds: GridBounds) -> Self {
        self.bounds = Some(bounds);
        self
    }

    /// Removes the playable-area restriction.
    #[must_use]
    pub const fn without_bounds(mut self) -> Self {
        self.bounds = None;
        self
    }

    /// Sets the default pathfinder settings.
    #[must_use]
    pub const fn with_pathfinder(mut self, pathfinder: PathfinderConfig) -> Self {
        self.pathfinder = pathfinder;
        self
    }

    /// Returns the playable area, if restricted.
    #[must_use]
    pub const fn bounds(&self) -> Option<GridBounds> {
        self.bounds
    }

    /// Returns the default pathfinder settings.
    #[must_use]
    pub const fn pathfinder(&self) -> &PathfinderConfig {
        &self.pathfinder
    }

    /// Pathfinder settings with the playable area applied when the pathfinder
    /// has no bounds of its own.
    #[must_use]
    pub const fn effective_pathfinder(&self) -> PathfinderConfig {
        match (self.pathfinder.bounds(), self.bounds) {
            (None, Some(bounds)) => self.pathfinder.with_bounds(bounds),
            _ => self.pathfinder,
        }
    }

    /// Checks that every configured region is well formed.
    ///
    /// # Errors
    ///
    /// Returns [`SpatialError::InvalidBounds`] if the playable area or the
    /// pathfinder bounds are inverted.
    pub const fn validate(&self) -> Result<(), SpatialError> {
        if let Some(bounds) = self.bounds {
            if !bounds.is_valid() {
                return Err(SpatialError::InvalidBounds {
                    min: bounds.min,
                    max: bounds.max,
                });
            }
        }
        self.pathfinder.validate()
    }
}
