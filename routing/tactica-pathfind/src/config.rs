//! Pathfinder configuration.
//!
//! # Example
//!
//! ```
//! use tactica_pathfind::{OccupiedCells, PathfinderConfig};
//! use tactica_spatial::{GridBounds, GridCoord};
//!
//! let config = PathfinderConfig::default()
//!     .with_bounds(GridBounds::new(GridCoord::new(0, 0, 0), GridCoord::new(19, 19, 3)))
//!     .with_occupied_cells(OccupiedCells::Avoid)
//!     .with_max_nodes(10_000);
//!
//! assert_eq!(config.max_nodes(), Some(10_000));
//! ```

use tactica_spatial::{GridBounds, SpatialError};

/// How the search treats cells that hold a combatant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum OccupiedCells {
    /// Occupancy is ignored; only terrain decides passability.
    #[default]
    Pass,
    /// Cells holding a combatant are impassable, except the start cell.
    Avoid,
}

/// Configuration for [`GridAStar`](crate::GridAStar).
///
/// Defaults:
/// - No explicit bounds (the search box is derived per query)
/// - Occupied cells pass
/// - No node limit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct PathfinderConfig {
    /// Cells the search may visit. `None` derives a box per query.
    bounds: Option<GridBounds>,
    /// Treatment of occupied cells.
    occupied_cells: OccupiedCells,
    /// Maximum number of nodes to settle before giving up.
    max_nodes: Option<usize>,
}

impl PathfinderConfig {
    /// Creates a configuration with default settings.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            bounds: None,
            occupied_cells: OccupiedCells::Pass,
            max_nodes: None,
        }
    }

    /// Restricts the search to the given cells.
    #[must_use]
    pub const fn with_bounds(mut self, bounds: GridBounds) -> Self {
        self.bounds = Some(bounds);
        self
    }

    /// Removes explicit bounds.
    #[must_use]
    pub const fn without_bounds(mut self) -> Self {
        self.bounds = None;
        self
    }

    /// Sets how occupied cells are treated.
    #[must_use]
    pub const fn with_occupied_cells(mut self, occupied_cells: OccupiedCells) -> Self {
        self.occupied_cells = occupied_cells;
        self
    }

    /// Sets the maximum number of nodes to settle.
    ///
    /// If this limit is reached, the search returns an empty path.
    #[must_use]
    pub const fn with_max_nodes(mut self, max: usize) -> Self {
        self.max_nodes = Some(max);
        self
    }

    /// Removes the node limit.
    #[must_use]
    pub const fn without_max_nodes(mut self) -> Self {
        self.max_nodes = None;
        self
    }

    /// Returns the explicit bounds, if set.
    #[must_use]
    pub const fn bounds(&self) -> Option<GridBounds> {
        self.bounds
    }

    /// Returns how occupied cells are treated.
    #[must_use]
    pub const fn occupied_cells(&self) -> OccupiedCells {
        self.occupied_cells
    }

    /// Returns the maximum number of nodes, if set.
    #[must_use]
    pub const fn max_nodes(&self) -> Option<usize> {
        self.max_nodes
    }

    /// Checks that explicit bounds, if any, are well formed.
    ///
    /// # Errors
    ///
    /// Returns [`SpatialError::InvalidBounds`] for inverted bounds, which can
    /// only arrive through deserialization.
    pub const fn validate(&self) -> Result<(), SpatialError> {
        match self.bounds {
            Some(bounds) if !bounds.is_valid() => Err(SpatialError::InvalidBounds {
                min: bounds.min,
                max: bounds.max,
            }),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tactica_spatial::GridCoord;

    #[test]
    fn test_defaults() {
        let config = PathfinderConfig::default();
        assert_eq!(config, PathfinderConfig::new());
        assert_eq!(config.bounds(), None);
        assert_eq!(config.occupied_cells(), OccupiedCells::Pass);
        assert_eq!(config.max_nodes(), None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_round_trip() {
        let bounds = GridBounds::around(GridCoord::origin(), 4);
        let config = PathfinderConfig::new()
            .with_bounds(bounds)
            .with_max_nodes(50)
            .with_occupied_cells(OccupiedCells::Avoid);
        assert_eq!(config.bounds(), Some(bounds));
        assert_eq!(config.occupied_cells(), OccupiedCells::Avoid);

        let cleared = config.without_bounds().without_max_nodes();
        assert_eq!(cleared.bounds(), None);
        assert_eq!(cleared.max_nodes(), None);
        assert_eq!(cleared.occupied_cells(), OccupiedCells::Avoid);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_deserialize_partial_and_validate() {
        let config: PathfinderConfig =
            serde_json::from_str(r#"{"occupied_cells":"avoid"}"#).unwrap();
        assert_eq!(config.occupied_cells(), OccupiedCells::Avoid);
        assert_eq!(config.max_nodes(), None);

        let inverted: PathfinderConfig = serde_json::from_str(
            r#"{"bounds":{"min":{"x":5,"y":0,"z":0},"max":{"x":0,"y":0,"z":0}}}"#,
        )
        .unwrap();
        assert!(matches!(
            inverted.validate(),
            Err(SpatialError::InvalidBounds { .. })
        ));
    }
}
