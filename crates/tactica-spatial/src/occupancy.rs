//! Occupancy map: which combatant stands on which cell.
//!
//! The map is a bijection between [`CombatantId`]s and [`GridCoord`]s: at most
//! one combatant per cell and at most one cell per combatant. Both directions
//! are updated inside a single `&mut self` call, so no reader can ever observe
//! a half-applied move.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use tracing::debug;

use crate::coord::GridCoord;
use crate::error::OccupancyError;
use crate::grid::GridBounds;
use crate::metric::distance;

/// Opaque identifier of a combatant.
///
/// The occupancy map stores only identifiers, never combatant state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct CombatantId(u64);

impl CombatantId {
    /// Wraps a raw identifier.
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw identifier.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl From<u64> for CombatantId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for CombatantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Bidirectional association between combatants and grid cells.
///
/// Iteration is always in ascending [`CombatantId`] order, so every query
/// built on top of the map is deterministic.
///
/// # Example
///
/// ```
/// use tactica_spatial::{CombatantId, GridCoord, OccupancyMap};
///
/// let mut map = OccupancyMap::new();
/// let fighter = CombatantId::new(7);
///
/// map.place(fighter, GridCoord::new(0, 0, 0)).unwrap();
/// map.move_to(fighter, GridCoord::new(1, 1, 0)).unwrap();
///
/// assert_eq!(map.position_of(fighter), Some(GridCoord::new(1, 1, 0)));
/// assert_eq!(map.occupant_of(GridCoord::new(1, 1, 0)), Some(fighter));
/// assert_eq!(map.occupant_of(GridCoord::new(0, 0, 0)), None);
/// ```
#[derive(Debug, Clone, Default)]
pub struct OccupancyMap {
    /// Forward direction, ordered by id.
    positions: BTreeMap<CombatantId, GridCoord>,
    /// Reverse direction.
    occupants: HashMap<GridCoord, CombatantId>,
}

impl OccupancyMap {
    /// Creates an empty occupancy map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of placed combatants.
    #[must_use]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Returns `true` if no combatant is placed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Places a combatant on a cell.
    ///
    /// # Errors
    ///
    /// - [`OccupancyError::AlreadyPlaced`] if `id` is already on the grid.
    /// - [`OccupancyError::CellOccupied`] if `pos` holds another combatant.
    pub fn place(&mut self, id: CombatantId, pos: GridCoord) -> Result<(), OccupancyError> {
        if let Some(&at) = self.positions.get(&id) {
            return Err(OccupancyError::AlreadyPlaced { id, at });
        }
        if let Some(&occupant) = self.occupants.get(&pos) {
            return Err(OccupancyError::CellOccupied {
                coord: pos,
                occupant,
            });
        }

        self.positions.insert(id, pos);
        self.occupants.insert(pos, id);
        debug!(%id, %pos, "combatant placed");
        self.debug_check();
        Ok(())
    }

    /// Moves a placed combatant to a new cell, returning its previous cell.
    ///
    /// Moving onto the cell the combatant already occupies is a no-op.
    ///
    /// # Errors
    ///
    /// - [`OccupancyError::NotPlaced`] if `id` is not on the grid.
    /// - [`OccupancyError::CellOccupied`] if `to` holds another combatant.
    pub fn move_to(&mut self, id: CombatantId, to: GridCoord) -> Result<GridCoord, OccupancyError> {
        let Some(&from) = self.positions.get(&id) else {
            return Err(OccupancyError::NotPlaced(id));
        };
        if from == to {
            return Ok(from);
        }
        if let Some(&occupant) = self.occupants.get(&to) {
            return Err(OccupancyError::CellOccupied { coord: to, occupant });
        }

        self.occupants.remove(&from);
        self.occupants.insert(to, id);
        self.positions.insert(id, to);
        debug!(%id, %from, %to, "combatant moved");
        self.debug_check();
        Ok(from)
    }

    /// Removes a combatant from the grid, returning the cell it vacated.
    ///
    /// # Errors
    ///
    /// [`OccupancyError::NotPlaced`] if `id` is not on the grid.
    pub fn remove(&mut self, id: CombatantId) -> Result<GridCoord, OccupancyError> {
        let pos = self
            .positions
            .remove(&id)
            .ok_or(OccupancyError::NotPlaced(id))?;
        self.occupants.remove(&pos);
        debug!(%id, %pos, "combatant removed");
        self.debug_check();
        Ok(pos)
    }

    /// Removes every combatant.
    pub fn clear(&mut self) {
        self.positions.clear();
        self.occupants.clear();
    }

    /// Returns the cell a combatant stands on, if placed.
    #[must_use]
    pub fn position_of(&self, id: CombatantId) -> Option<GridCoord> {
        self.positions.get(&id).copied()
    }

    /// Returns the combatant standing on a cell, if any.
    #[must_use]
    pub fn occupant_of(&self, pos: GridCoord) -> Option<CombatantId> {
        self.occupants.get(&pos).copied()
    }

    /// Returns `true` if a combatant stands on the cell.
    #[must_use]
    pub fn is_occupied(&self, pos: GridCoord) -> bool {
        self.occupants.contains_key(&pos)
    }

    /// Returns `true` if the combatant is on the grid.
    #[must_use]
    pub fn is_placed(&self, id: CombatantId) -> bool {
        self.positions.contains_key(&id)
    }

    /// Iterates over `(id, cell)` pairs in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = (CombatantId, GridCoord)> + '_ {
        self.positions.iter().map(|(&id, &pos)| (id, pos))
    }

    /// Returns every combatant within `radius` game units of `center`.
    ///
    /// Uses [`distance`], so a combatant exactly `radius` away is included.
    /// Results are in ascending id order.
    ///
    /// # Example
    ///
    /// ```
    /// use tactica_spatial::{CombatantId, GridCoord, OccupancyMap};
    ///
    /// let mut map = OccupancyMap::new();
    /// map.place(CombatantId::new(1), GridCoord::new(1, 1, 0)).unwrap();
    /// map.place(CombatantId::new(2), GridCoord::new(3, 0, 0)).unwrap();
    ///
    /// let near = map.combatants_within(GridCoord::origin(), 5);
    /// assert_eq!(near, vec![(CombatantId::new(1), GridCoord::new(1, 1, 0))]);
    /// ```
    #[must_use]
    pub fn combatants_within(
        &self,
        center: GridCoord,
        radius: u32,
    ) -> Vec<(CombatantId, GridCoord)> {
        self.iter()
            .filter(|&(_, pos)| distance(center, pos) <= radius)
            .collect()
    }

    /// Returns the smallest bounds containing every occupied cell.
    #[must_use]
    pub fn extent(&self) -> Option<GridBounds> {
        GridBounds::enclosing(self.positions.values().copied())
    }

    /// Verifies that both directions of the map agree.
    ///
    /// # Panics
    ///
    /// Panics if the bijection is broken. That can only result from a bug in
    /// this module, never from caller input, so it is treated as fatal.
    pub fn assert_consistent(&self) {
        assert_eq!(
            self.positions.len(),
            self.occupants.len(),
            "occupancy bijection broken: {} combatants but {} occupied cells",
            self.positions.len(),
            self.occupants.len()
        );
        for (&id, &pos) in &self.positions {
            let occupant = self.occupants.get(&pos).copied();
            assert_eq!(
                occupant,
                Some(id),
                "occupancy bijection broken: {id} is at {pos} but the cell holds {occupant:?}"
            );
        }
    }

    fn debug_check(&self) {
        if cfg!(debug_assertions) {
            self.assert_consistent();
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn id(raw: u64) -> CombatantId {
        CombatantId::new(raw)
    }

    #[test]
    fn test_place_and_lookup_both_directions() {
        let mut map = OccupancyMap::new();
        map.place(id(1), GridCoord::new(2, 3, 0)).unwrap();

        assert_eq!(map.position_of(id(1)), Some(GridCoord::new(2, 3, 0)));
        assert_eq!(map.occupant_of(GridCoord::new(2, 3, 0)), Some(id(1)));
        assert_eq!(map.len(), 1);
        assert!(map.is_placed(id(1)));
        assert!(map.is_occupied(GridCoord::new(2, 3, 0)));
    }

    #[test]
    fn test_place_twice_fails() {
        let mut map = OccupancyMap::new();
        map.place(id(1), GridCoord::origin()).unwrap();

        let err = map.place(id(1), GridCoord::new(5, 5, 5)).unwrap_err();
        assert_eq!(
            err,
            OccupancyError::AlreadyPlaced {
                id: id(1),
                at: GridCoord::origin()
            }
        );
        assert_eq!(map.occupant_of(GridCoord::new(5, 5, 5)), None);
    }

    #[test]
    fn test_place_on_occupied_cell_fails() {
        let mut map = OccupancyMap::new();
        map.place(id(1), GridCoord::origin()).unwrap();

        let err = map.place(id(2), GridCoord::origin()).unwrap_err();
        assert_eq!(
            err,
            OccupancyError::CellOccupied {
                coord: GridCoord::origin(),
                occupant: id(1)
            }
        );
        assert!(!map.is_placed(id(2)));
    }

    #[test]
    fn test_move_updates_both_directions() {
        let mut map = OccupancyMap::new();
        map.place(id(1), GridCoord::origin()).unwrap();

        let previous = map.move_to(id(1), GridCoord::new(1, 0, 0)).unwrap();
        assert_eq!(previous, GridCoord::origin());
        assert_eq!(map.occupant_of(GridCoord::origin()), None);
        assert_eq!(map.occupant_of(GridCoord::new(1, 0, 0)), Some(id(1)));
        assert_eq!(map.position_of(id(1)), Some(GridCoord::new(1, 0, 0)));
    }

    #[test]
    fn test_move_onto_own_cell_is_noop() {
        let mut map = OccupancyMap::new();
        map.place(id(1), GridCoord::origin()).unwrap();
        assert_eq!(map.move_to(id(1), GridCoord::origin()), Ok(GridCoord::origin()));
        assert_eq!(map.position_of(id(1)), Some(GridCoord::origin()));
    }

    #[test]
    fn test_move_onto_occupied_fails_without_side_effects() {
        let mut map = OccupancyMap::new();
        map.place(id(1), GridCoord::origin()).unwrap();
        map.place(id(2), GridCoord::new(1, 0, 0)).unwrap();

        let err = map.move_to(id(1), GridCoord::new(1, 0, 0)).unwrap_err();
        assert!(matches!(err, OccupancyError::CellOccupied { occupant, .. } if occupant == id(2)));
        assert_eq!(map.position_of(id(1)), Some(GridCoord::origin()));
        assert_eq!(map.position_of(id(2)), Some(GridCoord::new(1, 0, 0)));
        map.assert_consistent();
    }

    #[test]
    fn test_move_unplaced_fails() {
        let mut map = OccupancyMap::new();
        let err = map.move_to(id(9), GridCoord::origin()).unwrap_err();
        assert_eq!(err, OccupancyError::NotPlaced(id(9)));
        assert!(map.is_empty());
    }

    #[test]
    fn test_remove_frees_cell() {
        let mut map = OccupancyMap::new();
        map.place(id(1), GridCoord::new(4, 4, 4)).unwrap();
        assert_eq!(map.remove(id(1)), Ok(GridCoord::new(4, 4, 4)));
        assert_eq!(map.remove(id(1)), Err(OccupancyError::NotPlaced(id(1))));

        map.place(id(2), GridCoord::new(4, 4, 4)).unwrap();
        assert_eq!(map.occupant_of(GridCoord::new(4, 4, 4)), Some(id(2)));
    }

    #[test]
    fn test_combatants_within_is_inclusive_and_ordered() {
        let mut map = OccupancyMap::new();
        map.place(id(3), GridCoord::new(2, 0, 0)).unwrap();
        map.place(id(1), GridCoord::new(0, 2, 2)).unwrap();
        map.place(id(2), GridCoord::new(3, 0, 0)).unwrap();

        let within = map.combatants_within(GridCoord::origin(), 10);
        assert_eq!(
            within,
            vec![
                (id(1), GridCoord::new(0, 2, 2)),
                (id(3), GridCoord::new(2, 0, 0)),
            ]
        );
    }

    #[test]
    fn test_extent() {
        let mut map = OccupancyMap::new();
        assert!(map.extent().is_none());
        map.place(id(1), GridCoord::new(-1, 0, 0)).unwrap();
        map.place(id(2), GridCoord::new(2, 3, 1)).unwrap();
        let extent = map.extent().unwrap();
        assert_eq!(extent.min, GridCoord::new(-1, 0, 0));
        assert_eq!(extent.max, GridCoord::new(2, 3, 1));
    }

    #[test]
    fn test_iter_is_ordered_by_id() {
        let mut map = OccupancyMap::new();
        for raw in [5, 1, 3] {
            map.place(id(raw), GridCoord::new(i32::try_from(raw).unwrap(), 0, 0))
                .unwrap();
        }
        let ids: Vec<_> = map.iter().map(|(i, _)| i.get()).collect();
        assert_eq!(ids, vec![1, 3, 5]);
    }

    #[test]
    fn test_clear() {
        let mut map = OccupancyMap::new();
        map.place(id(1), GridCoord::origin()).unwrap();
        map.clear();
        assert!(map.is_empty());
        assert!(!map.is_occupied(GridCoord::origin()));
    }

    #[test]
    #[should_panic(expected = "occupancy bijection broken")]
    fn test_broken_bijection_is_fatal() {
        let mut map = OccupancyMap::new();
        map.place(id(1), GridCoord::origin()).unwrap();
        // Corrupt the reverse direction directly.
        map.occupants.insert(GridCoord::origin(), id(2));
        map.assert_consistent();
    }

    #[test]
    fn test_display_id() {
        assert_eq!(CombatantId::new(42).to_string(), "#42");
        assert_eq!(CombatantId::from(42), CombatantId::new(42));
    }
}
