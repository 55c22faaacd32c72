//! The battlefield session object.

use tactica_pathfind::{GridAStar, GridPath, OccupiedCells};
use tactica_spatial::{
    AreaShape, CombatantId, GridBounds, GridCoord, OccupancyError, OccupancyMap, SpatialError,
    TerrainRegistry, combatants_in_shape, combatants_in_shape_with_sight, distance,
    has_line_of_sight, obstructions_between,
};
use tracing::{debug, info};

use crate::config::BattlefieldConfig;
use crate::error::MovementError;

/// The spatial state of one encounter: who stands where, and the terrain.
///
/// Created when an encounter starts and dropped when it ends. Every query
/// takes `&self` and every mutation `&mut self`, so the borrow checker keeps
/// queries (including whole path searches) from observing a half-applied
/// change. Share across threads with
/// [`SharedBattlefield`](crate::SharedBattlefield).
///
/// # Example
///
/// ```
/// use tactica_battlefield::Battlefield;
/// use tactica_spatial::{CombatantId, GridCoord};
///
/// let mut battlefield = Battlefield::new();
/// let knight = CombatantId::new(1);
/// battlefield.place(knight, GridCoord::new(0, 0, 0)).unwrap();
/// battlefield.mark_difficult(GridCoord::new(1, 0, 0));
///
/// let outcome = battlefield.move_along(knight, GridCoord::new(0, 3, 0), 30).unwrap();
/// assert_eq!(outcome.cost(), 15);
/// assert_eq!(outcome.remaining_budget(), 15);
/// assert_eq!(battlefield.position_of(knight), Some(GridCoord::new(0, 3, 0)));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Battlefield {
    occupancy: OccupancyMap,
    terrain: TerrainRegistry,
    config: BattlefieldConfig,
}

/// A committed movement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveOutcome {
    from: GridCoord,
    path: GridPath,
    budget: u32,
}

impl MoveOutcome {
    /// Where the combatant started.
    #[must_use]
    pub const fn from(&self) -> GridCoord {
        self.from
    }

    /// Where the combatant ended up.
    #[must_use]
    pub fn to(&self) -> GridCoord {
        self.path.destination().unwrap_or(self.from)
    }

    /// The route walked, start and destination included.
    #[must_use]
    pub const fn path(&self) -> &GridPath {
        &self.path
    }

    /// Movement spent.
    #[must_use]
    pub const fn cost(&self) -> u32 {
        self.path.cost()
    }

    /// Movement left from the budget.
    #[must_use]
    pub const fn remaining_budget(&self) -> u32 {
        self.budget.saturating_sub(self.path.cost())
    }
}

/// The step at which a moving combatant leaves another combatant's reach.
///
/// Reaction rules (opportunity attacks) trigger on these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReachExit {
    /// The combatant whose reach is left.
    pub combatant: CombatantId,
    /// Where that combatant stands.
    pub position: GridCoord,
    /// Index into the path of the last cell still within reach.
    pub step: usize,
    /// The last cell within reach.
    pub leaving: GridCoord,
    /// The first cell beyond reach.
    pub entering: GridCoord,
}

impl Battlefield {
    /// Creates an empty, unbounded battlefield.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty battlefield with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SpatialError::InvalidBounds`] if the configuration holds
    /// inverted bounds.
    pub fn with_config(config: BattlefieldConfig) -> Result<Self, SpatialError> {
        config.validate()?;
        debug!(bounds = ?config.bounds(), "battlefield created");
        Ok(Self {
            occupancy: OccupancyMap::new(),
            terrain: TerrainRegistry::new(),
            config,
        })
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &BattlefieldConfig {
        &self.config
    }

    /// Read access to the occupancy map.
    #[must_use]
    pub const fn occupancy(&self) -> &OccupancyMap {
        &self.occupancy
    }

    /// Read access to the terrain layers.
    #[must_use]
    pub const fn terrain(&self) -> &TerrainRegistry {
        &self.terrain
    }

    /// Returns `true` if the cell is inside the playable area.
    #[must_use]
    pub fn in_bounds(&self, pos: GridCoord) -> bool {
        self.config.bounds().is_none_or(|bounds| bounds.contains(pos))
    }

    fn check_bounds(&self, pos: GridCoord) -> Result<(), SpatialError> {
        self.config
            .bounds()
            .map_or(Ok(()), |bounds: GridBounds| bounds.check(pos))
    }

    // -------------------------------------------------------------------------
    // Occupancy
    // -------------------------------------------------------------------------

    /// Puts a combatant on the battlefield.
    ///
    /// # Errors
    ///
    /// - [`MovementError::Spatial`] if `pos` is outside the playable area
    /// - [`MovementError::Occupancy`] if the combatant is already placed or
    ///   the cell is taken
    pub fn place(&mut self, id: CombatantId, pos: GridCoord) -> Result<(), MovementError> {
        self.check_bounds(pos)?;
        self.occupancy.place(id, pos)?;
        Ok(())
    }

    /// Relocates a combatant directly, without pathfinding (teleports,
    /// forced movement). Returns its previous cell.
    ///
    /// # Errors
    ///
    /// - [`MovementError::Spatial`] if `pos` is outside the playable area
    /// - [`MovementError::Occupancy`] if the combatant is not placed or the
    ///   cell is taken
    pub fn move_to(
        &mut self,
        id: CombatantId,
        pos: GridCoord,
    ) -> Result<GridCoord, MovementError> {
        self.check_bounds(pos)?;
        Ok(self.occupancy.move_to(id, pos)?)
    }

    /// Takes a combatant off the battlefield. Returns its last cell.
    ///
    /// # Errors
    ///
    /// Returns [`OccupancyError::NotPlaced`] if the combatant is not placed.
    pub fn remove(&mut self, id: CombatantId) -> Result<GridCoord, OccupancyError> {
        self.occupancy.remove(id)
    }

    /// Where a combatant stands.
    #[must_use]
    pub fn position_of(&self, id: CombatantId) -> Option<GridCoord> {
        self.occupancy.position_of(id)
    }

    /// Who stands on a cell.
    #[must_use]
    pub fn occupant_of(&self, pos: GridCoord) -> Option<CombatantId> {
        self.occupancy.occupant_of(pos)
    }

    /// Every combatant within `radius` game units of `center`, by id.
    #[must_use]
    pub fn combatants_within(
        &self,
        center: GridCoord,
        radius: u32,
    ) -> Vec<(CombatantId, GridCoord)> {
        self.occupancy.combatants_within(center, radius)
    }

    // -------------------------------------------------------------------------
    // Terrain
    // -------------------------------------------------------------------------

    /// Marks a cell as obstructed. Returns `true` if the layer changed.
    pub fn mark_obstructed(&mut self, pos: GridCoord) -> bool {
        self.terrain.mark_obstructed(pos)
    }

    /// Clears an obstruction. Returns `true` if the layer changed.
    pub fn clear_obstructed(&mut self, pos: GridCoord) -> bool {
        self.terrain.clear_obstructed(pos)
    }

    /// Marks a cell as difficult terrain. Returns `true` if the layer changed.
    pub fn mark_difficult(&mut self, pos: GridCoord) -> bool {
        self.terrain.mark_difficult(pos)
    }

    /// Clears difficult terrain. Returns `true` if the layer changed.
    pub fn clear_difficult(&mut self, pos: GridCoord) -> bool {
        self.terrain.clear_difficult(pos)
    }

    // -------------------------------------------------------------------------
    // Sight
    // -------------------------------------------------------------------------

    /// Whether `to` is visible from `from`. Symmetric.
    #[must_use]
    pub fn has_line_of_sight(&self, from: GridCoord, to: GridCoord) -> bool {
        has_line_of_sight(&self.terrain, from, to)
    }

    /// Obstructed cells between two cells, for cover estimation.
    #[must_use]
    pub fn obstructions_between(&self, from: GridCoord, to: GridCoord) -> Vec<GridCoord> {
        obstructions_between(&self.terrain, from, to)
    }

    // -------------------------------------------------------------------------
    // Movement
    // -------------------------------------------------------------------------

    /// A pathfinder over the current state with the configured defaults.
    #[must_use]
    pub fn pathfinder(&self) -> GridAStar<'_> {
        GridAStar::new(&self.terrain, &self.occupancy, self.config.effective_pathfinder())
    }

    /// Cheapest route between two cells; empty if none.
    #[must_use]
    pub fn find_path(&self, start: GridCoord, destination: GridCoord) -> GridPath {
        self.pathfinder().find_path(start, destination)
    }

    /// Cost of [`find_path`](Self::find_path), or `None` if there is no route.
    #[must_use]
    pub fn path_cost(&self, start: GridCoord, destination: GridCoord) -> Option<u32> {
        self.pathfinder().path_cost(start, destination)
    }

    /// Every cell reachable from `start` within `budget`, by cost then cell.
    #[must_use]
    pub fn reachable_within(&self, start: GridCoord, budget: u32) -> Vec<(GridCoord, u32)> {
        self.pathfinder().reachable_within(start, budget)
    }

    /// Pathfinder for a moving combatant: other combatants block.
    fn movement_pathfinder(&self) -> GridAStar<'_> {
        let config = self
            .config
            .effective_pathfinder()
            .with_occupied_cells(OccupiedCells::Avoid);
        GridAStar::new(&self.terrain, &self.occupancy, config)
    }

    /// Cells a combatant could move to on `budget`, with their costs.
    ///
    /// Other combatants block; cells they stand on are never listed.
    ///
    /// # Errors
    ///
    /// Returns [`MovementError::NotPlaced`] if the combatant is not placed.
    pub fn movement_options(
        &self,
        id: CombatantId,
        budget: u32,
    ) -> Result<Vec<(GridCoord, u32)>, MovementError> {
        let from = self
            .occupancy
            .position_of(id)
            .ok_or(MovementError::NotPlaced(id))?;
        Ok(self.movement_pathfinder().reachable_within(from, budget))
    }

    /// Walks a combatant to `destination` along the cheapest route, if it
    /// fits in `budget`.
    ///
    /// Other combatants block the route; the mover's own cell does not.
    /// Nothing changes unless the whole move succeeds.
    ///
    /// # Errors
    ///
    /// - [`MovementError::NotPlaced`] if the combatant is not placed
    /// - [`MovementError::Spatial`] if the destination is outside the
    ///   playable area
    /// - [`MovementError::Occupancy`] if another combatant holds the
    ///   destination
    /// - [`MovementError::NoPath`] if no route exists
    /// - [`MovementError::OverBudget`] if the route costs more than `budget`
    pub fn move_along(
        &mut self,
        id: CombatantId,
        destination: GridCoord,
        budget: u32,
    ) -> Result<MoveOutcome, MovementError> {
        let from = self
            .occupancy
            .position_of(id)
            .ok_or(MovementError::NotPlaced(id))?;
        self.check_bounds(destination)?;
        if let Some(occupant) = self.occupancy.occupant_of(destination) {
            if occupant != id {
                return Err(OccupancyError::CellOccupied {
                    coord: destination,
                    occupant,
                }
                .into());
            }
        }

        let path = self.movement_pathfinder().find_path(from, destination);
        if path.is_empty() {
            debug!(%id, %from, %destination, "movement refused: no path");
            return Err(MovementError::NoPath {
                from,
                to: destination,
            });
        }
        if path.cost() > budget {
            debug!(%id, cost = path.cost(), budget, "movement refused: over budget");
            return Err(MovementError::OverBudget {
                cost: path.cost(),
                budget,
            });
        }

        self.occupancy.move_to(id, destination)?;
        info!(
            %id,
            %from,
            to = %destination,
            cost = path.cost(),
            steps = path.steps(),
            "combatant moved"
        );
        Ok(MoveOutcome { from, path, budget })
    }

    /// Reports, for every other combatant, the first step of `path` at which
    /// the mover goes from within `reach` of it to beyond `reach`.
    ///
    /// Results are in ascending combatant id order. Only [`distance`] is
    /// consulted; sight and terrain play no part.
    ///
    /// # Example
    ///
    /// ```
    /// use tactica_battlefield::Battlefield;
    /// use tactica_spatial::{CombatantId, GridCoord};
    ///
    /// let mut battlefield = Battlefield::new();
    /// let rogue = CombatantId::new(1);
    /// let guard = CombatantId::new(2);
    /// battlefield.place(rogue, GridCoord::new(0, 0, 0)).unwrap();
    /// battlefield.place(guard, GridCoord::new(-1, 0, 0)).unwrap();
    ///
    /// let path = battlefield.find_path(GridCoord::new(0, 0, 0), GridCoord::new(3, 0, 0));
    /// let exits = battlefield.reach_exits(rogue, path.cells(), 5);
    ///
    /// assert_eq!(exits.len(), 1);
    /// assert_eq!(exits[0].combatant, guard);
    /// assert_eq!(exits[0].leaving, GridCoord::new(0, 0, 0));
    /// assert_eq!(exits[0].entering, GridCoord::new(1, 0, 0));
    /// ```
    #[must_use]
    pub fn reach_exits(
        &self,
        mover: CombatantId,
        path: &[GridCoord],
        reach: u32,
    ) -> Vec<ReachExit> {
        self.occupancy
            .iter()
            .filter(|&(id, _)| id != mover)
            .filter_map(|(combatant, position)| {
                path.windows(2).enumerate().find_map(|(step, pair)| {
                    let (leaving, entering) = (pair[0], pair[1]);
                    (distance(leaving, position) <= reach && distance(entering, position) > reach)
                        .then_some(ReachExit {
                            combatant,
                            position,
                            step,
                            leaving,
                            entering,
                        })
                })
            })
            .collect()
    }

    // -------------------------------------------------------------------------
    // Areas
    // -------------------------------------------------------------------------

    /// Combatants inside an area effect, by id.
    #[must_use]
    pub fn combatants_in_shape(
        &self,
        origin: GridCoord,
        shape: &AreaShape,
        direction: Option<GridCoord>,
    ) -> Vec<(CombatantId, GridCoord)> {
        combatants_in_shape(&self.occupancy, origin, shape, direction)
    }

    /// Combatants inside an area effect that the origin can also see, by id.
    #[must_use]
    pub fn combatants_in_shape_with_sight(
        &self,
        origin: GridCoord,
        shape: &AreaShape,
        direction: Option<GridCoord>,
    ) -> Vec<(CombatantId, GridCoord)> {
        combatants_in_shape_with_sight(&self.occupancy, &self.terrain, origin, shape, direction)
    }

    /// Removes every combatant and terrain feature, keeping the configuration.
    pub fn clear(&mut self) {
        self.occupancy.clear();
        self.terrain.clear();
        debug!("battlefield cleared");
    }
}
