//! Area queries: which combatants an effect touches.

use crate::coord::GridCoord;
use crate::occupancy::{CombatantId, OccupancyMap};
use crate::shape::AreaShape;
use crate::terrain::TerrainRegistry;
use crate::visibility::has_line_of_sight;

/// Returns every placed combatant inside `shape`, in ascending id order.
///
/// # Example
///
/// ```
/// use tactica_spatial::{AreaShape, CombatantId, GridCoord, OccupancyMap, combatants_in_shape};
///
/// let mut map = OccupancyMap::new();
/// map.place(CombatantId::new(3), GridCoord::new(1, 0, 0)).unwrap();
/// map.place(CombatantId::new(1), GridCoord::new(0, 2, 0)).unwrap();
/// map.place(CombatantId::new(2), GridCoord::new(9, 9, 0)).unwrap();
///
/// let hit = combatants_in_shape(
///     &map,
///     GridCoord::origin(),
///     &AreaShape::Sphere { radius: 10 },
///     None,
/// );
/// let ids: Vec<_> = hit.iter().map(|(id, _)| id.get()).collect();
/// assert_eq!(ids, vec![1, 3]);
/// ```
#[must_use]
pub fn combatants_in_shape(
    occupancy: &OccupancyMap,
    origin: GridCoord,
    shape: &AreaShape,
    direction: Option<GridCoord>,
) -> Vec<(CombatantId, GridCoord)> {
    occupancy
        .iter()
        .filter(|&(_, pos)| shape.contains(origin, pos, direction))
        .collect()
}

/// Like [`combatants_in_shape`], but also requires an unobstructed line from
/// `origin` to each combatant.
///
/// Walls inside a fireball shield whoever stands behind them.
#[must_use]
pub fn combatants_in_shape_with_sight(
    occupancy: &OccupancyMap,
    terrain: &TerrainRegistry,
    origin: GridCoord,
    shape: &AreaShape,
    direction: Option<GridCoord>,
) -> Vec<(CombatantId, GridCoord)> {
    occupancy
        .iter()
        .filter(|&(_, pos)| {
            shape.contains(origin, pos, direction) && has_line_of_sight(terrain, origin, pos)
        })
        .collect()
}
