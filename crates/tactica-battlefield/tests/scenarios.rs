//! End-to-end encounter scenarios run through the battlefield API.
//!
//! Run with: cargo test -p tactica-battlefield --test scenarios

#![allow(clippy::unwrap_used, clippy::expect_used)]

use tactica_battlefield::{Battlefield, BattlefieldConfig, MovementError};
use tactica_spatial::{AreaShape, CombatantId, GridBounds, GridCoord};

fn c(x: i32, y: i32, z: i32) -> GridCoord {
    GridCoord::new(x, y, z)
}

/// Every step is between adjacent cells and no step lands on an obstruction.
fn assert_walkable(battlefield: &Battlefield, cells: &[GridCoord]) {
    for pair in cells.windows(2) {
        assert!(pair[0].is_adjacent(pair[1]), "{} -> {}", pair[0], pair[1]);
    }
    for &cell in cells {
        assert!(!battlefield.terrain().is_obstructed(cell), "{cell} is obstructed");
    }
}

// =============================================================================
// Movement
// =============================================================================

#[test]
fn scenario_a_straight_route_on_open_ground() {
    let battlefield = Battlefield::new();
    let path = battlefield.find_path(c(0, 0, 0), c(0, 2, 0));

    assert_eq!(path.cells(), &[c(0, 0, 0), c(0, 1, 0), c(0, 2, 0)]);
    assert_eq!(path.cost(), 10);
    assert_eq!(battlefield.path_cost(c(0, 0, 0), c(0, 2, 0)), Some(10));
}

#[test]
fn scenario_b_route_avoids_obstacles() {
    let mut battlefield = Battlefield::new();
    let clear_cost = battlefield.path_cost(c(0, 0, 0), c(3, 0, 0)).unwrap();

    battlefield.mark_obstructed(c(1, 0, 0));
    battlefield.mark_obstructed(c(2, 0, 0));
    let path = battlefield.find_path(c(0, 0, 0), c(3, 0, 0));

    assert!(!path.is_empty());
    assert!(!path.cells().contains(&c(1, 0, 0)));
    assert!(!path.cells().contains(&c(2, 0, 0)));
    assert!(path.cost() >= clear_cost);
    assert_eq!(path.cost(), 15);
    assert_walkable(&battlefield, path.cells());
}

#[test]
fn scenario_b_single_layer_detour() {
    // Confined to one layer and walled on one side, one route remains.
    let config = BattlefieldConfig::new().with_bounds(GridBounds::new(c(0, -1, 0), c(3, 1, 0)));
    let mut battlefield = Battlefield::with_config(config).unwrap();
    for x in 1..=2 {
        battlefield.mark_obstructed(c(x, 0, 0));
        battlefield.mark_obstructed(c(x, -1, 0));
    }

    let path = battlefield.find_path(c(0, 0, 0), c(3, 0, 0));
    assert_eq!(path.cells(), &[c(0, 0, 0), c(1, 1, 0), c(2, 1, 0), c(3, 0, 0)]);
    assert_eq!(path.cost(), 15);
}

#[test]
fn scenario_c_difficult_cell_in_a_corridor() {
    let corridor = BattlefieldConfig::new().with_bounds(GridBounds::new(c(0, 0, 0), c(2, 0, 0)));
    let mut battlefield = Battlefield::with_config(corridor).unwrap();
    battlefield.mark_difficult(c(1, 0, 0));

    let path = battlefield.find_path(c(0, 0, 0), c(2, 0, 0));
    assert_eq!(path.cells(), &[c(0, 0, 0), c(1, 0, 0), c(2, 0, 0)]);
    assert_eq!(path.cost(), 15);

    battlefield.clear_difficult(c(1, 0, 0));
    assert_eq!(battlefield.path_cost(c(0, 0, 0), c(2, 0, 0)), Some(10));
}

#[test]
fn scenario_f_enclosed_start_has_no_route() {
    let mut battlefield = Battlefield::new();
    let hero = CombatantId::new(1);
    battlefield.place(hero, c(0, 0, 0)).unwrap();
    for neighbor in c(0, 0, 0).all_neighbors() {
        battlefield.mark_obstructed(neighbor);
    }

    let path = battlefield.find_path(c(0, 0, 0), c(5, 5, 0));
    assert!(path.is_empty());
    assert_eq!(path.cost(), 0);
    assert_eq!(battlefield.path_cost(c(0, 0, 0), c(5, 5, 0)), None);

    assert_eq!(
        battlefield.move_along(hero, c(5, 5, 0), 1000),
        Err(MovementError::NoPath {
            from: c(0, 0, 0),
            to: c(5, 5, 0),
        })
    );
    assert_eq!(battlefield.position_of(hero), Some(c(0, 0, 0)));
    assert_eq!(
        battlefield.reachable_within(c(0, 0, 0), 100),
        vec![(c(0, 0, 0), 0)]
    );
}

// =============================================================================
// Sight and areas
// =============================================================================

#[test]
fn scenario_d_diagonal_sight_blocked_then_cleared() {
    let mut battlefield = Battlefield::new();
    battlefield.mark_obstructed(c(1, 1, 0));

    assert!(!battlefield.has_line_of_sight(c(0, 0, 0), c(3, 3, 0)));
    assert!(!battlefield.has_line_of_sight(c(3, 3, 0), c(0, 0, 0)));
    assert_eq!(battlefield.obstructions_between(c(0, 0, 0), c(3, 3, 0)), vec![c(1, 1, 0)]);

    battlefield.clear_obstructed(c(1, 1, 0));
    assert!(battlefield.has_line_of_sight(c(0, 0, 0), c(3, 3, 0)));
}

#[test]
fn scenario_e_sphere_membership() {
    let mut battlefield = Battlefield::new();
    let near = CombatantId::new(1);
    let side = CombatantId::new(2);
    let far = CombatantId::new(3);
    battlefield.place(near, c(10, 12, 0)).unwrap();
    battlefield.place(side, c(12, 10, 0)).unwrap();
    battlefield.place(far, c(10, 13, 0)).unwrap();

    let fireball = AreaShape::Sphere { radius: 10 };
    assert!(fireball.contains(c(10, 10, 0), c(10, 12, 0), None));
    assert!(fireball.contains(c(10, 10, 0), c(12, 10, 0), None));
    assert!(!fireball.contains(c(10, 10, 0), c(10, 13, 0), None));

    let hit = battlefield.combatants_in_shape(c(10, 10, 0), &fireball, None);
    assert_eq!(hit, vec![(near, c(10, 12, 0)), (side, c(12, 10, 0))]);
}

// =============================================================================
// A full turn
// =============================================================================

#[test]
fn skirmish_turn() {
    let config = BattlefieldConfig::new().with_bounds(GridBounds::new(c(0, 0, 0), c(11, 11, 0)));
    let mut battlefield = Battlefield::with_config(config).unwrap();

    let paladin = CombatantId::new(1);
    let orc = CombatantId::new(2);
    let archer = CombatantId::new(3);
    battlefield.place(paladin, c(1, 1, 0)).unwrap();
    battlefield.place(orc, c(2, 2, 0)).unwrap();
    battlefield.place(archer, c(9, 9, 0)).unwrap();
    // A muddy band across the middle of the map.
    for x in 0..=11 {
        battlefield.mark_difficult(c(x, 4, 0));
    }

    // The paladin wades through the mud, away from the orc.
    let outcome = battlefield.move_along(paladin, c(1, 6, 0), 30).unwrap();
    assert_eq!(outcome.from(), c(1, 1, 0));
    assert_eq!(outcome.to(), c(1, 6, 0));
    assert_walkable(&battlefield, outcome.path().cells());
    assert_eq!(outcome.cost(), 30);
    assert_eq!(outcome.remaining_budget(), 0);

    let exits = battlefield.reach_exits(paladin, outcome.path().cells(), 5);
    assert_eq!(exits.len(), 1);
    assert_eq!(exits[0].combatant, orc);

    // The archer can see the paladin across open ground.
    assert!(battlefield.has_line_of_sight(c(9, 9, 0), c(1, 6, 0)));

    // Moving onto the orc is refused and nothing changes.
    let err = battlefield.move_along(paladin, c(2, 2, 0), 30).unwrap_err();
    assert!(matches!(err, MovementError::Occupancy(_)));
    assert_eq!(battlefield.position_of(paladin), Some(c(1, 6, 0)));
    battlefield.occupancy().assert_consistent();
}
