//! Property-based tests for the battlefield invariants.
//!
//! Run with: cargo test -p tactica-battlefield --test proptest_invariants

#![allow(clippy::unwrap_used, clippy::expect_used)]

use proptest::prelude::*;
use tactica_battlefield::{Battlefield, BattlefieldConfig};
use tactica_spatial::{AreaShape, CombatantId, GridBounds, GridCoord, distance};

// =============================================================================
// Strategies
// =============================================================================

/// A cell on a small, mostly flat board so searches stay quick.
fn arb_cell() -> impl Strategy<Value = GridCoord> {
    (-6..=6i32, -6..=6i32, -1..=1i32).prop_map(|(x, y, z)| GridCoord::new(x, y, z))
}

/// A cell anywhere in a wider box, for pure geometry.
fn arb_wide_cell() -> impl Strategy<Value = GridCoord> {
    prop::array::uniform3(-500..=500i32).prop_map(|[x, y, z]| GridCoord::new(x, y, z))
}

/// Scattered obstacles and difficult cells.
fn arb_terrain() -> impl Strategy<Value = (Vec<GridCoord>, Vec<GridCoord>)> {
    (
        prop::collection::vec(arb_cell(), 0..40),
        prop::collection::vec(arb_cell(), 0..40),
    )
}

/// A bounded battlefield carrying the given terrain.
fn board(obstructed: &[GridCoord], difficult: &[GridCoord]) -> Battlefield {
    let bounds = GridBounds::new(GridCoord::new(-7, -7, -2), GridCoord::new(7, 7, 2));
    let mut battlefield = Battlefield::with_config(BattlefieldConfig::new().with_bounds(bounds))
        .unwrap();
    for &cell in obstructed {
        battlefield.mark_obstructed(cell);
    }
    for &cell in difficult {
        battlefield.mark_difficult(cell);
    }
    battlefield
}

// =============================================================================
// Property Tests: Occupancy
// =============================================================================

proptest! {
    /// Every placed combatant is found at its cell and vice versa, whatever
    /// sequence of placements and moves was applied.
    #[test]
    fn occupancy_stays_bijective(
        placements in prop::collection::vec(arb_cell(), 1..12),
        moves in prop::collection::vec((0..12u64, arb_cell()), 0..30),
    ) {
        let mut battlefield = Battlefield::new();
        for (i, &cell) in placements.iter().enumerate() {
            let id = CombatantId::new(u64::try_from(i).unwrap());
            let _ = battlefield.place(id, cell);
        }
        for &(raw, cell) in &moves {
            let _ = battlefield.move_to(CombatantId::new(raw), cell);
        }

        battlefield.occupancy().assert_consistent();
        for (id, cell) in battlefield.occupancy().iter() {
            prop_assert_eq!(battlefield.occupant_of(cell), Some(id));
            prop_assert_eq!(battlefield.position_of(id), Some(cell));
        }
    }
}

// =============================================================================
// Property Tests: Distance and sight
// =============================================================================

proptest! {
    /// Distance is symmetric and zero only between a cell and itself.
    #[test]
    fn distance_is_symmetric(a in arb_wide_cell(), b in arb_wide_cell()) {
        prop_assert_eq!(distance(a, b), distance(b, a));
        prop_assert_eq!(distance(a, b) == 0, a == b);
        prop_assert_eq!(distance(a, b) % 5, 0);
    }

    /// Sight is symmetric under any terrain.
    #[test]
    fn sight_is_symmetric(
        (obstructed, _) in arb_terrain(),
        a in arb_cell(),
        b in arb_cell(),
    ) {
        let battlefield = board(&obstructed, &[]);
        prop_assert_eq!(
            battlefield.has_line_of_sight(a, b),
            battlefield.has_line_of_sight(b, a)
        );
    }
}

// =============================================================================
// Property Tests: Paths
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// A found path starts and ends where asked, steps between neighbours,
    /// never enters an obstruction and costs the sum of its entry costs.
    #[test]
    fn paths_are_walkable_and_costed(
        (obstructed, difficult) in arb_terrain(),
        start in arb_cell(),
        destination in arb_cell(),
    ) {
        let battlefield = board(&obstructed, &difficult);
        let path = battlefield.find_path(start, destination);
        prop_assume!(!path.is_empty());

        prop_assert_eq!(path.start(), Some(start));
        prop_assert_eq!(path.destination(), Some(destination));
        for pair in path.cells().windows(2) {
            prop_assert!(pair[0].is_adjacent(pair[1]));
        }
        for &cell in path.cells() {
            prop_assert!(!battlefield.terrain().is_obstructed(cell));
        }

        let summed: u32 = path
            .cells()
            .iter()
            .skip(1)
            .map(|&cell| battlefield.terrain().entry_cost(cell).unwrap())
            .sum();
        prop_assert_eq!(path.cost(), summed);
        prop_assert_eq!(battlefield.path_cost(start, destination), Some(summed));
    }

    /// Adding an obstacle never makes the cheapest route cheaper.
    #[test]
    fn obstacles_never_lower_cost(
        (obstructed, difficult) in arb_terrain(),
        extra in arb_cell(),
        start in arb_cell(),
        destination in arb_cell(),
    ) {
        let before = board(&obstructed, &difficult);
        let mut after = before.clone();
        after.mark_obstructed(extra);

        if let (Some(old), Some(new)) =
            (before.path_cost(start, destination), after.path_cost(start, destination))
        {
            prop_assert!(new >= old);
        }
        if before.path_cost(start, destination).is_none() {
            prop_assert_eq!(after.path_cost(start, destination), None);
        }
    }

    /// Clearing difficult terrain never makes the cheapest route dearer.
    #[test]
    fn clearing_difficult_never_raises_cost(
        (obstructed, difficult) in arb_terrain(),
        start in arb_cell(),
        destination in arb_cell(),
    ) {
        prop_assume!(!difficult.is_empty());
        let before = board(&obstructed, &difficult);
        let mut after = before.clone();
        after.clear_difficult(difficult[0]);

        let old = before.path_cost(start, destination);
        let new = after.path_cost(start, destination);
        prop_assert_eq!(old.is_some(), new.is_some());
        if let (Some(old), Some(new)) = (old, new) {
            prop_assert!(new <= old);
        }
    }

    /// Movement range costs match the costs of individual searches.
    #[test]
    fn range_agrees_with_search(
        (obstructed, difficult) in arb_terrain(),
        start in arb_cell(),
        budget in 0..=30u32,
    ) {
        let battlefield = board(&obstructed, &difficult);
        for (cell, cost) in battlefield.reachable_within(start, budget) {
            prop_assert!(cost <= budget);
            prop_assert_eq!(battlefield.path_cost(start, cell), Some(cost));
        }
    }
}

// =============================================================================
// Property Tests: Areas
// =============================================================================

proptest! {
    /// Growing a sphere or cube never drops a cell it already covered.
    #[test]
    fn growing_shapes_keep_cells(
        origin in arb_cell(),
        point in arb_cell(),
        small in 0..=40u32,
        grow in 0..=40u32,
    ) {
        let spheres = (
            AreaShape::Sphere { radius: small },
            AreaShape::Sphere { radius: small + grow },
        );
        let cubes = (
            AreaShape::Cube { size: small },
            AreaShape::Cube { size: small + grow },
        );
        for (inner, outer) in [spheres, cubes] {
            if inner.contains(origin, point, None) {
                prop_assert!(outer.contains(origin, point, None));
            }
        }
    }
}
