//! Thread-safe handle to a battlefield.
//!
//! Path searches are the expensive queries, and several of them can run at
//! once under the read lock. Mutations take the write lock, so a search never
//! sees a move half applied.

use std::sync::Arc;

use parking_lot::RwLock;
use tactica_pathfind::GridPath;
use tactica_spatial::{CombatantId, GridCoord};

use crate::battlefield::{Battlefield, MoveOutcome};
use crate::error::MovementError;

/// A cloneable, shareable [`Battlefield`].
///
/// # Example
///
/// ```
/// use tactica_battlefield::{Battlefield, SharedBattlefield};
/// use tactica_spatial::{CombatantId, GridCoord};
///
/// let shared = SharedBattlefield::new(Battlefield::new());
/// let archer = CombatantId::new(7);
/// shared.write(|b| b.place(archer, GridCoord::new(0, 0, 0))).unwrap();
///
/// let handle = shared.clone();
/// let path = std::thread::spawn(move || {
///     handle.find_path(GridCoord::new(0, 0, 0), GridCoord::new(2, 0, 0))
/// })
/// .join()
/// .unwrap();
///
/// assert_eq!(path.cost(), 10);
/// ```
#[derive(Debug, Clone, Default)]
pub struct SharedBattlefield {
    inner: Arc<RwLock<Battlefield>>,
}

impl SharedBattlefield {
    /// Wraps a battlefield for sharing.
    #[must_use]
    pub fn new(battlefield: Battlefield) -> Self {
        Self {
            inner: Arc::new(RwLock::new(battlefield)),
        }
    }

    /// Runs `f` under the read lock.
    pub fn read<R>(&self, f: impl FnOnce(&Battlefield) -> R) -> R {
        f(&self.inner.read())
    }

    /// Runs `f` under the write lock.
    pub fn write<R>(&self, f: impl FnOnce(&mut Battlefield) -> R) -> R {
        f(&mut self.inner.write())
    }

    /// Cheapest route between two cells. See [`Battlefield::find_path`].
    #[must_use]
    pub fn find_path(&self, start: GridCoord, destination: GridCoord) -> GridPath {
        self.read(|b| b.find_path(start, destination))
    }

    /// Moves a combatant as one atomic step. See [`Battlefield::move_along`].
    ///
    /// # Errors
    ///
    /// Returns whatever [`Battlefield::move_along`] returns.
    pub fn move_along(
        &self,
        id: CombatantId,
        destination: GridCoord,
        budget: u32,
    ) -> Result<MoveOutcome, MovementError> {
        self.write(|b| b.move_along(id, destination, budget))
    }

    /// Copies the current state out of the lock.
    #[must_use]
    pub fn snapshot(&self) -> Battlefield {
        self.inner.read().clone()
    }
}

impl From<Battlefield> for SharedBattlefield {
    fn from(battlefield: Battlefield) -> Self {
        Self::new(battlefield)
    }
}
