//! In-memory PlayerRepository implementation for tests and local runs.

use std::sync::RwLock;
use std::sync::atomic::{AtomicUsize, Ordering};

use arena_core::Roster;

use super::error::{RepositoryError, Result};
use super::traits::PlayerRepository;

/// Keeps the last saved roster in memory and counts saves.
#[derive(Default)]
pub struct InMemoryRosterRepo {
    roster: RwLock<Roster>,
    saves: AtomicUsize,
}

impl InMemoryRosterRepo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with a roster that `load` returns until the first save.
    pub fn with_roster(roster: Roster) -> Self {
        Self {
            roster: RwLock::new(roster),
            saves: AtomicUsize::new(0),
        }
    }

    /// Last saved (or initial) roster.
    pub fn stored(&self) -> Result<Roster> {
        self.load()
    }

    /// Number of successful saves so far.
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

impl PlayerRepository for InMemoryRosterRepo {
    fn load(&self) -> Result<Roster> {
        let roster = self
            .roster
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(roster.clone())
    }

    fn save(&self, roster: &Roster) -> Result<()> {
        let mut stored = self
            .roster
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        *stored = roster.clone();
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
