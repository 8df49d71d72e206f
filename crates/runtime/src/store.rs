//! Authoritative in-memory arena state bound to its repository.

use std::sync::Arc;

use arena_core::{
    ArenaEngine, ArenaState, ChallengeRegistry, GameConfig, NotFound, Player, PlayerId, Roster,
};

use crate::repository::{PlayerRepository, RepositoryError};

/// Owns the roster, the open challenges and the repository they are
/// snapshotted to.
///
/// The store is not synchronized. It is owned by the arena worker, which
/// serializes every access.
pub struct PlayerStore {
    state: ArenaState,
    repository: Arc<dyn PlayerRepository>,
}

impl PlayerStore {
    /// Read the full roster from `repository`.
    pub fn load(repository: Arc<dyn PlayerRepository>) -> Result<Self, RepositoryError> {
        let roster = repository.load()?;
        tracing::info!("Roster loaded: {} players", roster.len());
        Ok(Self {
            state: ArenaState::new(roster),
            repository,
        })
    }

    pub fn roster(&self) -> &Roster {
        &self.state.roster
    }

    pub fn challenges(&self) -> &ChallengeRegistry {
        &self.state.challenges
    }

    pub fn get(&self, id: &PlayerId) -> Result<&Player, NotFound> {
        self.state.roster.get(id)
    }

    /// Existing record or a new default one. The flag tells whether it was
    /// created, which also makes the store dirty.
    pub fn get_or_create(&mut self, id: &PlayerId) -> (&mut Player, bool) {
        let created = self.state.roster.ensure(id);
        if created {
            self.state.mark_dirty();
        }
        (self.state.roster.get_or_create(id), created)
    }

    /// Engine bound to this store's state.
    pub fn engine<'a>(&'a mut self, config: &'a GameConfig) -> ArenaEngine<'a> {
        ArenaEngine::new(&mut self.state, config)
    }

    /// Persist the full roster. Memory is never rolled back on failure.
    pub fn snapshot(&mut self) -> Result<(), RepositoryError> {
        self.state.take_dirty();
        self.repository.save(&self.state.roster)
    }

    /// Persist only when the roster changed since the last snapshot.
    pub fn snapshot_if_dirty(&mut self) -> Option<Result<(), RepositoryError>> {
        self.state
            .take_dirty()
            .then(|| self.repository.save(&self.state.roster))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::InMemoryRosterRepo;

    #[test]
    fn creation_is_snapshotted_once() {
        let repo = Arc::new(InMemoryRosterRepo::new());
        let mut store = PlayerStore::load(repo.clone()).unwrap();
        let id = PlayerId::from("alice");

        assert!(store.get(&id).is_err());
        let (player, created) = store.get_or_create(&id);
        assert!(created);
        assert_eq!(player, &Player::new());

        assert!(matches!(store.snapshot_if_dirty(), Some(Ok(()))));
        assert!(store.snapshot_if_dirty().is_none());
        assert_eq!(repo.save_count(), 1);
        assert!(repo.stored().unwrap().contains(&id));

        let (_, created) = store.get_or_create(&id);
        assert!(!created);
        assert!(store.snapshot_if_dirty().is_none());
    }

    #[test]
    fn loads_existing_roster() {
        let roster: Roster = [(PlayerId::from("bob"), Player::new().with_record(4, 1))]
            .into_iter()
            .collect();
        let store = PlayerStore::load(Arc::new(InMemoryRosterRepo::with_roster(roster))).unwrap();

        assert_eq!(store.get(&PlayerId::from("bob")).unwrap().wins, 4);
        assert_eq!(store.challenges().open_count(), 0);
    }
}
