use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use crate::error::{ErrorSeverity, GameError};

use super::player::{Player, PlayerId};

/// Strict lookup of an identity that has no record yet.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("player {0} not found")]
pub struct NotFound(pub PlayerId);

impl GameError for NotFound {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        "PLAYER_NOT_FOUND"
    }
}

/// Mapping from identity to character.
///
/// Iteration follows identity order, which the leaderboard relies on for a
/// deterministic tie-break.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Roster {
    players: BTreeMap<PlayerId, Player>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn contains(&self, id: &PlayerId) -> bool {
        self.players.contains_key(id)
    }

    /// Make sure a record exists. Returns `true` when one was created.
    pub fn ensure(&mut self, id: &PlayerId) -> bool {
        match self.players.entry(id.clone()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(Player::new());
                true
            }
        }
    }

    /// Existing record, or a default one inserted on first contact.
    pub fn get_or_create(&mut self, id: &PlayerId) -> &mut Player {
        self.players.entry(id.clone()).or_default()
    }

    pub fn get(&self, id: &PlayerId) -> Result<&Player, NotFound> {
        self.players.get(id).ok_or_else(|| NotFound(id.clone()))
    }

    pub fn get_mut(&mut self, id: &PlayerId) -> Result<&mut Player, NotFound> {
        self.players.get_mut(id).ok_or_else(|| NotFound(id.clone()))
    }

    pub fn insert(&mut self, id: PlayerId, player: Player) -> Option<Player> {
        self.players.insert(id, player)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&PlayerId, &Player)> {
        self.players.iter()
    }

    /// Overwrite every record with default stats.
    pub fn reset_all(&mut self) -> usize {
        for player in self.players.values_mut() {
            *player = Player::new();
        }
        self.players.len()
    }

    /// Overwrite one record with default stats, creating it if needed.
    pub fn reset_one(&mut self, id: &PlayerId) -> &Player {
        let player = self.get_or_create(id);
        *player = Player::new();
        player
    }

    /// Administrative override of both stats. Win/loss counters are kept.
    pub fn set_stats(&mut self, id: &PlayerId, attack: i64, defense: i64) -> &Player {
        let player = self.get_or_create(id);
        player.attack = attack;
        player.defense = defense;
        player
    }

    /// Cache an enriched display name on an existing record.
    pub fn set_display_name(&mut self, id: &PlayerId, name: &str) -> Result<(), NotFound> {
        self.get_mut(id)?.set_name(name);
        Ok(())
    }
}

impl FromIterator<(PlayerId, Player)> for Roster {
    fn from_iter<T: IntoIterator<Item = (PlayerId, Player)>>(iter: T) -> Self {
        Self {
            players: iter.into_iter().collect(),
        }
    }
}
