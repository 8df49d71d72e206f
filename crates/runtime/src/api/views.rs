//! Read models returned by the handle.

use arena_core::{Challenge, Player, PlayerId};
use serde::{Deserialize, Serialize};

/// A player's record together with their growth cooldown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerProfile {
    pub id: PlayerId,
    pub player: Player,
    /// Seconds until the next growth, 0 when ready.
    pub cooldown_secs: u64,
}

/// A freshly opened challenge and the attacker's card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenedChallenge {
    pub challenge: Challenge,
    pub attacker: Player,
}
