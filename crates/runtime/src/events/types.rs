//! Event types for different topics.

use arena_core::{Challenge, ChallengeId, CombatReport, GrowthResult, PlayerId};
use serde::{Deserialize, Serialize};

/// Changes to player records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RosterEvent {
    /// A default record was created on first contact.
    PlayerCreated { id: PlayerId },

    /// A growth action succeeded.
    Grew { id: PlayerId, result: GrowthResult },

    /// A combat finished and both records were committed.
    CombatResolved { report: Box<CombatReport> },

    /// Every record was reset to defaults.
    PlayersReset { count: usize },

    /// Stats of one record were set by an administrator (reset included).
    StatsOverridden {
        id: PlayerId,
        attack: i64,
        defense: i64,
    },
}

/// Why a challenge left the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CloseReason {
    Accepted,
    Cancelled,
    Expired,
}

/// Lifecycle of open challenges.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChallengeEvent {
    ChallengeOpened { challenge: Challenge },
    ChallengeClosed { id: ChallengeId, reason: CloseReason },
}

/// Outcome of roster snapshots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PersistenceEvent {
    /// Writing the roster failed. Memory state is kept as is.
    SnapshotFailed { error: String },
}
