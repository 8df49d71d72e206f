//! Open challenges awaiting a respondent.
//!
//! The registry exclusively owns the set of open challenges. A challenge is
//! consumed exactly once: by a successful [`ChallengeRegistry::accept`], by
//! its attacker cancelling it, or by pruning when a TTL is configured.
//! Challenges live in memory only and are never part of a roster snapshot.

use std::collections::HashMap;
use std::fmt;

use crate::error::{ErrorSeverity, GameError};
use crate::state::PlayerId;

/// Opaque token identifying one open challenge.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ChallengeId(String);

impl ChallengeId {
    /// Build an id from attacker, creation time and a registry sequence number.
    fn generate(attacker: &PlayerId, created_at: i64, seq: u64) -> Self {
        Self(format!("fight_{attacker}_{created_at}_{seq}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ChallengeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ChallengeId {
    fn from(token: &str) -> Self {
        Self(token.to_owned())
    }
}

impl From<String> for ChallengeId {
    fn from(token: String) -> Self {
        Self(token)
    }
}

/// An open invitation to combat.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Challenge {
    pub id: ChallengeId,
    pub attacker: PlayerId,
    pub created_at: i64,
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ChallengeError {
    /// Unknown id: never existed, already accepted, or cancelled.
    #[error("challenge {0} not found")]
    ChallengeNotFound(ChallengeId),

    /// The attacker tried to accept their own challenge.
    #[error("{player} cannot accept their own challenge")]
    SelfChallenge { player: PlayerId },

    /// Only the attacker may cancel a challenge.
    #[error("{player} does not own challenge {challenge}")]
    NotOwner {
        challenge: ChallengeId,
        player: PlayerId,
    },
}

impl GameError for ChallengeError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::ChallengeNotFound(_) => ErrorSeverity::Recoverable,
            Self::SelfChallenge { .. } | Self::NotOwner { .. } => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::ChallengeNotFound(_) => "CHALLENGE_NOT_FOUND",
            Self::SelfChallenge { .. } => "CHALLENGE_SELF",
            Self::NotOwner { .. } => "CHALLENGE_NOT_OWNER",
        }
    }
}

/// Set of open challenges keyed by id.
#[derive(Clone, Debug, Default)]
pub struct ChallengeRegistry {
    open: HashMap<ChallengeId, Challenge>,
    next_seq: u64,
}

impl ChallengeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a new challenge from `attacker`.
    ///
    /// The same attacker may hold any number of open challenges.
    pub fn open(&mut self, attacker: &PlayerId, now: i64) -> ChallengeId {
        let id = ChallengeId::generate(attacker, now, self.next_seq);
        self.next_seq += 1;
        self.open.insert(
            id.clone(),
            Challenge {
                id: id.clone(),
                attacker: attacker.clone(),
                created_at: now,
            },
        );
        id
    }

    pub fn get(&self, id: &ChallengeId) -> Result<&Challenge, ChallengeError> {
        self.open
            .get(id)
            .ok_or_else(|| ChallengeError::ChallengeNotFound(id.clone()))
    }

    /// Attacker of an open challenge, without consuming it.
    pub fn attacker_of(&self, id: &ChallengeId) -> Result<&PlayerId, ChallengeError> {
        self.get(id).map(|challenge| &challenge.attacker)
    }

    /// Consume the challenge on behalf of `respondent`.
    ///
    /// A self-acceptance is rejected and leaves the challenge open. On
    /// success the challenge is removed, so a second accept of the same id
    /// observes [`ChallengeError::ChallengeNotFound`].
    pub fn accept(
        &mut self,
        id: &ChallengeId,
        respondent: &PlayerId,
    ) -> Result<PlayerId, ChallengeError> {
        if self.attacker_of(id)? == respondent {
            return Err(ChallengeError::SelfChallenge {
                player: respondent.clone(),
            });
        }

        self.open
            .remove(id)
            .map(|challenge| challenge.attacker)
            .ok_or_else(|| ChallengeError::ChallengeNotFound(id.clone()))
    }

    /// Withdraw an open challenge. Only its attacker may do so.
    pub fn cancel(
        &mut self,
        id: &ChallengeId,
        requester: &PlayerId,
    ) -> Result<Challenge, ChallengeError> {
        if self.attacker_of(id)? != requester {
            return Err(ChallengeError::NotOwner {
                challenge: id.clone(),
                player: requester.clone(),
            });
        }

        self.open
            .remove(id)
            .ok_or_else(|| ChallengeError::ChallengeNotFound(id.clone()))
    }

    /// Drop challenges created more than `ttl_secs` before `now`.
    ///
    /// Returns the removed challenges.
    pub fn prune_expired(&mut self, now: i64, ttl_secs: u64) -> Vec<Challenge> {
        let ttl = i64::try_from(ttl_secs).unwrap_or(i64::MAX);
        let expired: Vec<ChallengeId> = self
            .open
            .values()
            .filter(|challenge| now.saturating_sub(challenge.created_at) > ttl)
            .map(|challenge| challenge.id.clone())
            .collect();

        expired
            .iter()
            .filter_map(|id| self.open.remove(id))
            .collect()
    }

    pub fn open_count(&self) -> usize {
        self.open.len()
    }

    /// Open challenges, oldest first. Same-second challenges keep id order.
    pub fn in_order(&self) -> Vec<&Challenge> {
        let mut challenges: Vec<&Challenge> = self.open.values().collect();
        challenges.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        challenges
    }
}
