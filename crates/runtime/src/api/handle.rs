//! Cloneable façade for issuing commands to the arena.
//!
//! [`ArenaHandle`] hides channel plumbing and offers one async method per
//! caller action. Every call is answered by the single arena worker, so
//! calls from different tasks are applied one at a time.
use tokio::sync::{broadcast, mpsc, oneshot};

use arena_core::{
    Challenge, ChallengeId, CombatReport, GrowthResult, LeaderboardEntry, Metric, Player,
    PlayerId,
};

use super::errors::{Result, RuntimeError};
use super::views::{OpenedChallenge, PlayerProfile};
use crate::events::{ArenaEvent, EventBus, Topic};
use crate::workers::Command;

/// Client-facing handle to interact with the arena
#[derive(Clone)]
pub struct ArenaHandle {
    command_tx: mpsc::Sender<Command>,
    event_bus: EventBus,
}

impl ArenaHandle {
    pub(crate) fn new(command_tx: mpsc::Sender<Command>, event_bus: EventBus) -> Self {
        Self {
            command_tx,
            event_bus,
        }
    }

    async fn request<T>(&self, command: impl FnOnce(oneshot::Sender<T>) -> Command) -> Result<T> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(command(reply_tx))
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Record and cooldown of `id`, creating the record on first contact.
    pub async fn profile(&self, id: PlayerId) -> Result<PlayerProfile> {
        self.request(|reply| Command::Profile { id, reply }).await
    }

    /// Strict read that fails with `NotFound` instead of creating.
    pub async fn player(&self, id: PlayerId) -> Result<Player> {
        self.request(|reply| Command::Player { id, reply }).await?
    }

    pub async fn grow(&self, id: PlayerId) -> Result<GrowthResult> {
        self.request(|reply| Command::Grow { id, reply }).await?
    }

    pub async fn open_challenge(&self, attacker: PlayerId) -> Result<OpenedChallenge> {
        self.request(|reply| Command::OpenChallenge { attacker, reply })
            .await
    }

    /// Accept an open challenge and resolve the combat.
    ///
    /// At most one accept per challenge succeeds; later ones observe
    /// `ChallengeNotFound`.
    pub async fn accept_challenge(
        &self,
        id: ChallengeId,
        respondent: PlayerId,
    ) -> Result<CombatReport> {
        self.request(|reply| Command::AcceptChallenge {
            id,
            respondent,
            reply,
        })
        .await?
    }

    pub async fn cancel_challenge(
        &self,
        id: ChallengeId,
        requester: PlayerId,
    ) -> Result<Challenge> {
        self.request(|reply| Command::CancelChallenge {
            id,
            requester,
            reply,
        })
        .await?
    }

    /// Open challenges, oldest first.
    pub async fn open_challenges(&self) -> Result<Vec<Challenge>> {
        self.request(|reply| Command::OpenChallenges { reply }).await
    }

    pub async fn leaderboard(&self, metric: Metric) -> Result<Vec<LeaderboardEntry>> {
        self.request(|reply| Command::Leaderboard { metric, reply })
            .await
    }

    /// Reset every record to defaults. Returns how many were reset.
    pub async fn reset_all(&self) -> Result<usize> {
        self.request(|reply| Command::ResetAll { reply }).await
    }

    pub async fn reset_player(&self, id: PlayerId) -> Result<Player> {
        self.request(|reply| Command::ResetPlayer { id, reply }).await
    }

    pub async fn set_stats(&self, id: PlayerId, attack: i64, defense: i64) -> Result<Player> {
        self.request(|reply| Command::SetStats {
            id,
            attack,
            defense,
            reply,
        })
        .await
    }

    /// Cache a display name resolved outside the worker.
    pub async fn cache_name(&self, id: PlayerId, name: String) -> Result<()> {
        self.request(|reply| Command::CacheName { id, name, reply })
            .await?
    }

    /// Write the roster now and report the outcome.
    pub async fn flush(&self) -> Result<()> {
        self.request(|reply| Command::Flush { reply }).await?
    }

    /// Subscribe to events from a specific topic
    ///
    /// # Topics
    ///
    /// - `Topic::Roster` - Record creation, growth, combat results, admin changes
    /// - `Topic::Challenge` - Challenges opened and closed
    /// - `Topic::Persistence` - Snapshot failures
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<ArenaEvent> {
        self.event_bus.subscribe(topic)
    }

    /// Get a reference to the event bus for advanced usage
    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }
}
