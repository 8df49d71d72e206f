//! Arena worker that owns the authoritative [`PlayerStore`].
//!
//! Receives commands from [`ArenaHandle`](crate::ArenaHandle), applies them
//! through [`arena_core::ArenaEngine`], snapshots the roster when it changed,
//! and publishes events to the [`EventBus`]. Processing one command at a
//! time is what makes every operation atomic for callers.

use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

use arena_core::{
    Challenge, ChallengeId, CombatReport, GameConfig, GrowthResult, LeaderboardEntry, Metric,
    Player, PlayerId, RngSource, remaining_cooldown,
};

use crate::api::{OpenedChallenge, PlayerProfile, Result, RuntimeError};
use crate::clock::Clock;
use crate::events::{ChallengeEvent, CloseReason, EventBus, PersistenceEvent, RosterEvent};
use crate::repository::RepositoryError;
use crate::store::PlayerStore;

/// Commands that can be sent to the arena worker
pub enum Command {
    /// Read a record, creating it on first contact.
    Profile {
        id: PlayerId,
        reply: oneshot::Sender<PlayerProfile>,
    },
    /// Read a record without creating it.
    Player {
        id: PlayerId,
        reply: oneshot::Sender<Result<Player>>,
    },
    Grow {
        id: PlayerId,
        reply: oneshot::Sender<Result<GrowthResult>>,
    },
    OpenChallenge {
        attacker: PlayerId,
        reply: oneshot::Sender<OpenedChallenge>,
    },
    AcceptChallenge {
        id: ChallengeId,
        respondent: PlayerId,
        reply: oneshot::Sender<Result<CombatReport>>,
    },
    CancelChallenge {
        id: ChallengeId,
        requester: PlayerId,
        reply: oneshot::Sender<Result<Challenge>>,
    },
    OpenChallenges {
        reply: oneshot::Sender<Vec<Challenge>>,
    },
    Leaderboard {
        metric: Metric,
        reply: oneshot::Sender<Vec<LeaderboardEntry>>,
    },
    ResetAll {
        reply: oneshot::Sender<usize>,
    },
    ResetPlayer {
        id: PlayerId,
        reply: oneshot::Sender<Player>,
    },
    SetStats {
        id: PlayerId,
        attack: i64,
        defense: i64,
        reply: oneshot::Sender<Player>,
    },
    CacheName {
        id: PlayerId,
        name: String,
        reply: oneshot::Sender<Result<()>>,
    },
    /// Snapshot unconditionally and report the outcome.
    Flush { reply: oneshot::Sender<Result<()>> },
}

/// Background task that processes arena commands.
pub struct ArenaWorker {
    store: PlayerStore,
    config: GameConfig,
    challenge_ttl_secs: Option<u64>,
    clock: Arc<dyn Clock>,
    rng: Box<dyn RngSource + Send>,
    command_rx: mpsc::Receiver<Command>,
    event_bus: EventBus,
}

impl ArenaWorker {
    pub fn new(
        store: PlayerStore,
        config: GameConfig,
        challenge_ttl_secs: Option<u64>,
        clock: Arc<dyn Clock>,
        rng: Box<dyn RngSource + Send>,
        command_rx: mpsc::Receiver<Command>,
        event_bus: EventBus,
    ) -> Self {
        info!(
            "ArenaWorker initialized with {} players, grow cooldown {}s, challenge ttl {:?}",
            store.roster().len(),
            config.grow_cooldown_secs,
            challenge_ttl_secs
        );

        Self {
            store,
            config,
            challenge_ttl_secs,
            clock,
            rng,
            command_rx,
            event_bus,
        }
    }

    /// Main worker loop. Ends when every handle was dropped.
    pub async fn run(mut self) {
        while let Some(cmd) = self.command_rx.recv().await {
            self.handle_command(cmd);
        }
        info!("ArenaWorker stopped");
    }

    fn handle_command(&mut self, cmd: Command) {
        let now = self.clock.now();
        self.prune_expired(now);

        match cmd {
            Command::Profile { id, reply } => {
                let profile = self.profile(id, now);
                self.finish(reply, profile, "Profile");
            }
            Command::Player { id, reply } => {
                let player = self.store.get(&id).cloned().map_err(RuntimeError::from);
                self.finish(reply, player, "Player");
            }
            Command::Grow { id, reply } => {
                let result = self.grow(id, now);
                self.finish(reply, result, "Grow");
            }
            Command::OpenChallenge { attacker, reply } => {
                let opened = self.open_challenge(attacker, now);
                self.finish(reply, opened, "OpenChallenge");
            }
            Command::AcceptChallenge {
                id,
                respondent,
                reply,
            } => {
                let result = self.accept_challenge(id, respondent);
                self.finish(reply, result, "AcceptChallenge");
            }
            Command::CancelChallenge {
                id,
                requester,
                reply,
            } => {
                let result = self.cancel_challenge(id, requester);
                self.finish(reply, result, "CancelChallenge");
            }
            Command::OpenChallenges { reply } => {
                let open: Vec<Challenge> =
                    self.store.challenges().in_order().into_iter().cloned().collect();
                self.finish(reply, open, "OpenChallenges");
            }
            Command::Leaderboard { metric, reply } => {
                let entries = self.store.engine(&self.config).leaderboard(metric);
                self.finish(reply, entries, "Leaderboard");
            }
            Command::ResetAll { reply } => {
                let count = self.store.engine(&self.config).reset_all();
                info!("Reset {} players", count);
                self.event_bus.publish(RosterEvent::PlayersReset { count });
                self.finish(reply, count, "ResetAll");
            }
            Command::ResetPlayer { id, reply } => {
                let player = self.store.engine(&self.config).reset_player(&id);
                self.publish_override(id, &player);
                self.finish(reply, player, "ResetPlayer");
            }
            Command::SetStats {
                id,
                attack,
                defense,
                reply,
            } => {
                let player = self.store.engine(&self.config).set_stats(&id, attack, defense);
                self.publish_override(id, &player);
                self.finish(reply, player, "SetStats");
            }
            Command::CacheName { id, name, reply } => {
                let result = self.cache_name(id, &name);
                self.finish(reply, result, "CacheName");
            }
            Command::Flush { reply } => {
                let result = self.store.snapshot().map_err(|error| {
                    self.report_snapshot_failure(&error);
                    RuntimeError::Persistence(error)
                });
                if reply.send(result).is_err() {
                    debug!("Flush reply channel closed (caller dropped)");
                }
            }
        }
    }

    fn profile(&mut self, id: PlayerId, now: i64) -> PlayerProfile {
        let touched = self.store.engine(&self.config).profile(&id);
        self.publish_created(&touched.created);

        let cooldown_secs = remaining_cooldown(&self.config, now, &touched.value);
        PlayerProfile {
            id,
            player: touched.value,
            cooldown_secs,
        }
    }

    fn grow(&mut self, id: PlayerId, now: i64) -> Result<GrowthResult> {
        let mut rng = &mut *self.rng;
        let touched = self.store.engine(&self.config).grow(&id, now, &mut rng);
        self.publish_created(&touched.created);

        let result = touched.value?;
        debug!(
            "{} grew by {:+}/{:+} to {}/{}",
            id, result.attack_delta, result.defense_delta, result.attack, result.defense
        );
        self.event_bus.publish(RosterEvent::Grew { id, result });
        Ok(result)
    }

    fn open_challenge(&mut self, attacker: PlayerId, now: i64) -> OpenedChallenge {
        let touched = self.store.engine(&self.config).open_challenge(&attacker, now);
        self.publish_created(&touched.created);

        let (id, card) = touched.value;
        let challenge = Challenge {
            id,
            attacker,
            created_at: now,
        };
        debug!("Challenge {} opened", challenge.id);
        self.event_bus.publish(ChallengeEvent::ChallengeOpened {
            challenge: challenge.clone(),
        });

        OpenedChallenge {
            challenge,
            attacker: card,
        }
    }

    fn accept_challenge(&mut self, id: ChallengeId, respondent: PlayerId) -> Result<CombatReport> {
        let mut rng = &mut *self.rng;
        let touched = self
            .store
            .engine(&self.config)
            .accept_challenge(&id, &respondent, &mut rng);
        self.publish_created(&touched.created);

        let report = touched.value?;
        info!(
            "Challenge {} resolved: {} dealt {}, {} dealt {}, winner {:?}",
            id,
            report.attacker,
            report.attacker_roll.damage,
            report.defender,
            report.defender_roll.damage,
            report.winner().map(PlayerId::as_str)
        );
        self.event_bus.publish(ChallengeEvent::ChallengeClosed {
            id,
            reason: CloseReason::Accepted,
        });
        self.event_bus.publish(RosterEvent::CombatResolved {
            report: Box::new(report.clone()),
        });
        Ok(report)
    }

    fn cancel_challenge(&mut self, id: ChallengeId, requester: PlayerId) -> Result<Challenge> {
        let challenge = self
            .store
            .engine(&self.config)
            .cancel_challenge(&id, &requester)?;
        self.event_bus.publish(ChallengeEvent::ChallengeClosed {
            id,
            reason: CloseReason::Cancelled,
        });
        Ok(challenge)
    }

    /// Store a resolved display name, creating the record on first contact.
    fn cache_name(&mut self, id: PlayerId, name: &str) -> Result<()> {
        let (_, created) = self.store.get_or_create(&id);
        if created {
            self.publish_created(std::slice::from_ref(&id));
        }

        self.store
            .engine(&self.config)
            .cache_display_name(&id, name)
            .map_err(RuntimeError::from)
    }

    fn prune_expired(&mut self, now: i64) {
        let Some(ttl_secs) = self.challenge_ttl_secs else {
            return;
        };

        for challenge in self.store.engine(&self.config).prune_challenges(now, ttl_secs) {
            debug!("Challenge {} expired", challenge.id);
            self.event_bus.publish(ChallengeEvent::ChallengeClosed {
                id: challenge.id,
                reason: CloseReason::Expired,
            });
        }
    }

    fn publish_created(&self, created: &[PlayerId]) {
        for id in created {
            debug!("Player {} created", id);
            self.event_bus
                .publish(RosterEvent::PlayerCreated { id: id.clone() });
        }
    }

    fn publish_override(&self, id: PlayerId, player: &Player) {
        info!("Stats of {} set to {}/{}", id, player.attack, player.defense);
        self.event_bus.publish(RosterEvent::StatsOverridden {
            id,
            attack: player.attack,
            defense: player.defense,
        });
    }

    /// Snapshot if the command changed the roster, then reply.
    fn finish<T>(&mut self, reply: oneshot::Sender<T>, value: T, command: &str) {
        if let Some(Err(error)) = self.store.snapshot_if_dirty() {
            self.report_snapshot_failure(&error);
        }

        if reply.send(value).is_err() {
            debug!("{} reply channel closed (caller dropped)", command);
        }
    }

    fn report_snapshot_failure(&self, error: &RepositoryError) {
        warn!("Roster snapshot failed: {}", error);
        self.event_bus.publish(PersistenceEvent::SnapshotFailed {
            error: error.to_string(),
        });
    }
}
