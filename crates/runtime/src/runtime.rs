//! High-level arena orchestrator.
//!
//! The arena owns the background worker, wires up command/event channels,
//! and exposes a builder-based API for clients.

use std::env;
use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use arena_core::{GameConfig, RngSource};

use crate::api::{ArenaHandle, Result, RuntimeError};
use crate::clock::{Clock, SystemClock};
use crate::events::{ArenaEvent, EventBus, Topic};
use crate::repository::{FileRosterRepository, InMemoryRosterRepo, PlayerRepository};
use crate::rng::ThreadRolls;
use crate::store::PlayerStore;
use crate::workers::{ArenaWorker, Command};

/// Runtime configuration shared across the orchestrator and the worker.
#[derive(Debug, Clone)]
pub struct ArenaConfig {
    pub game_config: GameConfig,
    /// Roster file. `None` keeps the roster in memory only.
    pub data_file: Option<PathBuf>,
    pub event_buffer_size: usize,
    pub command_buffer_size: usize,
    /// Seed for reproducible rolls. `None` seeds from OS entropy.
    pub rng_seed: Option<u64>,
    /// Age after which open challenges are dropped. `None` keeps them until
    /// accepted or cancelled.
    pub challenge_ttl_secs: Option<u64>,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            game_config: GameConfig::default(),
            data_file: None,
            event_buffer_size: 100,
            command_buffer_size: 32,
            rng_seed: None,
            challenge_ttl_secs: None,
        }
    }
}

impl ArenaConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `ARENA_DATA_FILE` - Roster JSON file (default: in memory only)
    /// - `ARENA_COMMAND_BUFFER` - Worker command queue size (default: 32)
    /// - `ARENA_EVENT_BUFFER` - Per-topic event capacity (default: 100)
    /// - `ARENA_RNG_SEED` - Fixed seed for rolls (default: entropy)
    /// - `ARENA_CHALLENGE_TTL` - Challenge expiry in seconds (default: never)
    /// - `ARENA_GROW_COOLDOWN` - Seconds between growths (default: 7200)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        config.data_file = env::var("ARENA_DATA_FILE").ok().map(PathBuf::from);

        if let Some(capacity) = read_env::<usize>("ARENA_COMMAND_BUFFER") {
            config.command_buffer_size = capacity.max(1);
        }

        if let Some(capacity) = read_env::<usize>("ARENA_EVENT_BUFFER") {
            config.event_buffer_size = capacity.max(1);
        }

        config.rng_seed = read_env::<u64>("ARENA_RNG_SEED");
        config.challenge_ttl_secs = read_env::<u64>("ARENA_CHALLENGE_TTL");

        if let Some(cooldown) = read_env::<u64>("ARENA_GROW_COOLDOWN") {
            config.game_config = GameConfig::with_grow_cooldown(cooldown);
        }

        config
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}

/// Running arena: the worker task plus a handle to it.
///
/// [`ArenaHandle`] provides a cloneable façade for clients.
pub struct Arena {
    handle: ArenaHandle,
    worker_handle: JoinHandle<()>,
}

impl Arena {
    /// Create a new arena builder
    pub fn builder() -> ArenaBuilder {
        ArenaBuilder::new()
    }

    /// Build an arena from configuration alone.
    pub async fn start(config: ArenaConfig) -> Result<Self> {
        Self::builder().config(config).build().await
    }

    /// Get a cloneable handle to this arena
    pub fn handle(&self) -> ArenaHandle {
        self.handle.clone()
    }

    pub fn subscribe(&self, topic: Topic) -> tokio::sync::broadcast::Receiver<ArenaEvent> {
        self.handle.subscribe(topic)
    }

    /// Stop the worker and wait for it.
    ///
    /// The worker drains queued commands and stops once every clone of the
    /// handle is dropped, so outstanding clones delay shutdown.
    pub async fn shutdown(self) -> Result<()> {
        drop(self.handle);

        self.worker_handle.await.map_err(RuntimeError::WorkerJoin)?;

        Ok(())
    }
}

/// Builder for [`Arena`] with flexible configuration.
pub struct ArenaBuilder {
    config: ArenaConfig,
    repository: Option<Arc<dyn PlayerRepository>>,
    clock: Option<Arc<dyn Clock>>,
    rng: Option<Box<dyn RngSource + Send>>,
}

impl ArenaBuilder {
    fn new() -> Self {
        Self {
            config: ArenaConfig::default(),
            repository: None,
            clock: None,
            rng: None,
        }
    }

    /// Override arena configuration
    pub fn config(mut self, config: ArenaConfig) -> Self {
        self.config = config;
        self
    }

    /// Use a specific repository instead of the one derived from
    /// `data_file`.
    pub fn repository(mut self, repository: Arc<dyn PlayerRepository>) -> Self {
        self.repository = Some(repository);
        self
    }

    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Use a specific draw source instead of the one derived from `rng_seed`.
    pub fn rng(mut self, rng: impl RngSource + Send + 'static) -> Self {
        self.rng = Some(Box::new(rng));
        self
    }

    /// Load the roster and spawn the worker.
    pub async fn build(self) -> Result<Arena> {
        let repository: Arc<dyn PlayerRepository> = match (self.repository, &self.config.data_file) {
            (Some(repository), _) => repository,
            (None, Some(path)) => Arc::new(FileRosterRepository::new(path)?),
            (None, None) => Arc::new(InMemoryRosterRepo::new()),
        };
        let store = PlayerStore::load(repository)?;

        let clock: Arc<dyn Clock> = match self.clock {
            Some(clock) => clock,
            None => Arc::new(SystemClock),
        };
        let rng: Box<dyn RngSource + Send> = match (self.rng, self.config.rng_seed) {
            (Some(rng), _) => rng,
            (None, Some(seed)) => Box::new(ThreadRolls::seeded(seed)),
            (None, None) => Box::new(ThreadRolls::from_entropy()),
        };

        let (command_tx, command_rx) = mpsc::channel::<Command>(self.config.command_buffer_size);
        let event_bus = EventBus::with_capacity(self.config.event_buffer_size);

        let handle = ArenaHandle::new(command_tx, event_bus.clone());

        let worker = ArenaWorker::new(
            store,
            self.config.game_config,
            self.config.challenge_ttl_secs,
            clock,
            rng,
            command_rx,
            event_bus,
        );

        let worker_handle = tokio::spawn(async move {
            worker.run().await;
        });

        Ok(Arena {
            handle,
            worker_handle,
        })
    }
}
