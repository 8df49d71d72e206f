//! Runtime orchestration for the arena duel game.
//!
//! This crate wires the rules from `arena-core` to a clock, a draw source,
//! a roster repository and a single worker task that owns all mutable state.
//! Consumers embed [`Arena`] to start the worker and talk to it through the
//! cloneable [`ArenaHandle`].
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator, builder and configuration
//! - [`api`] exposes the types downstream clients interact with
//! - [`events`] provides the topic-based event bus
//! - [`repository`] persists the roster
//! - [`store`] binds the in-memory state to its repository
//! - [`names`] enriches leaderboard rows with display names
//! - `workers` keeps the background task internal to the crate
pub mod api;
pub mod clock;
pub mod events;
pub mod names;
pub mod repository;
pub mod rng;
pub mod runtime;
pub mod store;

mod workers;

pub use api::{ArenaHandle, OpenedChallenge, PlayerProfile, Result, RuntimeError};
pub use clock::{Clock, ManualClock, SystemClock};
pub use events::{
    ArenaEvent, ChallengeEvent, CloseReason, EventBus, PersistenceEvent, RosterEvent, Topic,
};
pub use names::{DisplayNameResolver, backfill_names};
pub use repository::{
    FileRosterRepository, InMemoryRosterRepo, PlayerRepository, RepositoryError,
};
pub use rng::ThreadRolls;
pub use runtime::{Arena, ArenaBuilder, ArenaConfig};
pub use store::PlayerStore;
