//! Topic-based event bus for arena events.
//!
//! The worker publishes every state change to a topic, and consumers
//! subscribe only to the topics they need.

mod bus;
mod types;

pub use bus::{ArenaEvent, EventBus, Topic};
pub use types::{ChallengeEvent, CloseReason, PersistenceEvent, RosterEvent};
