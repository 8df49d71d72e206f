//! Topic-based event bus implementation.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use super::types::{ChallengeEvent, PersistenceEvent, RosterEvent};

/// Topics for event routing
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Topic {
    /// Player record changes
    Roster,
    /// Challenge lifecycle
    Challenge,
    /// Snapshot outcomes
    Persistence,
}

/// Event wrapper that carries the topic and typed event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ArenaEvent {
    Roster(RosterEvent),
    Challenge(ChallengeEvent),
    Persistence(PersistenceEvent),
}

impl ArenaEvent {
    pub fn topic(&self) -> Topic {
        match self {
            ArenaEvent::Roster(_) => Topic::Roster,
            ArenaEvent::Challenge(_) => Topic::Challenge,
            ArenaEvent::Persistence(_) => Topic::Persistence,
        }
    }
}

impl From<RosterEvent> for ArenaEvent {
    fn from(event: RosterEvent) -> Self {
        Self::Roster(event)
    }
}

impl From<ChallengeEvent> for ArenaEvent {
    fn from(event: ChallengeEvent) -> Self {
        Self::Challenge(event)
    }
}

impl From<PersistenceEvent> for ArenaEvent {
    fn from(event: PersistenceEvent) -> Self {
        Self::Persistence(event)
    }
}

struct Channels {
    roster: broadcast::Sender<ArenaEvent>,
    challenge: broadcast::Sender<ArenaEvent>,
    persistence: broadcast::Sender<ArenaEvent>,
}

impl Channels {
    fn sender(&self, topic: Topic) -> &broadcast::Sender<ArenaEvent> {
        match topic {
            Topic::Roster => &self.roster,
            Topic::Challenge => &self.challenge,
            Topic::Persistence => &self.persistence,
        }
    }
}

/// Topic-based event bus
///
/// Allows consumers to subscribe to specific topics and only receive
/// events they care about. Publishing is best-effort: events sent while a
/// topic has no subscribers are dropped.
#[derive(Clone)]
pub struct EventBus {
    channels: Arc<Channels>,
}

impl EventBus {
    /// Creates a new event bus with default capacity for each topic
    pub fn new() -> Self {
        Self::with_capacity(100)
    }

    /// Creates a new event bus with specified capacity per topic
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            channels: Arc::new(Channels {
                roster: broadcast::channel(capacity).0,
                challenge: broadcast::channel(capacity).0,
                persistence: broadcast::channel(capacity).0,
            }),
        }
    }

    /// Publish an event to its corresponding topic
    pub fn publish(&self, event: impl Into<ArenaEvent>) {
        let event = event.into();
        let topic = event.topic();

        if self.channels.sender(topic).send(event).is_err() {
            // No subscribers for this topic - this is normal, not an error
            tracing::trace!("No subscribers for topic {:?}", topic);
        }
    }

    /// Subscribe to a specific topic
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<ArenaEvent> {
        self.channels.sender(topic).subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arena_core::PlayerId;

    #[tokio::test]
    async fn events_reach_only_their_topic() {
        let bus = EventBus::with_capacity(8);
        let mut roster = bus.subscribe(Topic::Roster);
        let mut persistence = bus.subscribe(Topic::Persistence);

        bus.publish(RosterEvent::PlayerCreated {
            id: PlayerId::from("alice"),
        });

        let event = roster.recv().await.unwrap();
        assert_eq!(event.topic(), Topic::Roster);
        assert!(persistence.try_recv().is_err());
    }

    #[test]
    fn publishing_without_subscribers_is_silent() {
        let bus = EventBus::new();
        bus.publish(PersistenceEvent::SnapshotFailed {
            error: "disk full".into(),
        });
    }
}
