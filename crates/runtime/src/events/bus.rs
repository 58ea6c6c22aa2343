//! Topic-based event bus.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::broadcast;

use super::types::{GameEvent, StorageEvent};

/// Topics for event routing.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq)]
pub enum Topic {
    /// Live board changes for presentation.
    Game,
    /// Substrate change signals for other instances over the same store.
    Storage,
}

/// Event wrapper that carries the topic and typed payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Game(GameEvent),
    Storage(StorageEvent),
}

impl Event {
    pub fn topic(&self) -> Topic {
        match self {
            Event::Game(_) => Topic::Game,
            Event::Storage(_) => Topic::Storage,
        }
    }
}

/// Topic-based event bus.
///
/// Consumers subscribe to the topics they care about. Publishing is
/// fire-and-forget: no subscribers is a normal condition, and a slow
/// subscriber lags rather than blocking the writer.
pub struct EventBus {
    channels: Arc<HashMap<Topic, broadcast::Sender<Event>>>,
}

impl EventBus {
    /// Creates a new event bus with default capacity per topic.
    pub fn new() -> Self {
        Self::with_capacity(100)
    }

    /// Creates a new event bus with the given capacity per topic.
    pub fn with_capacity(capacity: usize) -> Self {
        let mut channels = HashMap::new();
        channels.insert(Topic::Game, broadcast::channel(capacity).0);
        channels.insert(Topic::Storage, broadcast::channel(capacity).0);
        Self {
            channels: Arc::new(channels),
        }
    }

    /// Publishes an event to its topic. Never blocks, never fails.
    pub fn publish(&self, event: Event) {
        let topic = event.topic();
        if let Some(tx) = self.channels.get(&topic)
            && tx.send(event).is_err()
        {
            tracing::trace!(?topic, "no subscribers for topic");
        }
    }

    /// Subscribes to a single topic.
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.channels
            .get(&topic)
            .expect("all topics are pre-created in the constructor")
            .subscribe()
    }
}

impl Clone for EventBus {
    fn clone(&self) -> Self {
        Self {
            channels: Arc::clone(&self.channels),
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
