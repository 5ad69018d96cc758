//! Topic-based event bus implementation.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use super::types::{GameStateEvent, PersistenceEvent};

/// Topics for event routing
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Topic {
    /// Game state changes (actions, continuations, rejections)
    GameState,
    /// Save, load and reset outcomes
    Persistence,
}

/// Event wrapper that carries the topic and typed event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    GameState(GameStateEvent),
    Persistence(PersistenceEvent),
}

impl Event {
    pub fn topic(&self) -> Topic {
        match self {
            Event::GameState(_) => Topic::GameState,
            Event::Persistence(_) => Topic::Persistence,
        }
    }
}

/// Topic-based event bus
///
/// Allows consumers to subscribe to specific topics and only receive
/// events they care about. Cloning shares the underlying channels.
#[derive(Clone)]
pub struct EventBus {
    game_state: broadcast::Sender<Event>,
    persistence: broadcast::Sender<Event>,
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
            game_state: broadcast::channel(capacity).0,
            persistence: broadcast::channel(capacity).0,
        }
    }

    fn sender(&self, topic: Topic) -> &broadcast::Sender<Event> {
        match topic {
            Topic::GameState => &self.game_state,
            Topic::Persistence => &self.persistence,
        }
    }

    /// Publish an event to its corresponding topic
    pub fn publish(&self, event: Event) {
        let topic = event.topic();
        if self.sender(topic).send(event).is_err() {
            // No subscribers for this topic - this is normal, not an error
            tracing::trace!("No subscribers for topic {:?}", topic);
        }
    }

    /// Subscribe to a specific topic
    ///
    /// Returns a receiver that will only receive events for that topic.
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.sender(topic).subscribe()
    }

    /// Subscribe to multiple topics
    pub fn subscribe_multiple(
        &self,
        topics: &[Topic],
    ) -> HashMap<Topic, broadcast::Receiver<Event>> {
        topics
            .iter()
            .map(|&topic| (topic, self.subscribe(topic)))
            .collect()
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
    use crate::events::PersistenceEvent;

    #[tokio::test]
    async fn events_reach_only_their_topic() {
        let bus = EventBus::new();
        let mut persistence = bus.subscribe(Topic::Persistence);
        let mut game_state = bus.subscribe(Topic::GameState);

        bus.publish(Event::Persistence(PersistenceEvent::Reset {
            slot: "autosave".into(),
        }));

        assert!(matches!(
            persistence.recv().await.unwrap(),
            Event::Persistence(PersistenceEvent::Reset { .. })
        ));
        assert!(game_state.try_recv().is_err());
    }

    #[test]
    fn publishing_without_subscribers_is_fine() {
        EventBus::with_capacity(0).publish(Event::Persistence(PersistenceEvent::Reset {
            slot: "x".into(),
        }));
    }
}
