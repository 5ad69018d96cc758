//! Cloneable façade for issuing commands to the runtime.
//!
//! [`RuntimeHandle`] hides channel plumbing and offers async helpers for
//! driving the session or streaming events from specific topics.
use tokio::sync::{broadcast, mpsc, oneshot};

use game_core::{Action, ExecutionOutcome, GameState};

use super::errors::{Result, RuntimeError};
use crate::events::{Event, EventBus, Topic};
use crate::workers::Command;

/// Client-facing handle to interact with the runtime
#[derive(Clone)]
pub struct RuntimeHandle {
    command_tx: mpsc::Sender<Command>,
    event_bus: EventBus,
}

impl RuntimeHandle {
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

    /// Execute a player action.
    ///
    /// Rejected actions come back as [`RuntimeError::Execute`] and leave the
    /// session unchanged. Any continuation the action scheduled fires on its
    /// own after its delay.
    pub async fn execute_action(&self, action: Action) -> Result<ExecutionOutcome> {
        self.request(|reply| Command::Execute { action, reply })
            .await?
    }

    /// Query the current game state (read-only snapshot)
    pub async fn query_state(&self) -> Result<GameState> {
        self.request(|reply| Command::QueryState { reply }).await
    }

    /// Number of delayed continuations still waiting to fire.
    pub async fn pending_continuations(&self) -> Result<usize> {
        self.request(|reply| Command::PendingContinuations { reply })
            .await
    }

    /// Save the session to the configured slot. Only an idle session saves.
    pub async fn save(&self) -> Result<()> {
        self.request(|reply| Command::Save { reply }).await?
    }

    /// Replace the session with the saved one. Pending continuations are
    /// discarded.
    pub async fn load(&self) -> Result<()> {
        self.request(|reply| Command::Load { reply }).await?
    }

    /// Delete the saved session and start over.
    pub async fn reset(&self) -> Result<()> {
        self.request(|reply| Command::Reset { reply }).await?
    }

    /// Subscribe to events from a specific topic
    ///
    /// # Topics
    ///
    /// - `Topic::GameState` - Applied/rejected actions and fired continuations
    /// - `Topic::Persistence` - Save, load and reset outcomes
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.event_bus.subscribe(topic)
    }

    /// Subscribe to multiple topics at once
    pub fn subscribe_multiple(
        &self,
        topics: &[Topic],
    ) -> std::collections::HashMap<Topic, broadcast::Receiver<Event>> {
        self.event_bus.subscribe_multiple(topics)
    }

    /// Get a reference to the event bus for advanced usage
    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }
}
