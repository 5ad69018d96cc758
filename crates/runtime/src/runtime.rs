//! High-level runtime orchestrator.
//!
//! The runtime owns the simulation worker, wires up command/event channels,
//! and exposes a builder-based API for clients to drive the session.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use game_core::GameState;

use crate::api::{Result, RuntimeError, RuntimeHandle};
use crate::events::EventBus;
use crate::oracle::OracleManager;
use crate::repository::{InMemoryStateRepo, StateRepository};
use crate::workers::{Command, SimulationWorker};

/// Runtime configuration shared across the orchestrator and workers.
///
/// Game rules ([`game_core::GameConfig`]) travel with the
/// [`OracleManager`] since they come from the same content pack.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Seed for new sessions, including those started by a reset.
    pub game_seed: u64,
    /// Repository key the session is saved under.
    pub save_slot: String,
    pub event_buffer_size: usize,
    pub command_buffer_size: usize,
}

impl RuntimeConfig {
    pub const DEFAULT_SAVE_SLOT: &'static str = "ethershift_save_v1";
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            game_seed: 0,
            save_slot: Self::DEFAULT_SAVE_SLOT.to_owned(),
            event_buffer_size: 100,
            command_buffer_size: 32,
        }
    }
}

/// Main runtime that orchestrates the session.
///
/// [`RuntimeHandle`] provides a cloneable façade for clients.
pub struct Runtime {
    handle: RuntimeHandle,
    sim_worker_handle: JoinHandle<()>,
}

impl Runtime {
    /// Create a new runtime builder
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Get a cloneable handle to this runtime
    pub fn handle(&self) -> RuntimeHandle {
        self.handle.clone()
    }

    /// Shutdown the runtime gracefully.
    ///
    /// The worker stops once every handle clone has been dropped; pending
    /// continuations are discarded.
    pub async fn shutdown(self) -> Result<()> {
        drop(self.handle);

        self.sim_worker_handle
            .await
            .map_err(RuntimeError::WorkerJoin)
    }
}

/// Builder for [`Runtime`] with flexible configuration.
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    state: Option<GameState>,
    oracles: Option<OracleManager>,
    repository: Option<Arc<dyn StateRepository>>,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            state: None,
            oracles: None,
            repository: None,
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Provide initial game state instead of starting a new game
    pub fn initial_state(mut self, state: GameState) -> Self {
        self.state = Some(state);
        self
    }

    /// Set required oracle manager
    pub fn oracles(mut self, oracles: OracleManager) -> Self {
        self.oracles = Some(oracles);
        self
    }

    /// Set the save repository. Defaults to an in-memory one.
    pub fn repository(mut self, repository: Arc<dyn StateRepository>) -> Self {
        self.repository = Some(repository);
        self
    }

    /// Build the runtime and spawn its worker.
    pub async fn build(self) -> Result<Runtime> {
        let oracles = self.oracles.ok_or(RuntimeError::MissingOracles)?;

        let initial_state = match self.state {
            Some(state) => state,
            None => GameState::new_game(&oracles.as_game_env(), self.config.game_seed)
                .map_err(RuntimeError::InitialState)?,
        };

        let repository = self
            .repository
            .unwrap_or_else(|| Arc::new(InMemoryStateRepo::new()));

        let (command_tx, command_rx) = mpsc::channel::<Command>(self.config.command_buffer_size);
        let event_bus = EventBus::with_capacity(self.config.event_buffer_size);

        let handle = RuntimeHandle::new(command_tx, event_bus.clone());

        let sim_worker = SimulationWorker::new(
            initial_state,
            oracles,
            repository,
            command_rx,
            event_bus,
            self.config.save_slot,
            self.config.game_seed,
        );

        let sim_worker_handle = tokio::spawn(async move {
            sim_worker.run().await;
        });

        Ok(Runtime {
            handle,
            sim_worker_handle,
        })
    }
}
