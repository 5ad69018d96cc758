//! Simulation worker that owns the authoritative [`game_core::GameState`].
//!
//! Receives commands from [`crate::RuntimeHandle`], executes actions and
//! due continuations via [`game_core::GameEngine`], and publishes events to
//! the [`EventBus`].

use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};
use tokio::time::{self, Instant};
use tracing::{debug, error, info, warn};

use game_core::engine::{ExecuteError, TransitionPhase};
use game_core::{Action, Continuation, ExecutionOutcome, GameEngine, GameState, Scheduled};

use super::TimerQueue;
use crate::api::{Result, RuntimeError};
use crate::events::{Event, EventBus, GameStateEvent, PersistenceEvent, PersistenceOp};
use crate::oracle::OracleManager;
use crate::repository::{SaveRecord, StateRepository};

/// Commands that can be sent to the simulation worker
pub enum Command {
    /// Execute a player action.
    Execute {
        action: Action,
        reply: oneshot::Sender<Result<ExecutionOutcome>>,
    },
    /// Query the current game state (read-only).
    QueryState { reply: oneshot::Sender<GameState> },
    /// Number of continuations waiting for their deadline.
    PendingContinuations { reply: oneshot::Sender<usize> },
    /// Persist the session to the configured slot.
    Save { reply: oneshot::Sender<Result<()>> },
    /// Replace the session with the record in the configured slot.
    Load { reply: oneshot::Sender<Result<()>> },
    /// Delete the saved record and start a new session.
    Reset { reply: oneshot::Sender<Result<()>> },
}

/// Background task that processes gameplay commands and fires delayed
/// continuations when they come due.
///
/// Every execution runs against a staged clone of the state and is committed
/// only on success, so a failed phase never leaks a partial mutation.
pub struct SimulationWorker {
    state: GameState,
    oracles: OracleManager,
    repository: Arc<dyn StateRepository>,
    command_rx: mpsc::Receiver<Command>,
    event_bus: EventBus,
    timers: TimerQueue,
    save_slot: String,
    game_seed: u64,
}

impl SimulationWorker {
    /// Creates a new simulation worker.
    pub fn new(
        state: GameState,
        oracles: OracleManager,
        repository: Arc<dyn StateRepository>,
        command_rx: mpsc::Receiver<Command>,
        event_bus: EventBus,
        save_slot: String,
        game_seed: u64,
    ) -> Self {
        info!(
            target: "runtime::worker",
            zone = %state.zone(),
            nonce = state.nonce,
            slot = %save_slot,
            "SimulationWorker initialized"
        );

        Self {
            state,
            oracles,
            repository,
            command_rx,
            event_bus,
            timers: TimerQueue::default(),
            save_slot,
            game_seed,
        }
    }

    /// Main worker loop. Ends when every command sender is dropped.
    pub async fn run(mut self) {
        loop {
            let deadline = self.timers.next_deadline();
            tokio::select! {
                cmd = self.command_rx.recv() => match cmd {
                    Some(cmd) => self.handle_command(cmd),
                    None => break,
                },
                _ = sleep_until(deadline) => self.fire_due(),
            }
        }

        if !self.timers.is_empty() {
            debug!(
                target: "runtime::timer",
                pending = self.timers.len(),
                "Worker stopped with pending continuations"
            );
        }
    }

    fn handle_command(&mut self, cmd: Command) {
        match cmd {
            Command::Execute { action, reply } => {
                let result = self.execute_action(action);
                if reply.send(result).is_err() {
                    debug!("Execute reply channel closed (caller dropped)");
                }
            }
            Command::QueryState { reply } => {
                if reply.send(self.state.clone()).is_err() {
                    debug!("QueryState reply channel closed (caller dropped)");
                }
            }
            Command::PendingContinuations { reply } => {
                if reply.send(self.timers.len()).is_err() {
                    debug!("PendingContinuations reply channel closed (caller dropped)");
                }
            }
            Command::Save { reply } => {
                let result = self.save();
                if reply.send(result).is_err() {
                    debug!("Save reply channel closed (caller dropped)");
                }
            }
            Command::Load { reply } => {
                let result = self.load();
                if reply.send(result).is_err() {
                    debug!("Load reply channel closed (caller dropped)");
                }
            }
            Command::Reset { reply } => {
                let result = self.reset();
                if reply.send(result).is_err() {
                    debug!("Reset reply channel closed (caller dropped)");
                }
            }
        }
    }

    /// Executes a player action against a staged copy and commits on success.
    fn execute_action(&mut self, action: Action) -> Result<ExecutionOutcome> {
        let mut staged = self.state.clone();
        let env = self.oracles.as_game_env();

        match GameEngine::new(&mut staged).execute(env, &action) {
            Ok(outcome) => {
                self.state = staged;
                self.schedule(outcome.scheduled.clone());

                debug!(
                    target: "runtime::worker",
                    nonce = outcome.nonce,
                    action = action.as_snake_case(),
                    "Action applied"
                );
                self.event_bus
                    .publish(Event::GameState(GameStateEvent::ActionApplied {
                        nonce: outcome.nonce,
                        action,
                        scheduled: outcome.scheduled.clone(),
                    }));

                Ok(outcome)
            }
            Err(error) => {
                self.report_rejection(&action, &error);
                Err(RuntimeError::Execute(error))
            }
        }
    }

    fn report_rejection(&self, action: &Action, error: &ExecuteError) {
        let phase = error.phase();
        if phase == TransitionPhase::PreValidate {
            debug!(
                target: "runtime::worker",
                action = action.as_snake_case(),
                phase = phase.as_str(),
                error = %error,
                "Action rejected during pre-validate"
            );
        } else {
            error!(
                target: "runtime::worker",
                action = action.as_snake_case(),
                phase = phase.as_str(),
                error = %error,
                "Action execution failed"
            );
        }

        self.event_bus
            .publish(Event::GameState(GameStateEvent::ActionRejected {
                action: action.clone(),
                phase,
                error: error.to_string(),
            }));
    }

    fn schedule(&mut self, scheduled: Option<Scheduled>) {
        let Some(scheduled) = scheduled else {
            return;
        };

        let label = scheduled.continuation.as_snake_case();
        let delay_ms = scheduled.delay_ms;
        self.timers.schedule(Instant::now(), scheduled);
        debug!(
            target: "runtime::timer",
            continuation = label,
            delay_ms,
            pending = self.timers.len(),
            "Continuation scheduled"
        );
    }

    fn fire_due(&mut self) {
        let now = Instant::now();
        while let Some(continuation) = self.timers.pop_due(now) {
            self.resume(continuation);
        }
    }

    /// Fires one continuation. Stale ones are dropped without touching the
    /// session.
    fn resume(&mut self, continuation: Continuation) {
        let mut staged = self.state.clone();
        let env = self.oracles.as_game_env();

        match GameEngine::new(&mut staged).resume(env, &continuation) {
            Ok(outcome) => {
                self.state = staged;
                self.schedule(outcome.scheduled.clone());

                debug!(
                    target: "runtime::timer",
                    nonce = outcome.nonce,
                    continuation = continuation.as_snake_case(),
                    "Continuation fired"
                );
                self.event_bus
                    .publish(Event::GameState(GameStateEvent::ContinuationFired {
                        nonce: outcome.nonce,
                        continuation,
                        scheduled: outcome.scheduled,
                    }));
            }
            Err(error) if error.is_stale() => {
                debug!(
                    target: "runtime::timer",
                    continuation = continuation.as_snake_case(),
                    reason = %error,
                    "Stale continuation dropped"
                );
                self.event_bus
                    .publish(Event::GameState(GameStateEvent::ContinuationDropped {
                        continuation,
                        reason: error.to_string(),
                    }));
            }
            Err(error) => {
                error!(
                    target: "runtime::timer",
                    continuation = continuation.as_snake_case(),
                    phase = error.phase().as_str(),
                    error = %error,
                    "Continuation failed"
                );
                self.event_bus
                    .publish(Event::GameState(GameStateEvent::ContinuationDropped {
                        continuation,
                        reason: error.to_string(),
                    }));
            }
        }
    }

    /// Persists the session. Only an idle (exploring) session may be saved.
    fn save(&mut self) -> Result<()> {
        if !self.state.mode.is_idle() {
            let mode = self.state.mode.label();
            warn!(
                target: "runtime::repository",
                slot = %self.save_slot,
                mode,
                "Save rejected: session is not idle"
            );
            let error = RuntimeError::SaveRejected { mode };
            self.report_persistence_failure(PersistenceOp::Save, &error);
            return Err(error);
        }

        let stored = SaveRecord::seal(&self.state)
            .and_then(|record| self.repository.save(&self.save_slot, &record));
        if let Err(error) = stored {
            let error = RuntimeError::from(error);
            error!(target: "runtime::repository", slot = %self.save_slot, error = %error, "Save failed");
            self.report_persistence_failure(PersistenceOp::Save, &error);
            return Err(error);
        }

        info!(
            target: "runtime::repository",
            slot = %self.save_slot,
            nonce = self.state.nonce,
            "Session saved"
        );
        self.event_bus
            .publish(Event::Persistence(PersistenceEvent::Saved {
                slot: self.save_slot.clone(),
                nonce: self.state.nonce,
            }));
        Ok(())
    }

    /// Replaces the session wholesale with the saved record.
    ///
    /// A missing or invalid record leaves the session untouched.
    fn load(&mut self) -> Result<()> {
        let loaded = match self.repository.load(&self.save_slot) {
            Ok(Some(record)) => record.open().map_err(RuntimeError::from),
            Ok(None) => Err(RuntimeError::NoSaveRecord {
                slot: self.save_slot.clone(),
            }),
            Err(error) => Err(RuntimeError::from(error)),
        };

        let state = match loaded {
            Ok(state) => state,
            Err(error) => {
                warn!(target: "runtime::repository", slot = %self.save_slot, error = %error, "Load failed");
                self.report_persistence_failure(PersistenceOp::Load, &error);
                return Err(error);
            }
        };

        self.state = state;
        let dropped = self.timers.clear();

        info!(
            target: "runtime::repository",
            slot = %self.save_slot,
            nonce = self.state.nonce,
            dropped_continuations = dropped,
            "Session loaded"
        );
        self.event_bus
            .publish(Event::Persistence(PersistenceEvent::Loaded {
                slot: self.save_slot.clone(),
                nonce: self.state.nonce,
            }));
        Ok(())
    }

    /// Deletes the saved record and starts a fresh session.
    fn reset(&mut self) -> Result<()> {
        let fresh = self
            .repository
            .delete(&self.save_slot)
            .map_err(RuntimeError::from)
            .and_then(|()| {
                GameState::new_game(&self.oracles.as_game_env(), self.game_seed)
                    .map_err(RuntimeError::InitialState)
            });

        let state = match fresh {
            Ok(state) => state,
            Err(error) => {
                error!(target: "runtime::repository", slot = %self.save_slot, error = %error, "Reset failed");
                self.report_persistence_failure(PersistenceOp::Reset, &error);
                return Err(error);
            }
        };

        self.state = state;
        let dropped = self.timers.clear();

        info!(
            target: "runtime::repository",
            slot = %self.save_slot,
            dropped_continuations = dropped,
            "Session reset"
        );
        self.event_bus
            .publish(Event::Persistence(PersistenceEvent::Reset {
                slot: self.save_slot.clone(),
            }));
        Ok(())
    }

    /// Surfaces a failed save, load or reset in the in-game log as well as on
    /// the event bus. Only the log is touched, never the rest of the session.
    fn report_persistence_failure(&mut self, op: PersistenceOp, error: &RuntimeError) {
        let line = match error {
            RuntimeError::SaveRejected { mode } => {
                format!("Cannot save during {}.", mode.replace('_', " "))
            }
            RuntimeError::NoSaveRecord { .. } => "No save data found.".to_owned(),
            other => {
                let verb = match op {
                    PersistenceOp::Save => "Save",
                    PersistenceOp::Load => "Load",
                    PersistenceOp::Reset => "Reset",
                };
                format!("{verb} failed: {other}")
            }
        };
        self.state.log.system(line);

        self.event_bus
            .publish(Event::Persistence(PersistenceEvent::Failed {
                slot: self.save_slot.clone(),
                op,
                error: error.to_string(),
            }));
    }
}

async fn sleep_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => time::sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}
