//! Action execution pipeline.
//!
//! The [`GameEngine`] is the authoritative reducer for [`GameState`]. Player
//! actions and fired continuations both flow through the same three-phase
//! pipeline; errors carry the phase that produced them.
//!
//! A failing phase may leave partial writes behind. Hosts that need
//! all-or-nothing semantics execute against a clone and commit on success.

mod errors;
mod transition;

pub use errors::{ExecuteError, TransitionPhase, TransitionPhaseError};

use crate::action::{Action, Continuation, Scheduled};
use crate::env::GameEnv;
use crate::state::GameState;

/// Complete outcome of one executed action or continuation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExecutionOutcome {
    /// Nonce assigned to this execution.
    pub nonce: u64,

    /// Continuation the host must fire after its delay, if any.
    pub scheduled: Option<Scheduled>,
}

/// Game engine that routes actions through the transition pipeline:
/// pre_validate → apply → post_validate
pub struct GameEngine<'a> {
    state: &'a mut GameState,
}

impl<'a> GameEngine<'a> {
    pub fn new(state: &'a mut GameState) -> Self {
        Self { state }
    }

    /// Executes a player action.
    pub fn execute(
        &mut self,
        env: GameEnv<'_>,
        action: &Action,
    ) -> Result<ExecutionOutcome, ExecuteError> {
        let scheduled = transition::execute_transition(action, self.state, &env)?;
        Ok(self.finish(scheduled))
    }

    /// Fires a previously scheduled continuation.
    ///
    /// Stale continuations fail in `pre_validate` without touching the state;
    /// see [`ExecuteError::is_stale`].
    pub fn resume(
        &mut self,
        env: GameEnv<'_>,
        continuation: &Continuation,
    ) -> Result<ExecutionOutcome, ExecuteError> {
        let scheduled = transition::resume_transition(continuation, self.state, &env)?;
        Ok(self.finish(scheduled))
    }

    fn finish(&mut self, scheduled: Option<Scheduled>) -> ExecutionOutcome {
        let nonce = self.state.nonce;
        self.state.nonce += 1;
        ExecutionOutcome { nonce, scheduled }
    }
}
