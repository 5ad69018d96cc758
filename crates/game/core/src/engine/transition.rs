//! Action transition dispatch and execution logic.

use crate::action::{Action, ActionTransition, Continuation, Followup};
use crate::env::GameEnv;
use crate::state::GameState;

use super::errors::{ExecuteError, TransitionPhase, TransitionPhaseError};

/// Executes a transition through the three-phase pipeline.
///
/// Phases:
/// 1. `pre_validate` - Check preconditions before mutation
/// 2. `apply` - Mutate the game state and return any follow-up
/// 3. `post_validate` - Verify postconditions after mutation
#[inline]
pub(crate) fn drive_transition<T>(
    transition: &T,
    state: &mut GameState,
    env: &GameEnv<'_>,
) -> Result<Followup, TransitionPhaseError<T::Error>>
where
    T: ActionTransition,
{
    transition
        .pre_validate(state, env)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::PreValidate, error))?;

    let followup = transition
        .apply(state, env)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::Apply, error))?;

    transition
        .post_validate(state, env)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::PostValidate, error))?;

    Ok(followup)
}

/// Routes each action to its transition.
pub(super) fn execute_transition(
    action: &Action,
    state: &mut GameState,
    env: &GameEnv<'_>,
) -> Result<Followup, ExecuteError> {
    match action {
        Action::Move(transition) => {
            drive_transition(transition, state, env).map_err(ExecuteError::Move)
        }
        Action::ToggleShift(transition) => {
            drive_transition(transition, state, env).map_err(ExecuteError::Shift)
        }
        Action::Interact(transition) => {
            drive_transition(transition, state, env).map_err(ExecuteError::Interact)
        }
        Action::UseItem(transition) => {
            drive_transition(transition, state, env).map_err(ExecuteError::UseItem)
        }
        Action::Combat(transition) => {
            drive_transition(transition, state, env).map_err(ExecuteError::Combat)
        }
        Action::RuneInput(transition) => {
            drive_transition(transition, state, env).map_err(ExecuteError::RuneInput)
        }
        Action::SelectOption(transition) => {
            drive_transition(transition, state, env).map_err(ExecuteError::Dialogue)
        }
    }
}

pub(super) fn resume_transition(
    continuation: &Continuation,
    state: &mut GameState,
    env: &GameEnv<'_>,
) -> Result<Followup, ExecuteError> {
    drive_transition(continuation, state, env).map_err(ExecuteError::Continuation)
}
