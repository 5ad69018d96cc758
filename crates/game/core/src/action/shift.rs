use crate::action::{ActionTransition, Followup, ensure_unlocked};
use crate::env::GameEnv;
use crate::error::{ErrorSeverity, GameError};
use crate::state::{GameState, Locks};

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ShiftError {
    #[error("shift rejected while {0:?} is active")]
    Locked(Locks),
}

impl GameError for ShiftError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Recoverable
    }

    fn error_code(&self) -> &'static str {
        "SHIFT_LOCKED"
    }
}

/// Flips shift mode. No cost or cooldown.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ShiftAction;

impl ActionTransition for ShiftAction {
    type Error = ShiftError;

    fn pre_validate(&self, state: &GameState, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        ensure_unlocked(state, Locks::EXPLORATION).map_err(ShiftError::Locked)
    }

    fn apply(&self, state: &mut GameState, _env: &GameEnv<'_>) -> Result<Followup, Self::Error> {
        state.shift_active = !state.shift_active;
        state.log.system(if state.shift_active {
            ">> ETHER SHIFT ACTIVATED <<"
        } else {
            "Shift disengaged. Reality stabilized."
        });
        Ok(None)
    }
}
