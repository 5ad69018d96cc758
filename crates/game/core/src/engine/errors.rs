//! Error types for the action execution pipeline.

use crate::action::{
    CombatError, ContinuationError, DialogueError, InteractError, MoveError, RuneInputError,
    ShiftError, UseItemError,
};
use crate::error::{ErrorSeverity, GameError};

/// Identifies which stage of the transition pipeline produced an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TransitionPhase {
    PreValidate,
    Apply,
    PostValidate,
}

impl TransitionPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransitionPhase::PreValidate => "pre_validate",
            TransitionPhase::Apply => "apply",
            TransitionPhase::PostValidate => "post_validate",
        }
    }
}

/// Associates a transition phase with the underlying error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransitionPhaseError<E> {
    pub phase: TransitionPhase,
    pub error: E,
}

impl<E> TransitionPhaseError<E> {
    pub fn new(phase: TransitionPhase, error: E) -> Self {
        Self { phase, error }
    }
}

impl<E: std::fmt::Display> std::fmt::Display for TransitionPhaseError<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} failed: {}", self.phase.as_str(), self.error)
    }
}

impl<E: std::fmt::Display + std::fmt::Debug> std::error::Error for TransitionPhaseError<E> {}

/// Errors surfaced while executing an action through the game engine.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ExecuteError {
    #[error("move action failed: {0}")]
    Move(TransitionPhaseError<MoveError>),

    #[error("shift toggle failed: {0}")]
    Shift(TransitionPhaseError<ShiftError>),

    #[error("interact action failed: {0}")]
    Interact(TransitionPhaseError<InteractError>),

    #[error("use item action failed: {0}")]
    UseItem(TransitionPhaseError<UseItemError>),

    #[error("combat action failed: {0}")]
    Combat(TransitionPhaseError<CombatError>),

    #[error("rune input failed: {0}")]
    RuneInput(TransitionPhaseError<RuneInputError>),

    #[error("dialogue selection failed: {0}")]
    Dialogue(TransitionPhaseError<DialogueError>),

    #[error("continuation failed: {0}")]
    Continuation(TransitionPhaseError<ContinuationError>),
}

impl ExecuteError {
    fn inner(&self) -> (&dyn GameError, TransitionPhase) {
        fn parts<E: GameError>(e: &TransitionPhaseError<E>) -> (&dyn GameError, TransitionPhase) {
            (&e.error, e.phase)
        }

        match self {
            Self::Move(e) => parts(e),
            Self::Shift(e) => parts(e),
            Self::Interact(e) => parts(e),
            Self::UseItem(e) => parts(e),
            Self::Combat(e) => parts(e),
            Self::RuneInput(e) => parts(e),
            Self::Dialogue(e) => parts(e),
            Self::Continuation(e) => parts(e),
        }
    }

    pub fn phase(&self) -> TransitionPhase {
        self.inner().1
    }

    /// True for a continuation whose captured token no longer matches.
    pub fn is_stale(&self) -> bool {
        matches!(self, Self::Continuation(e) if e.error.is_stale())
    }
}

impl GameError for ExecuteError {
    fn severity(&self) -> ErrorSeverity {
        self.inner().0.severity()
    }

    fn error_code(&self) -> &'static str {
        self.inner().0.error_code()
    }
}
