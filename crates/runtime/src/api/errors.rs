//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from worker coordination, repositories, and the engine so
//! clients can bubble them up with consistent context.
use thiserror::Error;
use tokio::sync::oneshot;

use game_core::{ErrorSeverity, ExecuteError, GameError};

pub use crate::repository::RepositoryError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("simulation worker command channel closed")]
    CommandChannelClosed,

    #[error("simulation worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("simulation worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("runtime requires oracles to be configured before building")]
    MissingOracles,

    #[error("failed to initialize game state from oracles")]
    InitialState(#[source] game_core::InitializationError),

    #[error(transparent)]
    Execute(#[from] ExecuteError),

    #[error("cannot save while the session is in {mode} mode")]
    SaveRejected { mode: &'static str },

    #[error("no saved session in slot '{slot}'")]
    NoSaveRecord { slot: String },
}

impl RuntimeError {
    /// True when the failure only reflects the current game situation
    /// (a locked action, a stale continuation, an unavailable save) and the
    /// session can simply go on.
    pub fn is_rejection(&self) -> bool {
        match self {
            RuntimeError::Execute(error) => matches!(
                error.severity(),
                ErrorSeverity::Recoverable | ErrorSeverity::Validation
            ),
            RuntimeError::SaveRejected { .. } | RuntimeError::NoSaveRecord { .. } => true,
            _ => false,
        }
    }
}
