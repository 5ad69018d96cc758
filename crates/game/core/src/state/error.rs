//! Session initialization errors.

use crate::env::OracleError;
use crate::error::{ErrorSeverity, GameError};

/// Errors raised while building a fresh session.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InitializationError {
    #[error("oracle unavailable: {0}")]
    Oracle(#[from] OracleError),

    #[error("spawn {position} is outside zone '{zone}'")]
    SpawnOutOfBounds {
        zone: crate::state::ZoneId,
        position: crate::state::Position,
    },
}

impl GameError for InitializationError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Oracle(inner) => inner.error_code(),
            Self::SpawnOutOfBounds { .. } => "INIT_SPAWN_OUT_OF_BOUNDS",
        }
    }
}
