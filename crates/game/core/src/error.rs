//! Common error infrastructure for game-core.
//!
//! Each action defines its own error enum next to its handler. This module
//! holds the classification shared by all of them.

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: the action was refused in the current session mode and
///   may succeed later (e.g. moving while a dialogue is open)
/// - **Validation**: invalid input that should not be retried unchanged
/// - **Internal**: unexpected state inconsistency that indicates a bug
/// - **Fatal**: the engine cannot proceed (missing oracle or content)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Examples: destination blocked, action locked by combat.
    Recoverable,

    /// Examples: unknown skill id, invalid movement delta.
    Validation,

    /// Examples: player standing off the grid after a move.
    Internal,

    /// Examples: missing zone oracle, starting zone absent.
    Fatal,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates an internal bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all game-core errors.
///
/// - All error enums implement this trait
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    fn severity(&self) -> ErrorSeverity;

    /// Stable identifier for this error variant, used in logs and tests.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
