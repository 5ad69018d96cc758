//! Oracle access errors.
//!
//! Errors related to oracle availability and static content lookups.

use crate::error::{ErrorSeverity, GameError};
use crate::state::{DialogueId, SkillId, ZoneId};

/// Errors that occur when accessing oracle data.
///
/// Missing oracles are fatal since the engine cannot proceed without zone or
/// rule data. Lookup misses are validation errors; callers usually recover by
/// falling back to a safe default.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OracleError {
    /// ZoneOracle is not available in the environment.
    #[error("ZoneOracle not available")]
    ZonesNotAvailable,

    /// SkillOracle is not available in the environment.
    #[error("SkillOracle not available")]
    SkillsNotAvailable,

    /// DialogueOracle is not available in the environment.
    #[error("DialogueOracle not available")]
    DialogueNotAvailable,

    /// Game configuration is not available in the environment.
    #[error("game config not available")]
    ConfigNotAvailable,

    /// RngOracle is not available in the environment.
    #[error("RngOracle not available")]
    RngNotAvailable,

    /// Zone was not found, and neither was the fallback zone.
    #[error("zone '{0}' not found")]
    ZoneNotFound(ZoneId),

    #[error("skill '{0}' not found")]
    SkillNotFound(SkillId),

    #[error("dialogue tree '{0}' not found")]
    DialogueNotFound(DialogueId),
}

impl GameError for OracleError {
    fn severity(&self) -> ErrorSeverity {
        use OracleError::*;
        match self {
            // Missing oracles are fatal - engine cannot proceed
            ZonesNotAvailable | SkillsNotAvailable | DialogueNotAvailable | ConfigNotAvailable
            | RngNotAvailable => ErrorSeverity::Fatal,

            ZoneNotFound(_) | SkillNotFound(_) | DialogueNotFound(_) => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        use OracleError::*;
        match self {
            ZonesNotAvailable => "ORACLE_ZONES_NOT_AVAILABLE",
            SkillsNotAvailable => "ORACLE_SKILLS_NOT_AVAILABLE",
            DialogueNotAvailable => "ORACLE_DIALOGUE_NOT_AVAILABLE",
            ConfigNotAvailable => "ORACLE_CONFIG_NOT_AVAILABLE",
            RngNotAvailable => "ORACLE_RNG_NOT_AVAILABLE",
            ZoneNotFound(_) => "ORACLE_ZONE_NOT_FOUND",
            SkillNotFound(_) => "ORACLE_SKILL_NOT_FOUND",
            DialogueNotFound(_) => "ORACLE_DIALOGUE_NOT_FOUND",
        }
    }
}
