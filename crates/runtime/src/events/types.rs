//! Event types for different topics.

use std::fmt;

use game_core::{Action, Continuation, Scheduled, engine::TransitionPhase};
use serde::{Deserialize, Serialize};

/// Events related to game state changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum GameStateEvent {
    /// A player action was applied and committed.
    ActionApplied {
        nonce: u64,
        action: Action,
        scheduled: Option<Scheduled>,
    },

    /// A player action failed and the state was left untouched.
    ActionRejected {
        action: Action,
        phase: TransitionPhase,
        error: String,
    },

    /// A delayed continuation fired and was committed.
    ContinuationFired {
        nonce: u64,
        continuation: Continuation,
        scheduled: Option<Scheduled>,
    },

    /// A continuation fired after its context was gone and did nothing.
    ContinuationDropped {
        continuation: Continuation,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PersistenceOp {
    Save,
    Load,
    Reset,
}

impl fmt::Display for PersistenceOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PersistenceOp::Save => "save",
            PersistenceOp::Load => "load",
            PersistenceOp::Reset => "reset",
        };
        f.write_str(label)
    }
}

/// Events related to the saved session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum PersistenceEvent {
    Saved { slot: String, nonce: u64 },
    Loaded { slot: String, nonce: u64 },
    Reset { slot: String },
    Failed {
        slot: String,
        op: PersistenceOp,
        error: String,
    },
}
