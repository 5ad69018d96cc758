//! Mutually exclusive session phases and the lock mask derived from them.

use bitflags::bitflags;

use super::combat::Encounter;
use super::common::{DialogueId, NodeId, TransitionToken};
use super::tile::TransitionMeta;

bitflags! {
    /// Session locks that can block an action.
    ///
    /// Each action declares the locks it refuses to run under; the active
    /// [`Mode`] contributes exactly one flag (or none while exploring).
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct Locks: u8 {
        const COMBAT = 1 << 0;
        const DIALOGUE = 1 << 1;
        const TRANSITION = 1 << 2;
        const GAME_OVER = 1 << 3;
    }
}

impl Locks {
    /// Every lock; used by exploration-only actions.
    pub const EXPLORATION: Self = Self::all();
}

/// Dialogue cursor: a tree reference plus the current node.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActiveDialogue {
    pub tree: DialogueId,
    pub node: NodeId,
    pub speaker: String,
}

/// A zone transition waiting for its completion continuation.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PendingTransition {
    pub token: TransitionToken,
    pub target: TransitionMeta,
}

/// What the session is currently doing. Exactly one mode is active.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Mode {
    #[default]
    Exploring,
    Combat(Box<Encounter>),
    Dialogue(ActiveDialogue),
    Transition(PendingTransition),
    /// Terminal until an explicit reset or load.
    GameOver,
}

impl Mode {
    pub fn locks(&self) -> Locks {
        match self {
            Mode::Exploring => Locks::empty(),
            Mode::Combat(_) => Locks::COMBAT,
            Mode::Dialogue(_) => Locks::DIALOGUE,
            Mode::Transition(_) => Locks::TRANSITION,
            Mode::GameOver => Locks::GAME_OVER,
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, Mode::Exploring)
    }

    pub fn encounter(&self) -> Option<&Encounter> {
        match self {
            Mode::Combat(encounter) => Some(encounter),
            _ => None,
        }
    }

    pub fn encounter_mut(&mut self) -> Option<&mut Encounter> {
        match self {
            Mode::Combat(encounter) => Some(encounter),
            _ => None,
        }
    }

    pub fn dialogue(&self) -> Option<&ActiveDialogue> {
        match self {
            Mode::Dialogue(dialogue) => Some(dialogue),
            _ => None,
        }
    }

    pub fn transition(&self) -> Option<&PendingTransition> {
        match self {
            Mode::Transition(pending) => Some(pending),
            _ => None,
        }
    }

    pub const fn label(&self) -> &'static str {
        match self {
            Mode::Exploring => "exploring",
            Mode::Combat(_) => "combat",
            Mode::Dialogue(_) => "dialogue",
            Mode::Transition(_) => "transition",
            Mode::GameOver => "game_over",
        }
    }
}
