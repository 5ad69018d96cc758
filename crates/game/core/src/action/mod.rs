//! Player actions and the continuations they schedule.
//!
//! Every action is a plain value implementing [`ActionTransition`]. The
//! engine drives it through `pre_validate → apply → post_validate`; an action
//! that needs a delayed follow-up returns a [`Scheduled`] continuation instead
//! of capturing state in a closure.
//!
//! # Module Structure
//!
//! - `movement`: grid movement, fog reveal, gate step scheduling
//! - `shift`: shift mode toggle
//! - `interact`: facing-tile interaction dispatch
//! - `inventory`: consumables
//! - `combat`: combat menu commands and damage resolution
//! - `rune`: rune sequence input
//! - `dialogue`: dialogue option selection
//! - `transition`: zone transition begin/complete
//! - `continuation`: delayed continuations and their staleness checks

mod combat;
mod continuation;
mod dialogue;
mod interact;
mod inventory;
mod movement;
mod rune;
mod shift;
mod transition;

pub use combat::{CombatAction, CombatCommand, CombatError};
pub use continuation::{Continuation, ContinuationError, Scheduled};
pub use dialogue::{DialogueError, SelectOptionAction};
pub use interact::{InteractAction, InteractError};
pub use inventory::{UseItemAction, UseItemError};
pub use movement::{MoveAction, MoveError};
pub use rune::{RuneInputAction, RuneInputError};
pub use shift::{ShiftAction, ShiftError};

use crate::env::GameEnv;
use crate::state::{Direction, GameState, ItemId, Locks, NodeId, SkillId};

/// Delayed work produced by a successful transition, if any.
pub type Followup = Option<Scheduled>;

/// Defines how a concrete action variant mutates game state.
pub trait ActionTransition {
    type Error;

    /// Validates pre-conditions using the state **before** mutation.
    fn pre_validate(&self, _state: &GameState, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Applies the action by mutating the game state directly.
    fn apply(&self, state: &mut GameState, env: &GameEnv<'_>) -> Result<Followup, Self::Error>;

    /// Validates post-conditions using the state **after** mutation.
    fn post_validate(&self, _state: &GameState, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Fails with the subset of `blocked_by` that the current mode holds.
pub(crate) fn ensure_unlocked(state: &GameState, blocked_by: Locks) -> Result<(), Locks> {
    let active = state.locks() & blocked_by;
    if active.is_empty() { Ok(()) } else { Err(active) }
}

/// Every input the presentation layer can issue against a session.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Action {
    Move(MoveAction),
    ToggleShift(ShiftAction),
    Interact(InteractAction),
    UseItem(UseItemAction),
    Combat(CombatAction),
    RuneInput(RuneInputAction),
    SelectOption(SelectOptionAction),
}

impl Action {
    /// Movement by a unit delta; anything but the four cardinal steps is rejected.
    pub fn movement(dx: i32, dy: i32) -> Result<Self, MoveError> {
        MoveAction::from_delta(dx, dy).map(Self::Move)
    }

    pub fn step(direction: Direction) -> Self {
        Self::Move(MoveAction::new(direction))
    }

    pub fn toggle_shift() -> Self {
        Self::ToggleShift(ShiftAction)
    }

    pub fn interact() -> Self {
        Self::Interact(InteractAction)
    }

    pub fn use_item(item: impl Into<ItemId>) -> Self {
        Self::UseItem(UseItemAction::new(item.into()))
    }

    pub fn combat(command: CombatCommand) -> Self {
        Self::Combat(CombatAction::new(command))
    }

    pub fn select_skill(skill: impl Into<SkillId>) -> Self {
        Self::combat(CombatCommand::SelectSkill(skill.into()))
    }

    pub fn rune(direction: Direction) -> Self {
        Self::RuneInput(RuneInputAction::new(direction))
    }

    pub fn select_option(next: Option<NodeId>) -> Self {
        Self::SelectOption(SelectOptionAction::new(next))
    }

    /// Returns the snake_case name of the action, used for logging.
    pub fn as_snake_case(&self) -> &'static str {
        match self {
            Action::Move(_) => "move",
            Action::ToggleShift(_) => "toggle_shift",
            Action::Interact(_) => "interact",
            Action::UseItem(_) => "use_item",
            Action::Combat(action) => action.command.as_snake_case(),
            Action::RuneInput(_) => "rune_input",
            Action::SelectOption(_) => "select_option",
        }
    }
}

impl From<MoveAction> for Action {
    fn from(action: MoveAction) -> Self {
        Self::Move(action)
    }
}

impl From<CombatAction> for Action {
    fn from(action: CombatAction) -> Self {
        Self::Combat(action)
    }
}

impl From<RuneInputAction> for Action {
    fn from(action: RuneInputAction) -> Self {
        Self::RuneInput(action)
    }
}
