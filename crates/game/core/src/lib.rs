//! Deterministic game rules for a tile-based exploration RPG.
//!
//! `game-core` defines the canonical rules (actions, continuations, engine,
//! session state) as pure APIs with no I/O and no clocks. All state mutation
//! flows through [`engine::GameEngine`]; delayed behaviour is returned to the
//! host as [`action::Scheduled`] data.
pub mod action;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod state;

#[cfg(test)]
pub(crate) mod testing;

pub use action::{
    Action, ActionTransition, CombatAction, CombatCommand, CombatError, Continuation,
    ContinuationError, DialogueError, Followup, InteractAction, InteractError, MoveAction,
    MoveError, RuneInputAction, RuneInputError, Scheduled, SelectOptionAction, ShiftAction,
    ShiftError, UseItemAction, UseItemError,
};
pub use config::{ContinuationDelays, GameConfig, LevelGrowth, StartingStats};
pub use engine::{ExecuteError, ExecutionOutcome, GameEngine, TransitionPhase, TransitionPhaseError};
pub use env::{
    DialogueNode, DialogueOption, DialogueOracle, DialogueTree, EntityPlacement, Env, GameEnv,
    OracleError, PcgRng, RngOracle, SkillDefinition, SkillEffect, SkillOracle, ZoneLayout,
    ZoneOracle,
};
pub use error::{ErrorSeverity, GameError};
pub use state::{
    ActiveDialogue, ActiveEnemy, CombatPhase, CombatState, ConsumableEffect, DialogueId,
    Direction, Encounter, EncounterId, EnemyStats, GameLog, GameState, InitializationError,
    InputResult, Interactable, InteractableId, InteractableKind, Item, ItemId, ItemKind, Locks,
    LogEntry, LogKind, MapDimensions, Mode, NodeId, PendingTransition, PlayerState, PlayerStats,
    Position, SkillId, Tile, TileId, TileKind, TransitionMeta, TransitionToken, WorldState, ZoneId,
};
