//! Plain data types that make up the session state.

mod combat;
mod common;
mod log;
mod mode;
mod player;
mod tile;

pub use combat::{ActiveEnemy, CombatPhase, CombatState, Encounter, InputResult, RuneBuffer};
pub use common::{
    DialogueId, Direction, EncounterId, InteractableId, ItemId, MapDimensions, NodeId, Position,
    SkillId, TransitionToken, ZoneId,
};
pub use log::{GameLog, LogEntry, LogKind};
pub use mode::{ActiveDialogue, Locks, Mode, PendingTransition};
pub use player::{PlayerState, PlayerStats};
pub use tile::{
    ConsumableEffect, EnemyStats, Interactable, InteractableKind, Item, ItemKind, Tile, TileId,
    TileKind, TransitionMeta,
};
