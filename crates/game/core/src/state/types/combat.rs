//! Combat-scoped state: the active enemy and the menu/rune sub-machine.

use arrayvec::ArrayVec;

use crate::config::GameConfig;

use super::common::{Direction, EncounterId, InteractableId, Position, SkillId};
use super::tile::{EnemyStats, Item};

/// Rune input buffer; never longer than the longest skill sequence.
pub type RuneBuffer = ArrayVec<Direction, { GameConfig::MAX_RUNE_LENGTH }>;

/// Sub-phase of the combat state machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum CombatPhase {
    /// Choose Attack / Skills / Flee.
    #[default]
    Menu,
    /// Choose an affordable skill.
    SkillSelect,
    /// Reproduce the selected skill's rune sequence.
    Input,
    /// Input locked while a delayed resolution is pending.
    Waiting,
}

/// Feedback tag for the last rune keystroke.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "UPPERCASE")]
pub enum InputResult {
    #[default]
    Neutral,
    Success,
    Fail,
}

/// Menu and rune-entry state for one engagement.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatState {
    pub phase: CombatPhase,
    pub selected_skill: Option<SkillId>,
    pub input_buffer: RuneBuffer,
    pub last_input: InputResult,
}

impl CombatState {
    /// Back to the top-level menu with no selection and an empty buffer.
    pub fn reset_to_menu(&mut self) {
        *self = Self::default();
    }

    pub fn is_waiting(&self) -> bool {
        self.phase == CombatPhase::Waiting
    }
}

/// Combat projection of an enemy interactable.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActiveEnemy {
    /// Interactable id of the originating tile entity.
    pub id: InteractableId,
    pub name: String,
    /// Tile the enemy was engaged on.
    pub origin: Position,
    pub hp: u32,
    pub max_hp: u32,
    pub attack: u32,
    pub defense: u32,
    pub xp_reward: u32,
    pub credits_reward: u32,
    pub loot: Option<Item>,
}

impl ActiveEnemy {
    pub fn from_stats(
        id: InteractableId,
        name: impl Into<String>,
        origin: Position,
        stats: &EnemyStats,
        loot: Option<Item>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            origin,
            hp: stats.hp,
            max_hp: stats.max_hp,
            attack: stats.attack,
            defense: stats.defense,
            xp_reward: stats.xp_reward,
            credits_reward: stats.credits_reward,
            loot,
        }
    }

    /// Reduces hp, flooring at zero. Returns `true` once the enemy is dead.
    pub fn take_damage(&mut self, amount: u32) -> bool {
        self.hp = self.hp.saturating_sub(amount);
        self.hp == 0
    }
}

/// One combat engagement: validation token, enemy, and sub-machine.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Encounter {
    pub id: EncounterId,
    pub enemy: ActiveEnemy,
    pub combat: CombatState,
    /// Attack bonus granted by buff skills; lasts until the encounter ends.
    pub attack_bonus: u32,
}

impl Encounter {
    pub fn new(id: EncounterId, enemy: ActiveEnemy) -> Self {
        Self {
            id,
            enemy,
            combat: CombatState::default(),
            attack_bonus: 0,
        }
    }
}
