use crate::config::GameConfig;
use crate::state::{Direction, SkillId};

/// Skill definitions available in combat.
pub trait SkillOracle: Send + Sync {
    fn skill(&self, id: &SkillId) -> Option<SkillDefinition>;

    /// All skills, in menu order.
    fn skills(&self) -> Vec<SkillDefinition>;
}

/// A castable skill and the rune sequence that casts it.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkillDefinition {
    pub id: SkillId,
    pub name: String,
    pub mp_cost: u32,
    pub effect: SkillEffect,
    /// Directions to reproduce, in order. At most
    /// [`GameConfig::MAX_RUNE_LENGTH`] entries and never empty.
    pub sequence: Vec<Direction>,
}

impl SkillDefinition {
    /// Expected direction at `index` of the rune sequence.
    pub fn rune_at(&self, index: usize) -> Option<Direction> {
        self.sequence.get(index).copied()
    }

    pub fn rune_len(&self) -> usize {
        self.sequence.len()
    }

    /// Whether the sequence can be entered at all.
    pub fn has_valid_sequence(&self) -> bool {
        !self.sequence.is_empty() && self.sequence.len() <= GameConfig::MAX_RUNE_LENGTH
    }
}

/// What a skill does once its rune sequence succeeds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SkillEffect {
    /// Deal `floor(attack × scale_percent / 100)` damage.
    Damage { scale_percent: u32 },
    /// Restore a fixed amount of health; deals no damage.
    Heal { amount: u32 },
    /// Raise attack for the rest of the encounter; deals no damage.
    Buff { attack: u32 },
}

impl SkillEffect {
    pub const fn label(&self) -> &'static str {
        match self {
            SkillEffect::Damage { .. } => "DMG",
            SkillEffect::Heal { .. } => "HEAL",
            SkillEffect::Buff { .. } => "BUFF",
        }
    }
}
