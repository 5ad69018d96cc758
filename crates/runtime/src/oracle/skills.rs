//! [`game_core::SkillOracle`] preserving menu order.
use game_core::{SkillDefinition, SkillId, SkillOracle};

#[derive(Debug, Default)]
pub struct SkillOracleImpl {
    skills: Vec<SkillDefinition>,
}

impl SkillOracleImpl {
    pub fn new(skills: Vec<SkillDefinition>) -> Self {
        Self { skills }
    }
}

impl SkillOracle for SkillOracleImpl {
    fn skill(&self, id: &SkillId) -> Option<SkillDefinition> {
        self.skills.iter().find(|skill| &skill.id == id).cloned()
    }

    fn skills(&self) -> Vec<SkillDefinition> {
        self.skills.clone()
    }
}
