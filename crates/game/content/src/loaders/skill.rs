//! Skill catalog loader.

use std::collections::BTreeSet;
use std::path::Path;

use game_core::{GameConfig, SkillDefinition};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillCatalog {
    pub skills: Vec<SkillDefinition>,
}

/// Loader for skill definitions from RON files.
pub struct SkillLoader;

impl SkillLoader {
    /// Load skills in menu order.
    ///
    /// Every sequence must be non-empty and at most
    /// [`GameConfig::MAX_RUNE_LENGTH`] directions long.
    pub fn load(path: &Path) -> LoadResult<Vec<SkillDefinition>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<Vec<SkillDefinition>> {
        let catalog: SkillCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse skill catalog RON: {}", e))?;

        let mut seen = BTreeSet::new();
        for skill in &catalog.skills {
            if !seen.insert(skill.id.clone()) {
                anyhow::bail!("duplicate skill id '{}'", skill.id);
            }
            if !skill.has_valid_sequence() {
                anyhow::bail!(
                    "skill '{}' has {} runes; expected 1..={}",
                    skill.id,
                    skill.rune_len(),
                    GameConfig::MAX_RUNE_LENGTH
                );
            }
        }

        Ok(catalog.skills)
    }
}
