//! Content factory for building a content pack from data files.

use std::path::{Path, PathBuf};

use game_core::{DialogueTree, GameConfig, Item, SkillDefinition, ZoneLayout};

use crate::ContentPack;
use crate::loaders::{ConfigLoader, DialogueLoader, ItemLoader, LoadResult, SkillLoader, ZoneLoader};

/// Content factory that loads all game content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── items.ron
/// ├── skills.ron
/// ├── dialogue.ron
/// └── zones/
///     ├── sector_01.ron
///     └── sector_02.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load game configuration from `config.toml`.
    pub fn load_config(&self) -> LoadResult<GameConfig> {
        ConfigLoader::load(&self.data_dir.join("config.toml"))
    }

    /// Load item catalog from `items.ron`.
    pub fn load_items(&self) -> LoadResult<Vec<Item>> {
        ItemLoader::load(&self.data_dir.join("items.ron"))
    }

    /// Load skills from `skills.ron`.
    pub fn load_skills(&self) -> LoadResult<Vec<SkillDefinition>> {
        SkillLoader::load(&self.data_dir.join("skills.ron"))
    }

    /// Load dialogue trees from `dialogue.ron`.
    pub fn load_dialogues(&self) -> LoadResult<Vec<DialogueTree>> {
        DialogueLoader::load(&self.data_dir.join("dialogue.ron"))
    }

    /// Load one zone from `zones/{zone_name}.ron`.
    pub fn load_zone(&self, zone_name: &str, items: &[Item]) -> LoadResult<ZoneLayout> {
        let path = self.zones_dir().join(format!("{}.ron", zone_name));
        ZoneLoader::load(&path, items)
    }

    /// Load every `*.ron` file under `zones/`, sorted by file name.
    pub fn load_zones(&self, items: &[Item]) -> LoadResult<Vec<ZoneLayout>> {
        let dir = self.zones_dir();
        let entries = std::fs::read_dir(&dir)
            .map_err(|e| anyhow::anyhow!("Failed to read zone directory {}: {}", dir.display(), e))?;

        let mut paths = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if path.extension().is_some_and(|ext| ext == "ron") {
                paths.push(path);
            }
        }
        paths.sort();

        paths
            .iter()
            .map(|path| ZoneLoader::load(path, items))
            .collect()
    }

    /// Load and cross-check the complete pack.
    pub fn load_pack(&self) -> LoadResult<ContentPack> {
        let items = self.load_items()?;
        let pack = ContentPack {
            config: self.load_config()?,
            skills: self.load_skills()?,
            dialogues: self.load_dialogues()?,
            zones: self.load_zones(&items)?,
            items,
        };

        let problems = pack.problems();
        if !problems.is_empty() {
            anyhow::bail!(
                "content in {} is inconsistent:\n  {}",
                self.data_dir.display(),
                problems.join("\n  ")
            );
        }
        Ok(pack)
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn zones_dir(&self) -> PathBuf {
        self.data_dir.join("zones")
    }
}
