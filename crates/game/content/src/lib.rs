//! Static content tables and loaders.
//!
//! This crate houses the read-only content the engine consumes by id lookup:
//! - Zone layouts and their entity placements
//! - Item definitions
//! - Skill definitions with their rune sequences
//! - Dialogue trees
//! - Game configuration (data-driven via TOML)
//!
//! [`ContentPack::builtin`] reproduces the shipped world without touching
//! the filesystem. With the `loaders` feature the same tables can be read
//! from RON/TOML files through [`ContentFactory`].
//!
//! Content is consumed by runtime oracles and never appears in game state.

pub mod builtin;

#[cfg(feature = "loaders")]
pub mod loaders;

use std::collections::BTreeSet;

use game_core::{
    DialogueTree, GameConfig, InteractableKind, Item, ItemId, SkillDefinition, ZoneId, ZoneLayout,
};

#[cfg(feature = "loaders")]
pub use loaders::{
    ConfigLoader, ContentFactory, DialogueLoader, ItemLoader, SkillLoader, ZoneLoader,
};

/// Every content table needed to run a session.
#[derive(Clone, Debug, PartialEq)]
pub struct ContentPack {
    pub config: GameConfig,
    pub items: Vec<Item>,
    pub skills: Vec<SkillDefinition>,
    pub dialogues: Vec<DialogueTree>,
    pub zones: Vec<ZoneLayout>,
}

impl ContentPack {
    /// The shipped world: Sector-01 and Sector-02.
    pub fn builtin() -> Self {
        Self {
            config: GameConfig::default(),
            items: builtin::items(),
            skills: builtin::skills(),
            dialogues: builtin::dialogues(),
            zones: builtin::zones(),
        }
    }

    pub fn item(&self, id: &ItemId) -> Option<&Item> {
        self.items.iter().find(|item| &item.id == id)
    }

    pub fn zone(&self, id: &ZoneId) -> Option<&ZoneLayout> {
        self.zones.iter().find(|zone| &zone.id == id)
    }

    /// Cross-table consistency problems, one message each. Empty when the
    /// pack is playable.
    ///
    /// Interactable ids must be unique across every zone because the
    /// cleared-interactable history is keyed by them alone.
    pub fn problems(&self) -> Vec<String> {
        let mut problems = Vec::new();

        let starting = ZoneId::from(self.config.starting_zone.as_str());
        if self.zone(&starting).is_none() {
            problems.push(format!("starting zone '{}' is not defined", starting));
        }

        for skill in &self.skills {
            if !skill.has_valid_sequence() {
                problems.push(format!("skill '{}' has an unplayable rune sequence", skill.id));
            }
        }

        let mut zone_ids = BTreeSet::new();
        let mut interactable_ids = BTreeSet::new();
        for zone in &self.zones {
            if !zone_ids.insert(&zone.id) {
                problems.push(format!("zone '{}' is defined twice", zone.id));
            }
            if zone.terrain.len() != zone.dimensions.area() {
                problems.push(format!(
                    "zone '{}' has {} terrain cells for a {}x{} grid",
                    zone.id,
                    zone.terrain.len(),
                    zone.dimensions.width,
                    zone.dimensions.height
                ));
            }

            for placement in &zone.entities {
                let interactable = &placement.interactable;
                if !interactable_ids.insert(&interactable.id) {
                    problems.push(format!("interactable id '{}' is reused", interactable.id));
                }

                match &interactable.kind {
                    InteractableKind::Npc {
                        dialogue: Some(tree),
                        ..
                    } if !self.dialogues.iter().any(|d| &d.id == tree) => {
                        problems.push(format!(
                            "'{}' references unknown dialogue '{}'",
                            interactable.id, tree
                        ));
                    }
                    InteractableKind::ZoneGate { target } => match self.zone(&target.zone) {
                        None => problems.push(format!(
                            "gate '{}' leads to unknown zone '{}'",
                            interactable.id, target.zone
                        )),
                        Some(dest)
                            if !dest
                                .terrain_at(target.position)
                                .is_some_and(|kind| kind.is_passable(false)) =>
                        {
                            problems.push(format!(
                                "gate '{}' lands on blocked tile {} in '{}'",
                                interactable.id, target.position, target.zone
                            ));
                        }
                        Some(_) => {}
                    },
                    _ => {}
                }
            }
        }

        problems
    }
}

impl Default for ContentPack {
    fn default() -> Self {
        Self::builtin()
    }
}
