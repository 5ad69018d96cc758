//! Zone layout loader.
//!
//! Terrain is drawn as glyph rows, one string per row:
//!
//! | glyph | terrain |
//! |-------|---------|
//! | `.`   | empty   |
//! | `#`   | wall    |
//! | `~`   | water   |
//! | `+`   | door    |
//! | `%`   | void    |
//!
//! Entities reference items by id; the loader resolves them against the
//! item catalog so layouts carry complete [`Item`] values.

use std::path::Path;

use game_core::{
    DialogueId, Direction, EnemyStats, EntityPlacement, Interactable, InteractableKind, Item,
    ItemId, MapDimensions, Position, TileKind, TransitionMeta, ZoneId, ZoneLayout,
};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Zone file structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ZoneRon {
    id: ZoneId,
    name: String,
    rows: Vec<String>,
    spawn: (i32, i32),
    spawn_facing: Direction,
    #[serde(default)]
    entities: Vec<EntityData>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct EntityData {
    at: (i32, i32),
    id: String,
    name: String,
    #[serde(default)]
    hidden: bool,
    kind: EntityKindData,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
enum EntityKindData {
    Npc {
        #[serde(default)]
        dialogue: Option<DialogueId>,
        greeting: String,
    },
    Item {
        item: ItemId,
    },
    Enemy {
        hp: u32,
        attack: u32,
        defense: u32,
        xp: u32,
        #[serde(default)]
        credits: u32,
        #[serde(default)]
        loot: Option<ItemId>,
    },
    Gate {
        zone: ZoneId,
        zone_name: String,
        at: (i32, i32),
        facing: Direction,
    },
}

/// Loader for zone layouts from RON files.
pub struct ZoneLoader;

impl ZoneLoader {
    /// Load a zone layout, resolving item references against `items`.
    pub fn load(path: &Path, items: &[Item]) -> LoadResult<ZoneLayout> {
        let content = read_file(path)?;
        Self::parse(&content, items)
            .map_err(|e| anyhow::anyhow!("{}: {}", path.display(), e))
    }

    pub fn parse(content: &str, items: &[Item]) -> LoadResult<ZoneLayout> {
        let data: ZoneRon = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse zone RON: {}", e))?;

        let (dimensions, terrain) = parse_rows(&data.rows)?;

        let spawn = Position::new(data.spawn.0, data.spawn.1);
        let spawn_index = dimensions
            .index_of(spawn)
            .ok_or_else(|| anyhow::anyhow!("spawn {} is outside the zone", spawn))?;
        if !terrain[spawn_index].is_passable(false) {
            anyhow::bail!("spawn {} is on impassable terrain", spawn);
        }

        let mut entities = Vec::with_capacity(data.entities.len());
        for entity in data.entities {
            let position = Position::new(entity.at.0, entity.at.1);
            if !dimensions.contains(position) {
                anyhow::bail!("entity '{}' at {} is outside the zone", entity.id, position);
            }
            if entities
                .iter()
                .any(|e: &EntityPlacement| e.position == position)
            {
                anyhow::bail!("entity '{}' shares tile {} with another entity", entity.id, position);
            }

            entities.push(EntityPlacement {
                position,
                interactable: Interactable {
                    kind: resolve_kind(&entity.id, entity.kind, items)?,
                    id: entity.id.into(),
                    name: entity.name,
                    is_hidden: entity.hidden,
                },
            });
        }

        Ok(ZoneLayout {
            id: data.id,
            name: data.name,
            dimensions,
            terrain,
            entities,
            spawn,
            spawn_facing: data.spawn_facing,
        })
    }
}

fn parse_rows(rows: &[String]) -> LoadResult<(MapDimensions, Vec<TileKind>)> {
    let width = rows.first().map(|row| row.chars().count()).unwrap_or(0);
    if width == 0 {
        anyhow::bail!("zone has no terrain rows");
    }

    let mut terrain = Vec::with_capacity(width * rows.len());
    for (y, row) in rows.iter().enumerate() {
        if row.chars().count() != width {
            anyhow::bail!("row {} has {} tiles; expected {}", y, row.chars().count(), width);
        }
        for (x, glyph) in row.chars().enumerate() {
            let kind = match glyph {
                '.' => TileKind::Empty,
                '#' => TileKind::Wall,
                '~' => TileKind::Water,
                '+' => TileKind::Door,
                '%' => TileKind::Void,
                other => anyhow::bail!("unknown terrain glyph '{}' at ({}, {})", other, x, y),
            };
            terrain.push(kind);
        }
    }

    Ok((MapDimensions::new(width as u32, rows.len() as u32), terrain))
}

fn resolve_kind(owner: &str, kind: EntityKindData, items: &[Item]) -> LoadResult<InteractableKind> {
    let lookup = |id: &ItemId| {
        items
            .iter()
            .find(|item| &item.id == id)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("entity '{}' references unknown item '{}'", owner, id))
    };

    let kind = match kind {
        EntityKindData::Npc { dialogue, greeting } => InteractableKind::Npc { dialogue, greeting },
        EntityKindData::Item { item } => InteractableKind::Item {
            reward: lookup(&item)?,
        },
        EntityKindData::Enemy {
            hp,
            attack,
            defense,
            xp,
            credits,
            loot,
        } => InteractableKind::Enemy {
            stats: EnemyStats {
                hp,
                max_hp: hp,
                attack,
                defense,
                xp_reward: xp,
                credits_reward: credits,
            },
            loot: loot.as_ref().map(lookup).transpose()?,
        },
        EntityKindData::Gate {
            zone,
            zone_name,
            at,
            facing,
        } => InteractableKind::ZoneGate {
            target: TransitionMeta {
                zone,
                zone_name,
                position: Position::new(at.0, at.1),
                facing,
            },
        },
    };
    Ok(kind)
}
