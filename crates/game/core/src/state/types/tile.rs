//! Tile and interactable payloads owned by the world state.

use std::fmt;

use super::common::{DialogueId, Direction, InteractableId, ItemId, Position, ZoneId};

/// Stable identity of a tile for one zone load.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TileId {
    pub zone: ZoneId,
    pub x: i32,
    pub y: i32,
}

impl fmt::Display for TileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:tile_{}_{}", self.zone, self.x, self.y)
    }
}

/// Terrain class of a tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "UPPERCASE")]
pub enum TileKind {
    #[default]
    Empty,
    Wall,
    Water,
    Door,
    Void,
}

impl TileKind {
    /// Whether a walker may step onto this tile.
    ///
    /// Walls yield only to shift mode; water is never passable.
    pub const fn is_passable(self, shift_active: bool) -> bool {
        match self {
            TileKind::Wall => shift_active,
            TileKind::Water => false,
            TileKind::Empty | TileKind::Door | TileKind::Void => true,
        }
    }
}

/// One cell of the active zone.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tile {
    pub id: TileId,
    pub position: Position,
    pub kind: TileKind,
    pub interactable: Option<Interactable>,
    /// Fog-of-war flag. Only ever flips from `false` to `true`.
    is_revealed: bool,
}

impl Tile {
    pub fn new(zone: &ZoneId, position: Position, kind: TileKind) -> Self {
        Self {
            id: TileId {
                zone: zone.clone(),
                x: position.x,
                y: position.y,
            },
            position,
            kind,
            interactable: None,
            is_revealed: false,
        }
    }

    pub fn with_interactable(mut self, interactable: Interactable) -> Self {
        self.interactable = Some(interactable);
        self
    }

    pub fn is_revealed(&self) -> bool {
        self.is_revealed
    }

    /// Lifts the fog from this tile. Returns `true` if it was hidden before.
    pub fn reveal(&mut self) -> bool {
        !std::mem::replace(&mut self.is_revealed, true)
    }

    /// Returns the zone gate metadata when this tile carries a gate.
    pub fn gate(&self) -> Option<&TransitionMeta> {
        match self.interactable.as_ref().map(|i| &i.kind) {
            Some(InteractableKind::ZoneGate { target }) => Some(target),
            _ => None,
        }
    }
}

/// Entity placed on a tile that the player can interact with.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Interactable {
    pub id: InteractableId,
    pub name: String,
    /// Only perceivable while shift mode is active.
    #[cfg_attr(feature = "serde", serde(default))]
    pub is_hidden: bool,
    pub kind: InteractableKind,
}

/// Kind-specific interactable payload.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InteractableKind {
    Npc {
        dialogue: Option<DialogueId>,
        /// Single line used when no dialogue tree is attached.
        greeting: String,
    },
    Item {
        reward: Item,
    },
    Enemy {
        stats: EnemyStats,
        loot: Option<Item>,
    },
    ZoneGate {
        target: TransitionMeta,
    },
}

impl InteractableKind {
    pub const fn label(&self) -> &'static str {
        match self {
            InteractableKind::Npc { .. } => "npc",
            InteractableKind::Item { .. } => "item",
            InteractableKind::Enemy { .. } => "enemy",
            InteractableKind::ZoneGate { .. } => "zone_gate",
        }
    }
}

/// Combat statistics carried by an enemy placement.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnemyStats {
    pub hp: u32,
    pub max_hp: u32,
    pub attack: u32,
    pub defense: u32,
    pub xp_reward: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub credits_reward: u32,
}

/// Complete description of a destination needed to enter a zone.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TransitionMeta {
    pub zone: ZoneId,
    pub zone_name: String,
    pub position: Position,
    pub facing: Direction,
}

/// Item instance as carried in the inventory or offered as a reward.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    pub description: String,
    pub kind: ItemKind,
}

impl Item {
    pub fn is_consumable(&self) -> bool {
        matches!(self.kind, ItemKind::Consumable(_))
    }
}

/// Item category. Only consumables are usable from the inventory.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ItemKind {
    Key,
    Consumable(ConsumableEffect),
    Artifact,
}

/// Effect applied when a consumable is used.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ConsumableEffect {
    /// Restore a fixed amount of health, capped at the maximum.
    Heal(u32),
    /// Restore a fixed amount of ether, capped at the maximum.
    RestoreEther(u32),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reveal_is_one_way() {
        let mut tile = Tile::new(&ZoneId::from("z"), Position::new(1, 1), TileKind::Empty);
        assert!(tile.reveal());
        assert!(!tile.reveal());
        assert!(tile.is_revealed());
    }

    #[test]
    fn walls_yield_only_to_shift() {
        assert!(!TileKind::Wall.is_passable(false));
        assert!(TileKind::Wall.is_passable(true));
        assert!(!TileKind::Water.is_passable(true));
        assert!(TileKind::Door.is_passable(false));
    }
}
