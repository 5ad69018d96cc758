use crate::state::{
    Direction, Interactable, MapDimensions, Position, TileKind, TransitionMeta, ZoneId,
};

/// Static zone tables: layouts and entity placements.
pub trait ZoneOracle: Send + Sync {
    /// Returns the layout for `id`, if the zone exists.
    fn zone(&self, id: &ZoneId) -> Option<ZoneLayout>;

    /// Lists every zone id known to this oracle.
    fn zone_ids(&self) -> Vec<ZoneId> {
        Vec::new()
    }
}

/// Immutable description of one zone.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ZoneLayout {
    pub id: ZoneId,
    pub name: String,
    pub dimensions: MapDimensions,
    /// Row-major terrain, `width × height` entries.
    pub terrain: Vec<TileKind>,
    pub entities: Vec<EntityPlacement>,
    /// Where a new game starts when this zone is the starting zone.
    pub spawn: Position,
    pub spawn_facing: Direction,
}

impl ZoneLayout {
    pub fn terrain_at(&self, position: Position) -> Option<TileKind> {
        let index = self.dimensions.index_of(position)?;
        self.terrain.get(index).copied()
    }

    /// Destination used when a transition falls back to this zone.
    pub fn spawn_meta(&self) -> TransitionMeta {
        TransitionMeta {
            zone: self.id.clone(),
            zone_name: self.name.clone(),
            position: self.spawn,
            facing: self.spawn_facing,
        }
    }
}

/// An interactable bound to a tile in a zone layout.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntityPlacement {
    pub position: Position,
    pub interactable: Interactable,
}
