//! Tiles of the active zone.

use std::collections::BTreeSet;

use crate::env::{OracleError, ZoneLayout, ZoneOracle};

use super::types::{Interactable, InteractableId, MapDimensions, Position, Tile, ZoneId};
use super::visibility;

/// Outcome of a zone lookup that fails closed onto the fallback zone.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ZoneLookup {
    Found(ZoneLayout),
    /// The requested zone was unknown; the fallback layout was used instead.
    Fallback {
        requested: ZoneId,
        layout: ZoneLayout,
    },
}

impl ZoneLookup {
    pub fn layout(&self) -> &ZoneLayout {
        match self {
            ZoneLookup::Found(layout) | ZoneLookup::Fallback { layout, .. } => layout,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, ZoneLookup::Fallback { .. })
    }
}

/// Looks up `id`, falling back to `fallback` when the zone does not exist.
///
/// Fails only when the fallback zone is missing as well.
pub fn lookup_zone<Z>(zones: &Z, id: &ZoneId, fallback: &ZoneId) -> Result<ZoneLookup, OracleError>
where
    Z: ZoneOracle + ?Sized,
{
    if let Some(layout) = zones.zone(id) {
        return Ok(ZoneLookup::Found(layout));
    }
    zones
        .zone(fallback)
        .map(|layout| ZoneLookup::Fallback {
            requested: id.clone(),
            layout,
        })
        .ok_or_else(|| OracleError::ZoneNotFound(fallback.clone()))
}

/// Tile grid of the zone the player is currently in.
///
/// Tiles are rebuilt from the layout on every zone load; nothing outside this
/// type holds a tile reference across loads.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorldState {
    pub zone: ZoneId,
    pub zone_name: String,
    pub dimensions: MapDimensions,
    /// Row-major, `width × height` entries.
    tiles: Vec<Tile>,
}

impl WorldState {
    /// Builds one tile per grid cell with the layout's entities attached.
    /// Every tile starts hidden.
    pub fn from_layout(layout: &ZoneLayout) -> Self {
        let width = layout.dimensions.width as i32;
        let height = layout.dimensions.height as i32;

        let mut tiles: Vec<Tile> = (0..height)
            .flat_map(|y| (0..width).map(move |x| Position::new(x, y)))
            .map(|position| {
                let kind = layout.terrain_at(position).unwrap_or_default();
                Tile::new(&layout.id, position, kind)
            })
            .collect();

        for placement in &layout.entities {
            if let Some(index) = layout.dimensions.index_of(placement.position) {
                tiles[index].interactable = Some(placement.interactable.clone());
            }
        }

        Self {
            zone: layout.id.clone(),
            zone_name: layout.name.clone(),
            dimensions: layout.dimensions,
            tiles,
        }
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn contains(&self, position: Position) -> bool {
        self.dimensions.contains(position)
    }

    pub fn tile(&self, position: Position) -> Option<&Tile> {
        let index = self.dimensions.index_of(position)?;
        self.tiles.get(index)
    }

    pub fn tile_mut(&mut self, position: Position) -> Option<&mut Tile> {
        let index = self.dimensions.index_of(position)?;
        self.tiles.get_mut(index)
    }

    /// Strips every interactable whose id is in `cleared`.
    ///
    /// Idempotent and independent of iteration order. Returns the number of
    /// interactables removed.
    pub fn apply_history(&mut self, cleared: &BTreeSet<InteractableId>) -> usize {
        let mut removed = 0;
        for tile in &mut self.tiles {
            if tile
                .interactable
                .as_ref()
                .is_some_and(|interactable| cleared.contains(&interactable.id))
            {
                tile.interactable = None;
                removed += 1;
            }
        }
        removed
    }

    /// Lifts the fog around `center`. Returns the number of newly revealed tiles.
    pub fn reveal_around(&mut self, center: Position, radius: f64) -> usize {
        visibility::reveal_around(&mut self.tiles, center, radius)
    }

    /// Removes the interactable with `id` from whichever tile carries it.
    pub fn remove_interactable(&mut self, id: &InteractableId) -> Option<Interactable> {
        self.tiles
            .iter_mut()
            .find(|tile| tile.interactable.as_ref().is_some_and(|i| &i.id == id))
            .and_then(|tile| tile.interactable.take())
    }

    pub fn revealed_count(&self) -> usize {
        self.tiles.iter().filter(|tile| tile.is_revealed()).count()
    }
}
