//! [`game_core::ZoneOracle`] backed by an in-memory zone table.
use std::collections::BTreeMap;

use game_core::{ZoneId, ZoneLayout, ZoneOracle};

/// ZoneOracle implementation with static zone layouts.
#[derive(Debug, Default)]
pub struct ZoneOracleImpl {
    zones: BTreeMap<ZoneId, ZoneLayout>,
}

impl ZoneOracleImpl {
    pub fn new(zones: impl IntoIterator<Item = ZoneLayout>) -> Self {
        Self {
            zones: zones
                .into_iter()
                .map(|zone| (zone.id.clone(), zone))
                .collect(),
        }
    }

    /// Add or replace a zone layout.
    pub fn add_zone(&mut self, zone: ZoneLayout) {
        self.zones.insert(zone.id.clone(), zone);
    }

    pub fn len(&self) -> usize {
        self.zones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }
}

impl ZoneOracle for ZoneOracleImpl {
    fn zone(&self, id: &ZoneId) -> Option<ZoneLayout> {
        self.zones.get(id).cloned()
    }

    fn zone_ids(&self) -> Vec<ZoneId> {
        self.zones.keys().cloned().collect()
    }
}
