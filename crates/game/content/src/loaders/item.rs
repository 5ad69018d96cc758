//! Item catalog loader.

use std::collections::BTreeSet;
use std::path::Path;

use game_core::Item;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Item catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemCatalog {
    pub items: Vec<Item>,
}

/// Loader for item catalog from RON files.
pub struct ItemLoader;

impl ItemLoader {
    /// Load item catalog from a RON file.
    pub fn load(path: &Path) -> LoadResult<Vec<Item>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<Vec<Item>> {
        let catalog: ItemCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse item catalog RON: {}", e))?;

        let mut seen = BTreeSet::new();
        for item in &catalog.items {
            if !seen.insert(item.id.clone()) {
                anyhow::bail!("duplicate item id '{}'", item.id);
            }
        }

        Ok(catalog.items)
    }
}

#[cfg(test)]
mod tests {
    use game_core::{ConsumableEffect, ItemKind};

    use super::*;

    #[test]
    fn parses_consumables() {
        let items = ItemLoader::parse(
            r#"(items: [
                (id: "stim", name: "Stim", description: "", kind: Consumable(Heal(30))),
                (id: "card", name: "Card", description: "", kind: Key),
            ])"#,
        )
        .unwrap();

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].kind, ItemKind::Consumable(ConsumableEffect::Heal(30)));
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let err = ItemLoader::parse(
            r#"(items: [
                (id: "a", name: "A", description: "", kind: Key),
                (id: "a", name: "B", description: "", kind: Artifact),
            ])"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("duplicate"));
    }
}
