//! Dialogue tree loader.

use std::collections::BTreeSet;
use std::path::Path;

use game_core::DialogueTree;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DialogueCatalog {
    pub dialogues: Vec<DialogueTree>,
}

/// Loader for dialogue trees from RON files.
pub struct DialogueLoader;

impl DialogueLoader {
    /// Load dialogue trees. Each tree's start node must exist.
    ///
    /// Options pointing at missing nodes are accepted; selecting one
    /// simply closes the conversation.
    pub fn load(path: &Path) -> LoadResult<Vec<DialogueTree>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<Vec<DialogueTree>> {
        let catalog: DialogueCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse dialogue RON: {}", e))?;

        let mut seen = BTreeSet::new();
        for tree in &catalog.dialogues {
            if !seen.insert(tree.id.clone()) {
                anyhow::bail!("duplicate dialogue id '{}'", tree.id);
            }
            if tree.start_node().is_none() {
                anyhow::bail!(
                    "dialogue '{}' starts at missing node '{}'",
                    tree.id,
                    tree.start
                );
            }
        }

        Ok(catalog.dialogues)
    }
}
