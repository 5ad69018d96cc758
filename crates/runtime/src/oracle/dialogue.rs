//! [`game_core::DialogueOracle`] backed by an in-memory map.
use std::collections::HashMap;

use game_core::{DialogueId, DialogueOracle, DialogueTree};

#[derive(Debug, Default)]
pub struct DialogueOracleImpl {
    trees: HashMap<DialogueId, DialogueTree>,
}

impl DialogueOracleImpl {
    pub fn new(trees: impl IntoIterator<Item = DialogueTree>) -> Self {
        Self {
            trees: trees
                .into_iter()
                .map(|tree| (tree.id.clone(), tree))
                .collect(),
        }
    }
}

impl DialogueOracle for DialogueOracleImpl {
    fn tree(&self, id: &DialogueId) -> Option<DialogueTree> {
        self.trees.get(id).cloned()
    }
}
