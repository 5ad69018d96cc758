use std::collections::BTreeMap;

use crate::state::{DialogueId, NodeId};

/// Dialogue trees referenced by NPC interactables.
pub trait DialogueOracle: Send + Sync {
    fn tree(&self, id: &DialogueId) -> Option<DialogueTree>;
}

/// A directed graph of dialogue nodes.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DialogueTree {
    pub id: DialogueId,
    pub start: NodeId,
    pub nodes: BTreeMap<NodeId, DialogueNode>,
}

impl DialogueTree {
    pub fn node(&self, id: &NodeId) -> Option<&DialogueNode> {
        self.nodes.get(id)
    }

    pub fn start_node(&self) -> Option<&DialogueNode> {
        self.node(&self.start)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DialogueNode {
    pub speaker: String,
    pub text: String,
    pub options: Vec<DialogueOption>,
}

/// A selectable reply. `next: None` ends the conversation.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DialogueOption {
    pub label: String,
    pub next: Option<NodeId>,
}
