use crate::action::{ActionTransition, Followup};
use crate::env::{DialogueTree, GameEnv, OracleError};
use crate::error::{ErrorSeverity, GameError};
use crate::state::{ActiveDialogue, GameState, Mode, NodeId};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DialogueError {
    #[error("no dialogue is open")]
    NotInDialogue,

    #[error(transparent)]
    Oracle(#[from] OracleError),
}

impl GameError for DialogueError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::NotInDialogue => ErrorSeverity::Recoverable,
            Self::Oracle(inner) => inner.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NotInDialogue => "DIALOGUE_NOT_OPEN",
            Self::Oracle(inner) => inner.error_code(),
        }
    }
}

/// Picks a dialogue option. `None` ends the conversation.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SelectOptionAction {
    pub next: Option<NodeId>,
}

impl SelectOptionAction {
    pub fn new(next: Option<NodeId>) -> Self {
        Self { next }
    }
}

impl ActionTransition for SelectOptionAction {
    type Error = DialogueError;

    fn pre_validate(&self, state: &GameState, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        state
            .mode
            .dialogue()
            .map(|_| ())
            .ok_or(DialogueError::NotInDialogue)
    }

    fn apply(&self, state: &mut GameState, env: &GameEnv<'_>) -> Result<Followup, Self::Error> {
        let active = state
            .mode
            .dialogue()
            .cloned()
            .ok_or(DialogueError::NotInDialogue)?;

        let Some(next) = &self.next else {
            state.mode = Mode::Exploring;
            return Ok(None);
        };

        // A dangling reference closes the conversation instead of failing.
        let node = env
            .dialogue()?
            .tree(&active.tree)
            .and_then(|tree| tree.node(next).cloned());
        match node {
            Some(node) => {
                state.log.dialogue(format!("{}: \"{}\"", node.speaker, node.text));
                state.mode = Mode::Dialogue(ActiveDialogue {
                    tree: active.tree,
                    node: next.clone(),
                    speaker: node.speaker,
                });
            }
            None => state.mode = Mode::Exploring,
        }
        Ok(None)
    }
}

/// Opens `tree` at its start node. Returns `false` if the tree has no usable
/// start node, leaving the mode untouched.
pub(crate) fn open(state: &mut GameState, tree: &DialogueTree) -> bool {
    let Some(node) = tree.start_node() else {
        return false;
    };
    state.log.dialogue(format!("{}: \"{}\"", node.speaker, node.text));
    state.mode = Mode::Dialogue(ActiveDialogue {
        tree: tree.id.clone(),
        node: tree.start.clone(),
        speaker: node.speaker.clone(),
    });
    true
}
