use std::collections::BTreeMap;

use game_core::{DialogueNode, DialogueOption, DialogueTree, NodeId};

pub const WESAI_ECHO: &str = "wesai_echo";

fn node(text: &str, options: &[(&str, Option<&str>)]) -> DialogueNode {
    DialogueNode {
        speaker: "WesAI Echo".into(),
        text: text.into(),
        options: options
            .iter()
            .map(|(label, next)| DialogueOption {
                label: (*label).into(),
                next: next.map(NodeId::from),
            })
            .collect(),
    }
}

pub fn dialogues() -> Vec<DialogueTree> {
    let nodes: BTreeMap<NodeId, DialogueNode> = [
        (
            "greeting",
            node(
                "You've returned. Finally.",
                &[
                    ("What happened here?", Some("fragmented")),
                    ("How do I see what is hidden?", Some("shift")),
                    ("Later.", None),
                ],
            ),
        ),
        (
            "fragmented",
            node(
                "The code is fragmented, Architect. We need to rebuild the Source.",
                &[("Where do I start?", Some("shift")), ("Later.", None)],
            ),
        ),
        (
            "shift",
            node(
                "Press [SPACE] to activate the Shift. See what is hidden.",
                &[("Understood.", None)],
            ),
        ),
    ]
    .into_iter()
    .map(|(id, node)| (NodeId::from(id), node))
    .collect();

    vec![DialogueTree {
        id: WESAI_ECHO.into(),
        start: "greeting".into(),
        nodes,
    }]
}
