//! Small hand-built world shared by unit tests.
//!
//! `sandbox` (8×6, walled border):
//!
//! ```text
//!   01234567
//! 0 ########
//! 1 #  C M #    C hidden cache, M mute terminal
//! 2 #G@ # >#    G guide, @ spawn facing down, > gate to annex
//! 3 # S  k #    S sentry, k medkit
//! 4 #~    R#    ~ water, R rift gate to an unknown zone
//! 5 ########
//! ```

use std::collections::BTreeMap;

use crate::action::{Action, ActionTransition, Followup};
use crate::config::GameConfig;
use crate::engine::{ExecuteError, GameEngine};
use crate::env::{
    DialogueNode, DialogueOption, DialogueOracle, DialogueTree, EntityPlacement, Env, GameEnv,
    PcgRng, SkillDefinition, SkillEffect, SkillOracle, ZoneLayout, ZoneOracle,
};
use crate::state::{
    CombatPhase, ConsumableEffect, DialogueId, Direction, EnemyStats, GameState, Interactable,
    InteractableKind, Item, ItemKind, MapDimensions, NodeId, Position, SkillId, TileKind,
    TransitionMeta, ZoneId,
};

pub(crate) fn stim() -> Item {
    Item {
        id: "stim".into(),
        name: "Bio-Stim".into(),
        description: "Restores HP.".into(),
        kind: ItemKind::Consumable(ConsumableEffect::Heal(30)),
    }
}

fn placement(position: Position, id: &str, name: &str, kind: InteractableKind) -> EntityPlacement {
    EntityPlacement {
        position,
        interactable: Interactable {
            id: id.into(),
            name: name.into(),
            is_hidden: false,
            kind,
        },
    }
}

pub(crate) struct TestZones {
    zones: BTreeMap<ZoneId, ZoneLayout>,
}

impl TestZones {
    pub const SENTRY: Position = Position::new(2, 3);
    pub const GATE: Position = Position::new(6, 2);
    pub const RIFT: Position = Position::new(6, 4);
    pub const WALL: Position = Position::new(4, 2);

    pub fn new() -> Self {
        let zones = [Self::sandbox(), Self::annex()]
            .into_iter()
            .map(|layout| (layout.id.clone(), layout))
            .collect();
        Self { zones }
    }

    fn sandbox() -> ZoneLayout {
        let dimensions = MapDimensions::new(8, 6);
        let terrain = (0..6)
            .flat_map(|y| (0..8).map(move |x| Position::new(x, y)))
            .map(|p| match (p.x, p.y) {
                (0 | 7, _) | (_, 0 | 5) => TileKind::Wall,
                _ if p == Self::WALL => TileKind::Wall,
                (1, 4) => TileKind::Water,
                _ => TileKind::Empty,
            })
            .collect();

        let mut cache = placement(
            Position::new(3, 1),
            "cache",
            "Distorted Cache",
            InteractableKind::Item {
                reward: Item {
                    id: "shard".into(),
                    name: "Ether Shard".into(),
                    description: String::new(),
                    kind: ItemKind::Artifact,
                },
            },
        );
        cache.interactable.is_hidden = true;

        let entities = vec![
            cache,
            placement(
                Position::new(5, 1),
                "mute",
                "Mute Terminal",
                InteractableKind::Npc {
                    dialogue: None,
                    greeting: "...".into(),
                },
            ),
            placement(
                Position::new(1, 2),
                "guide",
                "Guide",
                InteractableKind::Npc {
                    dialogue: Some("guide_talk".into()),
                    greeting: "Hello.".into(),
                },
            ),
            placement(
                Self::SENTRY,
                "sentry",
                "Sentry",
                InteractableKind::Enemy {
                    stats: EnemyStats {
                        hp: 20,
                        max_hp: 20,
                        attack: 6,
                        defense: 1,
                        xp_reward: 100,
                        credits_reward: 5,
                    },
                    loot: Some(stim()),
                },
            ),
            placement(
                Position::new(5, 3),
                "medkit",
                "Medkit",
                InteractableKind::Item { reward: stim() },
            ),
            placement(
                Self::GATE,
                "gate",
                "Annex Door",
                InteractableKind::ZoneGate {
                    target: TransitionMeta {
                        zone: "annex".into(),
                        zone_name: "Annex".into(),
                        position: Position::new(1, 1),
                        facing: Direction::Right,
                    },
                },
            ),
            placement(
                Self::RIFT,
                "rift",
                "Rift",
                InteractableKind::ZoneGate {
                    target: TransitionMeta {
                        zone: "nowhere".into(),
                        zone_name: "Nowhere".into(),
                        position: Position::new(1, 1),
                        facing: Direction::Up,
                    },
                },
            ),
        ];

        ZoneLayout {
            id: "sandbox".into(),
            name: "Sandbox".into(),
            dimensions,
            terrain,
            entities,
            spawn: Position::new(2, 2),
            spawn_facing: Direction::Down,
        }
    }

    fn annex() -> ZoneLayout {
        let dimensions = MapDimensions::new(4, 4);
        ZoneLayout {
            id: "annex".into(),
            name: "Annex".into(),
            dimensions,
            terrain: vec![TileKind::Empty; dimensions.area()],
            entities: Vec::new(),
            spawn: Position::new(1, 1),
            spawn_facing: Direction::Down,
        }
    }
}

impl ZoneOracle for TestZones {
    fn zone(&self, id: &ZoneId) -> Option<ZoneLayout> {
        self.zones.get(id).cloned()
    }

    fn zone_ids(&self) -> Vec<ZoneId> {
        self.zones.keys().cloned().collect()
    }
}

pub(crate) struct TestSkills(Vec<SkillDefinition>);

impl TestSkills {
    fn new() -> Self {
        use Direction::*;
        let skill = |id: &str, mp_cost, effect, sequence: &[Direction]| SkillDefinition {
            id: id.into(),
            name: id.to_uppercase(),
            mp_cost,
            effect,
            sequence: sequence.to_vec(),
        };
        Self(vec![
            skill("strike", 10, SkillEffect::Damage { scale_percent: 250 }, &[Up, Down, Up]),
            skill("mend", 15, SkillEffect::Heal { amount: 30 }, &[Left, Right]),
            skill("focus", 20, SkillEffect::Buff { attack: 5 }, &[Up, Up]),
            skill("overload", 999, SkillEffect::Damage { scale_percent: 900 }, &[Down]),
        ])
    }
}

impl SkillOracle for TestSkills {
    fn skill(&self, id: &SkillId) -> Option<SkillDefinition> {
        self.0.iter().find(|skill| &skill.id == id).cloned()
    }

    fn skills(&self) -> Vec<SkillDefinition> {
        self.0.clone()
    }
}

pub(crate) struct TestDialogue(DialogueTree);

impl TestDialogue {
    fn new() -> Self {
        let node = |text: &str, options: Vec<(&str, Option<&str>)>| DialogueNode {
            speaker: "Guide".into(),
            text: text.into(),
            options: options
                .into_iter()
                .map(|(label, next)| DialogueOption {
                    label: label.into(),
                    next: next.map(NodeId::from),
                })
                .collect(),
        };
        let nodes = [
            (
                NodeId::from("hello"),
                node(
                    "Welcome.",
                    vec![("More", Some("more")), ("Broken", Some("missing")), ("Bye", None)],
                ),
            ),
            (NodeId::from("more"), node("That is all.", vec![("Bye", None)])),
        ]
        .into_iter()
        .collect();

        Self(DialogueTree {
            id: "guide_talk".into(),
            start: "hello".into(),
            nodes,
        })
    }
}

impl DialogueOracle for TestDialogue {
    fn tree(&self, id: &DialogueId) -> Option<DialogueTree> {
        (&self.0.id == id).then(|| self.0.clone())
    }
}

/// Oracles plus a config starting in `sandbox`.
pub(crate) struct Fixture {
    zones: TestZones,
    skills: TestSkills,
    dialogue: TestDialogue,
    rng: PcgRng,
    config: GameConfig,
}

impl Fixture {
    pub fn new() -> Self {
        Self {
            zones: TestZones::new(),
            skills: TestSkills::new(),
            dialogue: TestDialogue::new(),
            rng: PcgRng,
            config: GameConfig::default().with_starting_zone("sandbox"),
        }
    }

    pub fn env(&self) -> GameEnv<'_> {
        Env::with_all(
            &self.zones,
            &self.skills,
            &self.dialogue,
            &self.rng,
            &self.config,
        )
        .into_game_env()
    }

    pub fn new_game(&self) -> GameState {
        GameState::new_game(&self.env(), 7).expect("sandbox game")
    }

    /// A new game already fighting the sentry below the spawn.
    pub fn engaged(&self) -> GameState {
        self.engaged_with_seed(7)
    }

    pub fn engaged_with_seed(&self, seed: u64) -> GameState {
        let mut state = GameState::new_game(&self.env(), seed).expect("sandbox game");
        self.execute(&mut state, &Action::interact())
            .expect("engage sentry");
        assert!(state.mode.encounter().is_some());
        state
    }

    pub fn execute(&self, state: &mut GameState, action: &Action) -> Result<Followup, ExecuteError> {
        GameEngine::new(state)
            .execute(self.env(), action)
            .map(|outcome| outcome.scheduled)
    }

    /// Drives one transition through all three phases without the engine.
    pub fn run<T: ActionTransition>(
        &self,
        state: &mut GameState,
        transition: T,
    ) -> Result<Followup, T::Error> {
        let env = self.env();
        transition.pre_validate(state, &env)?;
        let followup = transition.apply(state, &env)?;
        transition.post_validate(state, &env)?;
        Ok(followup)
    }

    pub fn phase(&self, state: &GameState) -> CombatPhase {
        state
            .mode
            .encounter()
            .map(|encounter| encounter.combat.phase)
            .expect("combat in progress")
    }
}
