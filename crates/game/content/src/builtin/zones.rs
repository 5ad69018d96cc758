//! Zone layouts, generated cell by cell from terrain rules.

use game_core::{
    Direction, EnemyStats, EntityPlacement, Interactable, InteractableKind, MapDimensions,
    Position, TileKind, TransitionMeta, ZoneLayout,
};

use super::dialogue::WESAI_ECHO;
use super::items::{bio_stim, ether_shard, rusty_card};

pub const SECTOR_01: &str = "sector_01";
pub const SECTOR_02: &str = "sector_02";

const SECTOR_01_NAME: &str = "Sector-01: Awakening";
const SECTOR_02_NAME: &str = "Sector-02: Data Archive";

pub fn zones() -> Vec<ZoneLayout> {
    vec![sector_01(), sector_02()]
}

fn terrain(dimensions: MapDimensions, rule: impl Fn(i32, i32) -> TileKind) -> Vec<TileKind> {
    let (width, height) = (dimensions.width as i32, dimensions.height as i32);
    (0..height)
        .flat_map(|y| (0..width).map(move |x| (x, y)))
        .map(|(x, y)| rule(x, y))
        .collect()
}

fn place(x: i32, y: i32, id: &str, name: &str, kind: InteractableKind) -> EntityPlacement {
    EntityPlacement {
        position: Position::new(x, y),
        interactable: Interactable {
            id: id.into(),
            name: name.into(),
            is_hidden: false,
            kind,
        },
    }
}

fn gate(zone: &str, zone_name: &str, x: i32, y: i32, facing: Direction) -> InteractableKind {
    InteractableKind::ZoneGate {
        target: TransitionMeta {
            zone: zone.into(),
            zone_name: zone_name.into(),
            position: Position::new(x, y),
            facing,
        },
    }
}

fn sector_01() -> ZoneLayout {
    let dimensions = MapDimensions::new(12, 10);
    let (w, h) = (12, 10);

    let terrain = terrain(dimensions, |x, y| {
        if x > 7 && y > 6 {
            TileKind::Water
        } else if (x, y) == (w - 1, 5) {
            TileKind::Door
        } else if x == 0 || x == w - 1 || y == 0 || y == h - 1 {
            TileKind::Wall
        } else if (x == 3 && (3..=6).contains(&y)) || (x, y) == (8, 3) {
            TileKind::Wall
        } else {
            TileKind::Empty
        }
    });

    let mut cache = place(
        10,
        1,
        "chest_01",
        "Distorted Cache",
        InteractableKind::Item {
            reward: ether_shard(),
        },
    );
    cache.interactable.is_hidden = true;

    let mut entities = vec![
        place(
            5,
            2,
            "npc_sage",
            "WesAI Echo",
            InteractableKind::Npc {
                dialogue: Some(WESAI_ECHO.into()),
                greeting: "You've returned. Finally.".into(),
            },
        ),
        cache,
        place(
            8,
            5,
            "enemy_glitch_01",
            "Glitch Sentinel",
            InteractableKind::Enemy {
                stats: EnemyStats {
                    hp: 50,
                    max_hp: 50,
                    attack: 8,
                    defense: 2,
                    xp_reward: 25,
                    credits_reward: 42,
                },
                loot: Some(bio_stim()),
            },
        ),
        place(
            11,
            5,
            "gate_sector_02",
            "Archive Door",
            gate(SECTOR_02, SECTOR_02_NAME, 1, 4, Direction::Right),
        ),
    ];
    entities.push(place(
        1,
        8,
        "stim_cache_01",
        "Discarded Med-Kit",
        InteractableKind::Item { reward: bio_stim() },
    ));

    ZoneLayout {
        id: SECTOR_01.into(),
        name: SECTOR_01_NAME.into(),
        dimensions,
        terrain,
        entities,
        spawn: Position::new(2, 5),
        spawn_facing: Direction::Down,
    }
}

fn sector_02() -> ZoneLayout {
    let dimensions = MapDimensions::new(10, 8);
    let (w, h) = (10, 8);

    let terrain = terrain(dimensions, |x, y| {
        if (x, y) == (0, 4) {
            TileKind::Door
        } else if x == 0 || x == w - 1 || y == 0 || y == h - 1 {
            TileKind::Wall
        } else if (y == 2 && matches!(x, 3 | 4 | 7)) || (y == 6 && x == 6) {
            TileKind::Wall
        } else if (3..=4).contains(&x) && (5..=6).contains(&y) {
            TileKind::Water
        } else if (x, y) == (8, 6) {
            TileKind::Void
        } else {
            TileKind::Empty
        }
    });

    let entities = vec![
        place(
            0,
            4,
            "gate_sector_01",
            "Awakening Door",
            gate(SECTOR_01, SECTOR_01_NAME, 10, 5, Direction::Left),
        ),
        place(
            5,
            2,
            "npc_archivist",
            "Archive Keeper",
            InteractableKind::Npc {
                dialogue: None,
                greeting: "Records are sealed. Bring proof of clearance.".into(),
            },
        ),
        place(
            7,
            4,
            "enemy_indexer_01",
            "Corrupted Indexer",
            InteractableKind::Enemy {
                stats: EnemyStats {
                    hp: 70,
                    max_hp: 70,
                    attack: 11,
                    defense: 4,
                    xp_reward: 60,
                    credits_reward: 80,
                },
                loot: Some(bio_stim()),
            },
        ),
        place(
            8,
            1,
            "card_01",
            "Dusty Terminal",
            InteractableKind::Item {
                reward: rusty_card(),
            },
        ),
    ];

    ZoneLayout {
        id: SECTOR_02.into(),
        name: SECTOR_02_NAME.into(),
        dimensions,
        terrain,
        entities,
        spawn: Position::new(1, 4),
        spawn_facing: Direction::Right,
    }
}
