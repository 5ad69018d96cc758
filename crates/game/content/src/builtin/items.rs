use game_core::{ConsumableEffect, Item, ItemKind};

pub const ETHER_SHARD: &str = "item_shard_01";
pub const RUSTY_CARD: &str = "item_key_01";
pub const BIO_STIM: &str = "item_stim_01";

/// Amount of HP a Bio-Stim Pack restores.
const STIM_HEAL: u32 = 30;

pub fn items() -> Vec<Item> {
    vec![ether_shard(), rusty_card(), bio_stim()]
}

pub(crate) fn ether_shard() -> Item {
    Item {
        id: ETHER_SHARD.into(),
        name: "Ether Shard".into(),
        description: "A fragment of raw potential. It hums with memory.".into(),
        kind: ItemKind::Artifact,
    }
}

pub(crate) fn rusty_card() -> Item {
    Item {
        id: RUSTY_CARD.into(),
        name: "Rusty Access Card".into(),
        description: "Pre-collapse tech. Reads: \"Sector 4 Auth\".".into(),
        kind: ItemKind::Key,
    }
}

pub(crate) fn bio_stim() -> Item {
    Item {
        id: BIO_STIM.into(),
        name: "Bio-Stim Pack".into(),
        description: "Emergency nanobots. Restores HP.".into(),
        kind: ItemKind::Consumable(ConsumableEffect::Heal(STIM_HEAL)),
    }
}
