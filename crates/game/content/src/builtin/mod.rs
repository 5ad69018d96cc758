//! Built-in content tables.

mod dialogue;
mod items;
mod skills;
mod zones;

pub use dialogue::{WESAI_ECHO, dialogues};
pub use items::{BIO_STIM, ETHER_SHARD, RUSTY_CARD, items};
pub use skills::{CODE_BREAKER, OVERCLOCK, PATCH_ROUTINE, skills};
pub use zones::{SECTOR_01, SECTOR_02, zones};
