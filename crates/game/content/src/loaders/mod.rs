//! Content loaders for reading game data from files.
//!
//! Tables are RON, configuration is TOML. Every loader returns the same
//! `game-core` types the built-in tables produce.

pub mod config;
pub mod dialogue;
pub mod factory;
pub mod item;
pub mod skill;
pub mod zone;

pub use config::ConfigLoader;
pub use dialogue::DialogueLoader;
pub use factory::ContentFactory;
pub use item::ItemLoader;
pub use skill::SkillLoader;
pub use zone::ZoneLoader;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
