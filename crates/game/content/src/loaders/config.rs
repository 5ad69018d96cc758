//! Game configuration loader.

use std::path::Path;

use game_core::GameConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for game configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// Missing keys fall back to [`GameConfig::default`].
    pub fn load(path: &Path) -> LoadResult<GameConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<GameConfig> {
        let config: GameConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        if config.reveal_radius.is_nan() || config.reveal_radius < 0.0 {
            anyhow::bail!("reveal_radius must be non-negative, got {}", config.reveal_radius);
        }
        if config.level_growth.xp_per_level == 0 {
            anyhow::bail!("level_growth.xp_per_level must be positive");
        }
        if config.starting_stats.level == 0 {
            anyhow::bail!("starting_stats.level must be at least 1");
        }
        Ok(config)
    }
}
