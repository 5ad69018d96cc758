//! Runtime wrappers around static game content.
//!
//! These implementations expose `game-core` oracle traits over the tables of a
//! [`ContentPack`] and bundle them into an [`OracleManager`] so the runtime can
//! build [`game_core::Env`] snapshots on demand. The data is immutable at
//! runtime; dynamic state lives in [`game_core::GameState`] and repositories.
mod dialogue;
mod skills;
mod zones;

use std::sync::Arc;

use game_content::ContentPack;
use game_core::{Env, GameConfig, GameEnv, PcgRng};

pub use dialogue::DialogueOracleImpl;
pub use skills::SkillOracleImpl;
pub use zones::ZoneOracleImpl;

/// Manages all oracle implementations and provides unified access
#[derive(Clone)]
pub struct OracleManager {
    pub(crate) zones: Arc<ZoneOracleImpl>,
    pub(crate) skills: Arc<SkillOracleImpl>,
    pub(crate) dialogue: Arc<DialogueOracleImpl>,
    pub(crate) config: Arc<GameConfig>,
    pub(crate) rng: PcgRng,
}

impl OracleManager {
    /// Creates a new oracle manager
    pub fn new(
        zones: Arc<ZoneOracleImpl>,
        skills: Arc<SkillOracleImpl>,
        dialogue: Arc<DialogueOracleImpl>,
        config: Arc<GameConfig>,
    ) -> Self {
        Self {
            zones,
            skills,
            dialogue,
            config,
            rng: PcgRng, // PcgRng is stateless
        }
    }

    /// Builds every oracle from a content pack.
    pub fn from_pack(pack: ContentPack) -> Self {
        Self::new(
            Arc::new(ZoneOracleImpl::new(pack.zones)),
            Arc::new(SkillOracleImpl::new(pack.skills)),
            Arc::new(DialogueOracleImpl::new(pack.dialogues)),
            Arc::new(pack.config),
        )
    }

    /// Oracles over the built-in world.
    pub fn builtin() -> Self {
        Self::from_pack(ContentPack::builtin())
    }

    /// Converts oracle manager into GameEnv for game-core
    pub fn as_game_env(&self) -> GameEnv<'_> {
        Env::with_all(
            self.zones.as_ref(),
            self.skills.as_ref(),
            self.dialogue.as_ref(),
            &self.rng,
            self.config.as_ref(),
        )
        .into_game_env()
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn zones(&self) -> &ZoneOracleImpl {
        &self.zones
    }
}

#[cfg(test)]
mod tests {
    use game_core::{SkillOracle, ZoneId, ZoneOracle};

    use super::*;

    #[test]
    fn builtin_manager_exposes_every_table() {
        let oracles = OracleManager::builtin();
        let env = oracles.as_game_env();

        let zones = env.zones().unwrap();
        assert!(zones.zone(&ZoneId::from("sector_01")).is_some());
        assert_eq!(zones.zone_ids().len(), 2);
        assert_eq!(env.skills().unwrap().skills().len(), 3);
        assert!(env.rng().is_ok());
        assert_eq!(env.config().unwrap().starting_zone, "sector_01");
    }
}
