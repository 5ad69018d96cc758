//! Traits describing read-only content.
//!
//! Oracles expose zone layouts, skill definitions, dialogue trees, and the
//! random source. The [`Env`] aggregate bundles them with the [`GameConfig`]
//! so the engine can reach everything it needs without hard coupling to
//! concrete implementations.
mod dialogue;
mod error;
mod rng;
mod skills;
mod zone;

pub use dialogue::{DialogueNode, DialogueOption, DialogueOracle, DialogueTree};
pub use error::OracleError;
pub use rng::{PcgRng, RngOracle, RollContext, compute_seed, percent_of};
pub use skills::{SkillDefinition, SkillEffect, SkillOracle};
pub use zone::{EntityPlacement, ZoneLayout, ZoneOracle};

use crate::config::GameConfig;

/// Aggregates read-only oracles required by the action pipeline.
pub struct Env<'a, Z, S, D, R>
where
    Z: ZoneOracle + ?Sized,
    S: SkillOracle + ?Sized,
    D: DialogueOracle + ?Sized,
    R: RngOracle + ?Sized,
{
    zones: Option<&'a Z>,
    skills: Option<&'a S>,
    dialogue: Option<&'a D>,
    rng: Option<&'a R>,
    config: Option<&'a GameConfig>,
}

impl<Z, S, D, R> Clone for Env<'_, Z, S, D, R>
where
    Z: ZoneOracle + ?Sized,
    S: SkillOracle + ?Sized,
    D: DialogueOracle + ?Sized,
    R: RngOracle + ?Sized,
{
    fn clone(&self) -> Self {
        *self
    }
}

impl<Z, S, D, R> Copy for Env<'_, Z, S, D, R>
where
    Z: ZoneOracle + ?Sized,
    S: SkillOracle + ?Sized,
    D: DialogueOracle + ?Sized,
    R: RngOracle + ?Sized,
{
}

pub type GameEnv<'a> = Env<
    'a,
    dyn ZoneOracle + 'a,
    dyn SkillOracle + 'a,
    dyn DialogueOracle + 'a,
    dyn RngOracle + 'a,
>;

impl<'a, Z, S, D, R> Env<'a, Z, S, D, R>
where
    Z: ZoneOracle + ?Sized,
    S: SkillOracle + ?Sized,
    D: DialogueOracle + ?Sized,
    R: RngOracle + ?Sized,
{
    pub fn new(
        zones: Option<&'a Z>,
        skills: Option<&'a S>,
        dialogue: Option<&'a D>,
        rng: Option<&'a R>,
        config: Option<&'a GameConfig>,
    ) -> Self {
        Self {
            zones,
            skills,
            dialogue,
            rng,
            config,
        }
    }

    pub fn with_all(
        zones: &'a Z,
        skills: &'a S,
        dialogue: &'a D,
        rng: &'a R,
        config: &'a GameConfig,
    ) -> Self {
        Self::new(
            Some(zones),
            Some(skills),
            Some(dialogue),
            Some(rng),
            Some(config),
        )
    }

    pub fn empty() -> Self {
        Self {
            zones: None,
            skills: None,
            dialogue: None,
            rng: None,
            config: None,
        }
    }

    /// Returns the ZoneOracle, or an error if not available.
    pub fn zones(&self) -> Result<&'a Z, OracleError> {
        self.zones.ok_or(OracleError::ZonesNotAvailable)
    }

    /// Returns the SkillOracle, or an error if not available.
    pub fn skills(&self) -> Result<&'a S, OracleError> {
        self.skills.ok_or(OracleError::SkillsNotAvailable)
    }

    /// Returns the DialogueOracle, or an error if not available.
    pub fn dialogue(&self) -> Result<&'a D, OracleError> {
        self.dialogue.ok_or(OracleError::DialogueNotAvailable)
    }

    /// Returns the RngOracle, or an error if not available.
    pub fn rng(&self) -> Result<&'a R, OracleError> {
        self.rng.ok_or(OracleError::RngNotAvailable)
    }

    /// Returns the game configuration, or an error if not available.
    pub fn config(&self) -> Result<&'a GameConfig, OracleError> {
        self.config.ok_or(OracleError::ConfigNotAvailable)
    }
}

impl<'a, Z, S, D, R> Env<'a, Z, S, D, R>
where
    Z: ZoneOracle + 'a,
    S: SkillOracle + 'a,
    D: DialogueOracle + 'a,
    R: RngOracle + 'a,
{
    /// Converts this environment into a trait-object based `GameEnv`.
    pub fn into_game_env(self) -> GameEnv<'a> {
        let zones: Option<&'a dyn ZoneOracle> = self.zones.map(|zones| zones as _);
        let skills: Option<&'a dyn SkillOracle> = self.skills.map(|skills| skills as _);
        let dialogue: Option<&'a dyn DialogueOracle> = self.dialogue.map(|dialogue| dialogue as _);
        let rng: Option<&'a dyn RngOracle> = self.rng.map(|rng| rng as _);
        Env::new(zones, skills, dialogue, rng, self.config)
    }
}
