//! Delayed continuations.
//!
//! A continuation is data: the token it captured when it was scheduled plus
//! whatever it needs to finish the job. The host fires it after `delay_ms`
//! through the same engine path as player actions. If the session has moved
//! on in the meantime, `pre_validate` reports [`ContinuationError::Stale`] and
//! nothing is applied.

use crate::action::{ActionTransition, Followup, combat, transition};
use crate::env::{GameEnv, OracleError, SkillEffect, percent_of};
use crate::error::{ErrorSeverity, GameError};
use crate::state::{
    CombatPhase, EncounterId, GameState, InteractableId, Position, SkillId, TransitionToken,
    ZoneId,
};

/// A continuation paired with the delay before it should fire.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Scheduled {
    pub delay_ms: u64,
    pub continuation: Continuation,
}

impl Scheduled {
    pub fn after(delay_ms: u64, continuation: Continuation) -> Self {
        Self {
            delay_ms,
            continuation,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Continuation {
    /// The player walked onto a gate; start its transition if still there.
    GateStep { zone: ZoneId, position: Position },
    /// Load the destination of the pending transition.
    CompleteTransition { token: TransitionToken },
    /// Resolve a skill whose rune sequence was entered correctly.
    CastSkill {
        encounter: EncounterId,
        skill: SkillId,
    },
    /// The enemy counter-attacks.
    EnemyTurn {
        encounter: EncounterId,
        enemy: InteractableId,
    },
}

impl Continuation {
    pub fn as_snake_case(&self) -> &'static str {
        match self {
            Continuation::GateStep { .. } => "gate_step",
            Continuation::CompleteTransition { .. } => "complete_transition",
            Continuation::CastSkill { .. } => "cast_skill",
            Continuation::EnemyTurn { .. } => "enemy_turn",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ContinuationError {
    /// The captured token no longer matches the session.
    #[error("{continuation} is stale: {reason}")]
    Stale {
        continuation: &'static str,
        reason: &'static str,
    },

    #[error(transparent)]
    Oracle(#[from] OracleError),
}

impl ContinuationError {
    fn stale(continuation: &Continuation, reason: &'static str) -> Self {
        Self::Stale {
            continuation: continuation.as_snake_case(),
            reason,
        }
    }

    pub fn is_stale(&self) -> bool {
        matches!(self, Self::Stale { .. })
    }
}

impl GameError for ContinuationError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Stale { .. } => ErrorSeverity::Recoverable,
            Self::Oracle(inner) => inner.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Stale { .. } => "CONTINUATION_STALE",
            Self::Oracle(inner) => inner.error_code(),
        }
    }
}

impl ActionTransition for Continuation {
    type Error = ContinuationError;

    fn pre_validate(&self, state: &GameState, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        let stale = |reason| Err(ContinuationError::stale(self, reason));

        match self {
            Continuation::GateStep { zone, position } => {
                if !state.mode.is_idle() {
                    return stale("session is no longer exploring");
                }
                if state.zone() != zone || state.player.position != *position {
                    return stale("player left the gate");
                }
                if state.player_tile().and_then(|tile| tile.gate()).is_none() {
                    return stale("gate is gone");
                }
            }
            Continuation::CompleteTransition { token } => match state.mode.transition() {
                Some(pending) if pending.token == *token => {}
                _ => return stale("transition token does not match"),
            },
            Continuation::CastSkill { encounter, skill } => {
                let Some(active) = state.mode.encounter() else {
                    return stale("combat is over");
                };
                if active.id != *encounter {
                    return stale("encounter changed");
                }
                if active.combat.phase != CombatPhase::Waiting
                    || active.combat.selected_skill.as_ref() != Some(skill)
                {
                    return stale("skill is no longer queued");
                }
            }
            Continuation::EnemyTurn { encounter, enemy } => {
                let Some(active) = state.mode.encounter() else {
                    return stale("combat is over");
                };
                if active.id != *encounter || active.enemy.id != *enemy {
                    return stale("encounter changed");
                }
                if active.enemy.hp == 0 || !active.combat.is_waiting() {
                    return stale("enemy cannot act");
                }
            }
        }
        Ok(())
    }

    fn apply(&self, state: &mut GameState, env: &GameEnv<'_>) -> Result<Followup, Self::Error> {
        let config = env.config()?;

        match self {
            Continuation::GateStep { .. } => {
                let Some(target) = state.player_tile().and_then(|tile| tile.gate()).cloned() else {
                    return Ok(None);
                };
                Ok(Some(transition::begin(state, config, target)))
            }
            Continuation::CompleteTransition { .. } => {
                transition::complete(state, env)?;
                Ok(None)
            }
            Continuation::CastSkill { skill, .. } => {
                let definition = env
                    .skills()?
                    .skill(skill)
                    .ok_or_else(|| OracleError::SkillNotFound(skill.clone()))?;

                if !state.player.stats.spend_mp(definition.mp_cost) {
                    state.log.system("Insufficient Ether (MP)!");
                    if let Some(encounter) = state.mode.encounter_mut() {
                        encounter.combat.reset_to_menu();
                    }
                    return Ok(None);
                }
                state.log.combat(format!("You cast '{}'!", definition.name));

                let attack = combat::effective_attack(state);
                match definition.effect {
                    SkillEffect::Damage { scale_percent } => {
                        let damage = percent_of(attack, scale_percent);
                        Ok(combat::strike_enemy(state, config, damage))
                    }
                    SkillEffect::Heal { amount } => {
                        let restored = state.player.stats.heal(amount);
                        state.log.combat(format!("Restored {restored} HP."));
                        Ok(combat::end_player_turn(state, config))
                    }
                    SkillEffect::Buff { attack } => {
                        if let Some(encounter) = state.mode.encounter_mut() {
                            encounter.attack_bonus += attack;
                        }
                        state
                            .log
                            .combat(format!("Attack boosted by +{attack} for this battle."));
                        Ok(combat::end_player_turn(state, config))
                    }
                }
            }
            Continuation::EnemyTurn { .. } => {
                combat::enemy_turn(state);
                Ok(None)
            }
        }
    }
}
