//! Combat menu commands and damage resolution.
//!
//! The menu sub-machine is `MENU → SKILL_SELECT → INPUT → WAITING → MENU`.
//! Every player turn that leaves the enemy alive ends in `WAITING` with an
//! [`Continuation::EnemyTurn`] scheduled; victory and flight end the
//! encounter immediately.

use crate::action::{ActionTransition, Continuation, Followup, Scheduled, ensure_unlocked};
use crate::config::GameConfig;
use crate::env::{GameEnv, OracleError, RollContext, compute_seed};
use crate::error::{ErrorSeverity, GameError};
use crate::state::{CombatPhase, GameState, Locks, Mode, SkillId};

/// Variance applied to plain attacks, in percent of attack.
const ATTACK_VARIANCE: (u32, u32) = (80, 120);

const BLOCKED_BY: Locks = Locks::DIALOGUE
    .union(Locks::TRANSITION)
    .union(Locks::GAME_OVER);

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CombatCommand {
    Attack,
    Flee,
    OpenSkills,
    CancelSkill,
    SelectSkill(SkillId),
}

impl CombatCommand {
    pub fn as_snake_case(&self) -> &'static str {
        match self {
            CombatCommand::Attack => "attack",
            CombatCommand::Flee => "flee",
            CombatCommand::OpenSkills => "open_skills",
            CombatCommand::CancelSkill => "cancel_skill",
            CombatCommand::SelectSkill(_) => "select_skill",
        }
    }

    fn allowed_in(&self, phase: CombatPhase) -> bool {
        use CombatPhase::*;
        match self {
            CombatCommand::Attack | CombatCommand::OpenSkills => phase == Menu,
            CombatCommand::Flee => phase != Waiting,
            CombatCommand::CancelSkill => matches!(phase, SkillSelect | Input),
            CombatCommand::SelectSkill(_) => phase == SkillSelect,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CombatError {
    #[error("combat command rejected while {0:?} is active")]
    Locked(Locks),

    #[error("no combat in progress")]
    NotInCombat,

    #[error("input is locked while the enemy acts")]
    Waiting,

    #[error("{} is not available in phase {phase}", command.as_snake_case())]
    InvalidPhase {
        command: CombatCommand,
        phase: CombatPhase,
    },

    #[error("skill '{0}' cannot be cast")]
    UnplayableSkill(SkillId),

    #[error(transparent)]
    Oracle(#[from] OracleError),
}

impl GameError for CombatError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Locked(_) | Self::NotInCombat | Self::Waiting => ErrorSeverity::Recoverable,
            Self::InvalidPhase { .. } | Self::UnplayableSkill(_) => ErrorSeverity::Validation,
            Self::Oracle(inner) => inner.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Locked(_) => "COMBAT_LOCKED",
            Self::NotInCombat => "COMBAT_NOT_ACTIVE",
            Self::Waiting => "COMBAT_WAITING",
            Self::InvalidPhase { .. } => "COMBAT_INVALID_PHASE",
            Self::UnplayableSkill(_) => "COMBAT_UNPLAYABLE_SKILL",
            Self::Oracle(inner) => inner.error_code(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatAction {
    pub command: CombatCommand,
}

impl CombatAction {
    pub fn new(command: CombatCommand) -> Self {
        Self { command }
    }
}

impl ActionTransition for CombatAction {
    type Error = CombatError;

    fn pre_validate(&self, state: &GameState, env: &GameEnv<'_>) -> Result<(), Self::Error> {
        ensure_unlocked(state, BLOCKED_BY).map_err(CombatError::Locked)?;
        let encounter = state.mode.encounter().ok_or(CombatError::NotInCombat)?;

        let phase = encounter.combat.phase;
        if phase == CombatPhase::Waiting {
            return Err(CombatError::Waiting);
        }
        if !self.command.allowed_in(phase) {
            return Err(CombatError::InvalidPhase {
                command: self.command.clone(),
                phase,
            });
        }

        if let CombatCommand::SelectSkill(id) = &self.command {
            let skill = env
                .skills()?
                .skill(id)
                .ok_or_else(|| OracleError::SkillNotFound(id.clone()))?;
            if !skill.has_valid_sequence() {
                return Err(CombatError::UnplayableSkill(id.clone()));
            }
        }
        Ok(())
    }

    fn apply(&self, state: &mut GameState, env: &GameEnv<'_>) -> Result<Followup, Self::Error> {
        let config = env.config()?;

        match &self.command {
            CombatCommand::Attack => {
                let encounter = state.mode.encounter().ok_or(CombatError::NotInCombat)?;
                let seed = compute_seed(
                    state.game_seed,
                    state.nonce,
                    encounter.id.0,
                    RollContext::AttackVariance,
                );
                let (min, max) = ATTACK_VARIANCE;
                let damage = env.rng()?.vary(seed, effective_attack(state), min, max);
                Ok(strike_enemy(state, config, damage))
            }
            CombatCommand::Flee => {
                state.mode = Mode::Exploring;
                state.log.info("You disengaged from combat.");
                Ok(None)
            }
            CombatCommand::OpenSkills => {
                let encounter = state.mode.encounter_mut().ok_or(CombatError::NotInCombat)?;
                encounter.combat.phase = CombatPhase::SkillSelect;
                Ok(None)
            }
            CombatCommand::CancelSkill => {
                let encounter = state.mode.encounter_mut().ok_or(CombatError::NotInCombat)?;
                encounter.combat.reset_to_menu();
                Ok(None)
            }
            CombatCommand::SelectSkill(id) => {
                let skill = env
                    .skills()?
                    .skill(id)
                    .ok_or_else(|| OracleError::SkillNotFound(id.clone()))?;

                if state.player.stats.mp < skill.mp_cost {
                    state.log.system("Insufficient Ether (MP)!");
                    return Ok(None);
                }

                let encounter = state.mode.encounter_mut().ok_or(CombatError::NotInCombat)?;
                let combat = &mut encounter.combat;
                combat.phase = CombatPhase::Input;
                combat.selected_skill = Some(id.clone());
                combat.input_buffer.clear();
                combat.last_input = Default::default();
                Ok(None)
            }
        }
    }
}

/// Player attack including the encounter's buff bonus.
pub(crate) fn effective_attack(state: &GameState) -> u32 {
    let bonus = state.mode.encounter().map_or(0, |e| e.attack_bonus);
    state.player.stats.attack.saturating_add(bonus)
}

/// Applies player damage to the active enemy and resolves the turn.
pub(crate) fn strike_enemy(state: &mut GameState, config: &GameConfig, damage: u32) -> Followup {
    let encounter = state.mode.encounter_mut()?;
    let name = encounter.enemy.name.clone();
    let killed = encounter.enemy.take_damage(damage);
    state
        .log
        .combat(format!("You dealt {damage} damage to {name}."));

    if killed {
        victory(state, config);
        None
    } else {
        end_player_turn(state, config)
    }
}

/// Locks input and schedules the enemy's counter-attack.
pub(crate) fn end_player_turn(state: &mut GameState, config: &GameConfig) -> Followup {
    let encounter = state.mode.encounter_mut()?;
    encounter.combat.phase = CombatPhase::Waiting;
    Some(Scheduled::after(
        config.delays.enemy_turn_ms,
        Continuation::EnemyTurn {
            encounter: encounter.id,
            enemy: encounter.enemy.id.clone(),
        },
    ))
}

/// Enemy counter-attack: `max(1, attack − defense / 2)`.
pub(crate) fn enemy_turn(state: &mut GameState) {
    let Some(encounter) = state.mode.encounter_mut() else {
        return;
    };
    let name = encounter.enemy.name.clone();
    let damage = encounter
        .enemy
        .attack
        .saturating_sub(state.player.stats.defense / 2)
        .max(1);

    state.player.stats.take_damage(damage);
    state
        .log
        .combat(format!("{name} strikes! You take {damage} DMG."));

    if state.player.stats.is_defeated() {
        state.mode = Mode::GameOver;
        state.log.system("CRITICAL FAILURE. SYSTEM SHUTTING DOWN...");
    } else if let Some(encounter) = state.mode.encounter_mut() {
        encounter.combat.reset_to_menu();
    }
}

fn victory(state: &mut GameState, config: &GameConfig) {
    let Mode::Combat(encounter) = std::mem::take(&mut state.mode) else {
        return;
    };
    let enemy = encounter.enemy;

    let mut message = format!("Target eliminated. +{} XP", enemy.xp_reward);
    if enemy.credits_reward > 0 {
        message.push_str(&format!(", +{} Credits", enemy.credits_reward));
    }
    state.log.system(message);

    let stats = &mut state.player.stats;
    stats.credits = stats.credits.saturating_add(enemy.credits_reward);

    if let Some(loot) = enemy.loot {
        state.log.info(format!("LOOT: Retrieved [{}]", loot.name));
        state.player.inventory.push(loot);
    }

    state.clear_interactable(&enemy.id);

    let levels = state
        .player
        .stats
        .gain_xp(enemy.xp_reward, &config.level_growth);
    if levels > 0 {
        state.log.system(format!(
            "LEVEL UP! Neural capacity expanded to level {}.",
            state.player.stats.level
        ));
    }
}
