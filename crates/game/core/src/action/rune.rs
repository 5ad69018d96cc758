use crate::action::{ActionTransition, Continuation, Followup, Scheduled, ensure_unlocked};
use crate::env::{GameEnv, OracleError};
use crate::error::{ErrorSeverity, GameError};
use crate::state::{CombatPhase, Direction, GameState, InputResult, Locks};

const BLOCKED_BY: Locks = Locks::DIALOGUE
    .union(Locks::TRANSITION)
    .union(Locks::GAME_OVER);

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RuneInputError {
    #[error("rune input rejected while {0:?} is active")]
    Locked(Locks),

    #[error("no combat in progress")]
    NotInCombat,

    #[error("runes are not accepted in phase {0}")]
    NotAcceptingInput(CombatPhase),

    #[error("no skill selected")]
    NoSkillSelected,

    #[error(transparent)]
    Oracle(#[from] OracleError),
}

impl GameError for RuneInputError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Locked(_) | Self::NotInCombat | Self::NotAcceptingInput(_) => {
                ErrorSeverity::Recoverable
            }
            Self::NoSkillSelected => ErrorSeverity::Internal,
            Self::Oracle(inner) => inner.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Locked(_) => "RUNE_LOCKED",
            Self::NotInCombat => "RUNE_NOT_IN_COMBAT",
            Self::NotAcceptingInput(_) => "RUNE_NOT_ACCEPTING_INPUT",
            Self::NoSkillSelected => "RUNE_NO_SKILL_SELECTED",
            Self::Oracle(inner) => inner.error_code(),
        }
    }
}

/// One directional keystroke of the rune sequence.
///
/// A match that completes the sequence locks input and schedules the cast;
/// a mismatch wipes the buffer so the player starts over.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RuneInputAction {
    pub direction: Direction,
}

impl RuneInputAction {
    pub fn new(direction: Direction) -> Self {
        Self { direction }
    }
}

impl ActionTransition for RuneInputAction {
    type Error = RuneInputError;

    fn pre_validate(&self, state: &GameState, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        ensure_unlocked(state, BLOCKED_BY).map_err(RuneInputError::Locked)?;
        let encounter = state.mode.encounter().ok_or(RuneInputError::NotInCombat)?;
        match encounter.combat.phase {
            CombatPhase::Input => Ok(()),
            phase => Err(RuneInputError::NotAcceptingInput(phase)),
        }
    }

    fn apply(&self, state: &mut GameState, env: &GameEnv<'_>) -> Result<Followup, Self::Error> {
        let config = env.config()?;
        let encounter = state
            .mode
            .encounter_mut()
            .ok_or(RuneInputError::NotInCombat)?;
        let skill_id = encounter
            .combat
            .selected_skill
            .clone()
            .ok_or(RuneInputError::NoSkillSelected)?;
        let skill = env
            .skills()?
            .skill(&skill_id)
            .ok_or_else(|| OracleError::SkillNotFound(skill_id.clone()))?;

        let combat = &mut encounter.combat;
        let expected = skill.rune_at(combat.input_buffer.len());

        if expected != Some(self.direction) || combat.input_buffer.try_push(self.direction).is_err()
        {
            combat.input_buffer.clear();
            combat.last_input = InputResult::Fail;
            state.log.combat("Rune sequence broken. Recalibrating...");
            return Ok(None);
        }

        if combat.input_buffer.len() < skill.rune_len() {
            combat.last_input = InputResult::Neutral;
            return Ok(None);
        }

        combat.last_input = InputResult::Success;
        combat.phase = CombatPhase::Waiting;
        Ok(Some(Scheduled::after(
            config.delays.skill_cast_ms,
            Continuation::CastSkill {
                encounter: encounter.id,
                skill: skill_id,
            },
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::{Action, CombatCommand};
    use crate::testing::Fixture;

    fn in_input(fixture: &Fixture, skill: &str) -> GameState {
        let mut state = fixture.engaged();
        fixture
            .execute(&mut state, &Action::combat(CombatCommand::OpenSkills))
            .unwrap();
        fixture
            .execute(&mut state, &Action::select_skill(skill))
            .unwrap();
        state
    }

    fn enter(fixture: &Fixture, state: &mut GameState, runes: &[Direction]) -> Followup {
        let mut last = None;
        for &rune in runes {
            last = fixture.execute(state, &Action::rune(rune)).unwrap();
        }
        last
    }

    #[test]
    fn mismatch_resets_buffer_and_stays_in_input() {
        let fixture = Fixture::new();
        let mut state = in_input(&fixture, "strike");

        let followup = enter(
            &fixture,
            &mut state,
            &[Direction::Up, Direction::Down, Direction::Left],
        );

        assert!(followup.is_none());
        let combat = &state.mode.encounter().expect("combat").combat;
        assert!(combat.input_buffer.is_empty());
        assert_eq!(combat.last_input, InputResult::Fail);
        assert_eq!(combat.phase, CombatPhase::Input);
    }

    #[test]
    fn partial_match_is_neutral() {
        let fixture = Fixture::new();
        let mut state = in_input(&fixture, "strike");
        enter(&fixture, &mut state, &[Direction::Up, Direction::Down]);

        let combat = &state.mode.encounter().expect("combat").combat;
        assert_eq!(combat.input_buffer.as_slice(), &[Direction::Up, Direction::Down]);
        assert_eq!(combat.last_input, InputResult::Neutral);
    }

    #[test]
    fn full_match_schedules_cast_and_locks_input() {
        let fixture = Fixture::new();
        let mut state = in_input(&fixture, "strike");

        let scheduled = enter(
            &fixture,
            &mut state,
            &[Direction::Up, Direction::Down, Direction::Up],
        )
        .expect("cast scheduled");

        assert_eq!(scheduled.delay_ms, 300);
        assert!(matches!(scheduled.continuation, Continuation::CastSkill { .. }));
        let combat = &state.mode.encounter().expect("combat").combat;
        assert_eq!(combat.last_input, InputResult::Success);
        assert!(combat.is_waiting());
        assert!(fixture.execute(&mut state, &Action::rune(Direction::Up)).is_err());
    }

    #[test]
    fn cast_deducts_mp_and_deals_scaled_damage() {
        let fixture = Fixture::new();
        let mut state = in_input(&fixture, "strike");
        let mp = state.player.stats.mp;
        let scheduled = enter(
            &fixture,
            &mut state,
            &[Direction::Up, Direction::Down, Direction::Up],
        )
        .expect("cast scheduled");

        let followup = fixture.run(&mut state, scheduled.continuation).unwrap();

        assert_eq!(state.player.stats.mp, mp - 10);
        // attack 10 × 250% = 25 ≥ 20 hp.
        assert!(followup.is_none());
        assert!(state.mode.is_idle());
    }

    #[test]
    fn heal_skill_restores_hp_and_hands_over_the_turn() {
        let fixture = Fixture::new();
        let mut state = in_input(&fixture, "mend");
        state.player.stats.hp = 50;
        let scheduled = enter(&fixture, &mut state, &[Direction::Left, Direction::Right])
            .expect("cast scheduled");

        let followup = fixture.run(&mut state, scheduled.continuation).unwrap();

        assert_eq!(state.player.stats.hp, 80);
        assert!(matches!(
            followup.map(|s| s.continuation),
            Some(Continuation::EnemyTurn { .. })
        ));
    }

    #[test]
    fn buff_raises_attack_for_the_encounter() {
        let fixture = Fixture::new();
        let mut state = in_input(&fixture, "focus");
        let scheduled =
            enter(&fixture, &mut state, &[Direction::Up, Direction::Up]).expect("cast scheduled");
        fixture.run(&mut state, scheduled.continuation).unwrap();

        assert_eq!(state.mode.encounter().map(|e| e.attack_bonus), Some(5));
    }
}
