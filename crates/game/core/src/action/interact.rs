use crate::action::{ActionTransition, Followup, dialogue, ensure_unlocked, transition};
use crate::env::{GameEnv, OracleError};
use crate::error::{ErrorSeverity, GameError};
use crate::state::{ActiveEnemy, Encounter, GameState, InteractableKind, Locks, Mode};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum InteractError {
    #[error("interaction rejected while {0:?} is active")]
    Locked(Locks),

    #[error(transparent)]
    Oracle(#[from] OracleError),
}

impl GameError for InteractError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Locked(_) => ErrorSeverity::Recoverable,
            Self::Oracle(inner) => inner.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Locked(_) => "INTERACT_LOCKED",
            Self::Oracle(inner) => inner.error_code(),
        }
    }
}

/// Interacts with the tile the player faces, or with a gate underfoot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InteractAction;

impl ActionTransition for InteractAction {
    type Error = InteractError;

    fn pre_validate(&self, state: &GameState, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        ensure_unlocked(state, Locks::EXPLORATION).map_err(InteractError::Locked)
    }

    fn apply(&self, state: &mut GameState, env: &GameEnv<'_>) -> Result<Followup, Self::Error> {
        let config = env.config()?;

        if let Some(target) = state.player_tile().and_then(|tile| tile.gate()).cloned() {
            return Ok(Some(transition::begin(state, config, target)));
        }

        let position = state.player.facing_target();
        let Some(interactable) = state
            .world
            .tile(position)
            .and_then(|tile| tile.interactable.clone())
        else {
            state.log.info("Nothing interesting here.");
            return Ok(None);
        };

        if interactable.is_hidden && !state.shift_active {
            state
                .log
                .info("You sense something... but reality obscures it.");
            return Ok(None);
        }

        match interactable.kind {
            InteractableKind::Npc {
                dialogue: tree,
                greeting,
            } => {
                let opened = match tree {
                    Some(id) => env
                        .dialogue()?
                        .tree(&id)
                        .is_some_and(|tree| dialogue::open(state, &tree)),
                    None => false,
                };
                if !opened {
                    state
                        .log
                        .dialogue(format!("{}: \"{}\"", interactable.name, greeting));
                }
                Ok(None)
            }
            InteractableKind::Item { reward } => {
                state.log.info(format!("Acquired: {}", reward.name));
                state.player.inventory.push(reward);
                state.clear_interactable(&interactable.id);
                Ok(None)
            }
            InteractableKind::Enemy { stats, loot } => {
                let id = state.allocate_encounter_id();
                let enemy =
                    ActiveEnemy::from_stats(interactable.id, &interactable.name, position, &stats, loot);
                state.mode = Mode::Combat(Box::new(Encounter::new(id, enemy)));
                state
                    .log
                    .combat(format!("⚠️ ENCOUNTER: {} engaged!", interactable.name));
                Ok(None)
            }
            InteractableKind::ZoneGate { target } => {
                Ok(Some(transition::begin(state, config, target)))
            }
        }
    }
}
