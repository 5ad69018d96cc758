use crate::action::{ActionTransition, Followup, combat, ensure_unlocked};
use crate::env::{GameEnv, OracleError};
use crate::error::{ErrorSeverity, GameError};
use crate::state::{ConsumableEffect, GameState, ItemId, ItemKind, Locks};

const BLOCKED_BY: Locks = Locks::TRANSITION.union(Locks::GAME_OVER);

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum UseItemError {
    #[error("item use rejected while {0:?} is active")]
    Locked(Locks),

    #[error("input is locked while the enemy acts")]
    Waiting,

    #[error("item '{0}' is not in the inventory")]
    NotInInventory(ItemId),

    #[error(transparent)]
    Oracle(#[from] OracleError),
}

impl GameError for UseItemError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Locked(_) | Self::Waiting => ErrorSeverity::Recoverable,
            Self::NotInInventory(_) => ErrorSeverity::Validation,
            Self::Oracle(inner) => inner.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Locked(_) => "USE_ITEM_LOCKED",
            Self::Waiting => "USE_ITEM_WAITING",
            Self::NotInInventory(_) => "USE_ITEM_NOT_IN_INVENTORY",
            Self::Oracle(inner) => inner.error_code(),
        }
    }
}

/// Consumes one inventory item. In combat this spends the player's turn.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UseItemAction {
    pub item: ItemId,
}

impl UseItemAction {
    pub fn new(item: ItemId) -> Self {
        Self { item }
    }
}

impl ActionTransition for UseItemAction {
    type Error = UseItemError;

    fn pre_validate(&self, state: &GameState, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        ensure_unlocked(state, BLOCKED_BY).map_err(UseItemError::Locked)?;
        if state.mode.encounter().is_some_and(|e| e.combat.is_waiting()) {
            return Err(UseItemError::Waiting);
        }
        state
            .player
            .find_item(&self.item)
            .map(|_| ())
            .ok_or_else(|| UseItemError::NotInInventory(self.item.clone()))
    }

    fn apply(&self, state: &mut GameState, env: &GameEnv<'_>) -> Result<Followup, Self::Error> {
        let config = env.config()?;
        let item = state
            .player
            .find_item(&self.item)
            .cloned()
            .ok_or_else(|| UseItemError::NotInInventory(self.item.clone()))?;

        let ItemKind::Consumable(effect) = item.kind else {
            state.log.info(format!("{} cannot be used.", item.name));
            return Ok(None);
        };

        let stats = &state.player.stats;
        let wasted = match effect {
            ConsumableEffect::Heal(_) => stats.hp == stats.max_hp,
            ConsumableEffect::RestoreEther(_) => stats.mp == stats.max_mp,
        };
        if wasted {
            state
                .log
                .system(format!("{} would have no effect right now.", item.name));
            return Ok(None);
        }

        state.player.take_item(&self.item);
        let stats = &mut state.player.stats;
        let message = match effect {
            ConsumableEffect::Heal(amount) => {
                format!("Used {}. Restored {} HP.", item.name, stats.heal(amount))
            }
            ConsumableEffect::RestoreEther(amount) => {
                format!("Used {}. Restored {} MP.", item.name, stats.restore_mp(amount))
            }
        };
        state.log.info(message);

        Ok(combat::end_player_turn(state, config))
    }
}
