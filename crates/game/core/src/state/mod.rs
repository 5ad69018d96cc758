//! Authoritative session state.
//!
//! [`GameState`] is the unit of persistence: player, log, mode, interaction
//! history, and the tiles of the active zone. Runtime layers clone or query
//! it but mutate it exclusively through the engine.
mod error;
pub mod types;
mod visibility;
mod world;

use std::collections::BTreeSet;

pub use error::InitializationError;
pub use types::{
    ActiveDialogue, ActiveEnemy, CombatPhase, CombatState, ConsumableEffect, DialogueId,
    Direction, EncounterId, EnemyStats, Encounter, GameLog, InputResult, Interactable,
    InteractableId, InteractableKind, Item, ItemId, ItemKind, Locks, LogEntry, LogKind,
    MapDimensions, Mode, NodeId, PendingTransition, PlayerState, PlayerStats, Position, RuneBuffer,
    SkillId, Tile, TileId, TileKind, TransitionMeta, TransitionToken, ZoneId,
};
pub use visibility::reveal_around;
pub use world::{WorldState, ZoneLookup, lookup_zone};

use crate::env::{DialogueOracle, Env, RngOracle, SkillOracle, ZoneOracle};

/// Greeting pushed into the log of every new session.
pub const WELCOME_MESSAGE: &str = "System Online. Neural link established. Welcome back, Architect.";

/// Canonical snapshot of one play session.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameState {
    /// Seed for deterministic rolls. Set once per session.
    pub game_seed: u64,

    /// Number of actions and continuations executed so far.
    pub nonce: u64,

    /// Allocator for encounter and transition tokens. Never reused.
    next_token: u64,

    pub player: PlayerState,
    /// Shift mode: walk through walls and perceive hidden interactables.
    pub shift_active: bool,
    pub log: GameLog,
    pub mode: Mode,
    /// Interactables removed from the world for good (looted or defeated).
    pub cleared: BTreeSet<InteractableId>,
    pub world: WorldState,
}

impl GameState {
    /// Starts a new session in the configured starting zone.
    pub fn new_game<Z, S, D, R>(
        env: &Env<'_, Z, S, D, R>,
        game_seed: u64,
    ) -> Result<Self, InitializationError>
    where
        Z: ZoneOracle + ?Sized,
        S: SkillOracle + ?Sized,
        D: DialogueOracle + ?Sized,
        R: RngOracle + ?Sized,
    {
        let config = env.config()?;
        let zones = env.zones()?;
        let starting_zone = ZoneId::new(config.starting_zone.as_str());
        let lookup = lookup_zone(zones, &starting_zone, &starting_zone)?;
        let layout = lookup.layout();

        if !layout.dimensions.contains(layout.spawn) {
            return Err(InitializationError::SpawnOutOfBounds {
                zone: layout.id.clone(),
                position: layout.spawn,
            });
        }

        let mut world = WorldState::from_layout(layout);
        world.reveal_around(layout.spawn, config.reveal_radius);

        let mut log = GameLog::with_capacity(config.log_capacity);
        log.system(WELCOME_MESSAGE);

        Ok(Self {
            game_seed,
            nonce: 0,
            next_token: 1,
            player: PlayerState::new(
                layout.spawn,
                layout.spawn_facing,
                PlayerStats::from_config(config),
            ),
            shift_active: false,
            log,
            mode: Mode::Exploring,
            cleared: BTreeSet::new(),
            world,
        })
    }

    /// Locks contributed by the current mode.
    pub fn locks(&self) -> Locks {
        self.mode.locks()
    }

    pub fn zone(&self) -> &ZoneId {
        &self.world.zone
    }

    pub fn zone_name(&self) -> &str {
        &self.world.zone_name
    }

    pub fn player_tile(&self) -> Option<&Tile> {
        self.world.tile(self.player.position)
    }

    pub fn allocate_encounter_id(&mut self) -> EncounterId {
        EncounterId(self.allocate_token())
    }

    pub fn allocate_transition_token(&mut self) -> TransitionToken {
        TransitionToken(self.allocate_token())
    }

    fn allocate_token(&mut self) -> u64 {
        let token = self.next_token;
        self.next_token += 1;
        token
    }

    /// Records `id` as permanently removed and strips it from the active zone.
    pub fn clear_interactable(&mut self, id: &InteractableId) -> Option<Interactable> {
        self.cleared.insert(id.clone());
        self.world.remove_interactable(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::Fixture;

    #[test]
    fn new_game_spawns_and_reveals() {
        let fixture = Fixture::new();
        let state = GameState::new_game(&fixture.env(), 7).expect("new game");

        assert_eq!(state.player.position, Position::new(2, 2));
        assert_eq!(state.player.facing, Direction::Down);
        assert!(state.mode.is_idle());
        assert!(state.player_tile().is_some_and(Tile::is_revealed));
        assert_eq!(state.log.latest().map(|e| e.message.as_str()), Some(WELCOME_MESSAGE));
    }

    #[test]
    fn tokens_are_never_reused() {
        let fixture = Fixture::new();
        let mut state = GameState::new_game(&fixture.env(), 7).expect("new game");
        let first = state.allocate_encounter_id();
        let second = state.allocate_transition_token();
        assert_ne!(first.0, second.0);
    }
}
