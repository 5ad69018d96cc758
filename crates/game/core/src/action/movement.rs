use crate::action::{ActionTransition, Continuation, Followup, Scheduled, ensure_unlocked};
use crate::env::{GameEnv, OracleError};
use crate::error::{ErrorSeverity, GameError};
use crate::state::{Direction, GameState, Locks, Position, TileKind};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("movement rejected while {0:?} is active")]
    Locked(Locks),

    #[error("({dx}, {dy}) is not a unit cardinal step")]
    InvalidDelta { dx: i32, dy: i32 },

    #[error("destination {destination} is out of bounds")]
    OutOfBounds { destination: Position },

    #[error("destination {destination} is {kind} and cannot be entered")]
    Impassable {
        destination: Position,
        kind: TileKind,
    },

    #[error("player ended up on an invalid tile at {position}")]
    InvalidResting { position: Position },

    #[error(transparent)]
    Oracle(#[from] OracleError),
}

impl GameError for MoveError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Locked(_) | Self::OutOfBounds { .. } | Self::Impassable { .. } => {
                ErrorSeverity::Recoverable
            }
            Self::InvalidDelta { .. } => ErrorSeverity::Validation,
            Self::InvalidResting { .. } => ErrorSeverity::Internal,
            Self::Oracle(inner) => inner.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Locked(_) => "MOVE_LOCKED",
            Self::InvalidDelta { .. } => "MOVE_INVALID_DELTA",
            Self::OutOfBounds { .. } => "MOVE_OUT_OF_BOUNDS",
            Self::Impassable { .. } => "MOVE_IMPASSABLE",
            Self::InvalidResting { .. } => "MOVE_INVALID_RESTING",
            Self::Oracle(inner) => inner.error_code(),
        }
    }
}

/// One step of the player along a cardinal direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoveAction {
    pub direction: Direction,
}

impl MoveAction {
    pub fn new(direction: Direction) -> Self {
        Self { direction }
    }

    pub fn from_delta(dx: i32, dy: i32) -> Result<Self, MoveError> {
        Direction::from_delta(dx, dy)
            .map(Self::new)
            .ok_or(MoveError::InvalidDelta { dx, dy })
    }

    fn destination(&self, state: &GameState) -> Position {
        state.player.position.step(self.direction)
    }
}

impl ActionTransition for MoveAction {
    type Error = MoveError;

    fn pre_validate(&self, state: &GameState, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        ensure_unlocked(state, Locks::EXPLORATION).map_err(MoveError::Locked)?;

        let destination = self.destination(state);
        let tile = state
            .world
            .tile(destination)
            .ok_or(MoveError::OutOfBounds { destination })?;

        if !tile.kind.is_passable(state.shift_active) {
            return Err(MoveError::Impassable {
                destination,
                kind: tile.kind,
            });
        }
        Ok(())
    }

    fn apply(&self, state: &mut GameState, env: &GameEnv<'_>) -> Result<Followup, Self::Error> {
        let config = env.config()?;
        let destination = self.destination(state);

        state.player.facing = self.direction;
        state.player.position = destination;
        state.world.reveal_around(destination, config.reveal_radius);

        // Let the step land before the transition lock engages.
        let followup = state.player_tile().and_then(|tile| tile.gate()).map(|_| {
            Scheduled::after(
                config.delays.gate_step_ms,
                Continuation::GateStep {
                    zone: state.zone().clone(),
                    position: destination,
                },
            )
        });
        Ok(followup)
    }

    fn post_validate(&self, state: &GameState, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        let position = state.player.position;
        match state.world.tile(position) {
            Some(tile) if tile.kind.is_passable(state.shift_active) => Ok(()),
            _ => Err(MoveError::InvalidResting { position }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{Fixture, TestZones};

    #[test]
    fn rejects_diagonal_delta() {
        assert_eq!(
            MoveAction::from_delta(1, 1),
            Err(MoveError::InvalidDelta { dx: 1, dy: 1 })
        );
        assert_eq!(
            MoveAction::from_delta(0, -1).map(|a| a.direction),
            Ok(Direction::Up)
        );
    }

    #[test]
    fn step_updates_facing_and_reveals() {
        let fixture = Fixture::new();
        let mut state = fixture.new_game();
        let revealed = state.world.revealed_count();

        let followup = fixture.run(&mut state, MoveAction::new(Direction::Right)).unwrap();

        assert!(followup.is_none());
        assert_eq!(state.player.position, Position::new(3, 2));
        assert_eq!(state.player.facing, Direction::Right);
        assert!(state.world.revealed_count() > revealed);
    }

    #[test]
    fn blocked_step_keeps_facing() {
        let fixture = Fixture::new();
        let mut state = fixture.new_game();
        fixture.run(&mut state, MoveAction::new(Direction::Right)).unwrap();
        let before = state.clone();

        // (4, 2) is a wall.
        let err = fixture
            .run(&mut state, MoveAction::new(Direction::Right))
            .unwrap_err();
        assert!(matches!(err, MoveError::Impassable { kind: TileKind::Wall, .. }));
        assert_eq!(state, before);
    }

    #[test]
    fn shift_walks_through_walls_but_not_water() {
        let fixture = Fixture::new();
        let mut state = fixture.new_game();
        state.shift_active = true;
        fixture.run(&mut state, MoveAction::new(Direction::Right)).unwrap();
        fixture.run(&mut state, MoveAction::new(Direction::Right)).unwrap();
        assert_eq!(state.player.position, TestZones::WALL);

        let mut state = fixture.new_game();
        state.shift_active = true;
        state.player.position = Position::new(1, 3);
        let err = fixture
            .run(&mut state, MoveAction::new(Direction::Down))
            .unwrap_err();
        assert!(matches!(err, MoveError::Impassable { kind: TileKind::Water, .. }));
    }

    #[test]
    fn boundary_is_enforced() {
        let fixture = Fixture::new();
        let mut state = fixture.new_game();
        state.shift_active = true;
        state.player.position = Position::new(0, 2);
        let err = fixture
            .run(&mut state, MoveAction::new(Direction::Left))
            .unwrap_err();
        assert!(matches!(err, MoveError::OutOfBounds { .. }));
    }

    #[test]
    fn stepping_on_gate_schedules_gate_step() {
        let fixture = Fixture::new();
        let mut state = fixture.new_game();
        state.player.position = TestZones::GATE.step(Direction::Left);

        let scheduled = fixture
            .run(&mut state, MoveAction::new(Direction::Right))
            .unwrap()
            .expect("gate step scheduled");

        assert_eq!(scheduled.delay_ms, 100);
        assert_eq!(
            scheduled.continuation,
            Continuation::GateStep {
                zone: state.zone().clone(),
                position: TestZones::GATE,
            }
        );
    }
}
