//! Zone transitions.

use crate::action::{Continuation, Scheduled};
use crate::config::GameConfig;
use crate::env::{GameEnv, OracleError};
use crate::state::{
    GameState, Mode, PendingTransition, TransitionMeta, WorldState, ZoneId, ZoneLookup,
    lookup_zone,
};

/// Engages the transition lock and schedules completion.
pub(crate) fn begin(state: &mut GameState, config: &GameConfig, target: TransitionMeta) -> Scheduled {
    let token = state.allocate_transition_token();
    state.log.system(format!(
        "Initiating handshake with {}...",
        target.zone_name
    ));
    state.mode = Mode::Transition(PendingTransition { token, target });

    Scheduled::after(
        config.delays.zone_transition_ms,
        Continuation::CompleteTransition { token },
    )
}

/// Loads the pending destination and releases the transition lock.
///
/// Unknown zones, and destinations outside the loaded zone, land on the
/// fallback zone's spawn instead.
pub(crate) fn complete(state: &mut GameState, env: &GameEnv<'_>) -> Result<(), OracleError> {
    let Some(pending) = state.mode.transition().cloned() else {
        return Ok(());
    };
    let config = env.config()?;
    let fallback = ZoneId::new(config.starting_zone.as_str());

    let lookup = lookup_zone(env.zones()?, &pending.target.zone, &fallback)?;
    let layout = lookup.layout();
    let destination = match &lookup {
        ZoneLookup::Found(layout) if layout.dimensions.contains(pending.target.position) => {
            pending.target
        }
        _ => layout.spawn_meta(),
    };

    let mut world = WorldState::from_layout(layout);
    world.apply_history(&state.cleared);
    world.reveal_around(destination.position, config.reveal_radius);

    state.world = world;
    state.player.position = destination.position;
    state.player.facing = destination.facing;
    state.mode = Mode::Exploring;
    state.log.info(format!("Connection established: {}.", state.world.zone_name));
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::action::{Action, Continuation};
    use crate::state::{Direction, InteractableId, Mode, Position, Tile, ZoneId};
    use crate::testing::{Fixture, TestZones};

    fn stand_on(fixture: &Fixture, position: Position) -> crate::state::GameState {
        let mut state = fixture.new_game();
        state.player.position = position.step(Direction::Left);
        let scheduled = fixture
            .execute(&mut state, &Action::step(Direction::Right))
            .unwrap()
            .expect("gate step");
        let scheduled = fixture
            .run(&mut state, scheduled.continuation)
            .unwrap()
            .expect("transition completion");
        assert!(matches!(state.mode, Mode::Transition(_)));
        assert_eq!(scheduled.delay_ms, 1500);
        fixture.run(&mut state, scheduled.continuation).unwrap();
        state
    }

    #[test]
    fn gate_leads_to_target_zone() {
        let fixture = Fixture::new();
        let state = stand_on(&fixture, TestZones::GATE);

        assert!(state.mode.is_idle());
        assert_eq!(state.zone(), &ZoneId::from("annex"));
        assert_eq!(state.player.position, Position::new(1, 1));
        assert_eq!(state.player.facing, Direction::Right);
        assert!(state.player_tile().is_some_and(Tile::is_revealed));
    }

    #[test]
    fn unknown_zone_falls_back_to_starting_spawn() {
        let fixture = Fixture::new();
        let state = stand_on(&fixture, TestZones::RIFT);

        assert_eq!(state.zone(), &ZoneId::from("sandbox"));
        assert_eq!(state.player.position, Position::new(2, 2));
        assert_eq!(state.player.facing, Direction::Down);
    }

    #[test]
    fn cleared_entities_stay_cleared_on_reload() {
        let fixture = Fixture::new();
        let mut state = fixture.new_game();
        state.cleared.insert(InteractableId::from("sentry"));
        state.player.position = TestZones::RIFT.step(Direction::Left);

        let gate = fixture
            .execute(&mut state, &Action::step(Direction::Right))
            .unwrap()
            .expect("gate step");
        let complete = fixture.run(&mut state, gate.continuation).unwrap().unwrap();
        assert!(matches!(
            complete.continuation,
            Continuation::CompleteTransition { .. }
        ));
        fixture.run(&mut state, complete.continuation).unwrap();

        assert!(
            state
                .world
                .tile(TestZones::SENTRY)
                .is_some_and(|tile| tile.interactable.is_none())
        );
    }

    #[test]
    fn actions_are_locked_mid_transition() {
        let fixture = Fixture::new();
        let mut state = fixture.new_game();
        state.player.position = TestZones::GATE;
        fixture.execute(&mut state, &Action::interact()).unwrap();
        let before = state.clone();

        for action in [
            Action::step(Direction::Up),
            Action::interact(),
            Action::toggle_shift(),
        ] {
            assert!(fixture.execute(&mut state, &action).is_err());
        }
        assert_eq!(state, before);
    }
}
