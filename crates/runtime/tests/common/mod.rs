//! Shared helpers for runtime integration tests.
#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use game_core::{Action, CombatCommand, Direction, GameState, Position};
use runtime::{OracleManager, Runtime, RuntimeConfig, RuntimeHandle, StateRepository};

use Direction::{Down, Left, Right, Up};

/// Spawn (2,5) to (7,5), facing the glitch at (8,5).
pub const TO_GLITCH: &[Direction] = &[Up, Up, Up, Right, Right, Right, Right, Down, Down, Down, Right];

/// Spawn (2,5) to (4,2), facing the WesAI Echo at (5,2).
pub const TO_ECHO: &[Direction] = &[Up, Up, Up, Right, Right];

/// Spawn (2,5) to (9,1), facing the hidden cache at (10,1).
pub const TO_CACHE: &[Direction] = &[
    Up, Up, Up, Up, Right, Right, Right, Right, Right, Right, Right,
];

/// (7,5) to the door at (11,5), stepping over the glitch's tile.
pub const GLITCH_TO_DOOR: &[Direction] = &[Right, Right, Right, Right];

pub const SPAWN: Position = Position { x: 2, y: 5 };

pub async fn start() -> Runtime {
    start_with(Arc::new(runtime::InMemoryStateRepo::new())).await
}

pub async fn start_with(repository: Arc<dyn StateRepository>) -> Runtime {
    Runtime::builder()
        .config(RuntimeConfig {
            game_seed: 7,
            ..RuntimeConfig::default()
        })
        .oracles(OracleManager::builtin())
        .repository(repository)
        .build()
        .await
        .expect("runtime should build")
}

pub async fn walk(handle: &RuntimeHandle, path: &[Direction]) {
    for direction in path {
        handle
            .execute_action(Action::step(*direction))
            .await
            .unwrap_or_else(|err| panic!("step {direction:?} failed: {err}"));
    }
}

pub async fn state(handle: &RuntimeHandle) -> GameState {
    handle.query_state().await.expect("state query")
}

/// Waits out any enemy turn or pending skill cast.
pub async fn settle() {
    tokio::time::sleep(Duration::from_millis(1_100)).await;
}

pub async fn engage_glitch(handle: &RuntimeHandle) {
    walk(handle, TO_GLITCH).await;
    handle
        .execute_action(Action::interact())
        .await
        .expect("engage glitch");
}

/// Attacks until the encounter ends, returning the number of swings.
pub async fn fight_to_the_end(handle: &RuntimeHandle) -> u32 {
    let mut attacks = 0;
    while state(handle).await.mode.encounter().is_some() {
        handle
            .execute_action(Action::combat(CombatCommand::Attack))
            .await
            .expect("attack accepted in menu phase");
        attacks += 1;
        assert!(attacks <= 20, "encounter never ended");
        settle().await;
    }
    attacks
}

pub fn has_message(state: &GameState, prefix: &str) -> bool {
    state
        .log
        .entries()
        .any(|entry| entry.message.starts_with(prefix))
}

pub fn latest_message(state: &GameState) -> Option<&str> {
    state.log.latest().map(|entry| entry.message.as_str())
}

/// Asserts the session matches `before` in everything but the log.
pub fn assert_unchanged_but_log(after: &GameState, before: &GameState) {
    let mut expected = before.clone();
    expected.log = after.log.clone();
    assert_eq!(after, &expected);
}
