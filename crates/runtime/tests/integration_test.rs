//! End-to-end gameplay through the runtime handle, on paused tokio time.

mod common;

use std::time::Duration;

use common::*;
use game_core::{
    Action, CombatCommand, CombatPhase, Continuation, Direction, InputResult, InteractableId,
    ItemId, Mode, Position,
};
use runtime::{Event, GameStateEvent, RuntimeError, Topic};

#[tokio::test(start_paused = true)]
async fn new_session_starts_at_spawn_with_fog_lifted_around_player() {
    let runtime = start().await;
    let handle = runtime.handle();

    let state = state(&handle).await;
    assert_eq!(state.zone().as_str(), "sector_01");
    assert_eq!(state.player.position, SPAWN);
    assert_eq!(state.player.facing, Direction::Down);
    assert_eq!(state.nonce, 0);
    assert!(state.mode.is_idle());
    assert!(state.player_tile().is_some_and(|tile| tile.is_revealed()));
    assert!(!state.world.tile(Position::new(10, 1)).unwrap().is_revealed());

    runtime.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn walking_reveals_the_radius_around_each_step() {
    let runtime = start().await;
    let handle = runtime.handle();

    walk(&handle, &[Direction::Up, Direction::Up, Direction::Up]).await;
    let state = state(&handle).await;
    assert_eq!(state.player.position, Position::new(2, 2));
    assert_eq!(state.nonce, 3);

    for center in [SPAWN, Position::new(2, 4), Position::new(2, 3), Position::new(2, 2)] {
        for tile in state.world.tiles() {
            if tile.position.distance_squared(center) <= 6 {
                assert!(tile.is_revealed(), "{:?} should be revealed", tile.position);
            }
        }
    }

    runtime.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn walls_block_movement_until_shift_is_active() {
    let runtime = start().await;
    let handle = runtime.handle();
    walk(&handle, &[Direction::Up]).await;

    // (3,4) is part of the interior wall.
    let err = handle
        .execute_action(Action::step(Direction::Right))
        .await
        .unwrap_err();
    assert!(err.is_rejection());
    assert_eq!(state(&handle).await.player.position, Position::new(2, 4));

    handle.execute_action(Action::toggle_shift()).await.unwrap();
    walk(&handle, &[Direction::Right]).await;
    let state = state(&handle).await;
    assert!(state.shift_active);
    assert_eq!(state.player.position, Position::new(3, 4));

    runtime.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn hidden_cache_needs_shift_to_loot() {
    let runtime = start().await;
    let handle = runtime.handle();
    walk(&handle, TO_CACHE).await;

    handle.execute_action(Action::interact()).await.unwrap();
    let before = state(&handle).await;
    assert_eq!(
        before.log.latest().unwrap().message,
        "You sense something... but reality obscures it."
    );
    assert!(before.player.inventory.is_empty());

    handle.execute_action(Action::toggle_shift()).await.unwrap();
    handle.execute_action(Action::interact()).await.unwrap();
    let after = state(&handle).await;
    assert!(has_message(&after, "Acquired: Ether Shard"));
    assert_eq!(after.player.inventory.len(), 1);
    assert!(after.cleared.contains(&InteractableId::from("chest_01")));
    assert!(after.world.tile(Position::new(10, 1)).unwrap().interactable.is_none());

    runtime.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn glitch_fight_ends_in_victory_and_rewards() {
    let runtime = start().await;
    let handle = runtime.handle();
    engage_glitch(&handle).await;

    let engaged = state(&handle).await;
    let encounter = engaged.mode.encounter().expect("in combat");
    assert_eq!(encounter.enemy.id.as_str(), "enemy_glitch_01");
    assert_eq!(encounter.combat.phase, CombatPhase::Menu);

    let attacks = fight_to_the_end(&handle).await;
    assert!((5..=7).contains(&attacks), "took {attacks} attacks");

    let state = state(&handle).await;
    assert_eq!(state.mode, Mode::Exploring);
    assert_eq!(state.player.stats.xp, 25);
    assert_eq!(state.player.stats.credits, 42);
    assert!(state.player.stats.hp >= 100 - 6 * (attacks - 1));
    assert!(state.player.find_item(&ItemId::from("item_stim_01")).is_some());
    assert!(state.cleared.contains(&InteractableId::from("enemy_glitch_01")));
    assert!(state.world.tile(Position::new(8, 5)).unwrap().interactable.is_none());
    assert!(has_message(&state, "Target eliminated. +25 XP, +42 Credits"));

    // Victory is awarded exactly once.
    tokio::time::sleep(Duration::from_secs(3)).await;
    let later = common::state(&handle).await;
    assert_eq!(later.player.stats.xp, 25);
    assert_eq!(handle.pending_continuations().await.unwrap(), 0);

    runtime.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn movement_is_rejected_during_combat() {
    let runtime = start().await;
    let handle = runtime.handle();
    engage_glitch(&handle).await;
    let before = state(&handle).await;

    let err = handle
        .execute_action(Action::step(Direction::Left))
        .await
        .unwrap_err();
    assert!(matches!(err, RuntimeError::Execute(_)));
    assert_eq!(state(&handle).await, before);

    runtime.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn enemy_turn_follows_each_surviving_attack() {
    let runtime = start().await;
    let handle = runtime.handle();
    engage_glitch(&handle).await;

    let outcome = handle
        .execute_action(Action::combat(CombatCommand::Attack))
        .await
        .unwrap();
    let scheduled = outcome.scheduled.expect("enemy turn scheduled");
    assert_eq!(scheduled.delay_ms, 1_000);
    assert!(matches!(scheduled.continuation, Continuation::EnemyTurn { .. }));

    let waiting = state(&handle).await;
    assert_eq!(waiting.mode.encounter().unwrap().combat.phase, CombatPhase::Waiting);
    let err = handle
        .execute_action(Action::combat(CombatCommand::Attack))
        .await
        .unwrap_err();
    assert!(err.is_rejection());

    settle().await;
    let answered = state(&handle).await;
    assert_eq!(answered.mode.encounter().unwrap().combat.phase, CombatPhase::Menu);
    // Glitch attack 8 against defense 5.
    assert_eq!(answered.player.stats.hp, 94);

    runtime.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn rune_sequence_casts_skill_after_delay() {
    let runtime = start().await;
    let handle = runtime.handle();
    engage_glitch(&handle).await;

    handle
        .execute_action(Action::combat(CombatCommand::OpenSkills))
        .await
        .unwrap();
    handle
        .execute_action(Action::select_skill("code_breaker"))
        .await
        .unwrap();

    // A wrong rune wipes the buffer but keeps the input phase.
    for direction in [Direction::Up, Direction::Down, Direction::Left] {
        handle.execute_action(Action::rune(direction)).await.unwrap();
    }
    let failed = state(&handle).await;
    let combat = &failed.mode.encounter().unwrap().combat;
    assert_eq!(combat.phase, CombatPhase::Input);
    assert_eq!(combat.last_input, InputResult::Fail);
    assert!(combat.input_buffer.is_empty());

    let mut last = None;
    for direction in [Direction::Up, Direction::Down, Direction::Up] {
        last = Some(handle.execute_action(Action::rune(direction)).await.unwrap());
    }
    let scheduled = last.and_then(|outcome| outcome.scheduled).expect("cast scheduled");
    assert_eq!(scheduled.delay_ms, 300);

    let casting = state(&handle).await;
    let combat = &casting.mode.encounter().unwrap().combat;
    assert_eq!(combat.phase, CombatPhase::Waiting);
    assert_eq!(combat.last_input, InputResult::Success);

    tokio::time::sleep(Duration::from_millis(350)).await;
    let cast = state(&handle).await;
    let encounter = cast.mode.encounter().expect("glitch survives 25 damage");
    assert_eq!(encounter.enemy.hp, 25);
    assert_eq!(cast.player.stats.mp, 40);

    settle().await;
    let answered = state(&handle).await;
    assert_eq!(answered.mode.encounter().unwrap().combat.phase, CombatPhase::Menu);

    runtime.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn zone_round_trip_keeps_defeated_enemy_gone() {
    let runtime = start().await;
    let handle = runtime.handle();
    engage_glitch(&handle).await;
    fight_to_the_end(&handle).await;

    walk(&handle, GLITCH_TO_DOOR).await;
    tokio::time::sleep(Duration::from_millis(200)).await;
    let transit = state(&handle).await;
    assert!(matches!(transit.mode, Mode::Transition(_)));
    assert!(
        handle
            .execute_action(Action::step(Direction::Left))
            .await
            .unwrap_err()
            .is_rejection()
    );

    tokio::time::sleep(Duration::from_millis(1_600)).await;
    let archive = state(&handle).await;
    assert_eq!(archive.zone().as_str(), "sector_02");
    assert_eq!(archive.player.position, Position::new(1, 4));
    assert_eq!(archive.player.facing, Direction::Right);
    assert_eq!(archive.mode, Mode::Exploring);

    walk(&handle, &[Direction::Left]).await;
    tokio::time::sleep(Duration::from_millis(1_800)).await;
    let back = state(&handle).await;
    assert_eq!(back.zone().as_str(), "sector_01");
    assert_eq!(back.player.position, Position::new(10, 5));
    assert_eq!(back.player.facing, Direction::Left);
    assert!(back.world.tile(Position::new(8, 5)).unwrap().interactable.is_none());
    assert!(back.world.tile(Position::new(1, 8)).unwrap().interactable.is_some());
    assert_eq!(back.player.stats.xp, 25);

    runtime.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn stepping_off_a_gate_drops_the_gate_step() {
    let runtime = start().await;
    let handle = runtime.handle();
    let mut events = handle.subscribe(Topic::GameState);

    walk(&handle, TO_GLITCH).await;
    walk(&handle, GLITCH_TO_DOOR).await;
    walk(&handle, &[Direction::Left]).await;
    tokio::time::sleep(Duration::from_millis(200)).await;

    let state = state(&handle).await;
    assert_eq!(state.zone().as_str(), "sector_01");
    assert_eq!(state.player.position, Position::new(10, 5));
    assert_eq!(state.mode, Mode::Exploring);

    let mut dropped = 0;
    while let Ok(event) = events.try_recv() {
        if let Event::GameState(GameStateEvent::ContinuationDropped { continuation, .. }) = event {
            assert!(matches!(continuation, Continuation::GateStep { .. }));
            dropped += 1;
        }
    }
    assert_eq!(dropped, 1);

    runtime.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn talking_to_the_echo_walks_the_dialogue_tree() {
    let runtime = start().await;
    let handle = runtime.handle();
    walk(&handle, TO_ECHO).await;

    handle.execute_action(Action::interact()).await.unwrap();
    let greeting = state(&handle).await;
    let dialogue = greeting.mode.dialogue().expect("dialogue open");
    assert_eq!(dialogue.tree.as_str(), "wesai_echo");
    assert_eq!(dialogue.node.as_str(), "greeting");
    assert_eq!(dialogue.speaker, "WesAI Echo");

    assert!(
        handle
            .execute_action(Action::step(Direction::Down))
            .await
            .unwrap_err()
            .is_rejection()
    );

    handle
        .execute_action(Action::select_option(Some("fragmented".into())))
        .await
        .unwrap();
    assert_eq!(
        state(&handle).await.mode.dialogue().unwrap().node.as_str(),
        "fragmented"
    );

    handle.execute_action(Action::select_option(None)).await.unwrap();
    let closed = state(&handle).await;
    assert_eq!(closed.mode, Mode::Exploring);
    assert_eq!(closed.player.position, Position::new(4, 2));

    runtime.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn stim_at_full_health_is_kept() {
    let runtime = start().await;
    let handle = runtime.handle();
    engage_glitch(&handle).await;
    fight_to_the_end(&handle).await;

    let before = state(&handle).await;
    let stims = |s: &game_core::GameState| {
        s.player
            .inventory
            .iter()
            .filter(|item| item.id.as_str() == "item_stim_01")
            .count()
    };
    handle
        .execute_action(Action::use_item("item_stim_01"))
        .await
        .unwrap();
    let after = state(&handle).await;

    if before.player.stats.hp == before.player.stats.max_hp {
        assert_eq!(stims(&after), stims(&before));
    } else {
        assert_eq!(stims(&after), stims(&before) - 1);
        assert!(after.player.stats.hp > before.player.stats.hp);
    }

    runtime.shutdown().await.unwrap();
}
