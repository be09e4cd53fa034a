use std::time::Duration;

use bevy::ecs::message::Messages;
use bevy::prelude::*;

use super::*;
use crate::common::test_utils::{count_messages, pending_phase, run_system_once};
use crate::plugins::asteroids::{Asteroid, SpawnTimer, asteroid_bundle};
use crate::plugins::input::RestartRequested;
use crate::plugins::player::{ShipTilt, Spaceship};
use crate::plugins::pool::EntityPool;
use crate::plugins::projectiles::{Missile, missile_bundle};

fn session_world() -> World {
    let mut world = World::new();
    let tunables = Tunables::default();
    world.insert_resource(GameState::new(&tunables));
    world.insert_resource(DamageFlash::new(tunables.damage_flash_secs));
    world.insert_resource(EntityPool::<Asteroid>::new(tunables.pool_size));
    world.insert_resource(EntityPool::<Missile>::new(tunables.pool_size));
    world.insert_resource(tunables);
    world.init_resource::<SpawnTimer>();
    world.insert_resource(State::new(GamePhase::Playing));
    world.init_resource::<NextState<GamePhase>>();
    world.init_resource::<Messages<PauseToggled>>();
    world.init_resource::<Messages<EndGameRequested>>();
    world.init_resource::<Messages<RestartRequested>>();
    world.init_resource::<Messages<GameOverReached>>();
    world.spawn((Spaceship, ShipTilt::default(), Transform::default()));
    world
}

// -----------------------------------------------------------------------------
// GameState
// -----------------------------------------------------------------------------

#[test]
fn new_state_matches_tunables() {
    let state = GameState::new(&Tunables::default());
    assert_eq!(state.score(), 0.0);
    assert_eq!(state.lives(), 3.0);
    assert_eq!(state.speed(), 0.1);
    assert!(state.is_running());
}

#[test]
fn lose_life_reports_game_over_once() {
    let mut state = GameState::new(&Tunables::default());
    let outcomes: Vec<Damage> = (0..7).map(|_| state.lose_life(0.5)).collect();

    assert_eq!(outcomes[..5], [Damage::Survived; 5]);
    assert_eq!(outcomes[5], Damage::GameOver);
    assert_eq!(outcomes[6], Damage::AlreadyOver);
    assert!(state.is_over());
}

#[test]
fn score_ignores_negative_and_nan() {
    let mut state = GameState::new(&Tunables::default());
    state.add_score(5.0);
    state.add_score(-3.0);
    state.add_score(f32::NAN);
    assert_eq!(state.score(), 5.0);
}

#[test]
fn pause_is_ignored_after_game_over() {
    let mut state = GameState::new(&Tunables::default());
    assert!(state.toggle_pause());
    assert!(!state.toggle_pause());
    state.end_game();
    assert!(!state.toggle_pause());
    assert!(!state.is_paused());
}

#[test]
fn end_game_reports_only_first_call() {
    let mut state = GameState::new(&Tunables::default());
    assert!(state.end_game());
    assert!(!state.end_game());
}

// -----------------------------------------------------------------------------
// DamageFlash
// -----------------------------------------------------------------------------

#[test]
fn flash_does_not_rearm_while_active() {
    let mut flash = DamageFlash::new(0.15);
    assert!(flash.trigger());
    flash.tick(Duration::from_millis(100));
    assert!(!flash.trigger());

    // Still expires 150 ms after the first trigger.
    flash.tick(Duration::from_millis(60));
    assert!(!flash.is_active());
    assert!(flash.trigger());
}

// -----------------------------------------------------------------------------
// Systems
// -----------------------------------------------------------------------------

#[test]
fn difficulty_ramps_speed_then_score() {
    let mut world = session_world();

    run_system_once(&mut world, advance_difficulty);

    let state = world.resource::<GameState>();
    assert!((state.speed() - 0.1001).abs() < 1e-6);
    assert!((state.score() - 0.1001).abs() < 1e-6);
}

#[test]
fn pause_request_toggles_phase() {
    let mut world = session_world();
    world.write_message(PauseToggled);

    run_system_once(&mut world, apply_pause_requests);

    assert!(world.resource::<GameState>().is_paused());
    assert_eq!(pending_phase(&world), Some(GamePhase::Paused));
}

#[test]
fn pause_request_after_game_over_is_dropped() {
    let mut world = session_world();
    world.resource_mut::<GameState>().end_game();
    world.write_message(PauseToggled);

    run_system_once(&mut world, apply_pause_requests);

    assert!(!world.resource::<GameState>().is_paused());
    assert_eq!(pending_phase(&world), None);
}

#[test]
fn end_game_request_announces_once() {
    let mut world = session_world();
    world.write_message(EndGameRequested);
    run_system_once(&mut world, apply_end_game_requests);
    world.write_message(EndGameRequested);
    run_system_once(&mut world, apply_end_game_requests);

    assert!(world.resource::<GameState>().is_over());
    assert_eq!(count_messages::<GameOverReached>(&mut world), 1);
    assert_eq!(pending_phase(&world), Some(GamePhase::GameOver));
}

fn dirty_session(world: &mut World) {
    {
        let mut state = world.resource_mut::<GameState>();
        state.add_score(1234.0);
        state.increase_speed(0.5);
        state.lose_life(0.5);
        state.toggle_pause();
        state.end_game();
    }
    world.resource_mut::<DamageFlash>().trigger();
    world.resource_mut::<SpawnTimer>().last_spawn_ms = Some(5_000.0);

    for _ in 0..3 {
        let e = world.spawn(asteroid_bundle()).id();
        world.resource_mut::<EntityPool<Asteroid>>().acquire(|| e);
        let m = world.spawn(missile_bundle(1.0)).id();
        world.resource_mut::<EntityPool<Missile>>().acquire(|| m);
    }

    let mut q = world.query_filtered::<(&mut Transform, &mut ShipTilt), With<Spaceship>>();
    let (mut tf, mut tilt) = q.single_mut(world).unwrap();
    tf.translation = Vec3::new(2.0, -1.0, 0.0);
    tilt.side = 0.2;
}

fn assert_fresh(world: &mut World) {
    let state = world.resource::<GameState>().clone();
    assert_eq!(state, GameState::new(&Tunables::default()));
    assert!(!world.resource::<DamageFlash>().is_active());
    assert_eq!(world.resource::<SpawnTimer>().last_spawn_ms, None);
    assert_eq!(world.resource::<EntityPool<Asteroid>>().active_len(), 0);
    assert_eq!(world.resource::<EntityPool<Missile>>().active_len(), 0);
    assert_eq!(pending_phase(world), Some(GamePhase::Playing));

    let mut q = world.query_filtered::<(&Transform, &ShipTilt), With<Spaceship>>();
    let (tf, tilt) = q.single(world).unwrap();
    assert_eq!(tf.translation, Vec3::ZERO);
    assert_eq!(*tilt, ShipTilt::default());
}

#[test]
fn restart_request_resets_everything() {
    let mut world = session_world();
    dirty_session(&mut world);
    world.write_message(RestartRequested);

    run_system_once(&mut world, restart_session);

    assert_fresh(&mut world);
    assert_eq!(world.resource::<EntityPool<Asteroid>>().free().len(), 3);
}

#[test]
fn reset_twice_equals_reset_once() {
    let mut world = session_world();
    dirty_session(&mut world);

    run_system_once(&mut world, |mut reset: SessionReset| reset.apply());
    assert_fresh(&mut world);
    let once = world.resource::<GameState>().clone();

    run_system_once(&mut world, |mut reset: SessionReset| reset.apply());
    assert_fresh(&mut world);
    assert_eq!(*world.resource::<GameState>(), once);
    assert_eq!(world.resource::<EntityPool<Missile>>().free().len(), 3);
}

#[test]
fn no_restart_request_no_reset() {
    let mut world = session_world();
    world.resource_mut::<GameState>().add_score(10.0);

    run_system_once(&mut world, restart_session);

    assert_eq!(world.resource::<GameState>().score(), 10.0);
}
