//! Integration test harness.
//!
//! Keep integration tests headless:
//! - `MinimalPlugins` provides core ECS runtime.
//! - we then call `space_escape::game::configure_headless` to install gameplay plugins.
//! - time advances by a fixed step per update so spawn pacing is deterministic.

#![allow(dead_code)]

use std::time::Duration;

use bevy::asset::AssetPlugin;
use bevy::prelude::*;
use bevy::scene::ScenePlugin;
use bevy::state::app::StatesPlugin;
use bevy::time::TimeUpdateStrategy;

use space_escape::common::state::GamePhase;
use space_escape::common::tunables::Tunables;
use space_escape::plugins::asteroids::{Asteroid, AsteroidVariant, asteroid_bundle};
use space_escape::plugins::pool::EntityPool;
use space_escape::plugins::projectiles::{Missile, missile_bundle};
use space_escape::plugins::session::GameState;

pub const STEP: Duration = Duration::from_millis(16);

pub fn app_headless() -> App {
    app_headless_with(Tunables::default())
}

pub fn app_headless_with(tunables: Tunables) -> App {
    let mut app = App::new();

    app.add_plugins((
        MinimalPlugins,
        StatesPlugin,
        AssetPlugin::default(),
        ScenePlugin,
    ));
    app.insert_resource(TimeUpdateStrategy::ManualDuration(STEP));
    app.insert_resource(tunables);

    space_escape::game::configure_headless(&mut app);
    app
}

/// Headless app with spawning disabled, so tests place every asteroid.
pub fn app_quiet() -> App {
    app_headless_with(Tunables { max_asteroids: 0, ..default() })
}

pub fn ticks(app: &mut App, n: usize) {
    for _ in 0..n {
        app.update();
    }
}

pub fn phase(app: &App) -> GamePhase {
    *app.world().resource::<State<GamePhase>>().get()
}

pub fn game_state(app: &App) -> GameState {
    app.world().resource::<GameState>().clone()
}

/// Put an asteroid in play at `at`, through the pool like a real spawn.
pub fn place_asteroid(app: &mut App, at: Vec3, scale: f32) -> Entity {
    let world = app.world_mut();
    let e = world.resource_scope(|world, mut pool: Mut<EntityPool<Asteroid>>| {
        pool.acquire(|| world.spawn(asteroid_bundle()).id()).entity()
    });
    world.entity_mut(e).insert((
        Asteroid { target_scale: scale, scale, ..default() },
        AsteroidVariant::Regular,
        Transform::from_translation(at).with_scale(Vec3::splat(scale)),
        Visibility::Visible,
    ));
    e
}

/// Put a missile in flight at `at`, through the pool like a real shot.
pub fn place_missile(app: &mut App, at: Vec3) -> Entity {
    let speed = app.world().resource::<Tunables>().missile_speed;
    let world = app.world_mut();
    let e = world.resource_scope(|world, mut pool: Mut<EntityPool<Missile>>| {
        pool.acquire(|| world.spawn(missile_bundle(speed)).id()).entity()
    });
    world.entity_mut(e).insert((
        Missile::toward_horizon(speed),
        Transform::from_translation(at),
        Visibility::Visible,
    ));
    e
}
