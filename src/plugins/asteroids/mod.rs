//! Asteroids plugin: paced spawning, approach and culling.
//!
//! Asteroids are spawned on a plane far down -Z and drift toward the camera at
//! the session speed, spinning and growing as they come. Past the cull plane
//! they return to their pool.
//!
//! Position lives in `Transform.translation`; spin and growth are tracked on
//! `Asteroid` and written to `Transform` every tick, so a recycled asteroid
//! starts from whatever the spawn roll gave it.

use bevy::prelude::*;

use crate::common::rng::GameRng;
use crate::common::schedule::TickSet;
use crate::common::tunables::Tunables;
use crate::plugins::pool::{EntityPool, retire};
use crate::plugins::session::GameState;

mod components;
mod spawn;

pub use components::{Asteroid, AsteroidVariant, ModelExtents, START_SCALE, asteroid_bundle};
pub use spawn::{SpawnSchedule, SpawnTimer};


pub fn plugin(app: &mut App) {
    let capacity = app.world().resource::<Tunables>().pool_size;

    app.insert_resource(EntityPool::<Asteroid>::new(capacity))
        .init_resource::<SpawnTimer>()
        .init_resource::<ModelExtents>()
        .add_systems(Startup, prefill_asteroids)
        .add_systems(Update, spawn_asteroids.in_set(TickSet::Spawn))
        .add_systems(Update, advance_asteroids.in_set(TickSet::Asteroids));
}

fn prefill_asteroids(mut commands: Commands, mut pool: ResMut<EntityPool<Asteroid>>) {
    pool.prefill(|| commands.spawn(asteroid_bundle()).id());
}

pub fn spawn_asteroids(
    mut commands: Commands,
    time: Res<Time>,
    tunables: Res<Tunables>,
    state: Res<GameState>,
    mut timer: ResMut<SpawnTimer>,
    mut pool: ResMut<EntityPool<Asteroid>>,
    mut rng: ResMut<GameRng>,
) {
    let now_ms = time.elapsed_secs_f64() * 1000.0;
    let schedule = SpawnSchedule::from_tunables(&tunables);
    if !schedule.should_spawn(
        now_ms,
        timer.last_or_never(),
        state.score(),
        pool.active_len(),
        tunables.max_asteroids,
    ) {
        return;
    }

    let position = Vec3::new(
        rng.centered(tunables.spawn_spread),
        rng.centered(tunables.spawn_spread),
        tunables.asteroid_spawn_z,
    );
    let (asteroid, variant) = Asteroid::roll(&mut rng);

    let acquired = pool.acquire(|| commands.spawn(asteroid_bundle()).id());
    commands.entity(acquired.entity()).insert((
        asteroid,
        variant,
        Transform {
            translation: position,
            rotation: asteroid.rotation(),
            scale: Vec3::splat(asteroid.scale),
        },
        Visibility::Visible,
    ));
    timer.last_spawn_ms = Some(now_ms);

    debug!("spawned {variant:?} asteroid at {position} ({acquired:?})");
}

pub fn advance_asteroids(
    mut commands: Commands,
    tunables: Res<Tunables>,
    state: Res<GameState>,
    mut pool: ResMut<EntityPool<Asteroid>>,
    mut q: Query<(&mut Asteroid, &mut Transform)>,
) {
    let travel = tunables.asteroid_cull_z - tunables.asteroid_spawn_z;
    let active = pool.active().to_vec();

    for e in active {
        let Ok((mut asteroid, mut tf)) = q.get_mut(e) else {
            continue;
        };

        tf.translation.z += state.speed();
        let spin = asteroid.spin;
        asteroid.orientation += spin;
        asteroid.grow((tf.translation.z - tunables.asteroid_spawn_z) / travel);

        tf.rotation = asteroid.rotation();
        tf.scale = Vec3::splat(asteroid.scale);

        if tf.translation.z > tunables.asteroid_cull_z {
            retire(&mut pool, &mut commands, e);
        }
    }
}
