//! Projectiles plugin: pooled missiles.
//!
//! ```text
//! Startup:          prefill EntityPool<Missile> with hidden missiles
//! TickSet::Missiles fire_missiles    ShootRequested -> acquire -> place in front of ship
//!                   advance_missiles move along velocity; z below cull -> retire
//! ```
//!
//! Fresh and recycled missiles take the same write path (`Commands` insert), so
//! a recycled missile never keeps its previous flight state.

use bevy::prelude::*;

use crate::common::schedule::TickSet;
use crate::common::tunables::Tunables;
use crate::plugins::input::ShootRequested;
use crate::plugins::player::Spaceship;
use crate::plugins::pool::{EntityPool, retire};

mod components;

pub use components::{Missile, missile_bundle};


pub fn plugin(app: &mut App) {
    let capacity = app.world().resource::<Tunables>().pool_size;

    app.insert_resource(EntityPool::<Missile>::new(capacity))
        .add_systems(Startup, prefill_missiles)
        .add_systems(
            Update,
            (fire_missiles, advance_missiles)
                .chain()
                .in_set(TickSet::Missiles),
        );
}

fn prefill_missiles(
    mut commands: Commands,
    tunables: Res<Tunables>,
    mut pool: ResMut<EntityPool<Missile>>,
) {
    pool.prefill(|| commands.spawn(missile_bundle(tunables.missile_speed)).id());
}

pub fn fire_missiles(
    mut commands: Commands,
    mut requests: MessageReader<ShootRequested>,
    tunables: Res<Tunables>,
    mut pool: ResMut<EntityPool<Missile>>,
    q_ship: Query<&Transform, With<Spaceship>>,
) {
    let shots = requests.read().count();
    if shots == 0 {
        return;
    }
    let Ok(ship) = q_ship.single() else {
        debug!("fire: no spaceship");
        return;
    };

    let muzzle = ship.translation - Vec3::Z * tunables.missile_muzzle_offset;
    for _ in 0..shots {
        let e = pool
            .acquire(|| commands.spawn(missile_bundle(tunables.missile_speed)).id())
            .entity();
        commands.entity(e).insert((
            Missile::toward_horizon(tunables.missile_speed),
            Transform::from_translation(muzzle),
            Visibility::Visible,
        ));
    }
}

pub fn advance_missiles(
    mut commands: Commands,
    tunables: Res<Tunables>,
    mut pool: ResMut<EntityPool<Missile>>,
    mut q: Query<(&Missile, &mut Transform)>,
) {
    let active = pool.active().to_vec();
    for e in active {
        let Ok((missile, mut tf)) = q.get_mut(e) else {
            continue;
        };
        tf.translation += missile.velocity;
        if tf.translation.z < tunables.missile_cull_z {
            retire(&mut pool, &mut commands, e);
        }
    }
}
