//! Collision plugin: detect overlaps, then apply outcomes.
//!
//! ```text
//! TickSet::Collisions
//!   gather probes (ship, active asteroids with known extent, active missiles)
//!     -> detect -> resolve (missile-first)
//!     -> destroyed: retire both, score bonus, AsteroidDestroyed
//!     -> ship hit:  retire asteroid, lose life, flash, ShipHit
//!                   (GameOverReached once, on the hit that ends the game)
//! ```

use bevy::prelude::*;

use crate::common::schedule::TickSet;
use crate::common::state::GamePhase;
use crate::common::tunables::Tunables;
use crate::plugins::asteroids::{Asteroid, AsteroidVariant, ModelExtents};
use crate::plugins::player::Spaceship;
use crate::plugins::pool::{EntityPool, retire};
use crate::plugins::projectiles::Missile;
use crate::plugins::session::{
    AsteroidDestroyed, Damage, DamageFlash, GameOverReached, GameState, ShipHit,
    announce_game_over,
};

mod detector;

pub use detector::{
    AsteroidProbe, CollisionRadii, CollisionReport, MissileProbe, Resolution, detect, resolve,
    spheres_intersect,
};


pub fn plugin(app: &mut App) {
    app.add_systems(Update, resolve_collisions.in_set(TickSet::Collisions));
}

#[allow(clippy::too_many_arguments)]
pub fn resolve_collisions(
    mut commands: Commands,
    tunables: Res<Tunables>,
    extents: Res<ModelExtents>,
    mut state: ResMut<GameState>,
    mut flash: ResMut<DamageFlash>,
    mut next: ResMut<NextState<GamePhase>>,
    mut asteroid_pool: ResMut<EntityPool<Asteroid>>,
    mut missile_pool: ResMut<EntityPool<Missile>>,
    q_ship: Query<&Transform, With<Spaceship>>,
    q_asteroids: Query<(&Transform, &Asteroid, &AsteroidVariant)>,
    q_missiles: Query<&Transform, With<Missile>>,
    mut ship_hits: MessageWriter<ShipHit>,
    mut destroyed: MessageWriter<AsteroidDestroyed>,
    mut game_over: MessageWriter<GameOverReached>,
) {
    let ship = q_ship.single().ok().map(|tf| tf.translation);

    let asteroids: Vec<AsteroidProbe> = asteroid_pool
        .active()
        .iter()
        .filter_map(|&entity| {
            let (tf, asteroid, variant) = q_asteroids.get(entity).ok()?;
            Some(AsteroidProbe {
                entity,
                center: tf.translation,
                radius: extents.get(*variant).map(|ext| asteroid.collision_radius(ext)),
            })
        })
        .collect();

    let missiles: Vec<MissileProbe> = missile_pool
        .active()
        .iter()
        .filter_map(|&entity| {
            let tf = q_missiles.get(entity).ok()?;
            Some(MissileProbe { entity, center: tf.translation })
        })
        .collect();

    let radii = CollisionRadii { ship: tunables.ship_radius, missile: tunables.missile_radius };
    let report = detect(ship, &asteroids, &missiles, radii);
    if report.is_empty() {
        return;
    }
    let outcome = resolve(&report);

    for (asteroid, missile) in outcome.destroyed {
        retire(&mut asteroid_pool, &mut commands, asteroid);
        retire(&mut missile_pool, &mut commands, missile);
        state.add_score(tunables.missile_bonus);
        destroyed.write(AsteroidDestroyed { asteroid, missile });
    }

    for asteroid in outcome.ship_hits {
        retire(&mut asteroid_pool, &mut commands, asteroid);
        let damage = state.lose_life(tunables.hit_damage);
        flash.trigger();
        ship_hits.write(ShipHit { asteroid, lives_left: state.lives() });
        debug!("ship hit by {asteroid}; {} lives left", state.lives());

        if damage == Damage::GameOver {
            announce_game_over(&state, &mut game_over, &mut next);
        }
    }
}
