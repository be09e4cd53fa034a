//! Bounding-sphere collision detection.
//!
//! Pure functions over positions and radii; no ECS access. `detect` reports
//! every overlapping pair, `resolve` turns the report into consequences with
//! each asteroid and missile consumed at most once.

use bevy::math::bounding::{BoundingSphere, IntersectsVolume};
use bevy::platform::collections::HashSet;
use bevy::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionRadii {
    pub ship: f32,
    pub missile: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AsteroidProbe {
    pub entity: Entity,
    pub center: Vec3,
    /// `None` while the model extent is unknown; such asteroids never collide.
    pub radius: Option<f32>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MissileProbe {
    pub entity: Entity,
    pub center: Vec3,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct CollisionReport {
    /// Asteroids overlapping the ship.
    pub asteroid_hits: Vec<Entity>,
    /// `(asteroid, missile)` overlaps.
    pub missile_hits: Vec<(Entity, Entity)>,
}

impl CollisionReport {
    pub fn is_empty(&self) -> bool {
        self.asteroid_hits.is_empty() && self.missile_hits.is_empty()
    }
}

/// What the tick should apply.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Resolution {
    /// Asteroids that damage the ship.
    pub ship_hits: Vec<Entity>,
    /// `(asteroid, missile)` pairs destroyed together.
    pub destroyed: Vec<(Entity, Entity)>,
}

/// Touching spheres count as intersecting.
#[inline]
pub fn spheres_intersect(a_center: Vec3, a_radius: f32, b_center: Vec3, b_radius: f32) -> bool {
    BoundingSphere::new(a_center, a_radius).intersects(&BoundingSphere::new(b_center, b_radius))
}

/// Every ship/asteroid and asteroid/missile overlap. O(asteroids x missiles).
pub fn detect(
    ship: Option<Vec3>,
    asteroids: &[AsteroidProbe],
    missiles: &[MissileProbe],
    radii: CollisionRadii,
) -> CollisionReport {
    let mut report = CollisionReport::default();

    for asteroid in asteroids {
        let Some(radius) = asteroid.radius else {
            continue;
        };

        let hits_ship =
            ship.is_some_and(|ship| spheres_intersect(ship, radii.ship, asteroid.center, radius));
        if hits_ship {
            report.asteroid_hits.push(asteroid.entity);
        }

        for missile in missiles {
            if spheres_intersect(asteroid.center, radius, missile.center, radii.missile) {
                report.missile_hits.push((asteroid.entity, missile.entity));
            }
        }
    }

    report
}

/// Missile hits win: an asteroid shot this tick cannot also hit the ship, and
/// a missile or asteroid is never consumed twice.
pub fn resolve(report: &CollisionReport) -> Resolution {
    let mut spent_asteroids: HashSet<Entity> = HashSet::new();
    let mut spent_missiles: HashSet<Entity> = HashSet::new();
    let mut out = Resolution::default();

    for &(asteroid, missile) in &report.missile_hits {
        if spent_asteroids.contains(&asteroid) || spent_missiles.contains(&missile) {
            continue;
        }
        spent_asteroids.insert(asteroid);
        spent_missiles.insert(missile);
        out.destroyed.push((asteroid, missile));
    }

    for &asteroid in &report.asteroid_hits {
        if !spent_asteroids.insert(asteroid) {
            continue;
        }
        out.ship_hits.push(asteroid);
    }

    out
}
