use bevy::prelude::*;

use crate::plugins::pool::PoolKind;

/// A missile in flight (or parked in its pool).
#[derive(Component, Debug, Clone, Copy)]
pub struct Missile {
    /// World units per tick.
    pub velocity: Vec3,
}

impl Missile {
    pub fn toward_horizon(speed: f32) -> Self {
        Self { velocity: Vec3::NEG_Z * speed }
    }
}

impl PoolKind for Missile {
    const LABEL: &'static str = "Missile";
    const PARKING: Vec3 = Vec3::new(0.0, 0.0, 1000.0);
}

/// Components every missile entity carries, parked or not.
pub fn missile_bundle(speed: f32) -> impl Bundle {
    (
        Name::new("Missile"),
        Missile::toward_horizon(speed),
        Transform::from_translation(Missile::PARKING),
        Visibility::Hidden,
    )
}
