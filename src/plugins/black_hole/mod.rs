//! Black hole: the backdrop that creeps closer as the score rises.
//!
//! Runs in `TickSet::Ambient`, so it keeps drifting while paused and after the
//! game is over. Position and model scale are pure functions of score and the
//! previous position.

use std::f32::consts::PI;

use bevy::prelude::*;

use crate::common::schedule::TickSet;
use crate::plugins::session::GameState;


pub const START_Z: f32 = -100.0;
/// Furthest the hole advances, in world units from `START_Z`.
pub const MAX_ADVANCE: f32 = 50.0;
const SCORE_PER_UNIT: f32 = 100.0;
const APPROACH_RATE: f32 = 0.005;
const BASE_SCALE: f32 = 5.0;

#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct BlackHole {
    pub target_z: f32,
}

impl Default for BlackHole {
    fn default() -> Self {
        Self { target_z: START_Z }
    }
}

/// Child entity carrying the visible model; scaled with distance.
#[derive(Component, Debug)]
pub struct BlackHoleModel;

pub fn plugin(app: &mut App) {
    app.add_systems(Startup, spawn)
        .add_systems(Update, drift_black_hole.in_set(TickSet::Ambient));
}

/// Accretion disk facing the camera with a slight tilt.
pub fn model_rotation() -> Quat {
    Quat::from_euler(EulerRot::XYZ, PI / 10.0, PI / 10.0, -PI / 8.0)
}

#[inline]
pub fn target_z(score: f32) -> f32 {
    START_Z + (score / SCORE_PER_UNIT).min(MAX_ADVANCE)
}

#[inline]
pub fn approach(z: f32, target: f32) -> f32 {
    z + (target - z) * APPROACH_RATE
}

#[inline]
pub fn model_scale(z: f32) -> f32 {
    let near_z = START_Z + MAX_ADVANCE;
    BASE_SCALE * (1.0 + ((near_z - z) / near_z) * 0.5)
}

fn spawn(mut commands: Commands) {
    commands
        .spawn((
            Name::new("BlackHole"),
            BlackHole::default(),
            Transform::from_xyz(0.0, 0.0, START_Z),
            Visibility::Visible,
        ))
        .with_children(|parent| {
            parent.spawn((
                Name::new("BlackHoleModel"),
                BlackHoleModel,
                Transform::from_rotation(model_rotation())
                    .with_scale(Vec3::splat(model_scale(START_Z))),
                Visibility::Inherited,
            ));
        });
}

pub fn drift_black_hole(
    state: Res<GameState>,
    mut q_hole: Query<(&mut BlackHole, &mut Transform, &Children), Without<BlackHoleModel>>,
    mut q_model: Query<&mut Transform, With<BlackHoleModel>>,
) {
    let Ok((mut hole, mut tf, children)) = q_hole.single_mut() else {
        debug!("drift: no black hole");
        return;
    };

    hole.target_z = target_z(state.score());
    tf.translation.z = approach(tf.translation.z, hole.target_z);

    let scale = Vec3::splat(model_scale(tf.translation.z));
    let mut models = q_model.iter_many_mut(children);
    while let Some(mut model) = models.fetch_next() {
        model.scale = scale;
    }
}
