//! Lighting plugin (render-only).
//!
//! A soft key light for the ship and asteroids, plus three warm point lights
//! ringing the black hole so they follow it as it drifts.

use std::f32::consts::TAU;

use bevy::prelude::*;

use crate::plugins::black_hole::BlackHole;

const RING_RADIUS: f32 = 10.0;
const RING_RANGE: f32 = 50.0;
const RING_INTENSITY: f32 = 2_000_000.0;

const RING_COLORS: [Color; 3] = [
    Color::srgb(1.0, 0.843, 0.0),
    Color::srgb(1.0, 0.549, 0.0),
    Color::srgb(1.0, 1.0, 0.0),
];

#[derive(Component)]
pub struct BlackHoleLight;

pub fn plugin(app: &mut App) {
    app.add_systems(Startup, spawn_key_light)
        .add_systems(Update, ring_black_hole);
}

fn spawn_key_light(mut commands: Commands) {
    commands.spawn((
        Name::new("KeyLight"),
        DirectionalLight {
            illuminance: 8_000.0,
            ..default()
        },
        Transform::from_xyz(1.0, 1.0, 1.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
}

fn ring_black_hole(mut commands: Commands, q: Query<Entity, Added<BlackHole>>) {
    for hole in &q {
        for (i, color) in RING_COLORS.into_iter().enumerate() {
            let angle = i as f32 * TAU / 3.0;
            commands.spawn((
                Name::new("BlackHoleLight"),
                BlackHoleLight,
                PointLight {
                    color,
                    intensity: RING_INTENSITY,
                    range: RING_RANGE,
                    ..default()
                },
                Transform::from_xyz(angle.cos() * RING_RADIUS, angle.sin() * RING_RADIUS, 0.0),
                ChildOf(hole),
            ));
        }
    }
}
