//! Tunable gameplay constants.
//!
//! Distances are world units, per-tick rates are applied once per frame.

use bevy::prelude::*;

#[derive(Resource, Debug, Clone)]
pub struct Tunables {
    // Session
    pub starting_lives: f32,
    pub starting_speed: f32,
    pub speed_increment: f32,
    pub hit_damage: f32,
    pub missile_bonus: f32,
    pub damage_flash_secs: f32,

    // Pools
    pub pool_size: usize,
    pub max_asteroids: usize,

    // Spawn controller
    pub min_spawn_interval_ms: f64,
    pub spawn_score_divisor: f64,
    pub floor_spawn_interval_ms: f64,
    pub spawn_spread: f32,
    pub asteroid_spawn_z: f32,
    pub asteroid_cull_z: f32,

    // Missiles
    pub missile_speed: f32,
    pub missile_muzzle_offset: f32,
    pub missile_cull_z: f32,
    /// Seconds between shots while the fire key stays held.
    pub shot_repeat_secs: f32,

    // Collision
    pub ship_radius: f32,
    pub missile_radius: f32,

    // Spaceship / viewport
    pub ship_step: f32,
    pub camera_fov_degrees: f32,
    pub camera_distance: f32,
    pub viewport_margin: f32,
}

impl Default for Tunables {
    fn default() -> Self {
        Self {
            starting_lives: 3.0,
            starting_speed: 0.1,
            speed_increment: 0.0001,
            hit_damage: 0.5,
            missile_bonus: 100.0,
            damage_flash_secs: 0.15,

            pool_size: 30,
            max_asteroids: 20,

            min_spawn_interval_ms: 800.0,
            spawn_score_divisor: 10_000.0,
            floor_spawn_interval_ms: 200.0,
            spawn_spread: 15.0,
            asteroid_spawn_z: -100.0,
            asteroid_cull_z: 10.0,

            missile_speed: 1.0,
            missile_muzzle_offset: 1.0,
            missile_cull_z: -100.0,
            shot_repeat_secs: 0.1,

            ship_radius: 0.5,
            missile_radius: 0.1,

            ship_step: 0.1,
            camera_fov_degrees: 75.0,
            camera_distance: 5.0,
            viewport_margin: 0.8,
        }
    }
}
