//! Feature plugins.

use bevy::prelude::*;

pub mod asteroids;
pub mod black_hole;
pub mod collision;
pub mod core;
pub mod input;
pub mod player;
pub mod pool;
pub mod projectiles;
pub mod session;

// Render-only
pub mod assets;
pub mod camera;
pub mod hud;
pub mod lighting;

/// Register gameplay plugins that work in headless tests.
///
/// Order matters: `core` provides `Tunables`, which later plugins read while
/// registering.
pub fn register_gameplay(app: &mut App) {
    core::plugin(app);
    input::plugin(app);
    session::plugin(app);
    player::plugin(app);
    projectiles::plugin(app);
    asteroids::plugin(app);
    collision::plugin(app);
    black_hole::plugin(app);
}

/// Register render-only plugins (requires DefaultPlugins / render infra).
pub fn register_render(app: &mut App) {
    assets::plugin(app);
    camera::plugin(app);
    lighting::plugin(app);
    hud::plugin(app);
}

/// Register all plugins (full app).
pub fn register_all(app: &mut App) {
    register_gameplay(app);
    register_render(app);
}
