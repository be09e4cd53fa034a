//! Game composition root.
//!
//! Provides two public configuration functions:
//! - `configure_full`: includes DefaultPlugins (window/render) + game plugins.
//! - `configure_headless`: minimal configuration for integration tests.

use bevy::log::LogPlugin;
use bevy::prelude::*;
use bevy::window::WindowResolution;

use crate::common::rng::GameRng;
use crate::common::state::GamePhase;
use crate::plugins;

/// Seed used by headless apps so runs are reproducible.
pub const HEADLESS_SEED: u64 = 0x5EED;

pub fn run() {
    App::new().add_plugins(configure_full).run();
}

/// Full configuration for `cargo run`.
///
/// Starts in `Loading`; the asset plugin moves to `Playing` once every model
/// is ready.
pub fn configure_full(app: &mut App) {
    app.add_plugins(
        DefaultPlugins
            .set(WindowPlugin {
                primary_window: Some(Window {
                    title: "Space Escape".into(),
                    resolution: WindowResolution::new(1280, 720),
                    ..default()
                }),
                ..default()
            })
            .set(LogPlugin {
                filter: "warn,space_escape=info".into(),
                ..default()
            }),
    );

    app.init_state::<GamePhase>();
    plugins::register_all(app);
}

/// Headless configuration for integration tests.
///
/// Notes:
/// - Do NOT add DefaultPlugins.
/// - Do NOT add render-only plugins (models/camera/HUD).
/// - No models are loaded, so the app starts directly in `Playing`.
pub fn configure_headless(app: &mut App) {
    app.insert_state(GamePhase::Playing);
    if !app.world().contains_resource::<GameRng>() {
        app.insert_resource(GameRng::seeded(HEADLESS_SEED));
    }
    plugins::register_gameplay(app);
}
