//! Camera plugin (render-only).
//!
//! Fixed perspective camera looking down -Z from just behind the ship. The
//! primary window's aspect ratio is mirrored into `Viewport`, which steering
//! uses to size the ship's bounds.

use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::common::tunables::Tunables;
use crate::plugins::player::Viewport;


#[derive(Component)]
pub struct MainCamera;

pub fn plugin(app: &mut App) {
    app.add_systems(Startup, spawn_camera)
        .add_systems(PreUpdate, sync_viewport);
}

fn spawn_camera(mut commands: Commands, tunables: Res<Tunables>) {
    commands.spawn((
        Name::new("MainCamera"),
        MainCamera,
        Camera3d::default(),
        Projection::from(PerspectiveProjection {
            fov: tunables.camera_fov_degrees.to_radians(),
            near: 0.1,
            far: 1000.0,
            ..default()
        }),
        Transform::from_xyz(0.0, 0.0, tunables.camera_distance),
    ));
}

/// Width over height, or `None` for a degenerate (minimised) window.
pub fn aspect_of(width: f32, height: f32) -> Option<f32> {
    (width > 0.0 && height > 0.0).then(|| width / height)
}

fn sync_viewport(
    q_window: Query<&Window, With<PrimaryWindow>>,
    mut viewport: ResMut<Viewport>,
) {
    let Ok(window) = q_window.single() else {
        return;
    };
    let Some(aspect) = aspect_of(window.width(), window.height()) else {
        return;
    };
    if viewport.aspect != aspect {
        viewport.aspect = aspect;
    }
}
