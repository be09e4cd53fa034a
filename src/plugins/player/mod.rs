//! Player plugin: the spaceship.
//!
//! The ship lives on the `z = 0` plane and is steered with held arrows. Each
//! held direction is a discrete step that is only taken when it lands inside
//! the visible rectangle; the pose is clamped afterwards so a window resize
//! cannot leave the ship outside.
//!
//! Banking is cosmetic. Tilt eases toward the last requested direction and
//! back to neutral when nothing is held.

use std::f32::consts::PI;

use bevy::prelude::*;

use crate::common::schedule::TickSet;
use crate::common::tunables::Tunables;
use crate::plugins::input::HeldDirections;


const MAX_TILT: f32 = PI / 12.0;
const TILT_EASE: f32 = 0.1;

#[derive(Component, Debug)]
pub struct Spaceship;

/// Banking angles in radians. `side` rolls around Z, `vertical` pitches around X.
#[derive(Component, Debug, Default, Clone, Copy, PartialEq)]
pub struct ShipTilt {
    pub side: f32,
    pub vertical: f32,
}

impl ShipTilt {
    /// Ship orientation: nose toward -Z, then banked.
    pub fn rotation(&self) -> Quat {
        Quat::from_euler(EulerRot::XYZ, self.vertical, PI, self.side)
    }

    fn ease(&mut self, side_target: f32, vertical_target: f32) {
        self.side += (side_target - self.side) * TILT_EASE;
        self.vertical += (vertical_target - self.vertical) * TILT_EASE;
    }
}

/// Current window aspect ratio (width / height).
///
/// Written by the camera plugin from the primary window; headless apps keep
/// the default.
#[derive(Resource, Debug, Clone, Copy)]
pub struct Viewport {
    pub aspect: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self { aspect: 16.0 / 9.0 }
    }
}

/// Axis-aligned rectangle the ship may occupy on the `z = 0` plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewBounds {
    pub half_width: f32,
    pub half_height: f32,
}

impl ViewBounds {
    /// Visible rectangle at `distance` in front of a perspective camera,
    /// shrunk by `margin`.
    pub fn from_view(aspect: f32, fov_degrees: f32, distance: f32, margin: f32) -> Self {
        let height = 2.0 * (fov_degrees.to_radians() / 2.0).tan() * distance;
        let width = height * aspect;
        Self {
            half_width: width * margin / 2.0,
            half_height: height * margin / 2.0,
        }
    }

    pub fn from_tunables(tunables: &Tunables, viewport: &Viewport) -> Self {
        Self::from_view(
            viewport.aspect,
            tunables.camera_fov_degrees,
            tunables.camera_distance,
            tunables.viewport_margin,
        )
    }

    #[inline]
    pub fn contains(&self, p: Vec2) -> bool {
        p.x.abs() <= self.half_width && p.y.abs() <= self.half_height
    }

    #[inline]
    pub fn clamp(&self, p: Vec2) -> Vec2 {
        Vec2::new(
            p.x.clamp(-self.half_width, self.half_width),
            p.y.clamp(-self.half_height, self.half_height),
        )
    }
}

pub fn plugin(app: &mut App) {
    app.init_resource::<Viewport>()
        .add_systems(Startup, spawn)
        .add_systems(Update, steer_ship.in_set(TickSet::Steer));
}

fn spawn(mut commands: Commands) {
    let tilt = ShipTilt::default();
    commands.spawn((
        Name::new("Spaceship"),
        Spaceship,
        tilt,
        Transform::from_rotation(tilt.rotation()),
        Visibility::Visible,
    ));
}

/// One step per held direction, then clamp.
pub fn step_position(pos: Vec2, held: &HeldDirections, step: f32, bounds: &ViewBounds) -> Vec2 {
    let moves = [
        (held.left, Vec2::NEG_X),
        (held.right, Vec2::X),
        (held.up, Vec2::Y),
        (held.down, Vec2::NEG_Y),
    ];

    let mut pos = pos;
    for (_, dir) in moves.iter().filter(|(on, _)| *on) {
        let next = pos + *dir * step;
        if bounds.contains(next) {
            pos = next;
        }
    }
    bounds.clamp(pos)
}

/// Ease the bank angles for one tick of held input.
pub fn step_tilt(tilt: &mut ShipTilt, held: &HeldDirections) {
    if !held.any() {
        tilt.ease(0.0, 0.0);
        return;
    }
    if held.left {
        tilt.ease(-MAX_TILT, 0.0);
    }
    if held.right {
        tilt.ease(MAX_TILT, 0.0);
    }
    if held.up {
        tilt.ease(0.0, MAX_TILT);
    }
    if held.down {
        tilt.ease(0.0, -MAX_TILT);
    }
}

fn steer_ship(
    tunables: Res<Tunables>,
    viewport: Res<Viewport>,
    held: Res<HeldDirections>,
    mut q_ship: Query<(&mut Transform, &mut ShipTilt), With<Spaceship>>,
) {
    let Ok((mut transform, mut tilt)) = q_ship.single_mut() else {
        debug!("steer: no spaceship");
        return;
    };

    let bounds = ViewBounds::from_tunables(&tunables, &viewport);
    let pos = step_position(transform.translation.truncate(), &held, tunables.ship_step, &bounds);
    transform.translation = pos.extend(0.0);

    step_tilt(&mut tilt, &held);
    transform.rotation = tilt.rotation();
}
