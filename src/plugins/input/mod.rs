//! Input plugin: keyboard to intents.
//!
//! Held arrows become a `HeldDirections` snapshot for steering. Other keys
//! become request messages; the session and missile systems decide whether a
//! request is honoured. Space fires on press and keeps firing every
//! `Tunables::shot_repeat_secs` while held.
//!
//! | Key            | Intent              |
//! |----------------|---------------------|
//! | Arrows         | `HeldDirections`    |
//! | Space (held)   | `ShootRequested`    |
//! | Escape         | `PauseToggled`      |
//! | Q              | `EndGameRequested`  |
//! | R / Enter      | `RestartRequested`  |
//!
//! `ButtonInput<KeyCode>` is optional so headless apps (no `InputPlugin`) run the
//! same schedule; tests drive `HeldDirections` and the messages directly.

use bevy::prelude::*;

use crate::common::schedule::TickSet;
use crate::common::tunables::Tunables;


/// Direction keys currently held down.
#[derive(Resource, Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeldDirections {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

impl HeldDirections {
    #[inline]
    pub fn any(&self) -> bool {
        self.left || self.right || self.up || self.down
    }
}

/// Auto-fire clock for a held fire key.
#[derive(Resource, Default, Debug, Clone, Copy, PartialEq)]
pub struct ShotRepeat {
    /// Seconds since the last shot; `None` while the key is up.
    since_shot: Option<f32>,
}

impl ShotRepeat {
    /// Advance by `dt` and report whether a shot is due: at once on press, then
    /// every `interval` while held.
    pub fn step(&mut self, held: bool, dt: f32, interval: f32) -> bool {
        if !held {
            self.since_shot = None;
            return false;
        }
        match self.since_shot.as_mut() {
            None => {
                self.since_shot = Some(0.0);
                true
            }
            Some(since) => {
                *since += dt;
                if *since >= interval {
                    *since = 0.0;
                    true
                } else {
                    false
                }
            }
        }
    }
}

#[derive(Message, Clone, Copy, Debug, Default)]
pub struct ShootRequested;

#[derive(Message, Clone, Copy, Debug, Default)]
pub struct PauseToggled;

#[derive(Message, Clone, Copy, Debug, Default)]
pub struct EndGameRequested;

#[derive(Message, Clone, Copy, Debug, Default)]
pub struct RestartRequested;

pub fn plugin(app: &mut App) {
    app.init_resource::<HeldDirections>()
        .init_resource::<ShotRepeat>()
        .add_message::<ShootRequested>()
        .add_message::<PauseToggled>()
        .add_message::<EndGameRequested>()
        .add_message::<RestartRequested>()
        .add_systems(Update, gather_input.in_set(TickSet::Input));
}

#[allow(clippy::too_many_arguments)]
fn gather_input(
    keys: Option<Res<ButtonInput<KeyCode>>>,
    time: Res<Time>,
    tunables: Res<Tunables>,
    mut held: ResMut<HeldDirections>,
    mut repeat: ResMut<ShotRepeat>,
    mut shoot: MessageWriter<ShootRequested>,
    mut pause: MessageWriter<PauseToggled>,
    mut end: MessageWriter<EndGameRequested>,
    mut restart: MessageWriter<RestartRequested>,
) {
    let Some(keys) = keys else {
        return;
    };

    let sampled = sample_directions(&keys);
    if *held != sampled {
        *held = sampled;
    }

    let firing = keys.pressed(KeyCode::Space);
    if repeat.step(firing, time.delta_secs(), tunables.shot_repeat_secs) {
        shoot.write(ShootRequested);
    }
    if keys.just_pressed(KeyCode::Escape) {
        pause.write(PauseToggled);
    }
    if keys.just_pressed(KeyCode::KeyQ) {
        end.write(EndGameRequested);
    }
    if keys.any_just_pressed([KeyCode::KeyR, KeyCode::Enter]) {
        restart.write(RestartRequested);
    }
}

pub fn sample_directions(keys: &ButtonInput<KeyCode>) -> HeldDirections {
    HeldDirections {
        left: keys.pressed(KeyCode::ArrowLeft),
        right: keys.pressed(KeyCode::ArrowRight),
        up: keys.pressed(KeyCode::ArrowUp),
        down: keys.pressed(KeyCode::ArrowDown),
    }
}
