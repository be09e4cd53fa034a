//! Session restart.
//!
//! Restart is a whole-world operation: scoring state, spawn clock, ship pose
//! and both pools go back to their starting shape in one place. Running it
//! twice leaves the same world as running it once.

use bevy::ecs::system::SystemParam;
use bevy::prelude::*;

use crate::common::state::GamePhase;
use crate::common::tunables::Tunables;
use crate::plugins::asteroids::{Asteroid, SpawnTimer};
use crate::plugins::input::RestartRequested;
use crate::plugins::player::{ShipTilt, Spaceship};
use crate::plugins::pool::{EntityPool, retire_all};
use crate::plugins::projectiles::Missile;

use super::{DamageFlash, GameState};

/// Everything a restart touches.
#[derive(SystemParam)]
pub struct SessionReset<'w, 's> {
    commands: Commands<'w, 's>,
    tunables: Res<'w, Tunables>,
    state: ResMut<'w, GameState>,
    flash: ResMut<'w, DamageFlash>,
    spawn_timer: ResMut<'w, SpawnTimer>,
    asteroids: ResMut<'w, EntityPool<Asteroid>>,
    missiles: ResMut<'w, EntityPool<Missile>>,
    ship: Query<'w, 's, (&'static mut Transform, &'static mut ShipTilt), With<Spaceship>>,
    next: ResMut<'w, NextState<GamePhase>>,
}

impl SessionReset<'_, '_> {
    pub fn apply(&mut self) {
        self.state.reset(&self.tunables);
        self.flash.clear();
        self.spawn_timer.last_spawn_ms = None;

        if let Ok((mut transform, mut tilt)) = self.ship.single_mut() {
            *tilt = ShipTilt::default();
            transform.translation = Vec3::ZERO;
            transform.rotation = tilt.rotation();
        } else {
            debug!("restart: no spaceship to reposition");
        }

        retire_all(&mut self.asteroids, &mut self.commands);
        retire_all(&mut self.missiles, &mut self.commands);

        self.next.set(GamePhase::Playing);
        info!("session restarted");
    }
}

/// Control system: apply a pending restart request.
pub fn restart_session(mut requests: MessageReader<RestartRequested>, mut reset: SessionReset) {
    if requests.read().count() == 0 {
        return;
    }
    reset.apply();
}
