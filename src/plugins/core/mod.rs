//! Core plugin: shared resources, tick ordering and global settings.
//!
//! Resources are only initialised when absent, so a test app can insert its own
//! `Tunables` or a seeded `GameRng` before registering plugins.

use bevy::prelude::*;

use crate::common::rng::GameRng;
use crate::common::schedule;
use crate::common::tunables::Tunables;

pub fn plugin(app: &mut App) {
    app.init_resource::<Tunables>()
        .init_resource::<GameRng>()
        .insert_resource(ClearColor(Color::BLACK));
    schedule::configure(app);
}
