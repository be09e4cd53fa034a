//! Tick ordering.
//!
//! One frame is one tick. Sets are chained in `Update`; Bevy inserts a command
//! sync point between them, so an entity spawned or recycled in one set is
//! visible to the next.
//!
//! ```text
//! Input -> Control -> [Steer -> Missiles -> Spawn -> Asteroids -> Collisions -> Progress] -> Ambient
//!                     \______________________ GameplaySet _______________________________/
//! ```
//!
//! `GameplaySet` only runs while the phase is `Playing` and the session is
//! neither paused nor over. `Ambient` (black hole, damage flash) always runs.

use bevy::prelude::*;

use crate::common::state::GamePhase;
use crate::plugins::session::GameState;

#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TickSet {
    Input,
    Control,
    Steer,
    Missiles,
    Spawn,
    Asteroids,
    Collisions,
    Progress,
    Ambient,
}

#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameplaySet;

/// Run condition: the session accepts gameplay mutation this tick.
///
/// Checked after `Control`, so a pause or end-game request stops the tick
/// in the same frame it arrives.
pub fn session_running(state: Option<Res<GameState>>) -> bool {
    state.is_some_and(|s| s.is_running())
}

pub fn configure(app: &mut App) {
    app.configure_sets(
        Update,
        (
            TickSet::Input,
            TickSet::Control,
            TickSet::Steer,
            TickSet::Missiles,
            TickSet::Spawn,
            TickSet::Asteroids,
            TickSet::Collisions,
            TickSet::Progress,
            TickSet::Ambient,
        )
            .chain(),
    );

    app.configure_sets(
        Update,
        (
            TickSet::Steer,
            TickSet::Missiles,
            TickSet::Spawn,
            TickSet::Asteroids,
            TickSet::Collisions,
            TickSet::Progress,
        )
            .in_set(GameplaySet),
    );

    app.configure_sets(
        Update,
        GameplaySet
            .run_if(in_state(GamePhase::Playing))
            .run_if(session_running),
    );
}
