//! Session plugin: scoring truth, phase transitions and restart.
//!
//! # Single writer
//! `GameState` is only written by gameplay systems (collisions, progress) and
//! by the control systems in this module. Input never touches it directly; it
//! arrives as request messages and is applied here, in `TickSet::Control`,
//! before the gameplay sets run.
//!
//! # Display
//! Nothing here knows about the HUD. Presentation reads `GameState` through
//! change detection and listens to the outcome messages below.

use bevy::prelude::*;

use crate::common::schedule::TickSet;
use crate::common::state::GamePhase;
use crate::common::tunables::Tunables;
use crate::plugins::input::{EndGameRequested, PauseToggled};

mod reset;
mod state;

pub use reset::{SessionReset, restart_session};
pub use state::{Damage, DamageFlash, GameState};

#[cfg(test)]
mod tests;

// -----------------------------------------------------------------------------
// Outcome messages
// -----------------------------------------------------------------------------

/// An asteroid reached the ship.
#[derive(Message, Clone, Copy, Debug)]
pub struct ShipHit {
    pub asteroid: Entity,
    pub lives_left: f32,
}

/// A missile destroyed an asteroid.
#[derive(Message, Clone, Copy, Debug)]
pub struct AsteroidDestroyed {
    pub asteroid: Entity,
    pub missile: Entity,
}

/// Written exactly once per session, on the tick the game ends.
#[derive(Message, Clone, Copy, Debug)]
pub struct GameOverReached {
    pub final_score: f32,
}

// -----------------------------------------------------------------------------
// Plugin wiring
// -----------------------------------------------------------------------------

pub fn plugin(app: &mut App) {
    let tunables = app.world().resource::<Tunables>().clone();

    app.insert_resource(GameState::new(&tunables))
        .insert_resource(DamageFlash::new(tunables.damage_flash_secs))
        .add_message::<ShipHit>()
        .add_message::<AsteroidDestroyed>()
        .add_message::<GameOverReached>();

    app.add_systems(
        Update,
        (apply_pause_requests, apply_end_game_requests, restart_session)
            .chain()
            .in_set(TickSet::Control)
            .run_if(not(in_state(GamePhase::Loading))),
    );

    app.add_systems(
        Update,
        advance_difficulty.in_set(TickSet::Progress),
    );

    app.add_systems(Update, tick_damage_flash.in_set(TickSet::Ambient));
}

/// Record the end of the game: one message, one phase change.
pub fn announce_game_over(
    state: &GameState,
    writer: &mut MessageWriter<GameOverReached>,
    next: &mut NextState<GamePhase>,
) {
    info!("game over; final score {}", state.score().floor());
    writer.write(GameOverReached { final_score: state.score() });
    next.set(GamePhase::GameOver);
}

// -----------------------------------------------------------------------------
// Control
// -----------------------------------------------------------------------------

fn apply_pause_requests(
    mut requests: MessageReader<PauseToggled>,
    mut state: ResMut<GameState>,
    mut next: ResMut<NextState<GamePhase>>,
) {
    let toggles = requests.read().count();
    if toggles == 0 || state.is_over() {
        return;
    }

    let before = state.is_paused();
    for _ in 0..toggles {
        state.toggle_pause();
    }
    if state.is_paused() == before {
        return;
    }

    if state.is_paused() {
        info!("paused");
        next.set(GamePhase::Paused);
    } else {
        info!("resumed");
        next.set(GamePhase::Playing);
    }
}

fn apply_end_game_requests(
    mut requests: MessageReader<EndGameRequested>,
    mut state: ResMut<GameState>,
    mut next: ResMut<NextState<GamePhase>>,
    mut game_over: MessageWriter<GameOverReached>,
) {
    if requests.read().count() == 0 {
        return;
    }
    if state.end_game() {
        announce_game_over(&state, &mut game_over, &mut next);
    }
}

// -----------------------------------------------------------------------------
// Progress
// -----------------------------------------------------------------------------

/// Difficulty ramp: speed grows every tick, score grows with speed.
pub fn advance_difficulty(tunables: Res<Tunables>, mut state: ResMut<GameState>) {
    state.increase_speed(tunables.speed_increment);
    let speed = state.speed();
    state.add_score(speed);
}

fn tick_damage_flash(time: Res<Time>, mut flash: ResMut<DamageFlash>) {
    flash.tick(time.delta());
}
