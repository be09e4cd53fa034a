//! Session value object.
//!
//! `GameState` holds the scoring truth and nothing else: no entity handles, no
//! display code. Mutators report what happened so the caller decides which
//! messages to write and which phase to enter.

use bevy::prelude::*;

use crate::common::tunables::Tunables;

/// Outcome of [`GameState::lose_life`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Damage {
    Survived,
    /// This hit ended the game.
    GameOver,
    /// The game was already over before this hit.
    AlreadyOver,
}

#[derive(Resource, Debug, Clone, PartialEq)]
pub struct GameState {
    score: f32,
    lives: f32,
    speed: f32,
    paused: bool,
    over: bool,
}

impl GameState {
    pub fn new(tunables: &Tunables) -> Self {
        Self {
            score: 0.0,
            lives: tunables.starting_lives,
            speed: tunables.starting_speed,
            paused: false,
            over: false,
        }
    }

    pub fn reset(&mut self, tunables: &Tunables) {
        *self = Self::new(tunables);
    }

    #[inline]
    pub fn score(&self) -> f32 {
        self.score
    }

    #[inline]
    pub fn lives(&self) -> f32 {
        self.lives
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.speed
    }

    #[inline]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    #[inline]
    pub fn is_over(&self) -> bool {
        self.over
    }

    /// Gameplay may mutate the world this tick.
    #[inline]
    pub fn is_running(&self) -> bool {
        !self.paused && !self.over
    }

    /// Score only grows; negative or NaN amounts are ignored.
    pub fn add_score(&mut self, amount: f32) {
        if amount > 0.0 {
            self.score += amount;
        }
    }

    pub fn increase_speed(&mut self, amount: f32) {
        if amount > 0.0 {
            self.speed += amount;
        }
    }

    pub fn lose_life(&mut self, amount: f32) -> Damage {
        self.lives -= amount;
        if self.over {
            return Damage::AlreadyOver;
        }
        if self.lives <= 0.0 {
            self.over = true;
            Damage::GameOver
        } else {
            Damage::Survived
        }
    }

    /// Flip the pause flag. Ignored once the game is over.
    ///
    /// Returns the new paused value.
    pub fn toggle_pause(&mut self) -> bool {
        if !self.over {
            self.paused = !self.paused;
        }
        self.paused
    }

    /// Explicit end-game request. Returns `true` if this call ended the game.
    pub fn end_game(&mut self) -> bool {
        let was_over = self.over;
        self.over = true;
        !was_over
    }
}

/// Short visual feedback after the ship is hit.
///
/// Re-arming while active is ignored, so a burst of hits produces one flash.
#[derive(Resource, Debug, Clone)]
pub struct DamageFlash {
    timer: Timer,
    active: bool,
}

impl DamageFlash {
    pub fn new(secs: f32) -> Self {
        Self { timer: Timer::from_seconds(secs, TimerMode::Once), active: false }
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Returns `true` if the flash started on this call.
    pub fn trigger(&mut self) -> bool {
        if self.active {
            return false;
        }
        self.timer.reset();
        self.active = true;
        true
    }

    pub fn tick(&mut self, delta: std::time::Duration) {
        if !self.active {
            return;
        }
        self.timer.tick(delta);
        if self.timer.is_finished() {
            self.active = false;
        }
    }

    pub fn clear(&mut self) {
        self.timer.reset();
        self.active = false;
    }
}
