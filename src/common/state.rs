//! Global state machine.
//!
//! ```text
//! Loading ──(models ready)──> Playing <──(Escape)──> Paused
//!                               │
//!                  (lives <= 0 / Q)
//!                               v
//!                            GameOver ──(restart)──> Playing
//! ```
//!
//! Headless apps skip `Loading` and start in `Playing`.

use bevy::prelude::*;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, States, Default)]
pub enum GamePhase {
    #[default]
    Loading,
    Playing,
    Paused,
    GameOver,
}
