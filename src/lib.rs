//! Space Escape: steer a ship through an asteroid field while a black hole
//! closes in.
//!
//! Integration tests in `tests/` are compiled as separate crates; the library
//! gives them the headless app and every gameplay type to assert against.

pub mod common;
pub mod game;
pub mod plugins;
