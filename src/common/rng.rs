//! Session random source.
//!
//! Spawn positions, asteroid variants and spin rates all draw from one
//! resource so tests can pin the sequence with a seed.

use bevy::prelude::*;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

#[derive(Resource, Debug, Deref, DerefMut)]
pub struct GameRng(pub SmallRng);

impl GameRng {
    pub fn from_os() -> Self {
        Self(SmallRng::from_os_rng())
    }

    pub fn seeded(seed: u64) -> Self {
        Self(SmallRng::seed_from_u64(seed))
    }

    /// Uniform in `[-half, half)`.
    #[inline]
    pub fn centered(&mut self, span: f32) -> f32 {
        (self.0.random::<f32>() - 0.5) * span
    }
}

impl Default for GameRng {
    fn default() -> Self {
        Self::from_os()
    }
}
