//! Spawn pacing.
//!
//! The interval shrinks linearly with score and never drops below the floor:
//!
//! ```text
//! interval(score) = max(min_interval * (1 - score / divisor), floor)
//! ```

use bevy::prelude::*;

use crate::common::tunables::Tunables;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnSchedule {
    pub min_interval_ms: f64,
    pub score_divisor: f64,
    pub floor_interval_ms: f64,
}

impl SpawnSchedule {
    pub fn from_tunables(t: &Tunables) -> Self {
        Self {
            min_interval_ms: t.min_spawn_interval_ms,
            score_divisor: t.spawn_score_divisor,
            floor_interval_ms: t.floor_spawn_interval_ms,
        }
    }

    pub fn adjusted_interval(&self, score: f32) -> f64 {
        let shrunk = self.min_interval_ms * (1.0 - f64::from(score) / self.score_divisor);
        shrunk.max(self.floor_interval_ms)
    }

    /// Whether a new asteroid is due at `now_ms`.
    ///
    /// Negative or NaN elapsed time never spawns.
    pub fn should_spawn(
        &self,
        now_ms: f64,
        last_spawn_ms: f64,
        score: f32,
        active: usize,
        max_active: usize,
    ) -> bool {
        if active >= max_active {
            return false;
        }
        let elapsed = now_ms - last_spawn_ms;
        if elapsed.is_nan() || elapsed < 0.0 {
            return false;
        }
        elapsed > self.adjusted_interval(score)
    }
}

/// When the last asteroid spawned. `None` until the first spawn of a session,
/// which is then due immediately.
#[derive(Resource, Debug, Default, Clone, Copy)]
pub struct SpawnTimer {
    pub last_spawn_ms: Option<f64>,
}

impl SpawnTimer {
    #[inline]
    pub fn last_or_never(&self) -> f64 {
        self.last_spawn_ms.unwrap_or(f64::NEG_INFINITY)
    }
}
