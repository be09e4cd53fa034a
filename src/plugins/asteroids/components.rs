use std::f32::consts::PI;

use bevy::prelude::*;
use rand::Rng;

use crate::common::rng::GameRng;
use crate::plugins::pool::PoolKind;

/// Model scale an asteroid starts from at the spawn plane.
pub const START_SCALE: f32 = 0.01;

const BASE_SIZE_MIN: f32 = 0.05;
const BASE_SIZE_SPAN: f32 = 0.1;
const SPIN_SPAN: f32 = 0.01;

/// Which asteroid model an entity shows. Each model has its own size factor.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AsteroidVariant {
    Small,
    Regular,
    Large,
}

impl AsteroidVariant {
    pub const ALL: [Self; 3] = [Self::Small, Self::Regular, Self::Large];

    #[inline]
    pub fn scale_factor(self) -> f32 {
        match self {
            Self::Small => 0.15,
            Self::Regular => 1.0,
            Self::Large => 5.0,
        }
    }
}

#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Asteroid {
    /// Scale reached at the cull plane.
    pub target_scale: f32,
    /// Euler XYZ radians added each tick.
    pub spin: Vec3,
    /// Current Euler XYZ radians.
    pub orientation: Vec3,
    /// Current uniform scale.
    pub scale: f32,
}

impl Default for Asteroid {
    fn default() -> Self {
        Self {
            target_scale: BASE_SIZE_MIN,
            spin: Vec3::ZERO,
            orientation: Vec3::ZERO,
            scale: START_SCALE,
        }
    }
}

impl Asteroid {
    /// Roll a fresh asteroid: base size, model, spin and starting orientation.
    pub fn roll(rng: &mut GameRng) -> (Self, AsteroidVariant) {
        let base_size = rng.random::<f32>() * BASE_SIZE_SPAN + BASE_SIZE_MIN;
        let variant = AsteroidVariant::ALL[rng.random_range(0..AsteroidVariant::ALL.len())];
        let spin = Vec3::new(
            rng.centered(SPIN_SPAN),
            rng.centered(SPIN_SPAN),
            rng.centered(SPIN_SPAN),
        );
        let orientation = Vec3::new(
            rng.random::<f32>() * PI,
            rng.random::<f32>() * PI,
            rng.random::<f32>() * PI,
        );

        let asteroid = Self {
            target_scale: base_size * variant.scale_factor(),
            spin,
            orientation,
            scale: START_SCALE,
        };
        (asteroid, variant)
    }

    /// Grow from `START_SCALE` toward `target_scale` as `progress` goes 0 -> 1.
    pub fn grow(&mut self, progress: f32) {
        let t = progress.clamp(0.0, 1.0);
        self.scale = START_SCALE + (self.target_scale - START_SCALE) * t;
    }

    #[inline]
    pub fn rotation(&self) -> Quat {
        Quat::from_euler(EulerRot::XYZ, self.orientation.x, self.orientation.y, self.orientation.z)
    }

    /// Bounding-sphere radius for a model of model-space size `extent`: half the
    /// largest side of the box after rotating it to the current orientation.
    pub fn collision_radius(&self, extent: Vec3) -> f32 {
        let half = extent * 0.5;
        let rotation = self.rotation();
        let reach = (0..8u8)
            .map(|corner| {
                let sign = Vec3::new(
                    if corner & 1 == 0 { -1.0 } else { 1.0 },
                    if corner & 2 == 0 { -1.0 } else { 1.0 },
                    if corner & 4 == 0 { -1.0 } else { 1.0 },
                );
                (rotation * (half * sign)).abs()
            })
            .fold(Vec3::ZERO, Vec3::max);
        reach.max_element() * self.scale
    }
}

impl PoolKind for Asteroid {
    const LABEL: &'static str = "Asteroid";
    const PARKING: Vec3 = Vec3::new(0.0, 0.0, -1000.0);
}

/// Components every asteroid entity carries, parked or not.
pub fn asteroid_bundle() -> impl Bundle {
    (
        Name::new("Asteroid"),
        Asteroid::default(),
        AsteroidVariant::Regular,
        Transform::from_translation(Asteroid::PARKING),
        Visibility::Hidden,
    )
}

/// Model-space size per variant (node transforms applied, entity scale not),
/// known once the models are loaded.
///
/// Asteroids whose variant has no extent yet are ignored by collision.
#[derive(Resource, Debug, Default, Clone)]
pub struct ModelExtents {
    pub small: Option<Vec3>,
    pub regular: Option<Vec3>,
    pub large: Option<Vec3>,
}

impl ModelExtents {
    pub fn uniform(extent: Vec3) -> Self {
        Self { small: Some(extent), regular: Some(extent), large: Some(extent) }
    }

    pub fn get(&self, variant: AsteroidVariant) -> Option<Vec3> {
        match variant {
            AsteroidVariant::Small => self.small,
            AsteroidVariant::Regular => self.regular,
            AsteroidVariant::Large => self.large,
        }
    }

    pub fn set(&mut self, variant: AsteroidVariant, extent: Vec3) {
        let slot = match variant {
            AsteroidVariant::Small => &mut self.small,
            AsteroidVariant::Regular => &mut self.regular,
            AsteroidVariant::Large => &mut self.large,
        };
        *slot = Some(extent);
    }
}
