//! Model loading (render-only).
//!
//! ```text
//! Startup:            load every glTF into ModelCache
//! Update / Loading:   all loaded? -> measure asteroid extents -> ModelExtents
//!                                 -> dress ship + black hole -> Playing
//! Update (any phase): dress missiles and (re)dress asteroids whose variant changed
//! ```
//!
//! Gameplay never waits on this module: it only sees `ModelExtents`, which stays
//! empty in headless apps.

use bevy::asset::LoadState;
use bevy::gltf::{Gltf, GltfMesh, GltfNode};
use bevy::math::Affine3A;
use bevy::mesh::VertexAttributeValues;
use bevy::platform::collections::HashSet;
use bevy::prelude::*;

use crate::common::state::GamePhase;
use crate::common::tunables::Tunables;
use crate::plugins::asteroids::{AsteroidVariant, ModelExtents};
use crate::plugins::black_hole::BlackHoleModel;
use crate::plugins::player::Spaceship;
use crate::plugins::projectiles::Missile;


const SHIP_MODEL: &str = "models/interstellar_ranger_one/scene.gltf";
const BLACK_HOLE_MODEL: &str = "models/blackhole/scene.gltf";
const ASTEROID_SMALL_MODEL: &str = "models/asteroid_01/scene.gltf";
const ASTEROID_REGULAR_MODEL: &str = "models/asteroid/scene.gltf";
const ASTEROID_LARGE_MODEL: &str = "models/asteroid_02/scene.gltf";

const SHIP_MODEL_SCALE: f32 = 0.3;

/// Handles for every model, loaded once and shared by all entities.
#[derive(Resource, Debug, Clone)]
pub struct ModelCache {
    pub ship: Handle<Gltf>,
    pub black_hole: Handle<Gltf>,
    pub asteroid_small: Handle<Gltf>,
    pub asteroid_regular: Handle<Gltf>,
    pub asteroid_large: Handle<Gltf>,
    pub missile_mesh: Handle<Mesh>,
    pub missile_material: Handle<StandardMaterial>,
}

impl ModelCache {
    pub fn asteroid(&self, variant: AsteroidVariant) -> &Handle<Gltf> {
        match variant {
            AsteroidVariant::Small => &self.asteroid_small,
            AsteroidVariant::Regular => &self.asteroid_regular,
            AsteroidVariant::Large => &self.asteroid_large,
        }
    }

    fn gltf_handles(&self) -> [&Handle<Gltf>; 5] {
        [
            &self.ship,
            &self.black_hole,
            &self.asteroid_small,
            &self.asteroid_regular,
            &self.asteroid_large,
        ]
    }
}

/// Fraction of models ready, for the loading screen.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq)]
pub struct LoadProgress(pub f32);

pub fn plugin(app: &mut App) {
    app.init_resource::<LoadProgress>()
        .add_systems(Startup, load_models)
        .add_systems(
            Update,
            finish_loading.run_if(in_state(GamePhase::Loading)),
        )
        .add_systems(Update, (dress_missiles, dress_asteroids));
}

fn load_models(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    tunables: Res<Tunables>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    commands.insert_resource(ModelCache {
        ship: asset_server.load(SHIP_MODEL),
        black_hole: asset_server.load(BLACK_HOLE_MODEL),
        asteroid_small: asset_server.load(ASTEROID_SMALL_MODEL),
        asteroid_regular: asset_server.load(ASTEROID_REGULAR_MODEL),
        asteroid_large: asset_server.load(ASTEROID_LARGE_MODEL),
        missile_mesh: meshes.add(Sphere::new(tunables.missile_radius)),
        missile_material: materials.add(StandardMaterial {
            base_color: Color::srgb(1.0, 0.0, 0.0),
            emissive: LinearRgba::rgb(0.5, 0.0, 0.0),
            ..default()
        }),
    });
}

/// Axis-aligned size of a point cloud.
pub fn extent_of(points: impl IntoIterator<Item = Vec3>) -> Option<Vec3> {
    let mut points = points.into_iter();
    let first = points.next()?;
    let (min, max) = points.fold((first, first), |(min, max), p| (min.min(p), max.max(p)));
    Some(max - min)
}

/// Model-space transform of every node reachable from `roots`, parents applied
/// before children. Keys `node` cannot resolve are skipped.
fn place_nodes<K>(
    roots: impl IntoIterator<Item = K>,
    node: impl Fn(&K) -> Option<(Transform, Vec<K>)>,
) -> Vec<(K, Affine3A)> {
    let mut placed = Vec::new();
    let mut stack: Vec<(K, Affine3A)> =
        roots.into_iter().map(|k| (k, Affine3A::IDENTITY)).collect();

    while let Some((key, parent)) = stack.pop() {
        let Some((local, children)) = node(&key) else {
            continue;
        };
        let to_model = parent * local.compute_affine();
        stack.extend(children.into_iter().map(|child| (child, to_model)));
        placed.push((key, to_model));
    }
    placed
}

/// Size of a glTF as its scene draws it: every mesh primitive moved through its
/// node chain before measuring.
fn gltf_extent(
    gltf: &Gltf,
    nodes: &Assets<GltfNode>,
    gltf_meshes: &Assets<GltfMesh>,
    meshes: &Assets<Mesh>,
) -> Option<Vec3> {
    let children: HashSet<AssetId<GltfNode>> = gltf
        .nodes
        .iter()
        .filter_map(|h| nodes.get(h))
        .flat_map(|n| n.children.iter().map(Handle::id))
        .collect();
    let roots = gltf.nodes.iter().filter(|h| !children.contains(&h.id())).cloned();

    let placed = place_nodes(roots, |h: &Handle<GltfNode>| {
        nodes.get(h).map(|n| (n.transform, n.children.clone()))
    });

    let mut points = Vec::new();
    for (handle, to_model) in placed {
        let Some(gltf_mesh) = nodes
            .get(&handle)
            .and_then(|n| n.mesh.as_ref())
            .and_then(|m| gltf_meshes.get(m))
        else {
            continue;
        };
        for mesh in gltf_mesh.primitives.iter().filter_map(|prim| meshes.get(&prim.mesh)) {
            if let Some(VertexAttributeValues::Float32x3(ps)) = mesh.attribute(Mesh::ATTRIBUTE_POSITION) {
                points.extend(ps.iter().map(|p| to_model.transform_point3(Vec3::from_array(*p))));
            }
        }
    }

    extent_of(points)
}

fn first_scene(gltf: &Gltf) -> Option<Handle<Scene>> {
    gltf.default_scene.clone().or_else(|| gltf.scenes.first().cloned())
}

#[allow(clippy::too_many_arguments)]
fn finish_loading(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    cache: Option<Res<ModelCache>>,
    gltfs: Res<Assets<Gltf>>,
    gltf_nodes: Res<Assets<GltfNode>>,
    gltf_meshes: Res<Assets<GltfMesh>>,
    meshes: Res<Assets<Mesh>>,
    mut progress: ResMut<LoadProgress>,
    mut extents: ResMut<ModelExtents>,
    q_ship: Query<Entity, With<Spaceship>>,
    q_hole_model: Query<Entity, With<BlackHoleModel>>,
    mut next: ResMut<NextState<GamePhase>>,
) {
    let Some(cache) = cache else {
        return;
    };

    let handles = cache.gltf_handles();
    let mut settled = 0;
    for h in handles {
        if asset_server.is_loaded_with_dependencies(h) {
            settled += 1;
        } else if matches!(asset_server.load_state(h), LoadState::Failed(_)) {
            warn!("failed to load model {:?}", h.path());
            settled += 1;
        }
    }
    progress.0 = settled as f32 / handles.len() as f32;
    if settled < handles.len() {
        return;
    }

    for variant in AsteroidVariant::ALL {
        let extent = gltfs
            .get(cache.asteroid(variant))
            .and_then(|gltf| gltf_extent(gltf, &gltf_nodes, &gltf_meshes, &meshes));
        match extent {
            Some(ext) => extents.set(variant, ext),
            None => warn!("no extent for {variant:?} asteroid; it will not collide"),
        }
    }

    if let Some(scene) = gltfs.get(&cache.ship).and_then(first_scene) {
        for ship in &q_ship {
            commands.entity(ship).with_child((
                SceneRoot(scene.clone()),
                Transform::from_scale(Vec3::splat(SHIP_MODEL_SCALE)),
            ));
        }
    }
    if let Some(scene) = gltfs.get(&cache.black_hole).and_then(first_scene) {
        for model in &q_hole_model {
            commands.entity(model).insert(SceneRoot(scene.clone()));
        }
    }

    info!("models loaded");
    next.set(GamePhase::Playing);
}

fn dress_missiles(
    mut commands: Commands,
    cache: Option<Res<ModelCache>>,
    q: Query<Entity, Added<Missile>>,
) {
    let Some(cache) = cache else {
        return;
    };
    for e in &q {
        commands.entity(e).insert((
            Mesh3d(cache.missile_mesh.clone()),
            MeshMaterial3d(cache.missile_material.clone()),
        ));
    }
}

fn dress_asteroids(
    mut commands: Commands,
    cache: Option<Res<ModelCache>>,
    gltfs: Res<Assets<Gltf>>,
    q: Query<(Entity, &AsteroidVariant, Option<&SceneRoot>), Changed<AsteroidVariant>>,
) {
    let Some(cache) = cache else {
        return;
    };
    for (e, variant, current) in &q {
        let Some(scene) = gltfs.get(cache.asteroid(*variant)).and_then(first_scene) else {
            continue;
        };
        if current.is_some_and(|root| root.0 == scene) {
            continue;
        }
        commands.entity(e).insert(SceneRoot(scene));
    }
}
