use bevy::prelude::*;

use super::*;

struct Probe;

impl PoolKind for Probe {
    const LABEL: &'static str = "Probe";
    const PARKING: Vec3 = Vec3::new(0.0, 0.0, 500.0);
}

fn ids(world: &mut World, n: usize) -> Vec<Entity> {
    (0..n).map(|_| world.spawn_empty().id()).collect()
}

fn assert_disjoint(pool: &EntityPool<Probe>) {
    for e in pool.free() {
        assert!(!pool.is_active(*e), "{e} is both parked and active");
    }
    assert!(pool.free().len() <= pool.capacity());
}

#[test]
fn acquire_prefers_parked_entities() {
    let mut world = World::new();
    let mut pool = EntityPool::<Probe>::new(4);
    pool.prefill(|| world.spawn_empty().id());
    assert_eq!(pool.free().len(), 4);

    let parked = pool.free()[3];
    let got = pool.acquire(|| panic!("should not allocate while parked entities exist"));

    assert_eq!(got, Acquired::Recycled(parked));
    assert!(pool.is_active(parked));
    assert!(!pool.is_free(parked));
    assert_disjoint(&pool);
}

#[test]
fn acquire_allocates_when_empty() {
    let mut world = World::new();
    let mut pool = EntityPool::<Probe>::new(2);

    let fresh = world.spawn_empty().id();
    let got = pool.acquire(|| fresh);

    assert_eq!(got, Acquired::Fresh(fresh));
    assert_eq!(pool.active(), &[fresh]);
}

#[test]
fn release_parks_until_capacity_then_discards() {
    let mut world = World::new();
    let mut pool = EntityPool::<Probe>::new(2);
    let es = ids(&mut world, 3);

    for &e in &es {
        pool.acquire(|| e);
    }
    assert_eq!(pool.active_len(), 3);

    assert_eq!(pool.release(es[0]), Released::Pooled);
    assert_eq!(pool.release(es[1]), Released::Pooled);
    assert_eq!(pool.release(es[2]), Released::Discarded);

    assert_eq!(pool.free().len(), 2);
    assert_eq!(pool.active_len(), 0);
    assert_disjoint(&pool);
}

#[test]
fn double_release_is_a_no_op() {
    let mut world = World::new();
    let mut pool = EntityPool::<Probe>::new(4);
    let e = world.spawn_empty().id();

    pool.acquire(|| e);
    assert_eq!(pool.release(e), Released::Pooled);
    assert_eq!(pool.release(e), Released::NotActive);

    assert_eq!(pool.free(), &[e]);
}

#[test]
fn invariants_hold_over_mixed_acquire_release_sequence() {
    let mut world = World::new();
    let mut pool = EntityPool::<Probe>::new(3);
    pool.prefill(|| world.spawn_empty().id());

    // Deterministic interleaving; grows beyond capacity and shrinks back.
    let pattern = [true, true, true, true, true, false, false, true, false, false, false, false, true];
    for acquire in pattern {
        if acquire {
            let fresh = world.spawn_empty().id();
            pool.acquire(|| fresh);
        } else if let Some(&e) = pool.active().first() {
            pool.release(e);
        }
        assert_disjoint(&pool);
    }
}

#[test]
fn retire_parks_and_hides_entity() {
    let mut world = World::new();
    world.insert_resource(EntityPool::<Probe>::new(1));
    let e = world
        .spawn((Transform::from_xyz(1.0, 2.0, 3.0), Visibility::Visible))
        .id();
    world.resource_mut::<EntityPool<Probe>>().acquire(|| e);

    let outcome = crate::common::test_utils::run_system_once(
        &mut world,
        move |mut pool: ResMut<EntityPool<Probe>>, mut commands: Commands| {
            retire(&mut pool, &mut commands, e)
        },
    );

    assert_eq!(outcome, Released::Pooled);
    assert_eq!(world.get::<Transform>(e).unwrap().translation, Probe::PARKING);
    assert_eq!(*world.get::<Visibility>(e).unwrap(), Visibility::Hidden);
    assert!(world.resource::<EntityPool<Probe>>().is_free(e));
}

#[test]
fn retire_despawns_when_pool_full() {
    let mut world = World::new();
    world.insert_resource(EntityPool::<Probe>::new(0));
    let e = world.spawn((Transform::default(), Visibility::Visible)).id();
    world.resource_mut::<EntityPool<Probe>>().acquire(|| e);

    let outcome = crate::common::test_utils::run_system_once(
        &mut world,
        move |mut pool: ResMut<EntityPool<Probe>>, mut commands: Commands| {
            retire(&mut pool, &mut commands, e)
        },
    );

    assert_eq!(outcome, Released::Discarded);
    assert!(world.get_entity(e).is_err());
}

#[test]
fn retire_all_empties_active_list() {
    let mut world = World::new();
    world.insert_resource(EntityPool::<Probe>::new(2));
    let es: Vec<Entity> = (0..3)
        .map(|_| world.spawn((Transform::default(), Visibility::Visible)).id())
        .collect();
    {
        let mut pool = world.resource_mut::<EntityPool<Probe>>();
        for &e in &es {
            pool.acquire(|| e);
        }
    }

    crate::common::test_utils::run_system_once(
        &mut world,
        |mut pool: ResMut<EntityPool<Probe>>, mut commands: Commands| {
            retire_all(&mut pool, &mut commands);
        },
    );

    let pool = world.resource::<EntityPool<Probe>>();
    assert_eq!(pool.active_len(), 0);
    assert_eq!(pool.free().len(), 2);
    // One over capacity was despawned.
    let alive = es.iter().filter(|e| world.get_entity(**e).is_ok()).count();
    assert_eq!(alive, 2);
}
