//! Fixed-capacity entity pools.
//!
//! # Ownership model
//! An `EntityPool<K>` owns **both** lists for its kind:
//! - `free`: parked entities (hidden, reset), bounded by `capacity`
//! - `active`: entities in play
//!
//! Moving between the two is a single method call, so an entity can never sit in
//! both lists, and releasing something that is not active is a no-op instead of a
//! double push.
//!
//! ```text
//!   acquire(spawn) ──► pop free ──┐            (or spawn fresh when free is empty)
//!                                 v
//!                              active
//!                                 │
//!   release(e) ◄──────────────────┘ ──► free.len() < capacity ? park : despawn
//! ```
//!
//! The pool only moves `Entity` ids. Writing transient state (position, scale,
//! visibility) is the caller's job, done through `Commands` so fresh and
//! recycled entities take the same path.

use std::marker::PhantomData;

use bevy::prelude::*;

#[cfg(test)]
mod tests;

/// A kind of pooled entity.
pub trait PoolKind: Send + Sync + 'static {
    const LABEL: &'static str;

    /// Where parked entities wait, out of play.
    const PARKING: Vec3;
}

/// Outcome of [`EntityPool::acquire`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Acquired {
    Recycled(Entity),
    Fresh(Entity),
}

impl Acquired {
    #[inline]
    pub fn entity(self) -> Entity {
        match self {
            Self::Recycled(e) | Self::Fresh(e) => e,
        }
    }
}

/// Outcome of [`EntityPool::release`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Released {
    /// Parked in the free list for reuse.
    Pooled,
    /// Free list full; the entity should be despawned.
    Discarded,
    /// Not in the active list (already released, or never acquired).
    NotActive,
}

#[derive(Resource, Debug)]
pub struct EntityPool<K: PoolKind> {
    free: Vec<Entity>,
    active: Vec<Entity>,
    capacity: usize,
    _kind: PhantomData<fn() -> K>,
}

impl<K: PoolKind> EntityPool<K> {
    pub fn new(capacity: usize) -> Self {
        Self {
            free: Vec::with_capacity(capacity),
            active: Vec::with_capacity(capacity),
            capacity,
            _kind: PhantomData,
        }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub fn free(&self) -> &[Entity] {
        &self.free
    }

    #[inline]
    pub fn active(&self) -> &[Entity] {
        &self.active
    }

    #[inline]
    pub fn active_len(&self) -> usize {
        self.active.len()
    }

    #[inline]
    pub fn is_active(&self, entity: Entity) -> bool {
        self.active.contains(&entity)
    }

    #[inline]
    pub fn is_free(&self, entity: Entity) -> bool {
        self.free.contains(&entity)
    }

    /// Fill the free list up to capacity with parked entities.
    pub fn prefill(&mut self, mut spawn: impl FnMut() -> Entity) {
        while self.free.len() < self.capacity {
            self.free.push(spawn());
        }
    }

    /// Hand out a parked entity, or a fresh one when none are parked.
    pub fn acquire(&mut self, spawn: impl FnOnce() -> Entity) -> Acquired {
        let acquired = match self.free.pop() {
            Some(e) => Acquired::Recycled(e),
            None => Acquired::Fresh(spawn()),
        };
        self.active.push(acquired.entity());
        acquired
    }

    /// Take an entity out of play.
    pub fn release(&mut self, entity: Entity) -> Released {
        let Some(idx) = self.active.iter().position(|&e| e == entity) else {
            return Released::NotActive;
        };
        // Active list is unordered.
        self.active.swap_remove(idx);

        if self.free.len() < self.capacity {
            self.free.push(entity);
            Released::Pooled
        } else {
            Released::Discarded
        }
    }
}

/// Release `entity` and apply the outcome to the world.
///
/// Parked entities are hidden and moved to `K::PARKING` with unit scale so a
/// later acquire never observes a stale in-play position.
pub fn retire<K: PoolKind>(
    pool: &mut EntityPool<K>,
    commands: &mut Commands,
    entity: Entity,
) -> Released {
    let outcome = pool.release(entity);
    match outcome {
        Released::Pooled => {
            commands
                .entity(entity)
                .insert((Transform::from_translation(K::PARKING), Visibility::Hidden));
        }
        Released::Discarded => {
            debug!("{} pool full; despawning {entity}", K::LABEL);
            commands.entity(entity).despawn();
        }
        Released::NotActive => {}
    }
    outcome
}

/// Return every active entity of kind `K` to the pool (up to capacity).
pub fn retire_all<K: PoolKind>(pool: &mut EntityPool<K>, commands: &mut Commands) {
    while let Some(&e) = pool.active.last() {
        retire(pool, commands, e);
    }
}
