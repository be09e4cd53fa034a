//! Test helpers.
//!
//! Systems run through `RunSystemOnce` against a bare `World`. Deferred commands
//! are applied with `world.flush()` before the caller asserts.

use bevy::ecs::message::Message;
use bevy::ecs::system::{IntoSystem, RunSystemOnce};
use bevy::prelude::*;

use crate::common::state::GamePhase;

/// Run a system once on the given world, then flush deferred commands.
/// Returns the system output.
pub fn run_system_once<T, Out, Marker>(world: &mut World, system: T) -> Out
where
    T: IntoSystem<(), Out, Marker>,
{
    let out = world.run_system_once(system).expect("system run failed");
    world.flush();
    out
}

/// Messages of type `M` still readable in the world's buffers.
pub fn count_messages<M: Message>(world: &mut World) -> usize {
    run_system_once(world, |mut reader: MessageReader<M>| reader.read().count())
}

/// Phase queued for the next state transition, if any.
pub fn pending_phase(world: &World) -> Option<GamePhase> {
    match world.resource::<NextState<GamePhase>>() {
        NextState::Pending(phase) => Some(*phase),
        _ => None,
    }
}
