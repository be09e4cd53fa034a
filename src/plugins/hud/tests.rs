use std::time::Duration;

use bevy::prelude::*;

use super::*;
use crate::common::test_utils::run_system_once;
use crate::common::tunables::Tunables;

#[test]
fn hearts_track_whole_and_half_lives() {
    use HeartState::*;
    assert_eq!(heart_states(3.0), [Full, Full, Full]);
    assert_eq!(heart_states(2.5), [Full, Full, Half]);
    assert_eq!(heart_states(1.5), [Full, Half, Empty]);
    assert_eq!(heart_states(0.5), [Half, Empty, Empty]);
    assert_eq!(heart_states(0.0), [Empty, Empty, Empty]);
    assert_eq!(heart_states(-1.0), [Empty, Empty, Empty]);
}

#[test]
fn score_text_shows_whole_points() {
    let mut world = World::new();
    let mut state = GameState::new(&Tunables::default());
    state.add_score(123.9);
    world.insert_resource(state);
    let e = world.spawn((ScoreText, Text::new("Score: 0"))).id();

    run_system_once(&mut world, update_score_text);

    assert_eq!(world.get::<Text>(e).unwrap().0, "Score: 123");
}

#[test]
fn hearts_recolor_after_hit() {
    let mut world = World::new();
    let mut state = GameState::new(&Tunables::default());
    state.lose_life(0.5);
    world.insert_resource(state);
    let hearts: Vec<Entity> = (0..3)
        .map(|i| world.spawn((Heart(i), BackgroundColor(HEART_FULL))).id())
        .collect();

    run_system_once(&mut world, update_hearts);

    assert_eq!(world.get::<BackgroundColor>(hearts[1]).unwrap().0, HEART_FULL);
    assert_eq!(world.get::<BackgroundColor>(hearts[2]).unwrap().0, HEART_HALF);
}

#[test]
fn flash_overlay_follows_damage_flash() {
    let mut world = World::new();
    let mut flash = DamageFlash::new(0.15);
    flash.trigger();
    world.insert_resource(flash);
    let e = world.spawn((DamageFlashOverlay, Visibility::Hidden)).id();

    run_system_once(&mut world, update_damage_flash);
    assert_eq!(*world.get::<Visibility>(e).unwrap(), Visibility::Visible);

    world.resource_mut::<DamageFlash>().tick(Duration::from_millis(200));
    run_system_once(&mut world, update_damage_flash);
    assert_eq!(*world.get::<Visibility>(e).unwrap(), Visibility::Hidden);
}
