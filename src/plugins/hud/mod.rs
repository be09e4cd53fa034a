//! HUD (render-only): score, hearts, overlays.
//!
//! Reads `GameState` through change detection; never writes it. The restart
//! button goes through `RestartRequested` like the keyboard does.
//!
//! | Overlay      | Lifetime                          |
//! |--------------|-----------------------------------|
//! | Loading      | `DespawnOnExit(Loading)`          |
//! | Paused       | `DespawnOnExit(Paused)`           |
//! | Game over    | `DespawnOnExit(GameOver)`         |
//! | Damage flash | always present, visibility driven |

use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::state::GamePhase;
use crate::plugins::assets::LoadProgress;
use crate::plugins::input::RestartRequested;
use crate::plugins::session::{DamageFlash, GameState};

#[cfg(test)]
mod tests;

const HEART_FULL: Color = Color::srgb(0.9, 0.1, 0.2);
const HEART_HALF: Color = Color::srgba(0.9, 0.1, 0.2, 0.45);
const HEART_EMPTY: Color = Color::srgba(0.4, 0.4, 0.4, 0.35);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeartState {
    Full,
    Half,
    Empty,
}

impl HeartState {
    fn color(self) -> Color {
        match self {
            Self::Full => HEART_FULL,
            Self::Half => HEART_HALF,
            Self::Empty => HEART_EMPTY,
        }
    }
}

/// One heart per life; a remaining half life shows a half heart.
pub fn heart_states(lives: f32) -> [HeartState; 3] {
    std::array::from_fn(|i| {
        let left = lives - i as f32;
        if left >= 1.0 {
            HeartState::Full
        } else if left >= 0.5 {
            HeartState::Half
        } else {
            HeartState::Empty
        }
    })
}

#[derive(Component)]
pub struct ScoreText;

#[derive(Component)]
pub struct Heart(pub usize);

#[derive(Component)]
pub struct DamageFlashOverlay;

#[derive(Component)]
struct LoadingText;

#[derive(Component)]
struct RestartButton;

pub fn plugin(app: &mut App) {
    app.add_systems(Startup, spawn_hud)
        .add_systems(OnEnter(GamePhase::Loading), spawn_loading_overlay)
        .add_systems(OnEnter(GamePhase::Paused), spawn_pause_overlay)
        .add_systems(OnEnter(GamePhase::GameOver), spawn_game_over_overlay)
        .add_systems(
            Update,
            (
                update_score_text,
                update_hearts,
                update_damage_flash,
                update_loading_text.run_if(in_state(GamePhase::Loading)),
                restart_button.run_if(in_state(GamePhase::GameOver)),
            ),
        );
}

fn spawn_hud(mut commands: Commands) {
    commands
        .spawn((
            Name::new("Hud"),
            Node {
                position_type: PositionType::Absolute,
                left: Val::Px(16.0),
                top: Val::Px(12.0),
                flex_direction: FlexDirection::Column,
                row_gap: Val::Px(8.0),
                ..default()
            },
        ))
        .with_children(|hud| {
            hud.spawn((
                ScoreText,
                Text::new("Score: 0"),
                TextFont { font_size: 24.0, ..default() },
                TextColor(Color::WHITE),
            ));
            hud.spawn(Node { column_gap: Val::Px(6.0), ..default() })
                .with_children(|row| {
                    for i in 0..3 {
                        row.spawn((
                            Heart(i),
                            Node {
                                width: Val::Px(22.0),
                                height: Val::Px(20.0),
                                ..default()
                            },
                            BackgroundColor(HEART_FULL),
                        ));
                    }
                });
        });

    commands.spawn((
        Name::new("DamageFlash"),
        DamageFlashOverlay,
        Node {
            position_type: PositionType::Absolute,
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            ..default()
        },
        BackgroundColor(Color::srgba(1.0, 0.0, 0.0, 0.3)),
        Visibility::Hidden,
        ZIndex(100),
    ));
}

fn overlay_root() -> impl Bundle {
    (
        Node {
            position_type: PositionType::Absolute,
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            flex_direction: FlexDirection::Column,
            justify_content: JustifyContent::Center,
            align_items: AlignItems::Center,
            row_gap: Val::Px(16.0),
            ..default()
        },
        BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.7)),
        ZIndex(200),
    )
}

fn title(text: impl Into<String>, size: f32, color: Color) -> impl Bundle {
    (Text::new(text), TextFont { font_size: size, ..default() }, TextColor(color))
}

fn spawn_loading_overlay(mut commands: Commands) {
    commands
        .spawn((Name::new("LoadingOverlay"), overlay_root(), DespawnOnExit(GamePhase::Loading)))
        .with_children(|o| {
            o.spawn((LoadingText, title("Loading assets: 0%", 28.0, Color::WHITE)));
        });
}

fn spawn_pause_overlay(mut commands: Commands) {
    commands
        .spawn((Name::new("PauseOverlay"), overlay_root(), DespawnOnExit(GamePhase::Paused)))
        .with_children(|o| {
            o.spawn(title("PAUSED", 46.0, Color::WHITE));
            o.spawn(title("Press Esc to resume", 18.0, Color::srgb(0.7, 0.7, 0.7)));
        });
}

fn spawn_game_over_overlay(mut commands: Commands, state: Res<GameState>) {
    commands
        .spawn((Name::new("GameOverOverlay"), overlay_root(), DespawnOnExit(GamePhase::GameOver)))
        .with_children(|o| {
            o.spawn(title("GAME OVER", 46.0, Color::srgb(1.0, 0.22, 0.22)));
            o.spawn(title(
                format!("Final score: {}", state.score().floor()),
                22.0,
                Color::WHITE,
            ));
            o.spawn((
                RestartButton,
                Button,
                Node {
                    width: Val::Px(200.0),
                    height: Val::Px(48.0),
                    justify_content: JustifyContent::Center,
                    align_items: AlignItems::Center,
                    ..default()
                },
                BackgroundColor(Color::srgb(0.15, 0.35, 0.2)),
            ))
            .with_children(|b| {
                b.spawn(title("RESTART", 20.0, Color::WHITE));
            });
        });
}

pub fn update_score_text(state: Res<GameState>, mut q: Query<&mut Text, With<ScoreText>>) {
    if !state.is_changed() {
        return;
    }
    for mut text in &mut q {
        text.0 = format!("Score: {}", state.score().floor());
    }
}

pub fn update_hearts(state: Res<GameState>, mut q: Query<(&Heart, &mut BackgroundColor)>) {
    if !state.is_changed() {
        return;
    }
    let hearts = heart_states(state.lives());
    for (heart, mut bg) in &mut q {
        if let Some(h) = hearts.get(heart.0) {
            bg.0 = h.color();
        }
    }
}

pub fn update_damage_flash(
    flash: Res<DamageFlash>,
    mut q: Query<&mut Visibility, With<DamageFlashOverlay>>,
) {
    let want = if flash.is_active() { Visibility::Visible } else { Visibility::Hidden };
    for mut vis in &mut q {
        vis.set_if_neq(want);
    }
}

fn update_loading_text(progress: Res<LoadProgress>, mut q: Query<&mut Text, With<LoadingText>>) {
    for mut text in &mut q {
        text.0 = format!("Loading assets: {}%", (progress.0 * 100.0).round());
    }
}

fn restart_button(
    q: Query<&Interaction, (Changed<Interaction>, With<RestartButton>)>,
    mut restart: MessageWriter<RestartRequested>,
) {
    for interaction in &q {
        if *interaction == Interaction::Pressed {
            restart.write(RestartRequested);
        }
    }
}
