//! In-game HUD - avatar health bar and score.

use bevy::prelude::*;

use crate::core::{GameState, HealthChanged};
use crate::player::Avatar;
use crate::session::GameSession;

/// Marker for HUD root entity.
#[derive(Component)]
pub struct HudRoot;

/// Marker for health bar fill.
#[derive(Component)]
pub struct HealthBar;

/// Marker for the score readout.
#[derive(Component)]
pub struct ScoreText;

/// Setup HUD systems.
pub fn setup_hud_systems(app: &mut App) {
    app.add_systems(OnEnter(GameState::InGame), spawn_hud)
        .add_systems(OnExit(GameState::InGame), cleanup_hud)
        .add_systems(
            Update,
            (update_health_bar, update_score_text).run_if(in_state(GameState::InGame)),
        );
}

/// Spawn the HUD UI.
fn spawn_hud(mut commands: Commands, session: Option<Res<GameSession>>) {
    let score = session.map(|s| s.score()).unwrap_or_default();

    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                justify_content: JustifyContent::SpaceBetween,
                align_items: AlignItems::Start,
                padding: UiRect::all(Val::Px(20.0)),
                ..default()
            },
            HudRoot,
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new(score_label(score)),
                TextFont {
                    font_size: 20.0,
                    ..default()
                },
                TextColor(Color::srgb(0.9, 0.9, 0.9)),
                ScoreText,
            ));

            spawn_health_bar(parent);
        });
}

fn spawn_health_bar(parent: &mut ChildBuilder) {
    parent
        .spawn(Node {
            flex_direction: FlexDirection::Row,
            align_items: AlignItems::Center,
            ..default()
        })
        .with_children(|row| {
            row.spawn((
                Text::new("Health"),
                TextFont {
                    font_size: 14.0,
                    ..default()
                },
                TextColor(Color::srgb(0.8, 0.8, 0.8)),
                Node {
                    width: Val::Px(60.0),
                    ..default()
                },
            ));

            row.spawn((
                Node {
                    width: Val::Px(150.0),
                    height: Val::Px(12.0),
                    ..default()
                },
                BackgroundColor(Color::srgb(0.1, 0.1, 0.1)),
            ))
            .with_children(|bg| {
                bg.spawn((
                    Node {
                        width: Val::Percent(100.0),
                        height: Val::Percent(100.0),
                        ..default()
                    },
                    BackgroundColor(Color::srgb(0.8, 0.2, 0.2)),
                    HealthBar,
                ));
            });
        });
}

fn score_label(score: u64) -> String {
    format!("Score: {score}")
}

/// Resize the bar from the avatar's latest health notification.
fn update_health_bar(
    mut changes: EventReader<HealthChanged>,
    avatars: Query<(), With<Avatar>>,
    mut bar_query: Query<&mut Node, With<HealthBar>>,
) {
    let Some(latest) = changes
        .read()
        .filter(|change| avatars.contains(change.entity))
        .last()
    else {
        return;
    };
    let Ok(mut bar) = bar_query.get_single_mut() else {
        return;
    };

    bar.width = Val::Percent(latest.fraction * 100.0);
}

fn update_score_text(
    session: Option<Res<GameSession>>,
    mut text_query: Query<&mut Text, With<ScoreText>>,
) {
    let Some(session) = session else {
        return;
    };
    if !session.is_changed() {
        return;
    }
    for mut text in text_query.iter_mut() {
        text.0 = score_label(session.score());
    }
}

/// Clean up HUD entities.
fn cleanup_hud(mut commands: Commands, query: Query<Entity, With<HudRoot>>) {
    for entity in query.iter() {
        commands.entity(entity).despawn_recursive();
    }
}
