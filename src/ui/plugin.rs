//! UI plugin - HUD and the game over banner.

use bevy::prelude::*;

use super::hud::{self, HudRoot};
use crate::core::GameState;
use crate::session::GameSession;

/// UI plugin - the UI collaborator; observes health and score only.
pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        hud::setup_hud_systems(app);

        app.add_systems(
            Update,
            show_game_over_banner.run_if(in_state(GameState::InGame)),
        );
    }
}

/// Marker for the game over overlay.
#[derive(Component)]
struct GameOverBanner;

/// Cover the screen while a session restart is pending.
fn show_game_over_banner(
    mut commands: Commands,
    session: Option<Res<GameSession>>,
    banners: Query<(), With<GameOverBanner>>,
) {
    let pending = session.is_some_and(|s| s.restart_pending());
    if !pending || !banners.is_empty() {
        return;
    }

    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                position_type: PositionType::Absolute,
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
            BackgroundColor(Color::srgba(0.1, 0.0, 0.0, 0.7)),
            GameOverBanner,
            HudRoot,
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new("GAME OVER"),
                TextFont {
                    font_size: 72.0,
                    ..default()
                },
                TextColor(Color::srgb(0.8, 0.2, 0.2)),
            ));
        });
}
