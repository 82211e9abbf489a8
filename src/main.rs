//! Arcade Prototype - Entry Point
//!
//! Controls:
//! - A/D or arrows: Move
//! - Space: Jump
//! - F or left click: Attack
//! - Mouse / scroll: Orbit and zoom (orbit levels)
//! - R: New session

use bevy::prelude::*;
use bevy_kira_audio::AudioPlugin;
use bevy_rapier3d::prelude::*;

fn main() {
    App::new()
        // Bevy default plugins
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Arcade Prototype".to_string(),
                resolution: (1280.0, 720.0).into(),
                ..default()
            }),
            ..default()
        }))
        // Physics
        .add_plugins(RapierPhysicsPlugin::<NoUserData>::default())
        // Audio backend
        .add_plugins(AudioPlugin)
        // Our game plugin
        .add_plugins(arcade_prototype::ArcadePlugin::default())
        .run();
}
