//! Arcade Prototype - the runtime simulation of a small arcade/action game.
//!
//! An avatar runs and jumps on a play plane, enemies patrol, chase and fire
//! homing shots at it, and a camera rig orbits or trails it.
//!
//! # Architecture
//!
//! The game is organized into plugins, each handling a specific aspect:
//!
//! - **Core**: States, events, phase ordering, deferred timers, config
//! - **Input**: Device sampling into a per-frame input snapshot
//! - **Physics**: Velocity integration, plane pinning, Rapier bridge
//! - **Player**: Avatar movement controller and melee
//! - **Combat**: Health, hit flash, death policies
//! - **Enemies**: Turret aim, patrol, chase, fire control
//! - **Projectiles**: Homing shots
//! - **Camera**: Orbit/zoom/first-person and planar follow rigs
//! - **Session**: Score, game over and restart
//!
//! Collaborators that only feed or observe the simulation:
//!
//! - **World**: Builds levels from data and handles reloads
//! - **Audio**: Plays requested sounds
//! - **UI**: Health bar and score

pub mod audio;
pub mod camera;
pub mod combat;
pub mod core;
pub mod enemies;
pub mod input;
pub mod physics;
pub mod player;
pub mod projectiles;
pub mod session;
pub mod ui;
pub mod world;

use bevy::prelude::*;

use crate::core::ConfigSource;

/// Headless simulation: everything except the scene, audio and UI collaborators.
#[derive(Default)]
pub struct SimulationPlugin {
    pub config: ConfigSource,
}

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app
            // Core systems (must be first)
            .add_plugins(core::CorePlugin {
                config: self.config.clone(),
            })
            .add_plugins(input::InputSamplingPlugin)
            .add_plugins(physics::PhysicsPlugin)
            .add_plugins(player::PlayerPlugin)
            .add_plugins(combat::CombatPlugin)
            .add_plugins(enemies::EnemyPlugin)
            .add_plugins(projectiles::ProjectilePlugin)
            .add_plugins(camera::CameraPlugin)
            .add_plugins(session::SessionPlugin);
    }
}

/// Main game plugin: the simulation plus its collaborators.
#[derive(Default)]
pub struct ArcadePlugin {
    pub config: ConfigSource,
}

impl Plugin for ArcadePlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(SimulationPlugin {
            config: self.config.clone(),
        })
        .add_plugins(world::WorldPlugin)
        .add_plugins(audio::AudioBridgePlugin)
        .add_plugins(ui::UiPlugin);
    }
}
