//! Headless app helpers shared by the integration tests.

#![allow(dead_code)]

use std::time::Duration;

use arcade_prototype::core::{ConfigSource, SimulationConfig, SimulationProfile};
use arcade_prototype::input::{FrameInput, InputSettings, InputSource};
use arcade_prototype::physics::GroundContact;
use arcade_prototype::player::{spawn_avatar, AvatarSpawn};
use arcade_prototype::SimulationPlugin;
use bevy::ecs::event::Event;
use bevy::prelude::*;
use bevy::state::app::StatesPlugin;
use bevy::time::TimeUpdateStrategy;

/// Fixed frame length used by every test app.
pub const DT: f32 = 1.0 / 60.0;

/// Build a headless simulation with scripted input, already in `InGame`.
pub fn simulation_app(profile: SimulationProfile) -> App {
    let mut app = App::new();
    app.add_plugins((MinimalPlugins, StatesPlugin))
        .insert_resource(InputSettings {
            source: InputSource::Scripted,
            ..default()
        })
        .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f32(DT)))
        .add_plugins(SimulationPlugin {
            config: ConfigSource::Inline(SimulationConfig {
                profile,
                ..default()
            }),
        });

    // Loading -> InGame takes two frames
    app.update();
    app.update();
    app
}

/// Run `f` with a `Commands` bound to the app's world and apply it.
pub fn with_commands<R>(app: &mut App, f: impl FnOnce(&mut Commands) -> R) -> R {
    let world = app.world_mut();
    let result = {
        let mut commands = world.commands();
        f(&mut commands)
    };
    world.flush();
    result
}

/// Spawn an avatar that stands on solid ground.
pub fn grounded_avatar(app: &mut App, spawn: AvatarSpawn) -> Entity {
    let avatar = with_commands(app, |commands| spawn_avatar(commands, spawn));
    app.world_mut()
        .get_mut::<GroundContact>(avatar)
        .expect("avatar has ground contact")
        .grounded = true;
    avatar
}

pub fn set_input(app: &mut App, input: FrameInput) {
    *app.world_mut().resource_mut::<FrameInput>() = input;
}

pub fn run_frames(app: &mut App, frames: usize) {
    for _ in 0..frames {
        app.update();
    }
}

/// Take every pending event of type `E`.
pub fn drain<E: Event>(app: &mut App) -> Vec<E> {
    app.world_mut().resource_mut::<Events<E>>().drain().collect()
}

pub fn translation(app: &App, entity: Entity) -> Vec3 {
    app.world()
        .get::<Transform>(entity)
        .expect("entity has a transform")
        .translation
}
